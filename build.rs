fn main() {
    let commit = build_data::get_git_commit_short().unwrap_or_else(|_| "unknown".into());
    let dirty = build_data::get_git_dirty().map(|d| d.to_string()).unwrap_or_else(|_| "true".into());
    println!("cargo:rustc-env=GIT_COMMIT_SHORT={commit}");
    println!("cargo:rustc-env=GIT_DIRTY={dirty}");
    let _ = build_data::set_BUILD_DATE();
    let _ = build_data::set_BUILD_TIME();
    build_data::no_debug_rebuilds();
    println!(
        "cargo:rustc-env=NODEWATCH_USER_AGENT=NodeWatch/{}",
        env!("CARGO_PKG_VERSION")
    );
}
