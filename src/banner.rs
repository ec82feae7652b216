use tracing::info;

pub(crate) const USER_AGENT: &str = env!("NODEWATCH_USER_AGENT");

/// Commit the binary was built from, or `SNAPSHOT` for uncommitted changes.
fn revision() -> &'static str {
    if env!("GIT_DIRTY") == "false" {
        env!("GIT_COMMIT_SHORT")
    } else {
        "SNAPSHOT"
    }
}

pub(crate) fn print_banner(node_name: &str) {
    info!(
        node = node_name,
        revision = revision(),
        built = concat!(env!("BUILD_DATE"), " ", env!("BUILD_TIME")),
        "NodeWatch v{} starting checks",
        env!("CARGO_PKG_VERSION")
    );
}
