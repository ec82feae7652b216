use std::{num::ParseIntError, path::PathBuf, time::Duration};

use clap::Parser;
use reqwest::Url;

#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    /// Base URL of the beacon node REST API
    #[clap(long, env)]
    pub beacon_node_url: Url,

    /// URL of the execution node JSON-RPC endpoint
    #[clap(long, env)]
    pub execution_node_url: Url,

    /// Label reported as `name` in every payload
    #[clap(long, env)]
    pub node_name: String,

    /// Where the status payload is posted to
    #[clap(long = "webhook-url", env = "BEACONBOT_WEBHOOK_URL")]
    pub webhook_url: Url,

    /// File the log is written to in addition to stdout
    #[clap(long, env)]
    pub log_file_name: PathBuf,

    /// Timeout in seconds for every request to the nodes and the webhook.
    /// Unset leaves the HTTP client's own default in place.
    #[clap(long, env, value_parser = parse_seconds)]
    pub request_timeout: Option<Duration>,
}

fn parse_seconds(v: &str) -> Result<Duration, ParseIntError> {
    v.parse().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_are_accepted() {
        let config = Config::try_parse_from([
            "nodewatch",
            "--beacon-node-url", "http://localhost:5052",
            "--execution-node-url", "http://localhost:8545",
            "--node-name", "mainnet-01",
            "--webhook-url", "http://localhost:9000/hook",
            "--log-file-name", "nodewatch.log",
            "--request-timeout", "5",
        ])
        .unwrap();

        assert_eq!(config.node_name, "mainnet-01");
        assert_eq!(config.beacon_node_url.as_str(), "http://localhost:5052/");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn timeout_is_unset_by_default() {
        let config = Config::try_parse_from([
            "nodewatch",
            "--beacon-node-url", "http://localhost:5052",
            "--execution-node-url", "http://localhost:8545",
            "--node-name", "mainnet-01",
            "--webhook-url", "http://localhost:9000/hook",
            "--log-file-name", "nodewatch.log",
        ])
        .unwrap();

        if std::env::var_os("REQUEST_TIMEOUT").is_none() {
            assert_eq!(config.request_timeout, None);
        }
    }

    #[test]
    fn rejects_malformed_url() {
        let result = Config::try_parse_from([
            "nodewatch",
            "--beacon-node-url", "not a url",
            "--execution-node-url", "http://localhost:8545",
            "--node-name", "mainnet-01",
            "--webhook-url", "http://localhost:9000/hook",
            "--log-file-name", "nodewatch.log",
        ]);
        assert!(result.is_err());
    }
}
