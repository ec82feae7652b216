use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON-RPC call {method} failed with code {code}: {message}")]
    Rpc {
        method: &'static str,
        code: i64,
        message: String,
    },

    #[error("unexpected response to {call}: {reason}")]
    UnexpectedResponse { call: &'static str, reason: String },
}
