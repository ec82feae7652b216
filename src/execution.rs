use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use crate::error::ProbeError;

/// Read-only JSON-RPC client for an execution node.
#[derive(Clone, Debug)]
pub struct ExecutionClient {
    client: Client,
    url: Url,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl ExecutionClient {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &'static str) -> Result<T, ProbeError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": [],
        });
        let resp: RpcResponse<T> = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(ProbeError::Rpc {
                method,
                code: err.code,
                message: err.message,
            });
        }
        resp.result.ok_or_else(|| ProbeError::UnexpectedResponse {
            call: method,
            reason: "response carries neither result nor error".into(),
        })
    }

    /// `web3_clientVersion`. Also serves as the liveness probe.
    pub async fn client_version(&self) -> Result<String, ProbeError> {
        self.call("web3_clientVersion").await
    }

    /// Raw `eth_syncing` result: `false`, or an object describing sync progress.
    pub async fn syncing(&self) -> Result<Value, ProbeError> {
        self.call("eth_syncing").await
    }

    pub async fn block_number(&self) -> Result<u64, ProbeError> {
        let quantity: String = self.call("eth_blockNumber").await?;
        parse_quantity(&quantity).ok_or_else(|| ProbeError::UnexpectedResponse {
            call: "eth_blockNumber",
            reason: format!("{quantity:?} is not a hex quantity"),
        })
    }
}

fn parse_quantity(quantity: &str) -> Option<u64> {
    let digits = quantity.strip_prefix("0x")?;
    u64::from_str_radix(digits, 16).ok()
}

/// Whether a JSON value would count as "set": `false`, `null`, zero and empty
/// strings, arrays or objects do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
