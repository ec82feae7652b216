use serde::Serialize;

/// Status report for one node, as posted to the webhook.
///
/// Only `name` is always present. Every other key appears once the check
/// that produces it has run.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct StatusPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beacon_is_connected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_is_connected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beacon_health_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beacon_is_synced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beacon_peer_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beacon_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_is_synced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_block_height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_version: Option<String>,
}

impl StatusPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
