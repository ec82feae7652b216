use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, info};

use crate::{
    banner::USER_AGENT,
    beacon::BeaconClient,
    config::Config,
    error::ProbeError,
    execution::{is_truthy, ExecutionClient},
    payload::StatusPayload,
};

/// What became of the payload once it was handed to the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Delivered(StatusCode),
    Rejected(StatusCode),
    Unreachable,
}

/// Checks one beacon/execution node pair and reports the result to a webhook.
pub struct NodeApiClient {
    client: Client,
    beacon: BeaconClient,
    execution: ExecutionClient,
    webhook_url: Url,
    beacon_is_connected: bool,
    execution_is_connected: bool,
    payload: StatusPayload,
}

impl NodeApiClient {
    pub fn new(config: &Config) -> Result<Self, ProbeError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            beacon: BeaconClient::new(client.clone(), config.beacon_node_url.clone()),
            execution: ExecutionClient::new(client.clone(), config.execution_node_url.clone()),
            client,
            webhook_url: config.webhook_url.clone(),
            beacon_is_connected: false,
            execution_is_connected: false,
            payload: StatusPayload::new(&config.node_name),
        })
    }

    #[cfg(test)]
    pub fn payload(&self) -> &StatusPayload {
        &self.payload
    }

    /// Probes both nodes. A node that cannot be reached is recorded as
    /// disconnected; this never fails.
    pub async fn check_connections(&mut self) {
        match self.beacon.get_spec().await {
            Ok(()) => self.beacon_is_connected = true,
            Err(e) => error!(
                "Failed to connect to beacon node | URL: {} | Error: {}",
                self.beacon.url(),
                e
            ),
        }
        self.payload.beacon_is_connected = Some(self.beacon_is_connected);

        match self.execution.client_version().await {
            Ok(_) => self.execution_is_connected = true,
            Err(e) => error!(
                "Failed to connect to execution node | URL: {} | Error: {}",
                self.execution.url(),
                e
            ),
        }
        self.payload.execution_is_connected = Some(self.execution_is_connected);
    }

    pub async fn check_beacon_node(&mut self) -> Result<(), ProbeError> {
        let is_syncing = self.beacon.is_syncing().await?;
        debug!("Beacon is syncing: {is_syncing}");
        self.payload.beacon_is_synced = Some(!is_syncing);

        let health = self.beacon.get_health().await?;
        debug!("Beacon health status: {health}");
        self.payload.beacon_health_status = Some(health);

        let peers = self.beacon.get_peer_count().await?;
        debug!("Beacon peers: {peers}");
        self.payload.beacon_peer_count = Some(peers);

        let version = self.beacon.get_version().await?;
        debug!("Beacon version info: {version}");
        self.payload.beacon_version = Some(version);
        Ok(())
    }

    pub async fn check_execution_node(&mut self) -> Result<(), ProbeError> {
        let height = self.execution.block_number().await?;
        debug!("Execution block height: {height}");
        self.payload.execution_block_height = Some(height);

        let syncing = self.execution.syncing().await?;
        debug!("Execution node is syncing: {syncing}");
        self.payload.execution_is_synced = Some(!is_truthy(&syncing));

        let version = self.execution.client_version().await?;
        debug!("Execution version info: {version}");
        self.payload.execution_version = Some(version);
        Ok(())
    }

    /// Posts the payload once. Delivery problems are logged, not returned.
    pub async fn send_output_payload(&self) -> WebhookOutcome {
        info!("Output payload: {:?}", self.payload);
        let result = self
            .client
            .post(self.webhook_url.clone())
            .json(&self.payload)
            .send()
            .await;
        match result {
            Ok(resp) if resp.status().is_success() => {
                info!("Successfully posted event payload to webhook");
                WebhookOutcome::Delivered(resp.status())
            }
            Ok(resp) => {
                error!("Failed to post event to webhook: {}", resp.status());
                WebhookOutcome::Rejected(resp.status())
            }
            Err(e) => {
                error!("Failed to post event to webhook: {e}");
                WebhookOutcome::Unreachable
            }
        }
    }

    /// Runs every check once and reports the result.
    ///
    /// An error from a node that passed its connectivity check ends the run
    /// before anything is posted.
    pub async fn run(&mut self) -> Result<WebhookOutcome, ProbeError> {
        self.check_connections().await;
        if self.beacon_is_connected {
            self.check_beacon_node().await?;
        }
        if self.execution_is_connected {
            self.check_execution_node().await?;
        }
        Ok(self.send_output_payload().await)
    }
}
