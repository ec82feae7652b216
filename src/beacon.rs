use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::ProbeError;

/// Read-only client for the standard beacon node REST API.
#[derive(Clone, Debug)]
pub struct BeaconClient {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Deserialize)]
struct Syncing {
    is_syncing: bool,
}

#[derive(Deserialize)]
struct Version {
    version: String,
}

#[derive(Deserialize)]
struct Peers {
    meta: PeersMeta,
}

#[derive(Deserialize)]
struct PeersMeta {
    count: Count,
}

/// Some clients report `meta.count` as a decimal string instead of a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u64),
    Text(String),
}

impl BeaconClient {
    pub fn new(client: Client, mut base_url: Url) -> Self {
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    pub fn url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProbeError> {
        let resp = self
            .client
            .get(self.base_url.join(path)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Fetches the chain spec. Only used to tell whether the node answers.
    pub async fn get_spec(&self) -> Result<(), ProbeError> {
        self.client
            .get(self.base_url.join("eth/v1/config/spec")?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Returns the raw status code of the health endpoint (200, 206 or 503 on
    /// conforming nodes).
    pub async fn get_health(&self) -> Result<u16, ProbeError> {
        let resp = self
            .client
            .get(self.base_url.join("eth/v1/node/health")?)
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }

    pub async fn is_syncing(&self) -> Result<bool, ProbeError> {
        let syncing: Data<Syncing> = self.get_json("eth/v1/node/syncing").await?;
        Ok(syncing.data.is_syncing)
    }

    pub async fn get_peer_count(&self) -> Result<u64, ProbeError> {
        let peers: Peers = self.get_json("eth/v1/node/peers").await?;
        match peers.meta.count {
            Count::Number(n) => Ok(n),
            Count::Text(s) => s.parse().map_err(|_| ProbeError::UnexpectedResponse {
                call: "eth/v1/node/peers",
                reason: format!("peer count {s:?} is not a number"),
            }),
        }
    }

    pub async fn get_version(&self) -> Result<String, ProbeError> {
        let version: Data<Version> = self.get_json("eth/v1/node/version").await?;
        Ok(version.data.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn mount(server: &MockServer, endpoint: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn client_for(url: &str) -> BeaconClient {
        BeaconClient::new(Client::new(), url.parse().unwrap())
    }

    #[test]
    fn base_path_keeps_its_last_segment() {
        let beacon = client_for("http://localhost:5052/beacon");
        assert_eq!(
            beacon.url().join("eth/v1/node/health").unwrap().as_str(),
            "http://localhost:5052/beacon/eth/v1/node/health"
        );
    }

    #[tokio::test]
    async fn peer_count_ignores_peer_entries() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/eth/v1/node/peers",
            ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "peer_id": "16Uiu2HAm1", "state": "connected", "direction": "inbound" },
                    { "peer_id": "16Uiu2HAm2", "state": "connected", "direction": "outbound" }
                ],
                "meta": { "count": 7 }
            })),
        )
        .await;

        assert_eq!(client_for(&server.uri()).get_peer_count().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn peer_count_accepts_decimal_string() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/eth/v1/node/peers",
            ResponseTemplate::new(200).set_body_json(json!({ "data": [], "meta": { "count": "31" } })),
        )
        .await;

        assert_eq!(client_for(&server.uri()).get_peer_count().await.unwrap(), 31);
    }

    #[tokio::test]
    async fn health_reports_status_code_as_is() {
        let server = MockServer::start().await;
        mount(&server, "/eth/v1/node/health", ResponseTemplate::new(206)).await;

        assert_eq!(client_for(&server.uri()).get_health().await.unwrap(), 206);
    }

    #[tokio::test]
    async fn missing_version_field_is_an_error() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/eth/v1/node/version",
            ResponseTemplate::new(200).set_body_json(json!({ "data": {} })),
        )
        .await;

        assert!(client_for(&server.uri()).get_version().await.is_err());
    }

    #[tokio::test]
    async fn spec_requires_success_status() {
        let server = MockServer::start().await;
        mount(&server, "/eth/v1/config/spec", ResponseTemplate::new(503)).await;

        assert!(client_for(&server.uri()).get_spec().await.is_err());
    }
}
