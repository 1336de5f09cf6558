use crate::core::{CarInfoClient, ConfigProvider};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// 以 `GET {endpoint}?regNum=...` 查詢車輛資訊服務
#[derive(Debug, Clone)]
pub struct HttpCarInfoClient {
    client: Client,
    endpoint: String,
}

impl HttpCarInfoClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        Self::with_timeout(config.car_info_url(), config.request_timeout())
    }
}

#[async_trait]
impl CarInfoClient for HttpCarInfoClient {
    async fn fetch(&self, reg_num: &str) -> Result<serde_json::Value> {
        tracing::debug!("Making car info request for {} to: {}", reg_num, self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("regNum", reg_num)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Car info response status for {}: {}", reg_num, status);

        if !status.is_success() {
            return Err(CatalogError::RemoteRejection {
                reg_num: reg_num.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            CatalogError::malformed(format!("invalid JSON body for {}: {}", reg_num, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_passes_reg_num_as_query_param() {
        let server = MockServer::start();
        let body = serde_json::json!({"regNum": "AA1111", "mark": "Lada"});

        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/info")
                .query_param("regNum", "AA1111");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body.clone());
        });

        let client = HttpCarInfoClient::new(server.url("/info"));
        let doc = client.fetch("AA1111").await.unwrap();

        api_mock.assert();
        assert_eq!(doc, body);
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejection() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/info");
            then.status(404);
        });

        let client = HttpCarInfoClient::new(server.url("/info"));
        let result = client.fetch("ZZ9999").await;

        api_mock.assert();
        match result {
            Err(CatalogError::RemoteRejection { reg_num, status }) => {
                assert_eq!(reg_num, "ZZ9999");
                assert_eq!(status, 404);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/info");
            then.status(200).body("not json");
        });

        let client = HttpCarInfoClient::new(server.url("/info"));
        let result = client.fetch("AA1111").await;

        api_mock.assert();
        assert!(matches!(result, Err(CatalogError::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // 保留位址且沒有服務在聽
        let client = HttpCarInfoClient::with_timeout(
            "http://127.0.0.1:9/info",
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let result = client.fetch("AA1111").await;

        assert!(matches!(result, Err(CatalogError::Transport(_))));
    }
}
