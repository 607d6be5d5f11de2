//! HTTP client for the IDS backend.

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;

use crate::api::types::{
    ControlAction, ControlRequest, ControlResponse, HealthResponse, LogBatch, StatusSnapshot,
    UploadResponse,
};
use crate::config::DashboardConfig;
use crate::constants;
use crate::error::{DashboardError, DashboardResult};

/// Seam between the polling engine and the backend. The production
/// implementation is [`ApiClient`]; tests drive the poller with a scripted
/// backend instead.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_status(&self) -> DashboardResult<StatusSnapshot>;
    async fn fetch_logs(&self, limit: usize) -> DashboardResult<LogBatch>;
    async fn send_control(&self, action: ControlAction) -> DashboardResult<ControlResponse>;
    async fn upload_capture(&self, file_name: &str, bytes: Vec<u8>)
        -> DashboardResult<UploadResponse>;
    async fn health(&self) -> DashboardResult<HealthResponse>;
}

/// reqwest-backed implementation of the backend contract.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> DashboardResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DashboardError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: config.server_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the response status, then decode the body. Non-2xx and
    /// undecodable bodies both count as transport failures for the caller.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> DashboardResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Transport(format!("HTTP {}", status)));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::Transport(format!("invalid response body: {}", e)))
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn fetch_status(&self) -> DashboardResult<StatusSnapshot> {
        let response = self.http.get(self.url(constants::STATUS_PATH)).send().await?;
        Self::decode(response).await
    }

    async fn fetch_logs(&self, limit: usize) -> DashboardResult<LogBatch> {
        let response = self
            .http
            .get(self.url(constants::LOGS_PATH))
            .query(&[("limit", limit)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn send_control(&self, action: ControlAction) -> DashboardResult<ControlResponse> {
        let response = self
            .http
            .post(self.url(constants::CONTROL_PATH))
            .json(&ControlRequest { action })
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn upload_capture(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> DashboardResult<UploadResponse> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.url(constants::UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn health(&self) -> DashboardResult<HealthResponse> {
        let response = self.http.get(self.url(constants::HEALTH_PATH)).send().await?;
        Self::decode(response).await
    }
}
