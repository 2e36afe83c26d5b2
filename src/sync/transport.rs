use std::{
    future::Future,
    time::Duration,
};

use reqwest::{
    header::CONTENT_TYPE,
    Client,
};

use crate::core::{
    AppConfig,
    PlannerError,
};

/// Status and body of a finished HTTP exchange. Non-2xx statuses are not
/// errors at this level; the gateway decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The two HTTP verbs the planner needs. `Err` means no response arrived.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<RawResponse, PlannerError>> + Send;

    fn put_json(
        &self,
        path: &str,
        body: String,
    ) -> impl Future<Output = Result<RawResponse, PlannerError>> + Send;
}

pub fn http_client(timeout_secs: u64) -> Result<Client, PlannerError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("course-planner/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PlannerError::Custom(format!("HTTP client build failed: {e}")))
}

pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, PlannerError> {
        Ok(Self {
            client: http_client(config.request_timeout_secs)?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<RawResponse, PlannerError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }

    async fn put_json(&self, path: &str, body: String) -> Result<RawResponse, PlannerError> {
        let resp = self
            .client
            .put(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }
}
