//! HTTP client for the exchange backend's mutating endpoints

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use shared::{DonatePayload, ExchangeConfig, ReceivePayload, SubmissionFailure};
use crate::error::ExchangeResult;
use crate::traits::TransactionBackend;

/// Real backend client posting JSON to `/api/donate` and `/api/receive`
pub struct RealBackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl RealBackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ExchangeResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ExchangeConfig) -> ExchangeResult<Self> {
        Self::new(config.backend_url.clone(), config.request_timeout)
    }

    /// Post once; the caller decides whether a failure is shown, never retried here
    async fn post<T: Serialize + Sync>(&self, endpoint: &str, body: &T) -> Result<(), SubmissionFailure> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SubmissionFailure::Unknown(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            429 | 503 => Err(SubmissionFailure::Unavailable),
            code => {
                let body = response.text().await.unwrap_or_default();
                match backend_message(&body) {
                    Some(message) => Err(SubmissionFailure::ValidationFailed(message)),
                    None => Err(SubmissionFailure::Unknown(format!("server error (status: {code})"))),
                }
            }
        }
    }
}

#[async_trait]
impl TransactionBackend for RealBackendClient {
    async fn donate(&self, payload: DonatePayload) -> Result<(), SubmissionFailure> {
        self.post("/api/donate", &payload).await
    }

    async fn receive(&self, payload: ReceivePayload) -> Result<(), SubmissionFailure> {
        self.post("/api/receive", &payload).await
    }
}

/// `error` field of a structured error body
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|error| error.as_str())
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
