//! HTTP transport used by the notifier.
//!
//! The notifier only needs "POST a form" and "GET a URL"; keeping that behind
//! [`TelegramTransport`] lets tests script every response without a network.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Raw HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Failed(String),
}

#[async_trait]
pub trait TelegramTransport: Send + Sync {
    /// POST `form` as `application/x-www-form-urlencoded`.
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError>;

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

/// [`TelegramTransport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn read(response: reqwest::Response) -> Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;
        Ok(TransportResponse { status, body })
    }
}

// The Bot API URL embeds the token, so it is stripped from every error.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Failed(err.without_url().to_string())
    }
}

#[async_trait]
impl TelegramTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        Self::read(response).await
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        Self::read(response).await
    }
}
