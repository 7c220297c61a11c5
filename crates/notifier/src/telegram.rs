//! Telegram Bot API dispatcher and connection tester.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use shipdesk_common::config::TelegramConfig;
use shipdesk_common::types::RequestRecord;

use crate::error::{DispatchResult, NotifyError};
use crate::format::format_request_message;
use crate::transport::{ReqwestTransport, TelegramTransport, TransportError, TransportResponse};

/// Upper bound on a single Bot API call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    description: Option<String>,
}

/// Sends new-request notifications to the configured chat.
///
/// Both [`send`](Self::send) and [`test_connection`](Self::test_connection)
/// check the credentials first and never touch the network when they are
/// unset. Each call is a single attempt with no retry.
pub struct TelegramNotifier {
    config: TelegramConfig,
    transport: Arc<dyn TelegramTransport>,
    timeout: Duration,
}

impl TelegramNotifier {
    /// Notifier using the real HTTP transport and [`DEFAULT_TIMEOUT`].
    pub fn new(config: TelegramConfig) -> Self {
        Self::with_request_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Notifier using the real HTTP transport, with `timeout` applied both by
    /// the HTTP client and around each call.
    pub fn with_request_timeout(config: TelegramConfig, timeout: Duration) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport::new(timeout))).with_timeout(timeout)
    }

    pub fn with_transport(config: TelegramConfig, transport: Arc<dyn TelegramTransport>) -> Self {
        Self {
            config,
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Outer bound around each transport call. The transport keeps its own
    /// limit, so raising this past it has no effect; use
    /// [`with_request_timeout`](Self::with_request_timeout) for the real client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Send a notification about `record`.
    pub async fn send(&self, record: &RequestRecord, delivery_type: &str) -> DispatchResult {
        match self.try_send(record, delivery_type).await {
            Ok(()) => {
                tracing::info!(request_id = %record.request_id, "Telegram notification sent");
                DispatchResult::success("Notification sent successfully")
            }
            Err(err) => {
                match &err {
                    NotifyError::Configuration(_) => {
                        tracing::warn!(error = %err, "Telegram configuration invalid")
                    }
                    _ => tracing::debug!(
                        request_id = %record.request_id,
                        error = %err,
                        "Telegram dispatch failed"
                    ),
                }
                DispatchResult::failure(&err)
            }
        }
    }

    /// Check the credentials against the `getMe` endpoint.
    pub async fn test_connection(&self) -> DispatchResult {
        match self.try_get_me().await {
            Ok(bot_name) => {
                tracing::info!(bot = %bot_name, "Connected to Telegram bot");
                DispatchResult::success(format!("Connected to bot: {}", bot_name))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Telegram connection test failed");
                DispatchResult::failure(&err)
            }
        }
    }

    async fn try_send(&self, record: &RequestRecord, delivery_type: &str) -> Result<(), NotifyError> {
        self.config.validate()?;

        let text = format_request_message(record, delivery_type);
        let url = self.endpoint("sendMessage");
        let form = [
            ("chat_id", self.config.chat_id.as_str()),
            ("text", text.as_str()),
            ("parse_mode", "HTML"),
            ("disable_web_page_preview", "true"),
        ];

        let response = self.bounded(self.transport.post_form(&url, &form)).await?;
        Self::decode(response)?;
        Ok(())
    }

    async fn try_get_me(&self) -> Result<String, NotifyError> {
        self.config.validate()?;

        let url = self.endpoint("getMe");
        let response = self.bounded(self.transport.get(&url)).await?;
        let result = Self::decode(response)?;

        let name = result
            .as_ref()
            .and_then(|r| r.get("first_name"))
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown")
            .to_string();
        Ok(name)
    }

    /// Apply the notifier timeout on top of whatever the transport enforces.
    async fn bounded<F>(&self, call: F) -> Result<TransportResponse, NotifyError>
    where
        F: std::future::Future<Output = Result<TransportResponse, TransportError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(outcome) => outcome.map_err(NotifyError::from),
            Err(_) => Err(NotifyError::Timeout),
        }
    }

    /// Classify an HTTP response, returning the `result` payload on success.
    fn decode(response: TransportResponse) -> Result<Option<serde_json::Value>, NotifyError> {
        if !response.is_success() {
            tracing::error!(
                status = response.status,
                body = %response.body,
                "Telegram API returned HTTP error"
            );
            return Err(NotifyError::HttpStatus(response.status));
        }

        let parsed: ApiResponse = serde_json::from_str(&response.body)
            .map_err(|e| NotifyError::Unexpected(format!("invalid response body: {}", e)))?;

        if !parsed.ok {
            let description = parsed
                .description
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(NotifyError::Api(description));
        }

        Ok(parsed.result)
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.config.api_url, self.config.bot_token, method)
    }
}
