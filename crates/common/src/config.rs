use serde::Deserialize;

/// Placeholder used when `TELEGRAM_BOT_TOKEN` is not provided.
pub const BOT_TOKEN_SENTINEL: &str = "YOUR_BOT_TOKEN_HERE";

/// Placeholder used when `TELEGRAM_CHAT_ID` is not provided.
pub const CHAT_ID_SENTINEL: &str = "YOUR_CHAT_ID_HERE";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Port the HTTP API listens on (default: 3000)
    pub api_port: u16,

    /// Secret used to sign session tokens
    pub jwt_secret: String,

    /// Session token expiry in hours
    pub jwt_expiry_hours: u64,

    /// Telegram notification credentials
    pub telegram: TelegramConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("API_PORT must be a valid u16"))?,
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
            jwt_expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRY_HOURS must be a valid u64"))?,
            telegram: TelegramConfig::from_env(),
        })
    }
}

/// Telegram bot credentials.
///
/// Built once at startup and handed to the notifier. Unset values carry their
/// sentinel so that [`TelegramConfig::validate`] can name the missing one.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    /// Base URL of the Bot API, without trailing slash
    pub api_url: String,
}

/// Why a [`TelegramConfig`] cannot be used for network calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("TELEGRAM_BOT_TOKEN not configured")]
    BotTokenMissing,

    #[error("TELEGRAM_CHAT_ID not configured")]
    ChatIdMissing,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }

    /// Credentials with both values left at their sentinels.
    pub fn unset() -> Self {
        Self::new(BOT_TOKEN_SENTINEL, CHAT_ID_SENTINEL)
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID` and `TELEGRAM_API_URL`.
    pub fn from_env() -> Self {
        let bot_token =
            std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_else(|_| BOT_TOKEN_SENTINEL.to_string());
        let chat_id =
            std::env::var("TELEGRAM_CHAT_ID").unwrap_or_else(|_| CHAT_ID_SENTINEL.to_string());
        let api_url = std::env::var("TELEGRAM_API_URL")
            .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_URL.to_string());

        Self::new(bot_token, chat_id).with_api_url(api_url)
    }

    /// Check that both credentials are set. The token is checked first.
    ///
    /// Pure: no network access, no logging.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if is_unset(&self.bot_token, BOT_TOKEN_SENTINEL) {
            return Err(CredentialError::BotTokenMissing);
        }
        if is_unset(&self.chat_id, CHAT_ID_SENTINEL) {
            return Err(CredentialError::ChatIdMissing);
        }
        Ok(())
    }
}

fn is_unset(value: &str, sentinel: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == sentinel
}
