//! Shared application state for the Axum API server.

use std::sync::Arc;

use shipdesk_common::config::AppConfig;
use shipdesk_notifier::TelegramNotifier;
use sqlx::PgPool;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: AppConfig,
    pub notifier: Arc<TelegramNotifier>,
}

impl AppState {
    /// State with a notifier built from `config.telegram`.
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let notifier = Arc::new(TelegramNotifier::new(config.telegram.clone()));
        Self::with_notifier(pool, config, notifier)
    }

    pub fn with_notifier(pool: PgPool, config: AppConfig, notifier: Arc<TelegramNotifier>) -> Self {
        Self {
            pool,
            config,
            notifier,
        }
    }
}
