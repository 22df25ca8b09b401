//! # State Module
//!
//! Everything a command needs, opened once per process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig::load() ──► AppState::open(config)                          │
//! │                              │                                          │
//! │          ┌───────────────────┼───────────────────┐                     │
//! │          ▼                   ▼                   ▼                      │
//! │  ┌──────────────┐   ┌────────────────┐   ┌──────────────┐              │
//! │  │   Database   │   │    Gateway     │   │  AppConfig   │              │
//! │  │ (SqlitePool) │◄──│ (route, check, │   │ (currency,   │              │
//! │  │              │   │  write, notify)│   │  db path)    │              │
//! │  └──────────────┘   └────────────────┘   └──────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool                                  │
//! │  • Gateway: cheap to clone, shares the pool and notifier               │
//! │  • AppConfig: read-only after loading                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{AppConfig, ConfigError};

use stockroom_core::Router;
use stockroom_db::{Database, DbConfig, Gateway};
use tracing::info;

use crate::error::ApiError;

/// Process-wide application state.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
    gateway: Gateway,
    config: AppConfig,
}

impl AppState {
    /// Opens the configured database file and builds the gateway.
    pub async fn open(config: AppConfig) -> Result<Self, ApiError> {
        let path = config.resolve_database_path()?;
        info!(?path, "Database path determined");

        let db_config = DbConfig::new(path).max_connections(config.max_connections);
        let db = Database::new(db_config).await?;

        Ok(AppState::with_database(db, config))
    }

    /// Builds state over an already opened database.
    pub fn with_database(db: Database, config: AppConfig) -> Self {
        let gateway = db.gateway(Router::standard());
        AppState {
            db,
            gateway,
            config,
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.db.close().await;
    }
}
