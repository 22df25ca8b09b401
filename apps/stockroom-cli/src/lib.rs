//! # Stockroom CLI Library
//!
//! Command layer and state for the `stockroom` binary.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── cli.rs          ◄─── Argument parsing and output
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (database + gateway + config)
//! │   └── config.rs   ◄─── AppConfig loading
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── List/show/delete commands
//! │   ├── edit.rs     ◄─── Create/edit form and save
//! │   └── sale.rs     ◄─── Sell one unit
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()         RUST_LOG or the default filter, to stderr    │
//! │  2. Command::parse(args)   usage on error                               │
//! │  3. AppConfig::load(None)  defaults → config.toml → STOCKROOM_* env     │
//! │  4. AppState::open(config) SQLite file, WAL, schema created if missing  │
//! │  5. command.execute(state) print the result                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub use cli::{CliError, Command, USAGE};
pub use error::{ApiError, ErrorCode};
pub use state::{AppConfig, AppState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Show trace for stockroom crates only
/// - Default: INFO, DEBUG for stockroom crates
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}
