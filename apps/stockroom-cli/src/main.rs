//! # Stockroom Entry Point
//!
//! ```bash
//! stockroom add "Hex Bolt" 35 100 "Acme Hardware" "0047 1234 567"
//! stockroom list --json
//! stockroom sell 1
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::env;
use std::process::ExitCode;

use stockroom_cli::{init_tracing, AppConfig, AppState, Command, USAGE};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if command == Command::Help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    info!("Starting Stockroom");

    let config = match AppConfig::load(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::open(config).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = command.execute(&state).await;
    state.close().await;

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
