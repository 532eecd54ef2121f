//! Todo API server -- token-gated task and label HTTP API.
//!
//! Tasks and labels live in process memory and are lost on restart.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:8080 with admin/admin credentials
//! cargo run --bin todo-server
//!
//! # Run on custom address
//! cargo run --bin todo-server -- --bind 127.0.0.1:3000
//!
//! # Or via environment variables
//! TODO_ADDR=127.0.0.1:3000 TODO_PASSWORD=hunter2 cargo run --bin todo-server
//! ```

use std::sync::Arc;

use clap::Parser;
use todo_server::config::{TodoCliArgs, TodoConfig};
use todo_server::server::{self, AppState};

#[tokio::main]
async fn main() {
    let cli = TodoCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match TodoConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting todo server");

    let state = Arc::new(AppState::from_config(&config));

    match server::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "todo server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "todo server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start todo server");
            std::process::exit(1);
        }
    }
}
