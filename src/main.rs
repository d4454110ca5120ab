//! Loanline service binary.

use std::sync::Arc;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use loanline::config::AppConfig;
use loanline::gateway::ChatGateway;
use loanline::http::{start_http_server, HttpState};
use loanline::store::MessageStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    // The chat path must not depend on the database: if it is configured but
    // unreachable, run without persistence rather than refusing to start.
    let store = match config.database() {
        Some(db) => match MessageStore::connect(db).await {
            Ok(store) => Some(store),
            Err(err) => {
                warn!(error = %err, "database unavailable; continuing without persistence");
                None
            }
        },
        None => None,
    };

    let gateway = ChatGateway::from_config(&config);
    let state = Arc::new(HttpState {
        gateway,
        store,
        config,
    });

    if let Err(err) = start_http_server(state).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
