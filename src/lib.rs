//! Loanline — loan-assistant chat gateway.
//!
//! A small service that fronts a hosted chat-completion API for a
//! lead-generation loan assistant. Each conversation is scoped by a session
//! id with a capped rolling history; when the remote endpoint is missing,
//! slow, or broken, a deterministic keyword responder produces a plausible
//! reply so the conversation never surfaces a raw error.
//!
//! # Quick Start
//!
//! ```no_run
//! use loanline::config::AppConfig;
//! use loanline::gateway::ChatGateway;
//!
//! # async fn example() -> loanline::error::Result<()> {
//! let config = AppConfig::from_env();
//! let gateway = ChatGateway::from_config(&config);
//! let reply = gateway.respond("default", "hi").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod http;
pub mod provider;
pub mod session;
pub mod store;
pub mod types;
pub mod util;
