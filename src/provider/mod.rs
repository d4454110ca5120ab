//! Completion provider trait and implementations.

pub mod http;
pub mod openai_compatible;
pub mod probe;

use async_trait::async_trait;
use tracing::warn;

use crate::config::{AppConfig, PRIMARY_PROVIDER};
use crate::error::LoanlineError;
use crate::types::{GenerationSettings, Turn};

/// Core trait implemented by all completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "deepseek", "openai").
    fn name(&self) -> &str;

    /// Turn a prompt sequence into reply text. One attempt, no retry.
    async fn complete(
        &self,
        messages: &[Turn],
        settings: &GenerationSettings,
    ) -> Result<String, LoanlineError>;
}

/// Create the primary chat provider from config.
///
/// Returns `None` when no API key is configured — the gateway then skips the
/// network entirely and answers from the keyword responder.
pub fn create_provider(config: &AppConfig) -> Option<Box<dyn CompletionProvider>> {
    let Some(api_key) = config.get_api_key(PRIMARY_PROVIDER) else {
        warn!(
            provider = PRIMARY_PROVIDER,
            "no API key configured; replies will come from the keyword responder"
        );
        return None;
    };

    Some(Box::new(
        openai_compatible::OpenAiCompatibleProvider::new(
            PRIMARY_PROVIDER,
            config.model(PRIMARY_PROVIDER),
            api_key,
            config.base_url(PRIMARY_PROVIDER),
        ),
    ))
}
