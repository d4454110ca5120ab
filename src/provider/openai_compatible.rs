//! Chat Completions provider for OpenAI-compatible endpoints.
//!
//! DeepSeek, OpenRouter, and OpenAI all speak the same chat-completions
//! shape, so one provider type covers all three vendors.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::LoanlineError;
use crate::fallback::APOLOGY_REPLY;
use crate::types::{GenerationSettings, Role, Turn};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::CompletionProvider;

pub struct OpenAiCompatibleProvider {
    name: String,
    model: String,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    fn build_request_body(
        &self,
        messages: &[Turn],
        settings: &GenerationSettings,
    ) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = messages.iter().map(turn_to_wire).collect();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let obj = body.as_object_mut().unwrap();
        if let Some(temp) = settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }
        if let Some(max) = settings.max_tokens {
            obj.insert("max_tokens".into(), max.into());
        }

        body
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        messages: &[Turn],
        settings: &GenerationSettings,
    ) -> Result<String, LoanlineError> {
        let body = self.build_request_body(messages, settings);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(provider = %self.name, model = %self.model, "chat completion request");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        // Strict decode: a payload that doesn't match the expected shape
        // fails closed rather than silently producing an empty reply.
        let data: ChatCompletionResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LoanlineError::api(200, "No choices in completion response"))?;

        Ok(choice
            .message
            .content
            .unwrap_or_else(|| APOLOGY_REPLY.to_string()))
    }
}

fn turn_to_wire(turn: &Turn) -> serde_json::Value {
    let role = match turn.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    serde_json::json!({ "role": role, "content": turn.content })
}

// Chat Completions API response types (internal)

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
