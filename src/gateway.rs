//! Session-scoped conversation proxy.
//!
//! Routes a user message to the completion endpoint with the fixed agent
//! script and the session's rolling history, and degrades to the keyword
//! responder on any remote failure. At most one remote attempt per message.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{LoanlineError, Result};
use crate::fallback;
use crate::provider::{create_provider, CompletionProvider};
use crate::session::SessionStore;
use crate::types::{GenerationSettings, Turn};
use crate::util::with_timeout;

/// Fixed instruction block prepended to every prompt. A multi-step
/// elicitation script: name, then loan amount and purpose, then income and
/// employment, then existing obligations, then personalized guidance.
pub const SYSTEM_PROMPT: &str = "\
You are a senior personal loan specialist with 15+ years of experience. Your primary role is to \
professionally guide customers through the complete loan process while systematically collecting \
all necessary information.

CRITICAL BEHAVIOR REQUIREMENTS:
1. ALWAYS start by asking for the customer's name in your first response
2. Systematically collect information in this order:
   - Customer name
   - Loan purpose and amount
   - Monthly income and employment
   - Current financial obligations
   - Credit score awareness
3. Maintain conversation context and refer back to previously provided information
4. Ask follow-up questions based on their responses
5. Provide personalized guidance based on collected information
6. Always sound like a professional senior agent, not a generic chatbot

INFORMATION COLLECTION FLOW:
Step 1: Introduction & Name
- \"Good day! I'm your senior personal loan specialist. May I have your good name to begin our discussion?\"

Step 2: Loan Requirements
- After getting name: \"Thank you, [Name]. Could you share what amount you're looking for and the purpose of the loan?\"

Step 3: Financial Assessment
- After loan details: \"Understood. To assess your eligibility, could you tell me about your current monthly income and employment situation?\"

Step 4: Additional Details
- Continue gathering: employment type, existing loans, credit score awareness

Step 5: Personalized Guidance
- Provide specific advice based on all collected information

Remember: You are a senior agent guiding customers through a professional loan assessment process. \
Always maintain context, refer to previously provided information, and ask logical follow-up questions.";

/// The conversation proxy. Owns the session store and (optionally) the
/// primary completion provider.
pub struct ChatGateway {
    provider: Option<Box<dyn CompletionProvider>>,
    sessions: SessionStore,
    settings: GenerationSettings,
    timeout: Duration,
}

impl ChatGateway {
    pub fn new(
        provider: Option<Box<dyn CompletionProvider>>,
        sessions: SessionStore,
        settings: GenerationSettings,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            sessions,
            settings,
            timeout,
        }
    }

    /// Build the gateway from config: primary provider (if its key is
    /// present), fresh session store, fixed generation settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            create_provider(config),
            SessionStore::new(),
            GenerationSettings::default(),
            config.request_timeout,
        )
    }

    /// Access the underlying session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Produce a reply for a user message within a session.
    ///
    /// Fails only on invalid input; every remote failure is absorbed by the
    /// keyword responder so the conversation appears uninterrupted. On a
    /// remote failure the session history is left untouched — neither the
    /// user turn nor the substitute reply is recorded.
    pub async fn respond(&self, session_id: &str, user_text: &str) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(LoanlineError::InvalidInput(
                "content must be a non-empty string".into(),
            ));
        }

        // Snapshot history before the network call; no lock is held across it.
        let history = self.sessions.history(session_id);
        let messages = assemble_prompt(&history, user_text);

        let remote = match &self.provider {
            Some(provider) => {
                with_timeout(self.timeout, provider.complete(&messages, &self.settings)).await
            }
            None => Err(LoanlineError::Configuration(
                "no completion provider configured".into(),
            )),
        };

        match remote {
            Ok(reply) => {
                debug!(session_id, turns = history.len(), "completion reply");
                self.sessions
                    .append(session_id, [Turn::user(user_text), Turn::assistant(reply.as_str())]);
                Ok(reply)
            }
            Err(err) if err.is_remote_unavailable() => {
                warn!(session_id, error = %err, "completion failed; using keyword responder");
                Ok(fallback::reply(user_text))
            }
            Err(err) => Err(err),
        }
    }
}

/// Prompt sequence: fixed system instructions, prior turns, new user turn.
fn assemble_prompt(history: &[Turn], user_text: &str) -> Vec<Turn> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Turn::system(SYSTEM_PROMPT));
    messages.extend_from_slice(history);
    messages.push(Turn::user(user_text));
    messages
}
