//! Deterministic keyword responder.
//!
//! Used whenever the completion endpoint cannot produce a reply. A pure
//! function of the input text: ordered pattern rules, first match wins, no
//! session state and no network access. Every branch stays in character as a
//! senior loan agent so the conversation appears uninterrupted.

use std::sync::OnceLock;

use regex::Regex;

/// Reply used when a successful remote payload carries no content.
pub const APOLOGY_REPLY: &str =
    "I apologize, but I encountered an issue processing your request. Please try again.";

const GREETING_REPLY: &str = "Good day! I'm your senior personal loan specialist. \
     May I have your good name to begin our discussion?";

const LOAN_REPLY: &str = "I'd be happy to assist you with a personal loan. \
     To provide you with the best guidance, may I know your name and the \
     specific amount you're looking for?";

const AMOUNT_REPLY: &str = "Understood. To better assess your eligibility for this amount, \
     could you tell me about your current monthly income and employment situation?";

const INCOME_REPLY: &str = "Thank you for sharing your income details. \
     Do you have any existing loans or credit card dues I should be aware of \
     for a complete assessment?";

const DEFAULT_REPLY: &str = "As your personal loan specialist, I'd like to understand your \
     requirements better. May I have your name to begin our personalized discussion?";

fn name_strip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)my name is|i am|name is|i'm|name:").unwrap())
}

fn digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d").unwrap())
}

fn alphabetic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z\s]+$").unwrap())
}

/// Produce a canned reply for a user message. Rule order matters: a message
/// with digits never passes the bare-name alphabetic check, so "I need 5
/// lakhs" falls through to the amount rule rather than the name echo.
pub fn reply(user_text: &str) -> String {
    let message = user_text.trim().to_lowercase();

    // 1. Greeting.
    if contains_any(&message, &["hello", "hi", "hey"]) {
        return GREETING_REPLY.to_string();
    }

    // 2. Loan intent.
    if message.contains("loan") {
        return LOAN_REPLY.to_string();
    }

    // 3. Looks like the customer gave their name.
    let introduces_name = message.contains("name") && message.contains("my");
    let bare_name = message.len() < 30 && alphabetic_re().is_match(&message);
    if introduces_name || bare_name {
        let name = name_strip_re().replace_all(user_text.trim(), "");
        let name = name.trim();
        return format!(
            "Thank you, {name}. I'm here to help you with your personal loan needs. \
             Could you share what amount you're looking for and the purpose of the loan?"
        );
    }

    // 4. Amount mentioned.
    if message.contains("lakh") || message.contains("amount") || digit_re().is_match(&message) {
        return AMOUNT_REPLY.to_string();
    }

    // 5. Income details.
    if contains_any(&message, &["income", "salary", "earn"]) {
        return INCOME_REPLY.to_string();
    }

    // 6. Default.
    DEFAULT_REPLY.to_string()
}

fn contains_any(message: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| message.contains(t))
}
