use crate::config::{CLASSIFIER_MAX_CHARS, REPLY_MARKER};

/// Cuts `text` down to its first `CLASSIFIER_MAX_CHARS` characters.
pub fn truncate_for_classifier(text: &str) -> &str {
    match text.char_indices().nth(CLASSIFIER_MAX_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn build_prompt(email_text: &str, category: &str) -> String {
    format!(
        "You are a helpful customer service agent.
Email category: {}

Customer email:
{}

Write a polite, concise reply template.
{}",
        category, email_text, REPLY_MARKER
    )
}

/// Pulls the reply out of generated text.
///
/// Text after the last `Reply:` marker wins. Without a marker, exact copies of the
/// prompt are removed and whatever is left is returned. Echoes that differ from the
/// prompt in any way are left in place.
pub fn extract_reply(generated: &str, prompt: &str) -> String {
    if let Some((_, reply)) = generated.rsplit_once(REPLY_MARKER) {
        return reply.trim().to_string();
    }
    if prompt.is_empty() {
        return generated.trim().to_string();
    }
    generated.replace(prompt, "").trim().to_string()
}
