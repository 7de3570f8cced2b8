//! System prompt and wire message assembly.
//!
//! The system prompt carries the persona's voice: its prompt fragment plus a
//! data-grounding directive built from its focus areas. Wire messages are the
//! full session history in order, new user message last.

use vantage_types::chat::ChatMessage;
use vantage_types::llm::{Message, MessageRole};
use vantage_types::persona::Persona;

/// Builds the system prompt for a persona.
///
/// Layout:
/// ```text
/// {prompt_fragment}
///
/// Always provide specific numbers, metrics, and data-driven insights.
/// Use the persona's focus areas: {focus_areas}
/// ```
pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    /// Assemble the system prompt from the persona's fragment and focus areas.
    pub fn build(persona: &Persona) -> String {
        let mut sections = Vec::with_capacity(2);

        // Persona voice -- who the assistant speaks as
        if !persona.prompt_fragment.trim().is_empty() {
            sections.push(persona.prompt_fragment.trim().to_string());
        }

        // Grounding directive -- keeps answers quantitative and on-focus
        sections.push(format!(
            "Always provide specific numbers, metrics, and data-driven insights. \
             Use the persona's focus areas: {}",
            persona.focus_areas.join(", ")
        ));

        sections.join("\n\n")
    }
}

/// Map session history plus the new user message into wire messages.
///
/// History order is preserved exactly; the new message is always last. The
/// system prompt travels separately (see [`SystemPromptBuilder`]), so no
/// system-role message appears here.
pub fn conversation_messages(history: &[ChatMessage], new_message: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    for entry in history {
        messages.push(Message {
            role: entry.role,
            content: entry.content.clone(),
        });
    }
    messages.push(Message {
        role: MessageRole::User,
        content: new_message.to_string(),
    });
    messages
}
