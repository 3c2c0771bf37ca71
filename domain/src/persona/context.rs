//! Per-persona request context
//!
//! Turns the shared transcript into the role-ordered turns sent to the
//! model for one persona. The persona's instruction text appears exactly
//! once, before any other content.

use crate::discussion::{Message, Speaker};
use crate::session::entities::{ChatMessage, ChatRole};
use serde::{Deserialize, Serialize};

/// Where the persona's instruction text is placed in the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionPlacement {
    /// Prepend to the first user-role turn (backends without a system channel)
    #[default]
    PrependToFirstTurn,
    /// Send as a separate leading system turn
    SystemTurn,
}

/// Build the request turns for `persona_name` from `history`
///
/// Own messages become assistant turns, the user prompt becomes a user
/// turn, and every other speaker becomes a user turn labelled
/// `[Speaker]: content`.
pub fn build_context(
    persona_name: &str,
    instructions: &str,
    history: &[Message],
    placement: InstructionPlacement,
) -> Vec<ChatMessage> {
    let mut turns = Vec::with_capacity(history.len() + 1);

    if placement == InstructionPlacement::SystemTurn {
        turns.push(ChatMessage::system(instructions));
    }
    let mut instructions_added = placement == InstructionPlacement::SystemTurn;

    for msg in history {
        let (role, content) = match &msg.speaker {
            Speaker::Persona(name) if name == persona_name => {
                (ChatRole::Assistant, msg.content.clone())
            }
            Speaker::User => (ChatRole::User, msg.content.clone()),
            other => (ChatRole::User, format!("[{}]: {}", other, msg.content)),
        };

        let content = if role == ChatRole::User && !instructions_added {
            instructions_added = true;
            format!("{}\n\n{}", instructions, content)
        } else {
            content
        };

        turns.push(ChatMessage { role, content });
    }

    if !instructions_added {
        turns.insert(0, ChatMessage::user(instructions));
    }

    turns
}
