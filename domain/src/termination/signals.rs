//! Stateless termination heuristics over a message history

use super::similarity::normalized_ratio;
use crate::discussion::{Message, persona_response_counts};
use std::collections::BTreeMap;

/// Only the most recent messages are scanned for completion/agreement language
pub const RECENT_WINDOW: usize = 5;

pub const COMPLETION_PHRASES: &[&str] = &[
    "in conclusion",
    "to summarize",
    "in summary",
    "overall",
    "final thoughts",
    "to wrap up",
    "all things considered",
    "taking everything into account",
];

pub const AGREEMENT_PHRASES: &[&str] = &[
    "i agree",
    "agreed",
    "consensus",
    "we all",
    "everyone agrees",
    "we're aligned",
    "common ground",
    "same page",
];

fn recent(history: &[Message]) -> &[Message] {
    &history[history.len().saturating_sub(RECENT_WINDOW)..]
}

fn contains_any(content: &str, phrases: &[&str]) -> bool {
    let lower = content.to_lowercase();
    phrases.iter().any(|p| lower.contains(p))
}

/// Minimum-participation gate
///
/// With `expected` names, each must have spoken at least `minimum` times.
/// Without (or with an empty list), every persona that has spoken must
/// meet the minimum. A history with no persona messages never passes.
pub fn meets_minimum_responses(
    history: &[Message],
    minimum: usize,
    expected: Option<&[String]>,
) -> bool {
    let counts = persona_response_counts(history);
    if counts.is_empty() {
        return false;
    }

    match expected {
        Some(names) if !names.is_empty() => names
            .iter()
            .all(|name| counts.get(name).is_some_and(|&n| n >= minimum)),
        _ => counts.values().all(|&n| n >= minimum),
    }
}

/// Any of the last few messages contains a wrap-up phrase
pub fn has_completion_signal(history: &[Message]) -> bool {
    recent(history)
        .iter()
        .any(|m| contains_any(&m.content, COMPLETION_PHRASES))
}

/// At least two of the last few messages express agreement
///
/// Needs a history of at least three messages.
pub fn has_consensus_signal(history: &[Message]) -> bool {
    if history.len() < 3 {
        return false;
    }
    recent(history)
        .iter()
        .filter(|m| contains_any(&m.content, AGREEMENT_PHRASES))
        .count()
        >= 2
}

/// At least two speakers are repeating themselves
///
/// A speaker repeats when their latest message scores `threshold` or more
/// against any of their earlier messages. Needs at least six messages.
pub fn is_repetitive(history: &[Message], threshold: f64) -> bool {
    if history.len() < 6 {
        return false;
    }

    let mut by_speaker: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for msg in history {
        by_speaker
            .entry(msg.speaker.as_str())
            .or_default()
            .push(&msg.content);
    }

    let repeating = by_speaker
        .values()
        .filter(|contents| {
            let Some((latest, earlier)) = contents.split_last() else {
                return false;
            };
            earlier
                .iter()
                .any(|prev| normalized_ratio(latest, prev) >= threshold)
        })
        .count();

    repeating >= 2
}
