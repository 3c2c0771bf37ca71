//! Append-only discussion transcript

use super::message::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Ordered, append-only log of one discussion (Entity)
///
/// Owned by exactly one discussion. Messages are never modified after
/// being pushed; only a full discussion reset clears the log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        if let Some(last) = self.messages.last()
            && last.round > message.round
        {
            warn!(
                "Message from {} has round {} after round {}",
                message.speaker, message.round, last.round
            );
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Messages appended during a given round (0 = user prompt)
    pub fn by_round(&self, round: u32) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.round == round).collect()
    }

    /// Messages from a given speaker name
    pub fn by_speaker(&self, speaker: &str) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.speaker.as_str() == speaker)
            .collect()
    }

    /// Message count per speaker, including `User` and `System`
    pub fn speaker_counts(&self) -> BTreeMap<String, usize> {
        count_by_speaker(self.messages.iter())
    }

    /// Message count per persona, excluding `User` and `System`
    pub fn persona_response_counts(&self) -> BTreeMap<String, usize> {
        persona_response_counts(&self.messages)
    }
}

impl IntoIterator for Transcript {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

/// Count persona messages per name in a history slice
pub fn persona_response_counts(history: &[Message]) -> BTreeMap<String, usize> {
    count_by_speaker(history.iter().filter(|m| m.speaker.is_persona()))
}

fn count_by_speaker<'a>(messages: impl Iterator<Item = &'a Message>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for msg in messages {
        *counts.entry(msg.speaker.to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Prompt"));
        transcript.push(Message::persona("A", "analytical", "one", 1, "m"));
        transcript.push(Message::persona("B", "skeptic", "two", 1, "m"));
        transcript.push(Message::persona("A", "analytical", "three", 2, "m"));
        transcript.push(Message::system("Discussion terminated: done", 2));
        transcript
    }

    #[test]
    fn test_by_round() {
        let transcript = sample();
        assert_eq!(transcript.by_round(0).len(), 1);
        assert_eq!(transcript.by_round(1).len(), 2);
        assert_eq!(transcript.by_round(2).len(), 2);
        assert!(transcript.by_round(3).is_empty());
    }

    #[test]
    fn test_by_speaker() {
        let transcript = sample();
        assert_eq!(transcript.by_speaker("A").len(), 2);
        assert_eq!(transcript.by_speaker("System").len(), 1);
    }

    #[test]
    fn test_counts_include_and_exclude_sentinels() {
        let transcript = sample();
        let all = transcript.speaker_counts();
        assert_eq!(all.get("User"), Some(&1));
        assert_eq!(all.get("System"), Some(&1));

        let personas = transcript.persona_response_counts();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas.get("A"), Some(&2));
        assert!(!personas.contains_key("User"));
    }

    #[test]
    fn test_clear() {
        let mut transcript = sample();
        transcript.clear();
        assert!(transcript.is_empty());
        assert!(transcript.last().is_none());
    }
}
