//! Derived discussion statistics

use super::message::Message;
use super::transcript::Transcript;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only snapshot of a discussion (Value Object)
///
/// Computed on demand from the transcript and the orchestrator state;
/// never stored independently of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionSummary {
    pub user_prompt: Option<String>,
    pub total_messages: usize,
    pub total_rounds: u32,
    pub speaker_counts: BTreeMap<String, usize>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<f64>,
    pub participants: Vec<String>,
}

impl DiscussionSummary {
    pub fn from_transcript(
        transcript: &Transcript,
        total_rounds: u32,
        participants: Vec<String>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        let user_prompt = transcript
            .messages()
            .first()
            .filter(|m| m.round == 0)
            .map(|m: &Message| m.content.clone());

        let duration_seconds = match (start_time, end_time) {
            (Some(start), Some(end)) => {
                Some((end - start).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        };

        Self {
            user_prompt,
            total_messages: transcript.len(),
            total_rounds,
            speaker_counts: transcript.speaker_counts(),
            start_time,
            end_time,
            duration_seconds,
            participants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_summary_from_transcript() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Should we build a bridge?"));
        transcript.push(Message::persona("A", "analytical", "Yes", 1, "m"));
        transcript.push(Message::persona("B", "skeptic", "No", 1, "m"));

        let start = Utc::now();
        let end = start + Duration::milliseconds(2500);
        let summary = DiscussionSummary::from_transcript(
            &transcript,
            1,
            vec!["A".to_string(), "B".to_string()],
            Some(start),
            Some(end),
        );

        assert_eq!(summary.user_prompt.as_deref(), Some("Should we build a bridge?"));
        assert_eq!(summary.total_messages, 3);
        assert_eq!(summary.total_rounds, 1);
        assert_eq!(summary.speaker_counts.get("User"), Some(&1));
        assert_eq!(summary.duration_seconds, Some(2.5));
    }

    #[test]
    fn test_summary_without_end_has_no_duration() {
        let summary =
            DiscussionSummary::from_transcript(&Transcript::new(), 0, vec![], Some(Utc::now()), None);
        assert!(summary.duration_seconds.is_none());
        assert!(summary.user_prompt.is_none());
    }
}
