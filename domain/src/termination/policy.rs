//! Round-by-round termination decision

use super::signals::{
    has_completion_signal, has_consensus_signal, is_repetitive, meets_minimum_responses,
};
use crate::discussion::Message;
use serde::{Deserialize, Serialize};

pub const REASON_COMPLETION: &str = "Completion signals detected";
pub const REASON_CONSENSUS: &str = "Consensus reached";
pub const REASON_REPETITIVE: &str = "Discussion becoming repetitive";

/// Termination thresholds (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationConfig {
    /// Hard ceiling on discussion rounds
    pub max_rounds: u32,
    /// Enables the completion, consensus and repetition scans
    pub detect_consensus: bool,
    /// Similarity ratio at which a speaker counts as repeating
    pub consensus_threshold: f64,
    pub minimum_responses_per_submind: usize,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            detect_consensus: true,
            consensus_threshold: 0.7,
            minimum_responses_per_submind: 1,
        }
    }
}

impl TerminationConfig {
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_detect_consensus(mut self, enabled: bool) -> Self {
        self.detect_consensus = enabled;
        self
    }

    pub fn with_consensus_threshold(mut self, threshold: f64) -> Self {
        self.consensus_threshold = threshold;
        self
    }

    pub fn with_minimum_responses(mut self, minimum: usize) -> Self {
        self.minimum_responses_per_submind = minimum;
        self
    }
}

/// Outcome of one policy evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminationDecision {
    pub stop: bool,
    /// Empty when `stop` is false
    pub reason: String,
}

impl TerminationDecision {
    pub fn proceed() -> Self {
        Self {
            stop: false,
            reason: String::new(),
        }
    }

    pub fn stop(reason: impl Into<String>) -> Self {
        Self {
            stop: true,
            reason: reason.into(),
        }
    }
}

/// Decides after each round whether a discussion ends
///
/// Rules are evaluated in a fixed order and the first match wins:
///
/// 1. minimum-participation gate (unmet: continue, but never past the cap)
/// 2. hard cap on `max_rounds`
/// 3. detection disabled: continue
/// 4. completion phrases in the recent messages
/// 5. agreement phrases in at least two recent messages
/// 6. repetition by two or more speakers (from round 2 on)
#[derive(Debug, Clone, Default)]
pub struct TerminationPolicy {
    config: TerminationConfig,
}

impl TerminationPolicy {
    pub fn new(config: TerminationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TerminationConfig {
        &self.config
    }

    pub fn max_rounds_reason(&self) -> String {
        format!("Maximum rounds ({}) reached", self.config.max_rounds)
    }

    pub fn should_terminate(
        &self,
        history: &[Message],
        current_round: u32,
        expected: Option<&[String]>,
    ) -> TerminationDecision {
        let at_cap = current_round >= self.config.max_rounds;

        if !meets_minimum_responses(
            history,
            self.config.minimum_responses_per_submind,
            expected,
        ) {
            // The cap still binds so a persona whose turns keep failing
            // cannot hold the discussion open forever.
            if at_cap {
                return TerminationDecision::stop(self.max_rounds_reason());
            }
            return TerminationDecision::proceed();
        }

        if at_cap {
            return TerminationDecision::stop(self.max_rounds_reason());
        }

        if !self.config.detect_consensus {
            return TerminationDecision::proceed();
        }

        if has_completion_signal(history) {
            return TerminationDecision::stop(REASON_COMPLETION);
        }

        if has_consensus_signal(history) {
            return TerminationDecision::stop(REASON_CONSENSUS);
        }

        if current_round > 1 && is_repetitive(history, self.config.consensus_threshold) {
            return TerminationDecision::stop(REASON_REPETITIVE);
        }

        TerminationDecision::proceed()
    }

    /// Progress line such as `Round 2/3 (1 remaining)`
    pub fn status(&self, current_round: u32) -> String {
        let max = self.config.max_rounds;
        format!(
            "Round {}/{} ({} remaining)",
            current_round,
            max,
            max.saturating_sub(current_round)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(name: &str, content: &str, round: u32) -> Message {
        Message::persona(name, "analytical", content, round, "m")
    }

    fn expected() -> Vec<String> {
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    }

    fn repetitive_history(second_round: u32) -> Vec<Message> {
        vec![
            Message::user("Prompt"),
            persona("A", "We must measure outcomes first.", 1),
            persona("B", "The risks are too high here.", 1),
            persona("C", "Imagine a new approach.", 1),
            persona("A", "We must measure outcomes first.", second_round),
            persona("B", "The risks are too high here!", second_round),
            persona("C", "Let us try something else now.", second_round),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = TerminationConfig::default();
        assert_eq!(config.max_rounds, 3);
        assert!(config.detect_consensus);
        assert_eq!(config.consensus_threshold, 0.7);
        assert_eq!(config.minimum_responses_per_submind, 1);
    }

    #[test]
    fn test_continue_when_nothing_matches() {
        let policy = TerminationPolicy::default();
        let history = vec![
            Message::user("Prompt"),
            persona("A", "First idea.", 1),
            persona("B", "Second idea.", 1),
            persona("C", "Third idea.", 1),
        ];
        let decision = policy.should_terminate(&history, 1, Some(&expected()));
        assert_eq!(decision, TerminationDecision::proceed());
    }

    #[test]
    fn test_cap_stops_with_detection_disabled() {
        let policy = TerminationPolicy::new(
            TerminationConfig::default()
                .with_max_rounds(2)
                .with_detect_consensus(false),
        );
        let history = vec![
            Message::user("Prompt"),
            persona("A", "x", 1),
            persona("B", "y", 1),
            persona("C", "z", 1),
        ];
        assert!(!policy.should_terminate(&history, 1, Some(&expected())).stop);

        let decision = policy.should_terminate(&history, 2, Some(&expected()));
        assert!(decision.stop);
        assert_eq!(decision.reason, "Maximum rounds (2) reached");
    }

    #[test]
    fn test_unmet_gate_continues_below_cap() {
        let policy = TerminationPolicy::default();
        let history = vec![
            Message::user("Prompt"),
            persona("A", "In conclusion, done.", 1),
            persona("B", "I agree.", 1),
        ];
        // C never spoke: completion and agreement are ignored
        let decision = policy.should_terminate(&history, 2, Some(&expected()));
        assert!(!decision.stop);
        assert!(decision.reason.is_empty());
    }

    #[test]
    fn test_cap_overrides_unmet_gate() {
        let policy = TerminationPolicy::default();
        let history = vec![Message::user("Prompt"), persona("A", "alone", 1)];
        let decision = policy.should_terminate(&history, 3, Some(&expected()));
        assert!(decision.stop);
        assert_eq!(decision.reason, "Maximum rounds (3) reached");
    }

    #[test]
    fn test_completion_signal() {
        let policy = TerminationPolicy::default();
        let history = vec![
            Message::user("Prompt"),
            persona("A", "Some thoughts.", 1),
            persona("B", "To summarize: ship it.", 1),
            persona("C", "Fine.", 1),
        ];
        let decision = policy.should_terminate(&history, 1, Some(&expected()));
        assert_eq!(decision, TerminationDecision::stop("Completion signals detected"));
    }

    #[test]
    fn test_consensus_signal() {
        let policy = TerminationPolicy::default();
        let history = vec![
            Message::user("Prompt"),
            persona("A", "Let's pilot it.", 1),
            persona("B", "I agree with A.", 1),
            persona("C", "We have common ground.", 1),
        ];
        let decision = policy.should_terminate(&history, 1, Some(&expected()));
        assert_eq!(decision, TerminationDecision::stop("Consensus reached"));
    }

    #[test]
    fn test_repetition_only_after_first_round() {
        let policy =
            TerminationPolicy::new(TerminationConfig::default().with_consensus_threshold(0.9));

        let history = repetitive_history(1);
        assert!(!policy.should_terminate(&history, 1, Some(&expected())).stop);

        let history = repetitive_history(2);
        let decision = policy.should_terminate(&history, 2, Some(&expected()));
        assert_eq!(
            decision,
            TerminationDecision::stop("Discussion becoming repetitive")
        );
    }

    #[test]
    fn test_detection_disabled_ignores_signals() {
        let policy =
            TerminationPolicy::new(TerminationConfig::default().with_detect_consensus(false));
        let history = vec![
            Message::user("Prompt"),
            persona("A", "In conclusion.", 1),
            persona("B", "I agree.", 1),
            persona("C", "Agreed.", 1),
        ];
        assert!(!policy.should_terminate(&history, 1, Some(&expected())).stop);
    }

    #[test]
    fn test_status() {
        let policy = TerminationPolicy::default();
        assert_eq!(policy.status(1), "Round 1/3 (2 remaining)");
        assert_eq!(policy.status(5), "Round 5/3 (0 remaining)");
    }
}
