//! Discussion settings: loop control for one discussion.
//!
//! [`DiscussionSettings`] groups the termination thresholds with the
//! application-level pacing and request-shaping options.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use submind_domain::{InstructionPlacement, TerminationConfig};

/// Fewest personas a discussion may run with
pub const MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionSettings {
    pub termination: TerminationConfig,
    /// Pause after every persona turn (pacing only)
    pub delay_between_subminds: Duration,
    pub instruction_placement: InstructionPlacement,
}

impl Default for DiscussionSettings {
    fn default() -> Self {
        Self {
            termination: TerminationConfig::default(),
            delay_between_subminds: Duration::ZERO,
            instruction_placement: InstructionPlacement::default(),
        }
    }
}

impl DiscussionSettings {
    // ==================== Builder Methods ====================

    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.termination.max_rounds = max_rounds;
        self
    }

    /// Only the round cap ends the discussion
    pub fn without_auto_terminate(mut self) -> Self {
        self.termination.detect_consensus = false;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay_between_subminds = delay;
        self
    }

    pub fn with_instruction_placement(mut self, placement: InstructionPlacement) -> Self {
        self.instruction_placement = placement;
        self
    }
}
