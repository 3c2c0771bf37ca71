//! Discussion configuration from TOML (`[discussion]` section)
//!
//! ```toml
//! [discussion]
//! max_rounds = 3
//! detect_consensus = true
//! consensus_threshold = 0.7
//! minimum_responses_per_submind = 1
//! delay_between_subminds = 0.0
//! enable_export = true
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use submind_domain::TerminationConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    pub max_rounds: u32,
    pub detect_consensus: bool,
    pub consensus_threshold: f64,
    pub minimum_responses_per_submind: usize,
    /// Seconds to pause after each persona turn
    pub delay_between_subminds: f64,
    pub enable_export: bool,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        let termination = TerminationConfig::default();
        Self {
            max_rounds: termination.max_rounds,
            detect_consensus: termination.detect_consensus,
            consensus_threshold: termination.consensus_threshold,
            minimum_responses_per_submind: termination.minimum_responses_per_submind,
            delay_between_subminds: 0.0,
            enable_export: true,
        }
    }
}

impl FileDiscussionConfig {
    /// Pacing delay; values a `Duration` cannot hold fall back to zero
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_between_subminds.max(0.0)).unwrap_or(Duration::ZERO)
    }

    pub fn to_termination_config(&self) -> TerminationConfig {
        TerminationConfig {
            max_rounds: self.max_rounds,
            detect_consensus: self.detect_consensus,
            consensus_threshold: self.consensus_threshold,
            minimum_responses_per_submind: self.minimum_responses_per_submind,
        }
    }
}
