//! Application-level configuration.
//!
//! - [`DiscussionSettings`]: termination thresholds, pacing, instruction placement

pub mod discussion_settings;

pub use discussion_settings::{DiscussionSettings, MIN_PARTICIPANTS};
