//! Discussion transcript domain.
//!
//! - [`message::Message`]: one utterance, tagged with speaker and round
//! - [`transcript::Transcript`]: the append-only log of one discussion
//! - [`summary::DiscussionSummary`]: statistics derived from a transcript

pub mod message;
pub mod summary;
pub mod transcript;

pub use message::{Message, SYSTEM_SPEAKER, Speaker, USER_SPEAKER};
pub use summary::DiscussionSummary;
pub use transcript::{Transcript, persona_response_counts};
