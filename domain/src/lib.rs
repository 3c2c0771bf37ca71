//! Domain layer for submind
//!
//! This crate contains the core types and rules of a persona discussion.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Subminds
//!
//! A submind (persona) is one configured participant with a fixed viewpoint,
//! taken from the role registry, and its own ordered model fallback chain.
//!
//! ## Discussion
//!
//! Subminds speak in turn, round after round, over a shared append-only
//! [`Transcript`]. After every round the [`TerminationPolicy`] decides
//! whether the discussion has run its course.

pub mod backend;
pub mod core;
pub mod discussion;
pub mod persona;
pub mod session;
pub mod termination;

// Re-export commonly used types
pub use backend::{RateLimitDetector, clean_response};
pub use core::error::DomainError;
pub use discussion::{
    DiscussionSummary, Message, SYSTEM_SPEAKER, Speaker, Transcript, USER_SPEAKER,
};
pub use persona::{InstructionPlacement, Persona, PersonaProfile, build_context};
pub use session::entities::{ChatMessage, ChatRole};
pub use termination::{TerminationConfig, TerminationDecision, TerminationPolicy};
