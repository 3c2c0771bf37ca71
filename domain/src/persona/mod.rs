//! Persona (submind) domain.
//!
//! - [`entities::PersonaProfile`]: immutable persona configuration
//! - [`entities::Persona`]: a profile plus per-discussion counters
//! - [`roles`]: the fixed role → instruction text registry
//! - [`context`]: building a model request from the transcript

pub mod context;
pub mod entities;
pub mod roles;

pub use context::{InstructionPlacement, build_context};
pub use entities::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, Persona, PersonaProfile};
pub use roles::RoleDefinition;
