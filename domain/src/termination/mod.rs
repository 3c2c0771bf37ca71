//! Termination policy for discussions
//!
//! [`policy::TerminationPolicy`] combines the stateless heuristics in
//! [`signals`] into one ordered decision per round.

pub mod policy;
pub mod signals;
pub mod similarity;

pub use policy::{TerminationConfig, TerminationDecision, TerminationPolicy};
