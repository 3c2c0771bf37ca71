//! Use cases (application services)

pub mod persona_turn;
pub mod run_discussion;
