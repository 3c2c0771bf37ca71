//! Interactive chat module
//!
//! Provides a readline-based interactive interface: one discussion per prompt.

mod repl;

pub use repl::ChatRepl;
