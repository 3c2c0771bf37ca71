//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod discussion_observer;
pub mod llm_gateway;
pub mod transcript_exporter;
