//! Application layer for submind
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod backend;
pub mod config;
pub mod context;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use backend::{BackendError, ModelBackend};
pub use config::{DiscussionSettings, MIN_PARTICIPANTS};
pub use context::DiscussionContext;
pub use ports::{
    discussion_observer::{
        ChannelObserver, DiscussionEvent, DiscussionObserver, NoObserver, RecordingObserver,
    },
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    transcript_exporter::{ExportError, TranscriptExporter},
};
pub use use_cases::persona_turn::TurnError;
pub use use_cases::run_discussion::{Discussion, DiscussionError, DiscussionOutcome};
