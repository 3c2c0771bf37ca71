//! Infrastructure layer for submind
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod export;
pub mod openai;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileDiscussionConfig,
    FileExportConfig, FileExportFormat, FilePersonaConfig,
};
pub use export::FileTranscriptExporter;
pub use openai::OpenAiCompatibleGateway;
