//! Configuration file loading for submind
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SUBMIND_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./submind.toml` or `./.submind.toml`
//! 4. Global config: `$XDG_CONFIG_HOME/submind/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    BASE_URL_ENV, ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_MODEL, FileBackendConfig,
    FileConfig, FileDiscussionConfig, FileExportConfig, FileExportFormat, FilePersonaConfig,
    default_personas,
};
pub use loader::ConfigLoader;
