//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain and application
//! types by [`FileConfig::to_profiles`] and [`FileConfig::to_settings`].

mod backend;
mod discussion;
mod export;
mod personas;

pub use backend::{BASE_URL_ENV, DEFAULT_BASE_URL, FileBackendConfig};
pub use discussion::FileDiscussionConfig;
pub use export::{FileExportConfig, FileExportFormat};
pub use personas::{FilePersonaConfig, default_personas};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use submind_application::{DiscussionSettings, MIN_PARTICIPANTS};
use submind_domain::persona::roles;
use submind_domain::{DomainError, PersonaProfile, SYSTEM_SPEAKER, USER_SPEAKER};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct-v0.3";

/// Upper bound for `discussion.delay_between_subminds`, in seconds
pub const MAX_DELAY_SECONDS: f64 = 3600.0;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("discussion.max_rounds must be at least 1")]
    InvalidMaxRounds,

    #[error("discussion.consensus_threshold must be between 0 and 1 (got {0})")]
    InvalidThreshold(f64),

    #[error("discussion.delay_between_subminds cannot be negative (got {0})")]
    NegativeDelay(f64),

    #[error("discussion.delay_between_subminds must be a finite number of at most 3600 seconds (got {0})")]
    DelayOutOfRange(f64),

    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty (persona '{0}')")]
    EmptyModelName(String),

    #[error("persona '{persona}' has unknown role '{role}'")]
    UnknownRole { persona: String, role: String },

    #[error("duplicate persona name '{0}'")]
    DuplicatePersona(String),

    #[error("persona name '{0}' is reserved")]
    ReservedPersonaName(String),

    #[error("at least {minimum} personas are required (found {found})")]
    TooFewPersonas { found: usize, minimum: usize },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Models used by personas that name none of their own
    pub default_models: Vec<String>,
    pub backend: FileBackendConfig,
    pub discussion: FileDiscussionConfig,
    pub export: FileExportConfig,
    pub personas: Vec<FilePersonaConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            default_models: vec![DEFAULT_MODEL.to_string()],
            backend: FileBackendConfig::default(),
            discussion: FileDiscussionConfig::default(),
            export: FileExportConfig::default(),
            personas: default_personas(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        let discussion = &self.discussion;
        if discussion.max_rounds == 0 {
            issues.push(ConfigValidationError::InvalidMaxRounds);
        }
        if !(0.0..=1.0).contains(&discussion.consensus_threshold) {
            issues.push(ConfigValidationError::InvalidThreshold(
                discussion.consensus_threshold,
            ));
        }
        let delay = discussion.delay_between_subminds;
        if delay < 0.0 {
            issues.push(ConfigValidationError::NegativeDelay(delay));
        } else if !delay.is_finite() || delay > MAX_DELAY_SECONDS {
            issues.push(ConfigValidationError::DelayOutOfRange(delay));
        }
        if self.backend.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        let mut seen = HashSet::new();
        for persona in &self.personas {
            if persona.name == USER_SPEAKER || persona.name == SYSTEM_SPEAKER {
                issues.push(ConfigValidationError::ReservedPersonaName(
                    persona.name.clone(),
                ));
            }
            if !seen.insert(persona.name.as_str()) {
                issues.push(ConfigValidationError::DuplicatePersona(
                    persona.name.clone(),
                ));
            }
            if roles::role(&persona.role).is_none() {
                issues.push(ConfigValidationError::UnknownRole {
                    persona: persona.name.clone(),
                    role: persona.role.clone(),
                });
            }
            let models = persona.resolved_models(&self.default_models);
            if models.is_empty() || models.iter().any(|m| m.trim().is_empty()) {
                issues.push(ConfigValidationError::EmptyModelName(persona.name.clone()));
            }
        }

        if self.personas.len() < MIN_PARTICIPANTS {
            issues.push(ConfigValidationError::TooFewPersonas {
                found: self.personas.len(),
                minimum: MIN_PARTICIPANTS,
            });
        }

        issues
    }

    /// Build persona profiles in configuration order
    pub fn to_profiles(&self) -> Result<Vec<PersonaProfile>, DomainError> {
        self.personas
            .iter()
            .map(|p| p.to_profile(&self.default_models))
            .collect()
    }

    pub fn to_settings(&self) -> DiscussionSettings {
        DiscussionSettings::default()
            .with_termination(self.discussion.to_termination_config())
            .with_delay(self.discussion.delay())
            .with_instruction_placement(self.backend.instruction_placement())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_seconds)
    }
}
