//! Persona entities

use super::context::{InstructionPlacement, build_context};
use super::roles;
use crate::core::error::DomainError;
use crate::discussion::Message;
use crate::session::entities::ChatMessage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Immutable persona configuration (Value Object)
///
/// Built once at startup and shared between discussions. The instruction
/// text is resolved from the role registry at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    name: String,
    role: String,
    instructions: String,
    models: Vec<String>,
    temperature: f32,
    max_tokens: u32,
    color: String,
}

impl PersonaProfile {
    /// Create a profile for `role`, trying `models` in order
    ///
    /// Fails when the name is blank, the role is unknown, or no usable
    /// model identifier is given.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        models: Vec<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let role = role.into();

        if name.trim().is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "persona name cannot be empty".to_string(),
            ));
        }

        let instructions = roles::instructions_for(&role).ok_or_else(|| {
            DomainError::InvalidConfiguration(format!(
                "invalid role '{}' for persona '{}' (available: {})",
                role,
                name,
                roles::known_roles().join(", ")
            ))
        })?;

        if models.is_empty() || models.iter().any(|m| m.trim().is_empty()) {
            return Err(DomainError::InvalidConfiguration(format!(
                "persona '{}' needs at least one non-empty model identifier",
                name
            )));
        }

        Ok(Self {
            name,
            role,
            instructions,
            models,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            color: "white".to_string(),
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Candidate models, preferred first
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// A persona taking part in one discussion (Entity)
///
/// Wraps the shared profile with the per-discussion counters. A fresh
/// `Persona` is created for each discussion so no mutable state is shared
/// between concurrent discussions.
#[derive(Debug, Clone)]
pub struct Persona {
    profile: Arc<PersonaProfile>,
    current_model: String,
    response_count: u32,
}

impl Persona {
    pub fn new(profile: Arc<PersonaProfile>) -> Self {
        let current_model = profile.models().first().cloned().unwrap_or_default();
        Self {
            profile,
            current_model,
            response_count: 0,
        }
    }

    pub fn profile(&self) -> &PersonaProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        self.profile.name()
    }

    pub fn role(&self) -> &str {
        self.profile.role()
    }

    pub fn models(&self) -> &[String] {
        self.profile.models()
    }

    /// Last model that produced a reply (the preferred one before any reply)
    pub fn current_model(&self) -> &str {
        &self.current_model
    }

    /// Replies produced since the last reset
    pub fn response_count(&self) -> u32 {
        self.response_count
    }

    /// Record a successful reply; returns the new reply count
    pub fn record_success(&mut self, model: &str) -> u32 {
        self.current_model = model.to_string();
        self.response_count += 1;
        self.response_count
    }

    /// Zero the reply counter; configuration is untouched
    pub fn reset(&mut self) {
        self.response_count = 0;
    }

    /// Build the model request for this persona from the discussion so far
    pub fn build_context(
        &self,
        history: &[Message],
        placement: InstructionPlacement,
    ) -> Vec<ChatMessage> {
        build_context(self.name(), self.profile.instructions(), history, placement)
    }
}
