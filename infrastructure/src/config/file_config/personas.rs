//! Persona configuration from TOML (`[[personas]]` tables)
//!
//! ```toml
//! [[personas]]
//! name = "Analytical"
//! role = "analytical"
//! models = ["model-a", "model-b"]   # or: model = "model-a"
//! temperature = 0.7
//! max_tokens = 500
//! color = "blue"
//! ```

use serde::{Deserialize, Serialize};
use submind_domain::persona::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use submind_domain::{DomainError, PersonaProfile};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilePersonaConfig {
    pub name: String,
    pub role: String,
    /// Fallback chain, most preferred first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    /// Single model shorthand, used when `models` is absent or empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_color() -> String {
    "white".to_string()
}

impl FilePersonaConfig {
    pub fn new(name: &str, role: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            role: role.to_string(),
            models: None,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            color: color.to_string(),
        }
    }

    /// Model chain: `models`, else `model`, else the global defaults
    pub fn resolved_models(&self, default_models: &[String]) -> Vec<String> {
        if let Some(models) = &self.models
            && !models.is_empty()
        {
            return models.clone();
        }
        if let Some(model) = &self.model
            && !model.is_empty()
        {
            return vec![model.clone()];
        }
        default_models.to_vec()
    }

    pub fn to_profile(&self, default_models: &[String]) -> Result<PersonaProfile, DomainError> {
        Ok(
            PersonaProfile::new(&self.name, &self.role, self.resolved_models(default_models))?
                .with_temperature(self.temperature)
                .with_max_tokens(self.max_tokens)
                .with_color(&self.color),
        )
    }
}

/// The five stock subminds
pub fn default_personas() -> Vec<FilePersonaConfig> {
    vec![
        FilePersonaConfig::new("Doctrinal", "traditional", "yellow"),
        FilePersonaConfig::new("Analytical", "analytical", "blue"),
        FilePersonaConfig::new("Strategic", "strategic", "green"),
        FilePersonaConfig::new("Creative", "creative", "magenta"),
        FilePersonaConfig::new("Skeptic", "skeptic", "red"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        vec!["default-model".to_string()]
    }

    #[test]
    fn test_models_list_preferred() {
        let config: FilePersonaConfig = toml::from_str(
            r#"
name = "Analytical"
role = "analytical"
models = ["a", "b"]
model = "c"
"#,
        )
        .unwrap();
        assert_eq!(config.resolved_models(&defaults()), vec!["a", "b"]);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.color, "white");
    }

    #[test]
    fn test_single_model_shorthand() {
        let config: FilePersonaConfig = toml::from_str(
            r#"
name = "Skeptic"
role = "skeptic"
model = "solo"
max_tokens = 120
"#,
        )
        .unwrap();
        assert_eq!(config.resolved_models(&defaults()), vec!["solo"]);
        let profile = config.to_profile(&defaults()).unwrap();
        assert_eq!(profile.max_tokens(), 120);
    }

    #[test]
    fn test_falls_back_to_default_models() {
        let config = FilePersonaConfig::new("Creative", "creative", "magenta");
        assert_eq!(config.resolved_models(&defaults()), vec!["default-model"]);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let config = FilePersonaConfig::new("Bard", "poet", "white");
        let err = config.to_profile(&defaults()).unwrap_err();
        assert!(err.is_configuration());
    }
}
