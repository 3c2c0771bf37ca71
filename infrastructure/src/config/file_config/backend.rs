//! Model server configuration from TOML (`[backend]` section)
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:1234/v1"
//! api_key = ""
//! timeout_seconds = 120
//! system_role = false
//! ```

use serde::{Deserialize, Serialize};
use submind_domain::InstructionPlacement;

/// Environment variable consulted when `base_url` is not configured
pub const BASE_URL_ENV: &str = "LMSTUDIO_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// OpenAI-compatible API root; falls back to `LMSTUDIO_BASE_URL`
    pub base_url: Option<String>,
    /// Bearer token; empty or absent means no authentication
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    /// Send persona instructions as a separate system turn
    pub system_role: bool,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_seconds: 120,
            system_role: false,
        }
    }
}

impl FileBackendConfig {
    /// Configured URL, else the environment, else the local default
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn instruction_placement(&self) -> InstructionPlacement {
        if self.system_role {
            InstructionPlacement::SystemTurn
        } else {
            InstructionPlacement::PrependToFirstTurn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_url_wins() {
        let config = FileBackendConfig {
            base_url: Some("http://gpu-box:8080/v1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), "http://gpu-box:8080/v1");
    }

    #[test]
    fn test_empty_api_key_is_none() {
        let config = FileBackendConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_instruction_placement() {
        let mut config = FileBackendConfig::default();
        assert_eq!(
            config.instruction_placement(),
            InstructionPlacement::PrependToFirstTurn
        );
        config.system_role = true;
        assert_eq!(config.instruction_placement(), InstructionPlacement::SystemTurn);
    }
}
