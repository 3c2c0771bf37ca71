//! Transcript export configuration from TOML (`[export]` section)
//!
//! ```toml
//! [export]
//! directory = "exports"
//! formats = ["json", "markdown"]
//! include_metadata = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Supported transcript file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExportFormat {
    Json,
    #[serde(alias = "md")]
    Markdown,
}

impl FileExportFormat {
    /// Key used in the exporter's result map
    pub fn as_str(&self) -> &'static str {
        match self {
            FileExportFormat::Json => "json",
            FileExportFormat::Markdown => "markdown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileExportFormat::Json => "json",
            FileExportFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExportConfig {
    pub directory: PathBuf,
    pub formats: Vec<FileExportFormat>,
    pub include_metadata: bool,
}

impl Default for FileExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("exports"),
            formats: vec![FileExportFormat::Json, FileExportFormat::Markdown],
            include_metadata: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        let config: FileExportConfig = toml::from_str(r#"formats = ["md"]"#).unwrap();
        assert_eq!(config.formats, vec![FileExportFormat::Markdown]);
        assert_eq!(config.directory, PathBuf::from("exports"));
        assert!(toml::from_str::<FileExportConfig>(r#"formats = ["pdf"]"#).is_err());
    }
}
