//! File-based transcript exporter (JSON and Markdown)
//!
//! Each export writes `conversation_<YYYYmmdd_HHMMSS>.<ext>` into the
//! export directory, creating the directory when needed.

use crate::config::{FileExportConfig, FileExportFormat};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use submind_application::{ExportError, TranscriptExporter};
use submind_domain::{DiscussionSummary, Message, Speaker};
use tracing::{debug, info};

const SUMMARY_FILE: &str = "summary.json";

pub struct FileTranscriptExporter {
    directory: PathBuf,
    formats: Vec<FileExportFormat>,
    include_metadata: bool,
    /// Fixed file stem; a timestamped one is generated per export when unset
    prefix: Option<String>,
}

impl FileTranscriptExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            formats: vec![FileExportFormat::Json, FileExportFormat::Markdown],
            include_metadata: true,
            prefix: None,
        }
    }

    pub fn from_config(config: &FileExportConfig) -> Self {
        Self::new(&config.directory)
            .with_formats(config.formats.clone())
            .with_metadata(config.include_metadata)
    }

    pub fn with_formats(mut self, formats: Vec<FileExportFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_stem(&self) -> String {
        self.prefix.clone().unwrap_or_else(|| {
            format!(
                "conversation_{}",
                chrono::Local::now().format("%Y%m%d_%H%M%S")
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), ExportError> {
        fs::create_dir_all(&self.directory)?;
        fs::write(path, contents)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn render_json(
        &self,
        messages: &[Message],
        summary: &DiscussionSummary,
    ) -> Result<String, ExportError> {
        let to_value = |value: serde_json::Result<Value>| {
            value.map_err(|e| ExportError::Serialization(e.to_string()))
        };

        let mut data = Map::new();
        data.insert("messages".to_string(), to_value(serde_json::to_value(messages))?);
        if self.include_metadata {
            data.insert("metadata".to_string(), to_value(serde_json::to_value(summary))?);
        }
        serde_json::to_string_pretty(&Value::Object(data))
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }

    fn render_markdown(&self, messages: &[Message], summary: &DiscussionSummary) -> String {
        let mut out = String::from("# Submind Discussion\n\n");

        if self.include_metadata {
            let time = |t: Option<chrono::DateTime<chrono::Utc>>| {
                t.map(|t| t.to_rfc3339()).unwrap_or_else(|| "N/A".to_string())
            };
            out.push_str("## Metadata\n\n");
            let _ = writeln!(
                out,
                "- **User Prompt**: {}",
                summary.user_prompt.as_deref().unwrap_or("N/A")
            );
            let _ = writeln!(out, "- **Total Messages**: {}", summary.total_messages);
            let _ = writeln!(out, "- **Total Rounds**: {}", summary.total_rounds);
            let _ = writeln!(out, "- **Start Time**: {}", time(summary.start_time));
            let _ = writeln!(out, "- **End Time**: {}", time(summary.end_time));
            if let Some(duration) = summary.duration_seconds {
                let _ = writeln!(out, "- **Duration**: {:.2} seconds", duration);
            }
            let _ = writeln!(out, "- **Subminds**: {}", summary.participants.join(", "));
            out.push('\n');
        }

        out.push_str("## Conversation\n\n");

        let mut current_round = None;
        for msg in messages {
            if current_round != Some(msg.round) {
                current_round = Some(msg.round);
                if msg.round == 0 {
                    out.push_str("### Initial Prompt\n\n");
                } else {
                    let _ = writeln!(out, "### Round {}\n", msg.round);
                }
            }

            match msg.speaker {
                Speaker::System => {
                    let _ = writeln!(out, "*{}*\n", msg.content);
                }
                _ => {
                    let _ = writeln!(out, "**{}**: {}\n", msg.speaker, msg.content);
                }
            }
        }

        out
    }
}

impl TranscriptExporter for FileTranscriptExporter {
    fn export(
        &self,
        messages: &[Message],
        summary: &DiscussionSummary,
    ) -> Result<BTreeMap<String, PathBuf>, ExportError> {
        let stem = self.file_stem();
        let mut written = BTreeMap::new();

        for format in &self.formats {
            let path = self
                .directory
                .join(format!("{}.{}", stem, format.extension()));
            let contents = match format {
                FileExportFormat::Json => self.render_json(messages, summary)?,
                FileExportFormat::Markdown => self.render_markdown(messages, summary),
            };
            self.write(&path, &contents)?;
            written.insert(format.as_str().to_string(), path);
        }

        info!(
            "Exported {} messages in {} format(s)",
            messages.len(),
            written.len()
        );
        Ok(written)
    }

    fn export_summary_only(&self, summary: &DiscussionSummary) -> Result<PathBuf, ExportError> {
        let path = self.directory.join(SUMMARY_FILE);
        let contents = serde_json::to_string_pretty(summary)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        self.write(&path, &contents)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use submind_domain::Transcript;

    fn sample() -> (Vec<Message>, DiscussionSummary) {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Should we ship on Friday?"));
        transcript.push(Message::persona("Skeptic", "skeptic", "Never on Friday.", 1, "m"));
        transcript.push(Message::persona("Creative", "creative", "Ship Thursday!", 1, "m"));
        transcript.push(Message::system(
            "Discussion terminated: Maximum rounds (1) reached",
            1,
        ));
        let start = Utc::now();
        let summary = DiscussionSummary::from_transcript(
            &transcript,
            1,
            vec!["Skeptic".to_string(), "Creative".to_string()],
            Some(start),
            Some(start + chrono::Duration::seconds(3)),
        );
        (transcript.to_vec(), summary)
    }

    #[test]
    fn test_export_writes_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileTranscriptExporter::new(dir.path().join("exports"));
        let (messages, summary) = sample();

        let written = exporter.export(&messages, &summary).unwrap();

        assert_eq!(written.len(), 2);
        let json_path = &written["json"];
        let md_path = &written["markdown"];
        assert!(json_path.exists());
        assert!(md_path.exists());
        assert!(
            json_path
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("conversation_")
        );
        assert_eq!(md_path.extension().unwrap(), "md");
    }

    #[test]
    fn test_json_contents() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileTranscriptExporter::new(dir.path())
            .with_formats(vec![FileExportFormat::Json])
            .with_prefix("fixed");
        let (messages, summary) = sample();

        let written = exporter.export(&messages, &summary).unwrap();
        assert_eq!(written["json"], dir.path().join("fixed.json"));

        let text = fs::read_to_string(&written["json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["messages"].as_array().unwrap().len(), 4);
        assert_eq!(value["messages"][1]["speaker"], "Skeptic");
        assert_eq!(value["metadata"]["total_rounds"], 1);
    }

    #[test]
    fn test_json_without_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileTranscriptExporter::new(dir.path())
            .with_formats(vec![FileExportFormat::Json])
            .with_metadata(false);
        let (messages, summary) = sample();

        let written = exporter.export(&messages, &summary).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&written["json"]).unwrap()).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_markdown_layout() {
        let exporter = FileTranscriptExporter::new("unused");
        let (messages, summary) = sample();

        let md = exporter.render_markdown(&messages, &summary);
        assert!(md.starts_with("# Submind Discussion\n"));
        assert!(md.contains("- **User Prompt**: Should we ship on Friday?"));
        assert!(md.contains("- **Duration**: 3.00 seconds"));
        assert!(md.contains("- **Subminds**: Skeptic, Creative"));
        assert!(md.contains("### Initial Prompt\n\n**User**: Should we ship on Friday?"));
        assert!(md.contains("### Round 1\n\n**Skeptic**: Never on Friday."));
        assert!(md.contains("*Discussion terminated: Maximum rounds (1) reached*"));
        assert_eq!(md.matches("### Round").count(), 1);
    }

    #[test]
    fn test_export_summary_only() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = FileTranscriptExporter::new(dir.path());
        let (_, summary) = sample();

        let path = exporter.export_summary_only(&summary).unwrap();
        assert_eq!(path, dir.path().join("summary.json"));
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["total_messages"], 4);
    }

    #[test]
    fn test_failed_export_leaves_inputs_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let exporter = FileTranscriptExporter::new(&blocker);
        let (messages, summary) = sample();
        let before = messages.clone();

        assert!(exporter.export(&messages, &summary).is_err());
        assert_eq!(messages, before);
    }
}
