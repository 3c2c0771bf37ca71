//! Console output formatter for discussions

use colored::{Color, Colorize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use submind_domain::core::string::short_model_name;
use submind_domain::{DiscussionSummary, Message, PersonaProfile, Speaker};

const WIDTH: usize = 60;

/// Formats discussion messages and summaries for terminal display
///
/// Persona names are drawn in the color configured for them; unknown
/// color names fall back to white.
#[derive(Debug, Clone, Default)]
pub struct ConsoleFormatter {
    colors: HashMap<String, Color>,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a formatter using each profile's display color
    pub fn from_profiles(profiles: &[Arc<PersonaProfile>]) -> Self {
        let colors = profiles
            .iter()
            .map(|p| (p.name().to_string(), Color::from(p.color())))
            .collect();
        Self { colors }
    }

    fn color_of(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or(Color::White)
    }

    /// Banner shown before the first round
    pub fn discussion_header(
        &self,
        prompt: &str,
        participants: &[String],
        max_rounds: u32,
    ) -> String {
        let names = participants
            .iter()
            .map(|name| name.color(self.color_of(name)).bold().to_string())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{}\n\n{} {}\n{} {}\n{} {}\n",
            Self::header("Submind Discussion"),
            "Prompt:".cyan().bold(),
            prompt,
            "Participants:".cyan().bold(),
            names,
            "Max rounds:".cyan().bold(),
            max_rounds
        )
    }

    pub fn round_header(&self, round: u32, status: &str) -> String {
        Self::section_header(&format!("Round {}", round), status)
    }

    /// One transcript message
    pub fn format_message(&self, message: &Message) -> String {
        match &message.speaker {
            Speaker::User => format!("{} {}\n", "User:".cyan().bold(), message.content),
            Speaker::System => format!("{}\n", message.content.yellow().italic()),
            Speaker::Persona(name) => {
                let model = message
                    .model
                    .as_deref()
                    .map(|m| format!(" ({})", short_model_name(m)).dimmed().to_string())
                    .unwrap_or_default();
                format!(
                    "\n{}{}\n{}\n",
                    format!("── {} ──", name).color(self.color_of(name)).bold(),
                    model,
                    Self::indent(&message.content, "  ")
                )
            }
        }
    }

    /// A persona turn that produced no message
    pub fn format_failure(&self, persona: &str, error: &str) -> String {
        format!(
            "\n{} {} {}\n",
            "x".red().bold(),
            persona.color(self.color_of(persona)).bold(),
            format!("did not respond: {}", error).red()
        )
    }

    /// Whole transcript grouped by round, for non-live output
    pub fn format_transcript(&self, messages: &[Message]) -> String {
        let mut output = String::new();
        let mut round = None;

        for message in messages {
            let opens_round = message.round > 0
                && round != Some(message.round)
                && message.speaker != Speaker::System;
            if opens_round {
                round = Some(message.round);
                output.push_str(&Self::section_header(
                    &format!("Round {}", message.round),
                    "",
                ));
            }
            output.push_str(&self.format_message(message));
        }

        output
    }

    pub fn format_summary(&self, summary: &DiscussionSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Summary", ""));
        output.push_str(&format!(
            "{} {}\n",
            "Rounds:".cyan().bold(),
            summary.total_rounds
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Messages:".cyan().bold(),
            summary.total_messages
        ));
        if let Some(duration) = summary.duration_seconds {
            output.push_str(&format!("{} {:.1}s\n", "Duration:".cyan().bold(), duration));
        }

        let persona_counts: Vec<String> = summary
            .speaker_counts
            .iter()
            .filter(|(name, _)| Speaker::from(name.as_str()).is_persona())
            .map(|(name, count)| {
                format!("  * {}: {}", name.color(self.color_of(name)), count)
            })
            .collect();
        if !persona_counts.is_empty() {
            output.push_str(&format!("{}\n", "Responses:".cyan().bold()));
            output.push_str(&persona_counts.join("\n"));
            output.push('\n');
        }

        output.push_str(&Self::footer());
        output
    }

    /// Paths written by the exporter, keyed by format
    pub fn format_export_paths(paths: &BTreeMap<String, PathBuf>) -> String {
        let mut output = format!("{}\n", "Exported:".green().bold());
        for (format, path) in paths {
            output.push_str(&format!("  * {}: {}\n", format, path.display()));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str, status: &str) -> String {
        if status.is_empty() {
            format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
        } else {
            format!(
                "\n{} {}\n{}\n",
                title.cyan().bold(),
                status.dimmed(),
                "-".repeat(40)
            )
        }
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(WIDTH).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> ConsoleFormatter {
        colored::control::set_override(false);
        let profiles = vec![Arc::new(
            PersonaProfile::new("Skeptic", "skeptic", vec!["vendor/model-a:free".to_string()])
                .unwrap()
                .with_color("red"),
        )];
        ConsoleFormatter::from_profiles(&profiles)
    }

    #[test]
    fn test_persona_message_shows_short_model() {
        let formatter = plain();
        let msg = Message::persona(
            "Skeptic",
            "skeptic",
            "Line one\nLine two",
            1,
            "vendor/model-a:free",
        );
        let out = formatter.format_message(&msg);

        assert!(out.contains("── Skeptic ──"));
        assert!(out.contains("(model-a)"));
        assert!(out.contains("  Line one\n  Line two"));
    }

    #[test]
    fn test_transcript_groups_rounds() {
        let formatter = plain();
        let messages = vec![
            Message::user("Prompt"),
            Message::persona("Skeptic", "skeptic", "a", 1, "m"),
            Message::persona("Skeptic", "skeptic", "b", 2, "m"),
            Message::system("Discussion terminated: Consensus reached", 2),
        ];
        let out = formatter.format_transcript(&messages);

        assert!(out.contains("User: Prompt"));
        assert!(out.contains("Round 1"));
        assert!(out.contains("Round 2"));
        assert!(!out.contains("Round 3"));
        assert!(out.ends_with("Discussion terminated: Consensus reached\n"));
    }

    #[test]
    fn test_summary_lists_persona_counts_only() {
        let formatter = plain();
        let summary = DiscussionSummary {
            user_prompt: Some("Prompt".to_string()),
            total_messages: 4,
            total_rounds: 2,
            speaker_counts: BTreeMap::from([
                ("Skeptic".to_string(), 2),
                ("System".to_string(), 1),
                ("User".to_string(), 1),
            ]),
            start_time: None,
            end_time: None,
            duration_seconds: Some(1.25),
            participants: vec!["Skeptic".to_string()],
        };
        let out = formatter.format_summary(&summary);

        assert!(out.contains("Rounds: 2"));
        assert!(out.contains("Duration: 1.2s") || out.contains("Duration: 1.3s"));
        assert!(out.contains("* Skeptic: 2"));
        assert!(!out.contains("* User"));
    }

    #[test]
    fn test_export_paths() {
        colored::control::set_override(false);
        let paths = BTreeMap::from([
            ("json".to_string(), PathBuf::from("exports/c.json")),
            ("markdown".to_string(), PathBuf::from("exports/c.md")),
        ]);
        let out = ConsoleFormatter::format_export_paths(&paths);
        assert!(out.contains("json: exports/c.json"));
        assert!(out.contains("markdown: exports/c.md"));
    }
}
