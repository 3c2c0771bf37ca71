//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for submind
#[derive(Parser, Debug)]
#[command(name = "submind")]
#[command(author, version, about = "Multi-persona LLM discussions that stop on their own")]
#[command(long_about = r#"
Submind runs a turn-based discussion among several model personas
("subminds") in response to a single prompt.

Each round every persona speaks once, in configuration order, seeing the
whole discussion so far. After every round a termination policy decides
whether to stop: completion phrases, consensus, repetition, or the
maximum number of rounds.

Configuration files are loaded from (in priority order):
1. SUBMIND_* environment variables
2. --config <path>         Explicit config file
3. ./submind.toml          Project-level config (or ./.submind.toml)
4. ~/.config/submind/config.toml   Global config

Example:
  submind "How should a small city prepare for heat waves?"
  submind -p Analytical -p Skeptic --max-rounds 2 "Is nuclear power worth it?"
  submind --chat
"#)]
pub struct Cli {
    /// The prompt that seeds the discussion (not required in chat mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Personas taking part (can be specified multiple times; default: all)
    #[arg(short, long = "persona", value_name = "NAME")]
    pub personas: Vec<String>,

    /// Maximum number of rounds
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_rounds: Option<u32>,

    /// Disable consensus, completion, and repetition detection
    #[arg(long)]
    pub no_auto_terminate: bool,

    /// Do not write transcript files when the discussion ends
    #[arg(long)]
    pub no_export: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress live rendering; print the transcript at the end
    #[arg(short, long)]
    pub quiet: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the models offered by the backend and exit
    #[arg(long)]
    pub list_models: bool,
}

impl Cli {
    /// Participant filter, or `None` when every configured persona takes part
    pub fn participants(&self) -> Option<&[String]> {
        if self.personas.is_empty() {
            None
        } else {
            Some(self.personas.as_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_prompt_and_personas() {
        let cli = Cli::try_parse_from([
            "submind",
            "-p",
            "Analytical",
            "--persona",
            "Skeptic",
            "--max-rounds",
            "2",
            "Should we ban cars downtown?",
        ])
        .unwrap();

        assert_eq!(cli.prompt.as_deref(), Some("Should we ban cars downtown?"));
        assert_eq!(
            cli.participants(),
            Some(&["Analytical".to_string(), "Skeptic".to_string()][..])
        );
        assert_eq!(cli.max_rounds, Some(2));
        assert!(!cli.chat);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["submind", "--chat", "-vv"]).unwrap();
        assert!(cli.chat);
        assert!(cli.prompt.is_none());
        assert!(cli.participants().is_none());
        assert_eq!(cli.verbose, 2);
        assert!(!cli.no_auto_terminate);
        assert!(!cli.no_export);
    }

    #[test]
    fn test_zero_max_rounds_rejected() {
        assert!(Cli::try_parse_from(["submind", "--max-rounds", "0", "hi"]).is_err());
    }
}
