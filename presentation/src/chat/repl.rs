//! REPL (Read-Eval-Print Loop) for interactive discussions

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::LiveReporter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use submind_application::{
    Discussion, DiscussionContext, DiscussionError, DiscussionObserver, TranscriptExporter,
};
use tokio::sync::mpsc;

/// What the REPL does with one input line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Stop,
    Command(&'a str),
    Prompt(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        Input::Empty
    } else if line.eq_ignore_ascii_case("stop") {
        Input::Stop
    } else if line.starts_with('/') {
        Input::Command(line)
    } else {
        Input::Prompt(line)
    }
}

/// Interactive chat REPL
///
/// Every prompt runs a complete discussion on the same participants; the
/// discussion is reset afterwards so the next prompt starts fresh.
pub struct ChatRepl {
    discussion: Discussion,
    formatter: ConsoleFormatter,
    exporter: Option<Arc<dyn TranscriptExporter>>,
    show_progress: bool,
}

impl ChatRepl {
    /// Create a REPL for the given participant selection
    pub fn new(
        context: &DiscussionContext,
        participants: Option<&[String]>,
    ) -> Result<Self, DiscussionError> {
        Ok(Self {
            discussion: context.new_discussion(participants)?,
            formatter: ConsoleFormatter::from_profiles(context.profiles()),
            exporter: None,
            show_progress: true,
        })
    }

    /// Set whether to render the discussion live
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Export every finished discussion through `exporter`
    pub fn with_exporter(mut self, exporter: Option<Arc<dyn TranscriptExporter>>) -> Self {
        self.exporter = exporter;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("submind").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => match classify(&line) {
                    Input::Empty => continue,
                    Input::Stop => {
                        println!("No discussion is running. Enter a new prompt to continue.");
                    }
                    Input::Command(cmd) => {
                        if self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Prompt(prompt) => {
                        let _ = rl.add_history_entry(prompt);
                        self.process_prompt(prompt).await;
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Submind - Chat Mode              │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Participants: {}", self.discussion.participants().join(", "));
        println!();
        println!("Type a prompt to start a discussion. Ctrl-C stops a running one.");
        println!();
        println!("Commands:");
        println!("  /help      - Show this help");
        println!("  /personas  - Show participating personas");
        println!("  /quit      - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?     - Show this help");
                println!("  /personas         - Show participating personas");
                println!("  /quit, /exit, /q  - Exit chat");
                println!();
                false
            }
            "/personas" => {
                println!();
                println!("Participants:");
                for persona in self.discussion.personas() {
                    println!(
                        "  - {} ({}; models: {})",
                        persona.name(),
                        persona.role(),
                        persona.models().join(", ")
                    );
                }
                println!();
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_prompt(&mut self, prompt: &str) {
        println!();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let reporter = LiveReporter::new(self.formatter.clone());
        let show_progress = self.show_progress;

        // Closing the receiver on Ctrl-C cancels the running discussion.
        let render = async move {
            loop {
                tokio::select! {
                    event = rx.recv() => match event {
                        Some(event) if show_progress => reporter.on_event(&event),
                        Some(_) => {}
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => {
                        println!("^C");
                        break;
                    }
                }
            }
        };

        let (result, ()) = tokio::join!(self.discussion.stream_to_channel(prompt, tx), render);

        match result {
            Ok(_) if !show_progress => {
                print!("{}", self.formatter.format_transcript(self.discussion.transcript()));
                if let Some(summary) = self.discussion.summary() {
                    print!("{}", self.formatter.format_summary(&summary));
                }
            }
            Ok(_) => {}
            Err(DiscussionError::Cancelled) => {
                println!("Discussion stopped. Enter a new prompt to continue.");
            }
            Err(e) => eprintln!("Error: {}", e),
        }

        if let Some(exporter) = &self.exporter {
            match self.discussion.export(exporter.as_ref()) {
                Ok(paths) if !paths.is_empty() => {
                    print!("{}", ConsoleFormatter::format_export_paths(&paths));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Export failed: {}", e);
                    eprintln!("Export failed: {}", e);
                }
            }
        }

        self.discussion.reset();
        println!();
    }
}
