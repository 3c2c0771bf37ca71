//! Live rendering of a streaming discussion

use crate::output::console::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use submind_application::{DiscussionEvent, DiscussionObserver};
use submind_domain::core::string::short_model_name;

/// Prints each discussion event as it happens
///
/// A spinner runs while a persona is waiting on the backend and is
/// cleared before the reply is printed.
pub struct LiveReporter {
    formatter: ConsoleFormatter,
    spinner: Mutex<Option<ProgressBar>>,
    show_summary: bool,
}

impl LiveReporter {
    pub fn new(formatter: ConsoleFormatter) -> Self {
        Self {
            formatter,
            spinner: Mutex::new(None),
            show_summary: true,
        }
    }

    /// Set whether to print the summary block when the discussion completes
    pub fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, persona: &str, model: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(persona.to_string());
        pb.set_message(format!("is thinking ({})", short_model_name(model)));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }

    /// Text printed for an event, if any
    pub fn render(&self, event: &DiscussionEvent) -> Option<String> {
        match event {
            DiscussionEvent::Started {
                prompt,
                participants,
                max_rounds,
            } => Some(
                self.formatter
                    .discussion_header(prompt, participants, *max_rounds),
            ),
            DiscussionEvent::UserMessage { .. } => None,
            DiscussionEvent::RoundStarted { round, status } => {
                Some(self.formatter.round_header(*round, status))
            }
            DiscussionEvent::TurnStarted { .. } => None,
            DiscussionEvent::TurnCompleted { message } => {
                Some(self.formatter.format_message(message))
            }
            DiscussionEvent::TurnFailed { persona, error, .. } => {
                Some(self.formatter.format_failure(persona, error))
            }
            DiscussionEvent::RoundCompleted { .. } => None,
            DiscussionEvent::Terminated { message, .. } => {
                Some(format!("\n{}", self.formatter.format_message(message)))
            }
            DiscussionEvent::Completed { summary, .. } => self
                .show_summary
                .then(|| self.formatter.format_summary(summary)),
        }
    }
}

impl DiscussionObserver for LiveReporter {
    fn on_event(&self, event: &DiscussionEvent) {
        match event {
            DiscussionEvent::TurnStarted { persona, model, .. } => {
                self.start_spinner(persona, model);
            }
            DiscussionEvent::TurnCompleted { .. } | DiscussionEvent::TurnFailed { .. } => {
                self.stop_spinner();
            }
            _ => {}
        }

        if let Some(text) = self.render(event) {
            print!("{}", text);
        }
    }
}

impl Drop for LiveReporter {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
