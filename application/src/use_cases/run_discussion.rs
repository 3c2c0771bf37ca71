//! Run Discussion use case
//!
//! Drives one multi-persona discussion: seed prompt, sequential persona
//! turns, a termination check after every round. Batch and streaming runs
//! share the same loop and differ only in how turn failures are handled
//! and who observes the events.

use crate::backend::ModelBackend;
use crate::config::{DiscussionSettings, MIN_PARTICIPANTS};
use crate::ports::discussion_observer::{
    ChannelObserver, DiscussionEvent, DiscussionObserver, NoObserver,
};
use crate::ports::transcript_exporter::{ExportError, TranscriptExporter};
use crate::use_cases::persona_turn::{self, TurnError};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;
use submind_domain::{DiscussionSummary, Message, Persona, TerminationPolicy, Transcript};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while creating or running a discussion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscussionError {
    #[error("Discussion already started; reset it before starting again")]
    AlreadyStarted,

    #[error("At least {minimum} participants are required, got {given}")]
    TooFewParticipants { given: usize, minimum: usize },

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("No personas configured")]
    NoPersonas,

    #[error("Turn failed: {0}")]
    Turn(#[from] TurnError),

    #[error("Discussion cancelled")]
    Cancelled,
}

/// Result of a completed streaming run
#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionOutcome {
    pub reason: String,
    pub rounds: u32,
    /// Persona turns that failed and were skipped
    pub failed_turns: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    /// Turn failures abort the discussion
    Batch,
    /// Turn failures are reported and the round continues
    Streaming,
}

/// One discussion among a fixed set of personas
///
/// Owns its transcript and persona state; nothing is shared with other
/// discussions except the backend handle.
pub struct Discussion {
    backend: ModelBackend,
    personas: Vec<Persona>,
    settings: DiscussionSettings,
    policy: TerminationPolicy,
    transcript: Transcript,
    current_round: u32,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    cancellation_token: CancellationToken,
}

impl Discussion {
    pub fn new(
        backend: ModelBackend,
        personas: Vec<Persona>,
        settings: DiscussionSettings,
    ) -> Result<Self, DiscussionError> {
        if personas.is_empty() {
            return Err(DiscussionError::NoPersonas);
        }
        if personas.len() < MIN_PARTICIPANTS {
            return Err(DiscussionError::TooFewParticipants {
                given: personas.len(),
                minimum: MIN_PARTICIPANTS,
            });
        }

        let policy = TerminationPolicy::new(settings.termination.clone());
        Ok(Self {
            backend,
            personas,
            settings,
            policy,
            transcript: Transcript::new(),
            current_round: 0,
            start_time: None,
            end_time: None,
            cancellation_token: CancellationToken::new(),
        })
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    // ==================== Accessors ====================

    pub fn transcript(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn participants(&self) -> Vec<String> {
        self.personas.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn settings(&self) -> &DiscussionSettings {
        &self.settings
    }

    pub fn messages_by_round(&self, round: u32) -> Vec<&Message> {
        self.transcript.by_round(round)
    }

    pub fn messages_by_speaker(&self, speaker: &str) -> Vec<&Message> {
        self.transcript.by_speaker(speaker)
    }

    /// Snapshot of the discussion so far; `None` before it has started
    pub fn summary(&self) -> Option<DiscussionSummary> {
        if self.transcript.is_empty() {
            return None;
        }
        Some(DiscussionSummary::from_transcript(
            &self.transcript,
            self.current_round,
            self.participants(),
            self.start_time,
            self.end_time,
        ))
    }

    /// Write the transcript and summary through `exporter`
    ///
    /// Works on partial transcripts too. Nothing is written for a
    /// discussion that has not started.
    pub fn export(
        &self,
        exporter: &dyn TranscriptExporter,
    ) -> Result<BTreeMap<String, PathBuf>, ExportError> {
        match self.summary() {
            Some(summary) => exporter.export(self.transcript(), &summary),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Clear all discussion state so the instance can run again
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.current_round = 0;
        self.start_time = None;
        self.end_time = None;
        for persona in &mut self.personas {
            persona.reset();
        }
    }

    // ==================== Runs ====================

    /// Run to completion and return the full transcript
    ///
    /// The first failing persona turn aborts the discussion; the messages
    /// produced up to that point stay readable through [`Self::transcript`].
    pub async fn start(&mut self, prompt: &str) -> Result<Vec<Message>, DiscussionError> {
        let token = self.cancellation_token.clone();
        self.run(prompt, &NoObserver, RunMode::Batch, &token).await?;
        Ok(self.transcript.to_vec())
    }

    /// Run to completion, reporting every step to `observer`
    ///
    /// Failing persona turns are reported as [`DiscussionEvent::TurnFailed`]
    /// and skipped.
    pub async fn stream(
        &mut self,
        prompt: &str,
        observer: &dyn DiscussionObserver,
    ) -> Result<DiscussionOutcome, DiscussionError> {
        let token = self.cancellation_token.clone();
        self.run(prompt, observer, RunMode::Streaming, &token).await
    }

    /// Stream events into a channel
    ///
    /// Dropping the receiver cancels the discussion at its next suspension
    /// point, including an in-flight backend call. Messages already
    /// appended remain in the transcript.
    pub async fn stream_to_channel(
        &mut self,
        prompt: &str,
        sender: mpsc::UnboundedSender<DiscussionEvent>,
    ) -> Result<DiscussionOutcome, DiscussionError> {
        let token = self.cancellation_token.child_token();
        let watch = sender.clone();
        let observer = ChannelObserver::new(sender, token.clone());

        let run = self.run(prompt, &observer, RunMode::Streaming, &token);
        tokio::pin!(run);
        tokio::select! {
            result = &mut run => result,
            _ = watch.closed() => {
                debug!("Event receiver closed; cancelling discussion");
                token.cancel();
                run.await
            }
        }
    }

    async fn run(
        &mut self,
        prompt: &str,
        observer: &dyn DiscussionObserver,
        mode: RunMode,
        token: &CancellationToken,
    ) -> Result<DiscussionOutcome, DiscussionError> {
        if !self.transcript.is_empty() {
            return Err(DiscussionError::AlreadyStarted);
        }

        let result = self.drive(prompt, observer, mode, token).await;
        if let Err(e) = &result {
            warn!("Discussion ended early after round {}: {}", self.current_round, e);
            self.end_time = Some(Utc::now());
        }
        result
    }

    async fn drive(
        &mut self,
        prompt: &str,
        observer: &dyn DiscussionObserver,
        mode: RunMode,
        token: &CancellationToken,
    ) -> Result<DiscussionOutcome, DiscussionError> {
        let participants = self.participants();
        info!(
            "Starting discussion with {} subminds: {}",
            participants.len(),
            participants.join(", ")
        );

        self.start_time = Some(Utc::now());
        observer.on_event(&DiscussionEvent::Started {
            prompt: prompt.to_string(),
            participants: participants.clone(),
            max_rounds: self.policy.config().max_rounds,
        });

        let seed = Message::user(prompt);
        self.transcript.push(seed.clone());
        observer.on_event(&DiscussionEvent::UserMessage { message: seed });

        let mut failed_turns = 0;

        loop {
            self.check_cancelled(token)?;

            self.current_round += 1;
            let round = self.current_round;
            let status = self.policy.status(round);
            info!("{}", status);
            observer.on_event(&DiscussionEvent::RoundStarted { round, status });

            for index in 0..self.personas.len() {
                self.check_cancelled(token)?;

                if let Err(e) = self.take_turn(index, round, observer, token).await {
                    match (mode, e) {
                        (RunMode::Streaming, DiscussionError::Turn(turn_error)) => {
                            warn!("Turn failed: {}", turn_error);
                            failed_turns += 1;
                            observer.on_event(&DiscussionEvent::TurnFailed {
                                round,
                                persona: turn_error.persona().to_string(),
                                error: turn_error.to_string(),
                            });
                        }
                        (_, e) => return Err(e),
                    }
                }

                self.pace(token).await?;
            }

            observer.on_event(&DiscussionEvent::RoundCompleted { round });

            let decision = self.policy.should_terminate(
                self.transcript.messages(),
                round,
                Some(participants.as_slice()),
            );
            if decision.stop {
                info!(
                    "Discussion terminated after round {}: {}",
                    round, decision.reason
                );

                let notice = Message::system(
                    format!("Discussion terminated: {}", decision.reason),
                    round,
                );
                self.transcript.push(notice.clone());
                self.end_time = Some(Utc::now());

                observer.on_event(&DiscussionEvent::Terminated {
                    message: notice,
                    reason: decision.reason.clone(),
                });
                if let Some(summary) = self.summary() {
                    observer.on_event(&DiscussionEvent::Completed {
                        transcript: self.transcript.to_vec(),
                        summary,
                    });
                }

                return Ok(DiscussionOutcome {
                    reason: decision.reason,
                    rounds: round,
                    failed_turns,
                });
            }
        }
    }

    /// One persona turn; the reply is appended before the next persona speaks
    async fn take_turn(
        &mut self,
        index: usize,
        round: u32,
        observer: &dyn DiscussionObserver,
        token: &CancellationToken,
    ) -> Result<(), DiscussionError> {
        let persona = &mut self.personas[index];
        debug!("Round {}: {} is speaking", round, persona.name());
        observer.on_event(&DiscussionEvent::TurnStarted {
            round,
            persona: persona.name().to_string(),
            model: persona.current_model().to_string(),
        });

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(DiscussionError::Cancelled),
            result = persona_turn::generate_response(
                persona,
                &self.backend,
                self.transcript.messages(),
                self.settings.instruction_placement,
            ) => result,
        };

        let message = result?.with_round(round);
        self.transcript.push(message.clone());
        observer.on_event(&DiscussionEvent::TurnCompleted { message });
        Ok(())
    }

    async fn pace(&self, token: &CancellationToken) -> Result<(), DiscussionError> {
        let delay = self.settings.delay_between_subminds;
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(DiscussionError::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn check_cancelled(&self, token: &CancellationToken) -> Result<(), DiscussionError> {
        if token.is_cancelled() {
            return Err(DiscussionError::Cancelled);
        }
        Ok(())
    }
}
