//! Discussion event port
//!
//! Streaming discussions report every step as a [`DiscussionEvent`].
//! Observers live in the presentation layer (console renderer) or wrap a
//! channel towards a remote client.

use serde::Serialize;
use submind_domain::{DiscussionSummary, Message};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// One step of a streaming discussion, in emission order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscussionEvent {
    Started {
        prompt: String,
        participants: Vec<String>,
        max_rounds: u32,
    },
    UserMessage {
        message: Message,
    },
    RoundStarted {
        round: u32,
        status: String,
    },
    TurnStarted {
        round: u32,
        persona: String,
        model: String,
    },
    TurnCompleted {
        message: Message,
    },
    TurnFailed {
        round: u32,
        persona: String,
        error: String,
    },
    RoundCompleted {
        round: u32,
    },
    Terminated {
        message: Message,
        reason: String,
    },
    Completed {
        transcript: Vec<Message>,
        summary: DiscussionSummary,
    },
}

impl DiscussionEvent {
    /// Event type name as serialized in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            DiscussionEvent::Started { .. } => "started",
            DiscussionEvent::UserMessage { .. } => "user_message",
            DiscussionEvent::RoundStarted { .. } => "round_started",
            DiscussionEvent::TurnStarted { .. } => "turn_started",
            DiscussionEvent::TurnCompleted { .. } => "turn_completed",
            DiscussionEvent::TurnFailed { .. } => "turn_failed",
            DiscussionEvent::RoundCompleted { .. } => "round_completed",
            DiscussionEvent::Terminated { .. } => "terminated",
            DiscussionEvent::Completed { .. } => "completed",
        }
    }
}

/// Callback for discussion events
///
/// Called synchronously from the discussion loop; implementations should
/// return quickly.
pub trait DiscussionObserver: Send + Sync {
    fn on_event(&self, event: &DiscussionEvent);
}

/// No-op observer for batch runs
pub struct NoObserver;

impl DiscussionObserver for NoObserver {
    fn on_event(&self, _event: &DiscussionEvent) {}
}

/// Forwards events into a channel
///
/// When the receiving side is gone the observer cancels `token`, so the
/// discussion stops at its next suspension point.
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<DiscussionEvent>,
    token: CancellationToken,
}

impl ChannelObserver {
    pub fn new(sender: mpsc::UnboundedSender<DiscussionEvent>, token: CancellationToken) -> Self {
        Self { sender, token }
    }
}

impl DiscussionObserver for ChannelObserver {
    fn on_event(&self, event: &DiscussionEvent) {
        if self.sender.send(event.clone()).is_err() && !self.token.is_cancelled() {
            tracing::debug!("Event receiver dropped; cancelling discussion");
            self.token.cancel();
        }
    }
}

/// Collects events in memory (tests, replay)
#[derive(Default)]
pub struct RecordingObserver {
    events: std::sync::Mutex<Vec<DiscussionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiscussionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(DiscussionEvent::kind).collect()
    }
}

impl DiscussionObserver for RecordingObserver {
    fn on_event(&self, event: &DiscussionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
