//! Transcript messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Speaker name used for the seeding prompt
pub const USER_SPEAKER: &str = "User";
/// Speaker name used for orchestrator notices
pub const SYSTEM_SPEAKER: &str = "System";

/// Who produced a message (Value Object)
///
/// Serialized as a plain string: `"User"`, `"System"`, or the persona name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Speaker {
    User,
    System,
    Persona(String),
}

impl Speaker {
    pub fn persona(name: impl Into<String>) -> Self {
        Speaker::Persona(name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Speaker::User => USER_SPEAKER,
            Speaker::System => SYSTEM_SPEAKER,
            Speaker::Persona(name) => name,
        }
    }

    pub fn is_persona(&self) -> bool {
        matches!(self, Speaker::Persona(_))
    }

    /// Persona name, if this speaker is a persona
    pub fn persona_name(&self) -> Option<&str> {
        match self {
            Speaker::Persona(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Speaker {
    fn from(s: &str) -> Self {
        match s {
            USER_SPEAKER => Speaker::User,
            SYSTEM_SPEAKER => Speaker::System,
            other => Speaker::Persona(other.to_string()),
        }
    }
}

impl Serialize for Speaker {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Speaker {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Speaker::from(s.as_str()))
    }
}

/// One utterance in a discussion transcript (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Discussion round; 0 is the seeding user prompt
    pub round: u32,
    /// Free-form role tag: the persona role, `"user"`, or `"system"`
    pub role: String,
    /// Backend model that produced the message (persona messages only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Message {
    /// The seeding user prompt (round 0)
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            timestamp: Utc::now(),
            round: 0,
            role: "user".to_string(),
            model: None,
        }
    }

    /// An orchestrator notice such as the termination reason
    pub fn system(content: impl Into<String>, round: u32) -> Self {
        Self {
            speaker: Speaker::System,
            content: content.into(),
            timestamp: Utc::now(),
            round,
            role: "system".to_string(),
            model: None,
        }
    }

    /// A persona reply produced by `model`
    pub fn persona(
        name: impl Into<String>,
        role: impl Into<String>,
        content: impl Into<String>,
        round: u32,
        model: impl Into<String>,
    ) -> Self {
        Self {
            speaker: Speaker::Persona(name.into()),
            content: content.into(),
            timestamp: Utc::now(),
            round,
            role: role.into(),
            model: Some(model.into()),
        }
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    /// Check whether this message was spoken by the named persona
    pub fn is_from(&self, name: &str) -> bool {
        self.speaker.persona_name() == Some(name)
    }
}
