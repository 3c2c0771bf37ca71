//! Per-process discussion context
//!
//! Built once at startup from configuration and handed to every new
//! discussion. Holds only immutable shared data, so independent
//! discussions may run concurrently.

use crate::backend::ModelBackend;
use crate::config::{DiscussionSettings, MIN_PARTICIPANTS};
use crate::use_cases::run_discussion::{Discussion, DiscussionError};
use std::sync::Arc;
use submind_domain::{Persona, PersonaProfile};

#[derive(Clone)]
pub struct DiscussionContext {
    backend: ModelBackend,
    profiles: Vec<Arc<PersonaProfile>>,
    settings: DiscussionSettings,
}

impl DiscussionContext {
    pub fn new(
        backend: ModelBackend,
        profiles: Vec<PersonaProfile>,
        settings: DiscussionSettings,
    ) -> Self {
        Self {
            backend,
            profiles: profiles.into_iter().map(Arc::new).collect(),
            settings,
        }
    }

    /// Replace the default settings used by new discussions
    pub fn with_settings(mut self, settings: DiscussionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn backend(&self) -> &ModelBackend {
        &self.backend
    }

    pub fn profiles(&self) -> &[Arc<PersonaProfile>] {
        &self.profiles
    }

    pub fn settings(&self) -> &DiscussionSettings {
        &self.settings
    }

    pub fn persona_names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name().to_string()).collect()
    }

    /// Create a discussion with fresh persona state
    ///
    /// `participants` restricts the discussion to the named personas. The
    /// selection must contain at least two names, all of them configured;
    /// speaking order always follows configuration order.
    pub fn new_discussion(
        &self,
        participants: Option<&[String]>,
    ) -> Result<Discussion, DiscussionError> {
        self.new_discussion_with(participants, self.settings.clone())
    }

    /// Like [`Self::new_discussion`] with per-discussion settings
    pub fn new_discussion_with(
        &self,
        participants: Option<&[String]>,
        settings: DiscussionSettings,
    ) -> Result<Discussion, DiscussionError> {
        if self.profiles.is_empty() {
            return Err(DiscussionError::NoPersonas);
        }

        let selected: Vec<&Arc<PersonaProfile>> = match participants {
            None => self.profiles.iter().collect(),
            Some(names) => {
                if names.len() < MIN_PARTICIPANTS {
                    return Err(DiscussionError::TooFewParticipants {
                        given: names.len(),
                        minimum: MIN_PARTICIPANTS,
                    });
                }
                if let Some(unknown) = names
                    .iter()
                    .find(|name| !self.profiles.iter().any(|p| p.name() == name.as_str()))
                {
                    return Err(DiscussionError::UnknownParticipant(unknown.clone()));
                }
                self.profiles
                    .iter()
                    .filter(|p| names.iter().any(|n| n == p.name()))
                    .collect()
            }
        };

        let personas = selected
            .into_iter()
            .map(|profile| Persona::new(Arc::clone(profile)))
            .collect();

        Discussion::new(self.backend.clone(), personas, settings)
    }
}
