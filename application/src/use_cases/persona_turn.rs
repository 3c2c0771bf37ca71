//! Persona turn use case
//!
//! Produces one persona reply from the shared history, walking the
//! persona's model fallback chain on rate limits.

use crate::backend::{BackendError, ModelBackend};
use submind_domain::{InstructionPlacement, Message, Persona};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a single persona turn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// Non-retriable failure on one model; later models were not tried
    #[error("{persona}: {source}")]
    Backend {
        persona: String,
        #[source]
        source: BackendError,
    },

    /// Every model in the chain was rate limited
    #[error("{persona}: all models exhausted (last: {last})")]
    AllModelsExhausted { persona: String, last: BackendError },
}

impl TurnError {
    pub fn persona(&self) -> &str {
        match self {
            TurnError::Backend { persona, .. } | TurnError::AllModelsExhausted { persona, .. } => {
                persona
            }
        }
    }
}

/// Generate the next reply for `persona`
///
/// Models are tried in configured order. A rate limit moves on to the next
/// model; any other failure ends the turn immediately. On success the
/// persona's current model and response count are updated and the message
/// is stamped with the new response count as its round. The orchestrator
/// restamps the round with its own counter before appending.
pub async fn generate_response(
    persona: &mut Persona,
    backend: &ModelBackend,
    history: &[Message],
    placement: InstructionPlacement,
) -> Result<Message, TurnError> {
    let context = persona.build_context(history, placement);
    let profile = persona.profile();
    let (temperature, max_tokens) = (profile.temperature(), profile.max_tokens());
    let models = persona.models().to_vec();

    debug!(
        "{} building reply from {} history messages",
        persona.name(),
        history.len()
    );

    let mut last_rate_limit = None;

    for (index, model) in models.iter().enumerate() {
        match backend
            .generate_response(model, &context, temperature, max_tokens)
            .await
        {
            Ok(content) => {
                if index > 0 {
                    info!("{} answered with fallback model {}", persona.name(), model);
                }
                let round = persona.record_success(model);
                return Ok(Message::persona(
                    persona.name(),
                    persona.role(),
                    content,
                    round,
                    model.as_str(),
                ));
            }
            Err(e) if e.is_rate_limit() => {
                if index + 1 < models.len() {
                    warn!(
                        "{}: rate limited on {}, trying {}",
                        persona.name(),
                        model,
                        models[index + 1]
                    );
                }
                last_rate_limit = Some(e);
            }
            Err(e) => {
                return Err(TurnError::Backend {
                    persona: persona.name().to_string(),
                    source: e,
                });
            }
        }
    }

    let last = last_rate_limit.unwrap_or_else(|| BackendError::Backend {
        model: String::new(),
        message: "no models configured".to_string(),
    });
    warn!("{}: all models rate limited", persona.name());
    Err(TurnError::AllModelsExhausted {
        persona: persona.name().to_string(),
        last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::ScriptedGateway;
    use crate::ports::llm_gateway::GatewayError;
    use std::sync::Arc;
    use submind_domain::{ChatRole, PersonaProfile};

    fn persona(models: &[&str]) -> Persona {
        let profile = PersonaProfile::new(
            "Analytical",
            "analytical",
            models.iter().map(|m| m.to_string()).collect(),
        )
        .unwrap()
        .with_temperature(0.3)
        .with_max_tokens(200);
        Persona::new(Arc::new(profile))
    }

    fn rate_limited() -> Result<&'static str, GatewayError> {
        Err(GatewayError::RequestFailed(
            "HTTP 429 Too Many Requests".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_success_on_preferred_model() {
        let gateway = Arc::new(ScriptedGateway::new().script("A", Ok("Data says yes.")));
        let backend = ModelBackend::new(gateway.clone());
        let mut persona = persona(&["A", "B"]);
        let history = vec![Message::user("Should we?")];

        let msg = generate_response(
            &mut persona,
            &backend,
            &history,
            InstructionPlacement::PrependToFirstTurn,
        )
        .await
        .unwrap();

        assert!(msg.is_from("Analytical"));
        assert_eq!(msg.role, "analytical");
        assert_eq!(msg.content, "Data says yes.");
        assert_eq!(msg.round, 1);
        assert_eq!(msg.model.as_deref(), Some("A"));
        assert_eq!(persona.response_count(), 1);

        let calls = gateway.calls();
        assert_eq!(calls[0].temperature, 0.3);
        assert_eq!(calls[0].max_tokens, 200);
        assert_eq!(calls[0].messages[0].role, ChatRole::User);
        assert!(calls[0].messages[0].content.ends_with("\n\nShould we?"));
    }

    #[tokio::test]
    async fn test_fallback_after_rate_limit() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("A", rate_limited())
                .script("B", Ok("From B.")),
        );
        let backend = ModelBackend::new(gateway.clone());
        let mut persona = persona(&["A", "B"]);

        let msg = generate_response(
            &mut persona,
            &backend,
            &[Message::user("Go")],
            InstructionPlacement::PrependToFirstTurn,
        )
        .await
        .unwrap();

        assert_eq!(msg.model.as_deref(), Some("B"));
        assert_eq!(persona.current_model(), "B");
        assert_eq!(gateway.called_models(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_non_rate_limit_error_skips_fallback() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("A", Err(GatewayError::ConnectionError("refused".to_string())))
                .script("B", Ok("never")),
        );
        let backend = ModelBackend::new(gateway.clone());
        let mut persona = persona(&["A", "B"]);

        let err = generate_response(
            &mut persona,
            &backend,
            &[Message::user("Go")],
            InstructionPlacement::PrependToFirstTurn,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, TurnError::Backend { .. }));
        assert_eq!(err.persona(), "Analytical");
        assert_eq!(gateway.called_models(), vec!["A"]);
        assert_eq!(persona.response_count(), 0);
        assert_eq!(persona.current_model(), "A");
    }

    #[tokio::test]
    async fn test_all_models_exhausted() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .script("A", rate_limited())
                .script("B", rate_limited()),
        );
        let backend = ModelBackend::new(gateway.clone());
        let mut persona = persona(&["A", "B"]);

        let err = generate_response(
            &mut persona,
            &backend,
            &[Message::user("Go")],
            InstructionPlacement::PrependToFirstTurn,
        )
        .await
        .unwrap_err();

        match err {
            TurnError::AllModelsExhausted { persona, last } => {
                assert_eq!(persona, "Analytical");
                assert!(last.is_rate_limit());
                assert_eq!(last.model(), "B");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_round_follows_response_count() {
        let gateway = Arc::new(ScriptedGateway::echoing());
        let backend = ModelBackend::new(gateway);
        let mut persona = persona(&["A"]);

        for expected in 1..=3 {
            let msg = generate_response(
                &mut persona,
                &backend,
                &[Message::user("Go")],
                InstructionPlacement::SystemTurn,
            )
            .await
            .unwrap();
            assert_eq!(msg.round, expected);
        }
    }
}
