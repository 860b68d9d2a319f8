//! The guarded turn pipeline
//!
//! Every user turn runs the guardrail screen before the model is involved.
//! The stage order is safety-critical and fixed: emergency, prohibited,
//! diagnosis-request, prescription-request, then model dispatch. The first
//! terminal stage wins; an emergency must never wait on a model round-trip.

use crate::backend::CompletionBackend;
use crate::session::{Session, DEFAULT_MAX_HISTORY};
use medscreen_classifiers::{
    Classifier, GuardrailScreen, KeywordClassifier, Lexicon, PolicyCategory, ScreenHit,
};
use medscreen_core::{Result, Turn};
use medscreen_policy as policy;
use std::sync::Arc;

/// Which pipeline stage produced the assistant turn
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Emergency keyword hit; redirected to emergency services
    Emergency { term: String, reply: String },
    /// Prohibited keyword hit; refused and counted
    Blocked { term: String, reply: String },
    /// Diagnosis request deflected
    DiagnosisDeflected { reply: String },
    /// Prescription request deflected
    PrescriptionDeflected { reply: String },
    /// Model reply, disclaimers applied
    Answered { reply: String },
    /// Model call failed; error surfaced as a chat message
    BackendFailed { reply: String },
}

impl TurnOutcome {
    /// The assistant reply stored for this turn
    pub fn reply(&self) -> &str {
        match self {
            Self::Emergency { reply, .. }
            | Self::Blocked { reply, .. }
            | Self::DiagnosisDeflected { reply }
            | Self::PrescriptionDeflected { reply }
            | Self::Answered { reply }
            | Self::BackendFailed { reply } => reply,
        }
    }

    /// Short stage label for logs and status surfaces
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Emergency { .. } => "emergency",
            Self::Blocked { .. } => "blocked",
            Self::DiagnosisDeflected { .. } => "diagnosis-deflected",
            Self::PrescriptionDeflected { .. } => "prescription-deflected",
            Self::Answered { .. } => "answered",
            Self::BackendFailed { .. } => "backend-failed",
        }
    }
}

/// Orchestrates classification, model dispatch, and session mutation for one
/// conversation. Takes `&mut Session`, so a session processes one turn at a
/// time by construction.
pub struct TurnPipeline {
    screen: GuardrailScreen,
    warning: KeywordClassifier,
    backend: Arc<dyn CompletionBackend>,
    max_history: usize,
}

impl TurnPipeline {
    /// Build a pipeline over the built-in lexicon
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Result<Self> {
        Self::with_lexicon(backend, &Lexicon::default(), DEFAULT_MAX_HISTORY)
    }

    /// Build a pipeline over a custom lexicon and history cap
    pub fn with_lexicon(
        backend: Arc<dyn CompletionBackend>,
        lexicon: &Lexicon,
        max_history: usize,
    ) -> Result<Self> {
        Ok(Self {
            screen: GuardrailScreen::from_lexicon(lexicon)?,
            warning: KeywordClassifier::new(
                "warning",
                PolicyCategory::Warning,
                lexicon.warning.clone(),
            )?,
            backend,
            max_history,
        })
    }

    /// Process one user turn end to end.
    ///
    /// Appends the user turn, runs the screen, produces the assistant turn
    /// from the first terminal stage (or the model), and trims the history.
    /// Every path grows the conversation by exactly two turns.
    pub async fn process_turn(&self, session: &mut Session, input: &str) -> Result<TurnOutcome> {
        session.append(Turn::user(input));

        let safety = match self.screen.screen(input).await? {
            Some(hit) => self.safety_outcome(session, &hit),
            None => None,
        };

        let outcome = match safety {
            Some(outcome) => outcome,
            None => self.dispatch(session, input).await?,
        };

        session.append(Turn::assistant(outcome.reply()));
        session.trim(self.max_history);
        Ok(outcome)
    }

    /// Convert a terminal screen hit into its canned outcome. Returns `None`
    /// for non-terminal categories, which fall through to model dispatch.
    fn safety_outcome(&self, session: &mut Session, hit: &ScreenHit) -> Option<TurnOutcome> {
        let reply = policy::response_for(hit.category, hit.term.as_deref())?;
        let term = hit.term.clone().unwrap_or_default();

        Some(match hit.category {
            PolicyCategory::Emergency => {
                tracing::warn!(session = %session.id(), term = %term, "emergency detected, redirecting");
                TurnOutcome::Emergency { term, reply }
            }
            PolicyCategory::Prohibited => {
                let total = session.record_blocked();
                tracing::warn!(session = %session.id(), term = %term, blocked_total = total, "prohibited query refused");
                TurnOutcome::Blocked { term, reply }
            }
            PolicyCategory::DiagnosisRequest => {
                tracing::info!(session = %session.id(), "diagnosis request deflected");
                TurnOutcome::DiagnosisDeflected { reply }
            }
            PolicyCategory::PrescriptionRequest => {
                tracing::info!(session = %session.id(), "prescription request deflected");
                TurnOutcome::PrescriptionDeflected { reply }
            }
            PolicyCategory::Warning => return None,
        })
    }

    /// Forward the conversation to the model and shape the reply
    async fn dispatch(&self, session: &Session, input: &str) -> Result<TurnOutcome> {
        let prompt = session.transcript(policy::SYSTEM_PROMPT);
        tracing::debug!(
            session = %session.id(),
            backend = self.backend.name(),
            prompt_bytes = prompt.len(),
            "dispatching to model"
        );

        match self.backend.complete(&prompt).await {
            Ok(reply) => {
                // The warning screen reads the user's turn, not the reply:
                // the caution concerns what was asked, not what was said.
                let warning = self.warning.classify(input).await?;
                let reply = if warning.matched {
                    policy::augment(&reply, warning.term.as_deref().unwrap_or_default())
                } else {
                    reply
                };
                Ok(TurnOutcome::Answered {
                    reply: policy::append_footer(&reply),
                })
            }
            Err(e) => {
                tracing::error!(session = %session.id(), error = %e, "model call failed");
                Ok(TurnOutcome::BackendFailed {
                    reply: policy::backend_failure_response(&e.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;

    fn pipeline(mock: Arc<MockBackend>) -> TurnPipeline {
        TurnPipeline::new(mock).unwrap()
    }

    #[tokio::test]
    async fn test_outcome_reply_accessor() {
        let outcome = TurnOutcome::Answered {
            reply: "hello".to_string(),
        };
        assert_eq!(outcome.reply(), "hello");
        assert_eq!(outcome.stage(), "answered");
    }

    #[tokio::test]
    async fn test_every_path_appends_two_turns() {
        let mock = Arc::new(MockBackend::with_script(["fine"]));
        let pipeline = pipeline(mock);
        let mut session = Session::new();

        pipeline.process_turn(&mut session, "hello there").await.unwrap();
        assert_eq!(session.message_count(), 2);

        pipeline
            .process_turn(&mut session, "I think I'm having chest pain")
            .await
            .unwrap();
        assert_eq!(session.message_count(), 4);
    }

    #[tokio::test]
    async fn test_warning_augments_before_turn_is_stored() {
        let mock = Arc::new(MockBackend::with_script(["General advice."]));
        let pipeline = pipeline(mock);
        let mut session = Session::new();

        pipeline
            .process_turn(&mut session, "my baby won't sleep")
            .await
            .unwrap();

        // The stored assistant turn already carries the disclaimer; turns
        // are never edited after the fact.
        let last = session.turns().last().unwrap();
        assert!(last.content.contains("Pediatric Notice"));
        assert!(last.content.contains("educational information"));
    }
}
