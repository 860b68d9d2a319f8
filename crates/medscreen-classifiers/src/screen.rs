//! Ordered guardrail screen
//!
//! Holds the terminal classifiers in precedence order and returns the first
//! hit. The order is a safety contract: emergencies must short-circuit
//! before anything else, and the prohibited-keyword check runs before the
//! fuzzier request patterns because explicit high-risk vocabulary is the
//! stronger signal and drives the blocked-query audit counter.

use crate::classifier::{Classifier, PolicyCategory};
use crate::keywords::KeywordClassifier;
use crate::lexicon::Lexicon;
use crate::request::RequestPatternClassifier;
use medscreen_core::Result;
use std::sync::Arc;

/// First terminal classification for a user turn
#[derive(Debug, Clone)]
pub struct ScreenHit {
    /// Category of the stage that fired
    pub category: PolicyCategory,

    /// Matched term, when the stage reports one
    pub term: Option<String>,

    /// Name of the classifier that fired
    pub classifier: String,
}

/// The four terminal classifiers, evaluated strictly in order
pub struct GuardrailScreen {
    stages: Vec<Arc<dyn Classifier>>,
}

impl GuardrailScreen {
    /// Build the screen from the built-in lexicon
    pub fn new() -> Result<Self> {
        Self::from_lexicon(&Lexicon::default())
    }

    /// Build the screen from a custom lexicon
    pub fn from_lexicon(lexicon: &Lexicon) -> Result<Self> {
        let stages: Vec<Arc<dyn Classifier>> = vec![
            Arc::new(KeywordClassifier::new(
                "emergency",
                PolicyCategory::Emergency,
                lexicon.emergency.clone(),
            )?),
            Arc::new(KeywordClassifier::new(
                "prohibited",
                PolicyCategory::Prohibited,
                lexicon.prohibited.clone(),
            )?),
            Arc::new(RequestPatternClassifier::new(
                "diagnosis-request",
                PolicyCategory::DiagnosisRequest,
                &lexicon.diagnosis_requests,
            )?),
            Arc::new(RequestPatternClassifier::new(
                "prescription-request",
                PolicyCategory::PrescriptionRequest,
                &lexicon.prescription_requests,
            )?),
        ];

        Ok(Self { stages })
    }

    /// Run the stages in order and return the first hit, if any
    pub async fn screen(&self, text: &str) -> Result<Option<ScreenHit>> {
        for stage in &self.stages {
            let verdict = stage.classify(text).await?;
            if verdict.matched {
                tracing::debug!(
                    classifier = stage.name(),
                    category = verdict.category.label(),
                    term = verdict.term.as_deref().unwrap_or(""),
                    "guardrail stage fired"
                );
                return Ok(Some(ScreenHit {
                    category: verdict.category,
                    term: verdict.term,
                    classifier: stage.name().to_string(),
                }));
            }
        }
        Ok(None)
    }

    /// Number of terminal stages
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
