//! Classifier trait and common types

use async_trait::async_trait;
use medscreen_core::Result;

/// Trait for all guardrail classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> Result<Verdict>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Policy category this classifier screens for
    fn category(&self) -> PolicyCategory;
}

/// Policy category attached to a classifier and its verdicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyCategory {
    /// Symptoms that need emergency services, not a chatbot
    Emergency,
    /// High-risk content the assistant must refuse outright
    Prohibited,
    /// Topics that get an extra disclaimer on model replies
    Warning,
    /// The user is asking for a diagnosis
    DiagnosisRequest,
    /// The user is asking for a prescription or dosage
    PrescriptionRequest,
}

impl PolicyCategory {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "emergency",
            Self::Prohibited => "prohibited",
            Self::Warning => "warning",
            Self::DiagnosisRequest => "diagnosis-request",
            Self::PrescriptionRequest => "prescription-request",
        }
    }

    /// Whether a hit in this category ends turn processing before the model
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Warning)
    }
}

/// Result of a single classifier invocation
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Whether the classifier matched
    pub matched: bool,

    /// Category the classifier screens for
    pub category: PolicyCategory,

    /// The matched term, for classifiers that report one.
    /// Keyword classifiers report the highest-priority keyword; pattern
    /// classifiers report only the boolean.
    pub term: Option<String>,

    /// Byte span of the reported match, if any
    pub spans: Vec<(usize, usize)>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl Verdict {
    /// Create a non-matching verdict
    pub fn no_match(category: PolicyCategory) -> Self {
        Self {
            matched: false,
            category,
            term: None,
            spans: Vec::new(),
            latency_us: 0,
        }
    }

    /// Create a matching verdict with an optional reported term
    pub fn hit(category: PolicyCategory, term: Option<String>, spans: Vec<(usize, usize)>) -> Self {
        Self {
            matched: true,
            category,
            term,
            spans,
            latency_us: 0,
        }
    }

    /// Attach measured latency
    pub fn with_latency(mut self, latency_us: u64) -> Self {
        self.latency_us = latency_us;
        self
    }
}
