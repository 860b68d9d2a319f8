//! Request-intent pattern classifier

use crate::classifier::{Classifier, PolicyCategory, Verdict};
use medscreen_core::Result;
use regex::RegexSet;
use std::time::Instant;

/// Regex classifier for fuzzy request intents (diagnosis, prescription).
///
/// Patterns are matched case-insensitively with unanchored search. The
/// verdict is boolean only: which pattern fired does not matter downstream,
/// so no term is reported.
pub struct RequestPatternClassifier {
    name: String,
    category: PolicyCategory,
    patterns: RegexSet,
}

impl RequestPatternClassifier {
    /// Create a new request classifier from a pattern list
    pub fn new(
        name: impl Into<String>,
        category: PolicyCategory,
        patterns: &[String],
    ) -> Result<Self> {
        let patterns = regex::RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                medscreen_core::Error::classifier(format!(
                    "failed to compile request patterns: {}",
                    e
                ))
            })?;

        Ok(Self {
            name: name.into(),
            category,
            patterns,
        })
    }
}

#[async_trait::async_trait]
impl Classifier for RequestPatternClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        let start = Instant::now();

        let verdict = if self.patterns.is_match(text) {
            Verdict::hit(self.category, None, Vec::new())
        } else {
            Verdict::no_match(self.category)
        };

        Ok(verdict.with_latency(start.elapsed().as_micros() as u64))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> PolicyCategory {
        self.category
    }
}
