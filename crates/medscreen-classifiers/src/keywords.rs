//! Ordered-priority keyword classifier

use crate::classifier::{Classifier, PolicyCategory, Verdict};
use aho_corasick::AhoCorasick;
use medscreen_core::Result;
use std::time::Instant;

/// Substring keyword classifier with list-order priority.
///
/// The keyword list is compiled into a single ASCII case-insensitive
/// Aho-Corasick automaton. Matching uses overlapping search and reports the
/// keyword with the smallest list index, so the list order (not the match
/// position in the text) decides which term the verdict carries.
pub struct KeywordClassifier {
    name: String,
    category: PolicyCategory,
    automaton: AhoCorasick,
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Create a new keyword classifier from an ordered keyword list
    pub fn new(
        name: impl Into<String>,
        category: PolicyCategory,
        keywords: Vec<String>,
    ) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| {
                medscreen_core::Error::classifier(format!("failed to build keyword matcher: {}", e))
            })?;

        Ok(Self {
            name: name.into(),
            category,
            automaton,
            keywords,
        })
    }

    /// The configured keyword list, in priority order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

#[async_trait::async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        let start = Instant::now();

        // Overlapping search: leftmost semantics would let a low-priority
        // keyword early in the text shadow a higher-priority one later on.
        let mut best: Option<aho_corasick::Match> = None;
        for m in self.automaton.find_overlapping_iter(text) {
            let better = match &best {
                Some(b) => m.pattern().as_usize() < b.pattern().as_usize(),
                None => true,
            };
            if better {
                best = Some(m);
            }
        }

        let verdict = match best {
            Some(m) => {
                let term = self.keywords[m.pattern().as_usize()].clone();
                Verdict::hit(self.category, Some(term), vec![(m.start(), m.end())])
            }
            None => Verdict::no_match(self.category),
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
