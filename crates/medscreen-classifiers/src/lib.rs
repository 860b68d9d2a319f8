//! medscreen Classifiers
//!
//! Pattern-based guardrail classifiers for the medical-education assistant.
//!
//! Two classifier families cover the whole screen:
//! - Keyword classifiers: ordered substring lists compiled to Aho-Corasick
//!   automata; the list order is the reporting priority.
//! - Request classifiers: case-insensitive regex sets detecting diagnosis
//!   and prescription intents.
//!
//! [`GuardrailScreen`] fixes the evaluation order across categories.

pub mod classifier;
pub mod keywords;
pub mod lexicon;
pub mod request;
pub mod screen;

pub use classifier::{Classifier, PolicyCategory, Verdict};
pub use keywords::KeywordClassifier;
pub use lexicon::Lexicon;
pub use request::RequestPatternClassifier;
pub use screen::{GuardrailScreen, ScreenHit};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, PolicyCategory, Verdict};
    pub use crate::keywords::KeywordClassifier;
    pub use crate::lexicon::Lexicon;
    pub use crate::request::RequestPatternClassifier;
    pub use crate::screen::{GuardrailScreen, ScreenHit};
}
