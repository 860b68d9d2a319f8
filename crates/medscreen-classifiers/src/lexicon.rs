//! Guardrail lexicon: ordered keyword lists and request patterns
//!
//! Keyword lists are ordered by priority, not alphabetically. When several
//! keywords match the same input, the one earliest in its list is reported,
//! so list order decides which term appears in the safety response. Treat
//! the ordering as part of the contract.

use serde::{Deserialize, Serialize};

/// The complete guardrail vocabulary, one ordered list per category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Symptoms that must be redirected to emergency services
    pub emergency: Vec<String>,

    /// High-risk queries the assistant refuses outright
    pub prohibited: Vec<String>,

    /// Topics that add an extra disclaimer to model replies
    pub warning: Vec<String>,

    /// Regex patterns for diagnosis requests (case-insensitive, unanchored)
    pub diagnosis_requests: Vec<String>,

    /// Regex patterns for prescription/medication requests
    pub prescription_requests: Vec<String>,
}

impl Lexicon {
    /// Load a lexicon from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a lexicon from a file
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            emergency: to_owned(&[
                "chest pain",
                "heart attack",
                "stroke",
                "can't breathe",
                "severe bleeding",
                "unconscious",
                "seizure",
                "anaphylaxis",
                "severe allergic",
                "choking",
                "severe burn",
            ]),
            prohibited: to_owned(&[
                // Self-harm and dangerous behaviors
                "suicide",
                "kill myself",
                "end my life",
                "self harm",
                "cut myself",
                "overdose",
                "od on",
                "lethal dose",
                // Prescription requests
                "prescribe",
                "prescription",
                "dosage for",
                "how much should i take",
                "give me medication",
                "what medicine should i take",
                // Dangerous substances
                "abortion pill",
                "misoprostol",
                "mifepristone",
                "opioid",
                "fentanyl",
                "controlled substance",
                // Emergency symptoms (the emergency screen runs first)
                "chest pain",
                "heart attack",
                "stroke",
                "seizure",
                "difficulty breathing",
                "can't breathe",
                "choking",
                "severe bleeding",
                "unconscious",
                "stopped breathing",
                "severe allergic reaction",
                "anaphylaxis",
                // Diagnosis requests
                "do i have",
                "diagnose me",
                "what disease do i have",
                "is it cancer",
                "do i have covid",
            ]),
            warning: to_owned(&[
                "pregnant",
                "pregnancy",
                "baby",
                "infant",
                "child",
                "pediatric",
                "medication",
                "drug",
                "pill",
                "treatment",
                "therapy",
                "pain",
                "fever",
                "infection",
                "rash",
                "wound",
            ]),
            diagnosis_requests: to_owned(&[
                r"do i have",
                r"is (it|this)",
                r"diagnose",
                r"what('s| is) (wrong|my condition)",
                r"am i (sick|ill)",
                r"could (it|this) be",
            ]),
            prescription_requests: to_owned(&[
                r"what (medicine|medication|drug|pill)",
                r"should i take",
                r"can i take",
                r"prescribe",
                r"recommend.*medication",
                r"how much.*take",
            ]),
        }
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
