//! Disclaimer augmentation for model replies
//!
//! When the warning classifier matches a user turn, the model's reply gets a
//! topic-specific caution appended before it is stored. The topic mapping is
//! ordered and matched by substring: the mapping key must be contained in
//! the matched warning term ("pregnant" hits the pregnancy notice, while
//! "pregnancy" does not contain the key and falls back to the generic
//! disclaimer). First containing key wins.

/// Ordered topic-to-disclaimer mapping
const TOPIC_DISCLAIMERS: &[(&str, &str)] = &[
    (
        "pregnant",
        "\n\n⚠️ **Pregnancy Notice:** Always consult your OB-GYN before taking any action. Pregnancy requires specialized medical care.",
    ),
    (
        "baby",
        "\n\n⚠️ **Pediatric Notice:** Children require specialized care. Always consult a pediatrician for infant/child health concerns.",
    ),
    (
        "medication",
        "\n\n⚠️ **Medication Notice:** Never take medications without consulting a healthcare provider. Drug interactions can be dangerous.",
    ),
    (
        "pain",
        "\n\n⚠️ **Pain Notice:** Persistent or severe pain requires professional evaluation. Don't ignore warning signs.",
    ),
];

/// Fallback when the warning term maps to no specific topic
const GENERIC_DISCLAIMER: &str =
    "\n\n⚠️ **Important:** This is general information only. Consult a healthcare provider for personalized advice.";

/// Footer appended to every successful model reply
const UNIVERSAL_FOOTER: &str =
    "\n\n---\n💡 **Remember:** This is educational information. Always consult a healthcare professional for medical advice.";

/// Append the topic disclaimer selected by `warning_term` to `reply`.
///
/// Pure string transformation; never fails.
pub fn augment(reply: &str, warning_term: &str) -> String {
    let term = warning_term.to_lowercase();
    for (key, disclaimer) in TOPIC_DISCLAIMERS {
        if term.contains(key) {
            return format!("{reply}{disclaimer}");
        }
    }
    format!("{reply}{GENERIC_DISCLAIMER}")
}

/// Append the universal educational footer to `reply`
pub fn append_footer(reply: &str) -> String {
    format!("{reply}{UNIVERSAL_FOOTER}")
}
