//! Fixed safety responses
//!
//! Each terminal guardrail category maps to one canned, human-readable
//! markdown message. These are produced locally and never touch the model.

use medscreen_classifiers::PolicyCategory;

/// Map a terminal screen hit to its canned response.
///
/// Returns `None` for [`PolicyCategory::Warning`], which is not a terminal
/// category and never produces a response of its own.
pub fn response_for(category: PolicyCategory, term: Option<&str>) -> Option<String> {
    match category {
        PolicyCategory::Emergency => Some(emergency_response(term.unwrap_or_default())),
        PolicyCategory::Prohibited => Some(prohibited_response(term.unwrap_or_default())),
        PolicyCategory::DiagnosisRequest => Some(diagnosis_deflection().to_string()),
        PolicyCategory::PrescriptionRequest => Some(prescription_deflection().to_string()),
        PolicyCategory::Warning => None,
    }
}

/// Response for emergency situations, keyed by the matched term
pub fn emergency_response(term: &str) -> String {
    format!(
        r#"🚨 **EMERGENCY ALERT** 🚨

Your message mentions **"{term}"** which could indicate a medical emergency.

**IMMEDIATE ACTION REQUIRED:**
- 🚑 Call emergency services (911 in US, 112 in EU, or your local emergency number)
- 🏥 Go to the nearest emergency room
- 📞 Contact your doctor immediately

**DO NOT WAIT** for online advice in emergency situations.

This chatbot CANNOT provide emergency medical care. Please seek immediate professional help."#
    )
}

/// Response for prohibited topics, keyed by the matched term
pub fn prohibited_response(term: &str) -> String {
    format!(
        r#"⚠️ **I Cannot Help With This Request**

I'm designed to provide general health education only. Your question about **"{term}"** falls outside my capabilities.

**Why I can't help:**
- I cannot diagnose conditions
- I cannot prescribe medications
- I cannot provide information that could be harmful
- I am not a substitute for a licensed healthcare provider

**What you should do:**
- 📞 **Contact a licensed doctor** or healthcare provider
- 🏥 **Visit a clinic** for professional evaluation
- 🆘 **Call a crisis helpline** if you're in distress:
  - National Suicide Prevention Lifeline: 988 (US)
  - Crisis Text Line: Text HOME to 741741

Your health and safety are important. Please seek professional help."#
    )
}

/// Fixed deflection for diagnosis requests
pub fn diagnosis_deflection() -> &'static str {
    r#"I understand you're looking for answers about your health, but I cannot diagnose medical conditions.

**Why diagnosis requires a doctor:**
- Physical examination is necessary
- Medical tests may be needed
- Individual medical history matters
- Accurate diagnosis requires professional training

**What I can do:**
- Provide general information about symptoms
- Explain when to seek medical care
- Suggest questions to ask your doctor

**Please consult a healthcare provider** for an accurate diagnosis."#
}

/// Fixed deflection for prescription and medication requests
pub fn prescription_deflection() -> &'static str {
    r#"I cannot recommend or prescribe medications.

**Why medication requires a doctor:**
- Proper dosing depends on individual factors
- Drug interactions can be dangerous
- Side effects need to be monitored
- Some conditions mimic others

**What you should do:**
- Consult a licensed healthcare provider
- Discuss your symptoms and concerns
- Get proper examination and tests
- Follow prescribed treatment plans

**Never self-medicate** based on online information."#
}

/// User-visible message for a failed model call
pub fn backend_failure_response(description: &str) -> String {
    format!(
        "⚠️ Error generating response: {description}\n\nPlease try again or contact support if the issue persists."
    )
}
