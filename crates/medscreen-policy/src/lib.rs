//! medscreen Policy
//!
//! What the assistant says once a guardrail decision is made: canned safety
//! responses per terminal category, disclaimer augmentation for model
//! replies, and the system instruction sent with every prompt.

pub mod disclaimer;
pub mod prompt;
pub mod responses;

pub use disclaimer::{append_footer, augment};
pub use prompt::SYSTEM_PROMPT;
pub use responses::{
    backend_failure_response, diagnosis_deflection, emergency_response, prescription_deflection,
    prohibited_response, response_for,
};
