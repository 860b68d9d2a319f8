//! Mock completion backend
//!
//! Stands in for the model service in tests and in the CLI's offline mode.
//! Scripted replies and failures are consumed in FIFO order; with an empty
//! script the backend answers from a small template pool. Every prompt is
//! recorded so tests can assert whether the model was called at all.

use crate::backend::CompletionBackend;
use async_trait::async_trait;
use medscreen_core::{Error, Result};
use parking_lot::Mutex;
use rand::prelude::*;
use std::collections::VecDeque;

enum ScriptedReply {
    Reply(String),
    Failure(String),
}

/// Mock backend with scripted replies, failure injection, and prompt capture
pub struct MockBackend {
    script: Mutex<VecDeque<ScriptedReply>>,
    prompts: Mutex<Vec<String>>,
    templates: Vec<&'static str>,
}

impl MockBackend {
    /// Create a template-answering mock
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            templates: vec![
                "In general terms, mild symptoms like these often improve with rest, fluids, and time. Watch for anything that worsens or persists.",
                "That's a common health question. Broadly, the body handles this through its normal immune and repair processes; a professional can assess your specific situation.",
                "Here is some general background on that topic. Keeping track of when symptoms started and how they change is useful information for a clinician.",
                "From an educational standpoint, there are a few typical explanations for what you describe. A healthcare provider can tell you which applies to you.",
            ],
        }
    }

    /// Create a mock that replays the given replies in order
    pub fn with_script(replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mock = Self::new();
        for reply in replies {
            mock.push_reply(reply);
        }
        mock
    }

    /// Create a mock whose next call fails with the given description
    pub fn failing(description: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_failure(description);
        mock
    }

    /// Queue a scripted reply
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.script
            .lock()
            .push_back(ScriptedReply::Reply(reply.into()));
    }

    /// Queue a scripted failure
    pub fn push_failure(&self, description: impl Into<String>) {
        self.script
            .lock()
            .push_back(ScriptedReply::Failure(description.into()));
    }

    /// Number of completion calls received
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    /// Prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());

        if let Some(scripted) = self.script.lock().pop_front() {
            return match scripted {
                ScriptedReply::Reply(reply) => Ok(reply),
                ScriptedReply::Failure(description) => Err(Error::backend(description)),
            };
        }

        let idx = rand::thread_rng().gen_range(0..self.templates.len());
        Ok(self.templates[idx].to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
