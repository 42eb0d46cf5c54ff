//! Blocking user-facing prompts: the alert shown for an empty name and the
//! confirmation shown before a delete.

pub trait Prompt {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// Non-interactive prompt that answers every confirmation with a fixed value
/// and keeps a transcript.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    pub answer: bool,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.answer
    }
}
