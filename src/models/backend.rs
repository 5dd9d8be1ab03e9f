use crate::models::{Attachment, Turn};

/// One streamed fragment of a model response. `done` marks the end of the
/// stream; its `text` may be empty.
#[derive(Debug)]
pub struct CompletionDelta {
    pub id: String,
    pub text: String,
    pub done: bool,
}

/// A submission handed to the completion backend: the new utterance, the
/// conversation so far (excluding the new turn) and an optional image.
pub struct TutorPrompt {
    text: String,
    history: Vec<Turn>,
    attachment: Option<Attachment>,
}

impl TutorPrompt {
    pub fn new(text: impl Into<String>) -> TutorPrompt {
        TutorPrompt {
            text: text.into(),
            history: vec![],
            attachment: None,
        }
    }

    pub fn with_history(mut self, history: Vec<Turn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}
