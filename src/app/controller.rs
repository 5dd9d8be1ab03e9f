#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

use crate::{
    config::constants::{IMAGE_PLACEHOLDER, STREAM_ERROR_MESSAGE, topic_prompt},
    models::{Attachment, CompletionDelta, Conversation, Turn, TutorPrompt},
};

/// Owns the canonical turn list and the single in-flight-request flag.
///
/// All mutation happens on the UI event loop: `submit` checks and sets
/// `busy` before anything can suspend, so two submissions can never
/// interleave. There is no queue and no cancellation; while `busy` the
/// input is simply rejected.
pub struct ChatController {
    conversation: Conversation,
    busy: bool,
}

impl ChatController {
    pub fn new() -> Self {
        Self {
            conversation: Conversation::new_hello(),
            busy: false,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Starts a new exchange. Returns the prompt to hand to the backend,
    /// or `None` when the submission is rejected (already busy, or both
    /// text and attachment empty).
    ///
    /// On acceptance the user turn and an empty model turn are appended;
    /// every fragment of the response lands on that model turn via
    /// [`ChatController::apply_delta`].
    pub fn submit(&mut self, text: &str, attachment: Option<Attachment>) -> Option<TutorPrompt> {
        if self.busy {
            return None;
        }

        let text = text.trim();
        if text.is_empty() && attachment.is_none() {
            return None;
        }

        let shown = if text.is_empty() {
            IMAGE_PLACEHOLDER
        } else {
            text
        };

        // History excludes the turn being submitted
        let history = self.conversation.turns().to_vec();

        self.conversation.append_turn(Turn::new_user(shown));
        self.busy = true;
        self.conversation.append_turn(Turn::new_model(""));

        let mut prompt = TutorPrompt::new(text).with_history(history);
        if let Some(attachment) = attachment {
            prompt = prompt.with_attachment(attachment);
        }
        Some(prompt)
    }

    /// Quick-action shortcut: submits the fixed explain-this-chapter
    /// prompt for the selected topic.
    pub fn submit_topic(&mut self, topic: &str) -> Option<TutorPrompt> {
        self.submit(&topic_prompt(topic), None)
    }

    /// Appends one streamed fragment to the pending model turn, in
    /// arrival order. A `done` fragment ends the exchange.
    pub fn apply_delta(&mut self, delta: &CompletionDelta) {
        if !self.busy {
            return;
        }

        if !delta.text.is_empty() {
            if let Some(last) = self.conversation.last_turn_mut() {
                last.append(&delta.text);
            }
        }

        if delta.done {
            self.busy = false;
        }
    }

    /// Ends the exchange after a hard stream failure. Partial content
    /// already streamed is kept; the apology is appended after a blank
    /// line.
    pub fn fail(&mut self) {
        if !self.busy {
            return;
        }

        if let Some(last) = self.conversation.last_turn_mut() {
            if last.text().is_empty() {
                last.append(STREAM_ERROR_MESSAGE);
            } else {
                last.append(format!("\n\n{}", STREAM_ERROR_MESSAGE));
            }
        }

        self.busy = false;
    }
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}
