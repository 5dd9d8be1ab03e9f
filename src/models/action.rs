use super::TutorPrompt;

/// Work dispatched from the UI loop to the action service.
pub enum Action {
    CompletionRequest(TutorPrompt),

    Dictate,
    CameraSnapshot,
    AttachFile(String), // file path
}
