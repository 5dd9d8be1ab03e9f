use super::*;
use crate::models::Role;

fn delta(text: &str, done: bool) -> CompletionDelta {
    CompletionDelta {
        id: "msg".to_string(),
        text: text.to_string(),
        done,
    }
}

#[test]
fn test_submit_appends_user_and_placeholder_turns() {
    let mut controller = ChatController::new();

    let prompt = controller
        .submit("What is Section 74A?", None)
        .expect("submission must be accepted");

    assert_eq!(prompt.text(), "What is Section 74A?");
    // History excludes the new exchange: only the greeting
    assert_eq!(prompt.history().len(), 1);
    assert!(prompt.attachment().is_none());

    assert!(controller.busy());
    let turns = controller.conversation().turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].role(), Role::User);
    assert_eq!(turns[1].text(), "What is Section 74A?");
    assert_eq!(turns[2].role(), Role::Model);
    assert_eq!(turns[2].text(), "");
}

#[test]
fn test_fragments_concatenate_in_order() {
    let mut controller = ChatController::new();
    controller.submit("What is Section 74A?", None).unwrap();

    for fragment in ["Sec", "tion 74A ", "governs ", "assessments."] {
        controller.apply_delta(&delta(fragment, false));
    }
    controller.apply_delta(&delta("", true));

    assert!(!controller.busy());
    let turns = controller.conversation().turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(
        turns.last().unwrap().text(),
        "Section 74A governs assessments."
    );
}

#[test]
fn test_submit_while_busy_is_a_noop() {
    let mut controller = ChatController::new();
    assert!(controller.submit("first question", None).is_some());

    assert!(controller.submit("second question", None).is_none());
    // One user turn, one placeholder — nothing from the second submit
    assert_eq!(controller.conversation().len(), 3);

    controller.apply_delta(&delta("answer", true));
    assert!(!controller.busy());
    assert!(controller.submit("second question", None).is_some());
}

#[test]
fn test_blank_submit_is_a_noop() {
    let mut controller = ChatController::new();

    assert!(controller.submit("", None).is_none());
    assert!(controller.submit("   \n ", None).is_none());
    assert_eq!(controller.conversation().len(), 1);
    assert!(!controller.busy());
}

#[test]
fn test_image_only_submit_uses_placeholder() {
    let mut controller = ChatController::new();

    let prompt = controller
        .submit("", Some(Attachment::new("image/png", "aGVsbG8=")))
        .expect("image-only submission must be accepted");

    assert_eq!(prompt.text(), "");
    assert_eq!(prompt.attachment().unwrap().mime_type(), "image/png");

    let turns = controller.conversation().turns();
    assert_eq!(turns[1].text(), IMAGE_PLACEHOLDER);
    assert!(controller.busy());
}

#[test]
fn test_submit_topic_uses_fixed_template() {
    let mut controller = ChatController::new();

    controller.submit_topic("Place of Supply").unwrap();

    assert_eq!(
        controller.conversation().turns()[1].text(),
        "Explain the core concept of Place of Supply briefly in exam format."
    );
}

#[test]
fn test_fail_keeps_partial_content_and_appends_apology() {
    let mut controller = ChatController::new();
    controller.submit("What is Section 74A?", None).unwrap();

    controller.apply_delta(&delta("Sec", false));
    controller.apply_delta(&delta("tion 74A", false));
    controller.fail();

    assert!(!controller.busy());
    let turns = controller.conversation().turns();
    assert_eq!(turns.len(), 3);
    assert_eq!(
        turns.last().unwrap().text(),
        format!("Section 74A\n\n{}", STREAM_ERROR_MESSAGE)
    );
}

#[test]
fn test_fail_before_any_fragment() {
    let mut controller = ChatController::new();
    controller.submit("What is Section 74A?", None).unwrap();
    controller.fail();

    assert!(!controller.busy());
    assert_eq!(
        controller.conversation().last_turn().unwrap().text(),
        STREAM_ERROR_MESSAGE
    );
}

#[test]
fn test_missing_credential_message_lands_as_model_turn() {
    use crate::config::constants::MISSING_KEY_MESSAGE;

    let mut controller = ChatController::new();
    controller.submit("What is Section 74A?", None).unwrap();

    // The backend degrades a missing key to a single terminal fragment
    controller.apply_delta(&CompletionDelta {
        id: "msg".to_string(),
        text: MISSING_KEY_MESSAGE.to_string(),
        done: true,
    });

    assert!(!controller.busy());
    assert_eq!(
        controller.conversation().last_turn().unwrap().text(),
        MISSING_KEY_MESSAGE
    );
}

#[test]
fn test_delta_after_completion_is_ignored() {
    let mut controller = ChatController::new();
    controller.submit("What is Section 74A?", None).unwrap();
    controller.apply_delta(&delta("done.", true));

    controller.apply_delta(&delta("stray fragment", false));
    controller.fail();

    assert_eq!(controller.conversation().last_turn().unwrap().text(), "done.");
    assert!(!controller.busy());
}
