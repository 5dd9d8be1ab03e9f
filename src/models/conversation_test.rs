use super::*;
use crate::models::Role;

#[test]
fn test_new_hello_opens_with_greeting() {
    Configuration::init(Configuration::default()).expect("failed to init default config");

    let convo = Conversation::new_hello();
    assert_eq!(convo.len(), 1);

    let greeting = convo.last_turn().unwrap();
    assert_eq!(greeting.role(), Role::Model);
    assert_eq!(greeting.text(), HELLO_MESSAGE);
}

#[test]
fn test_append_preserves_order() {
    Configuration::init(Configuration::default()).expect("failed to init default config");

    let mut convo = Conversation::new_hello();
    convo.append_turn(Turn::new_user("What is composite supply?"));
    convo.append_turn(Turn::new_model("A composite supply consists of..."));
    convo.append_turn(Turn::new_user("And mixed supply?"));

    assert_eq!(convo.len(), 4);
    assert_eq!(convo.turns()[1].text(), "What is composite supply?");
    assert_eq!(convo.turns()[1].role(), Role::User);
    assert_eq!(convo.last_turn().unwrap().text(), "And mixed supply?");
}

#[test]
fn test_last_turn_mut_grows_in_place() {
    let mut convo = Conversation::default().with_turns(vec![
        Turn::new_user("Explain Section 74A"),
        Turn::new_model(""),
    ]);

    convo.last_turn_mut().unwrap().append("Section 74A ");
    convo.last_turn_mut().unwrap().append("applies from FY 2024-25.");

    assert_eq!(convo.len(), 2);
    assert_eq!(
        convo.last_turn().unwrap().text(),
        "Section 74A applies from FY 2024-25."
    );
}

#[test]
fn test_turn_append_expands_tabs() {
    let mut turn = Turn::new_model("a");
    turn.append("\tb");
    assert_eq!(turn.text(), "a  b");
}
