use ratatui::style::Modifier;

use super::*;

fn text_of(line: &Line) -> String {
    line.spans
        .iter()
        .map(|s| s.content.to_string())
        .collect::<Vec<_>>()
        .join("")
}

#[test]
fn test_model_bubble_is_left_aligned() {
    let turn = Turn::new_model("Hello");
    let lines = Bubble::new(&turn, 80).as_lines();

    assert_eq!(lines.len(), 3);
    assert!(text_of(&lines[0]).starts_with("╭─ IDT Tutor "));
    assert!(text_of(&lines[1]).starts_with("│ Hello"));
    assert!(text_of(&lines[2]).starts_with("╰─ "));
}

#[test]
fn test_user_bubble_is_right_aligned() {
    let turn = Turn::new_user("Hi");
    let lines = Bubble::new(&turn, 80).as_lines();

    assert!(text_of(&lines[0]).starts_with(' '));
    assert!(text_of(&lines[0]).trim_start().starts_with("╭─ You "));
    // All frame lines end at the same column
    let widths: Vec<usize> = lines
        .iter()
        .map(|l| {
            l.spans
                .iter()
                .map(|s| unicode_width::UnicodeWidthStr::width(s.content.as_ref()))
                .sum()
        })
        .collect();
    assert!(widths.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_long_content_wraps() {
    let text = "value ".repeat(40);
    let turn = Turn::new_model(text.trim());
    let lines = Bubble::new(&turn, 60).as_lines();

    // top bar + at least 5 wrapped rows + bottom bar
    assert!(lines.len() > 6);
}

#[test]
fn test_heading_and_bullets_are_styled() {
    let turn = Turn::new_model("# Place of Supply\n- within the State\nplain text");
    let lines = Bubble::new(&turn, 80).as_lines();

    let heading = &lines[1].spans[1];
    assert!(heading.style.add_modifier.contains(Modifier::BOLD));

    let bullet = &lines[2].spans[1];
    assert_eq!(bullet.content.as_ref(), "•");
}

#[test]
fn test_bold_segments() {
    let spans = bold_segments("a **very** important rule");
    assert_eq!(spans.len(), 3);
    assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(spans[1].content.as_ref(), "very");
}
