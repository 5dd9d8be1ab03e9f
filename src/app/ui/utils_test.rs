use ratatui::style::{Modifier, Style};

use super::*;

fn line_text(line: &Line) -> String {
    line.spans
        .iter()
        .map(|s| s.content.to_string())
        .collect::<Vec<_>>()
        .join("")
}

#[test]
fn test_wrap_spans_breaks_at_spaces() {
    let lines = wrap_spans(vec![Span::raw("time of supply of goods")], 15);

    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(&lines[0]), "time of supply ");
    assert_eq!(line_text(&lines[1]), "of goods");
}

#[test]
fn test_wrap_spans_keeps_styles() {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = wrap_spans(
        vec![Span::raw("value of "), Span::styled("taxable supply", bold)],
        14,
    );

    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(&lines[1]), "taxable supply".to_string());
    assert!(lines[1].spans.iter().all(|s| s.style == bold));
}

#[test]
fn test_wrap_spans_overflowing_word() {
    let lines = wrap_spans(vec![Span::raw("a veryverylongword")], 8);
    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(&lines[1]), "veryverylongword");
}

#[test]
fn test_wrap_spans_empty_input() {
    let lines = wrap_spans(vec![], 10);
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]), "");
}
