#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::models::{Role, Turn};

use super::utils::wrap_spans;

const USER_LABEL: &str = "You";
const MODEL_LABEL: &str = "IDT Tutor";

// Bubbles never grow past this share of the view
const MAX_BUBBLE_WIDTH_PERCENT: usize = 85;

/// Renders one turn as a framed chat bubble: tutor turns on the left,
/// user turns on the right. Content gets simple line-oriented styling
/// (headings, bullets, **bold** segments).
pub struct Bubble<'a> {
    turn: &'a Turn,
    max_width: usize,
}

impl<'a> Bubble<'a> {
    pub fn new(turn: &'a Turn, max_width: usize) -> Bubble<'a> {
        Bubble { turn, max_width }
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let label = match self.turn.role() {
            Role::User => USER_LABEL,
            Role::Model => MODEL_LABEL,
        };
        let date = self.turn.timestamp().format("%H:%M").to_string();
        let inner = self.inner_width(label, &date);

        let pad = if self.turn.role() == Role::User {
            " ".repeat(self.max_width.saturating_sub(inner + 4))
        } else {
            String::new()
        };

        let mut content: Vec<Line<'static>> = vec![];
        for raw_line in self.turn.text().lines() {
            content.extend(wrap_spans(style_markup(raw_line), inner));
        }
        if content.is_empty() {
            content.push(Line::default());
        }

        let top_fill = "─".repeat(inner.saturating_sub(label.width() + 1));
        let mut lines = vec![Line::from(Span::raw(format!("{pad}╭─ {label} {top_fill}╮")))];

        for line in content {
            let used: usize = line.spans.iter().map(|s| s.content.width()).sum();
            let mut spans = vec![Span::raw(format!("{pad}│ "))];
            spans.extend(line.spans);
            spans.push(Span::raw(format!(
                "{} │",
                " ".repeat(inner.saturating_sub(used))
            )));
            lines.push(Line::from(spans));
        }

        let bottom_fill = "─".repeat(inner.saturating_sub(date.width() + 1));
        lines.push(Line::from(Span::raw(format!(
            "{pad}╰─ {date} {bottom_fill}╯"
        ))));
        lines
    }

    fn inner_width(&self, label: &str, date: &str) -> usize {
        let longest = self
            .turn
            .text()
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);

        let cap = (self.max_width * MAX_BUBBLE_WIDTH_PERCENT / 100).saturating_sub(4);
        let floor = (label.width() + 2).max(date.width() + 2);
        longest.max(floor).min(cap.max(floor))
    }
}

/// Line-oriented markup: headings, bullets and inline `**bold**`.
fn style_markup(line: &str) -> Vec<Span<'static>> {
    let trimmed = line.trim_start();

    if trimmed.starts_with('#') {
        return vec![Span::styled(
            line.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
    }

    if let Some(rest) = trimmed.strip_prefix("- ").or(trimmed.strip_prefix("* ")) {
        let indent = &line[..line.len() - trimmed.len()];
        let mut spans = vec![Span::styled(
            format!("{indent}• "),
            Style::default().fg(Color::LightGreen),
        )];
        spans.extend(bold_segments(rest));
        return spans;
    }

    bold_segments(line)
}

fn bold_segments(text: &str) -> Vec<Span<'static>> {
    let mut spans = vec![];
    let mut bold = false;

    for part in text.split("**") {
        if !part.is_empty() {
            let style = if bold {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(part.to_string(), style));
        }
        bold = !bold;
    }

    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}
