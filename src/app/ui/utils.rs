#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

pub fn popup_area(area: Rect, percent_width: u16, percent_height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

pub fn notice_area(area: Rect, percent_width: u16) -> Rect {
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_width)]).flex(Flex::End);
    let [area] = horizontal.areas(area);
    area
}

/// Wraps styled spans into lines of at most `max_width` columns, breaking
/// at spaces. Words wider than the limit overflow on their own line.
pub fn wrap_spans(spans: Vec<Span<'static>>, max_width: usize) -> Vec<Line<'static>> {
    let max_width = max_width.max(1);
    let mut lines: Vec<Line> = vec![];
    let mut current: Vec<Span> = vec![];
    let mut used = 0usize;

    for span in spans {
        for word in split_words(&span.content) {
            let word_width = word.width();
            if used + word_width > max_width && !current.is_empty() {
                lines.push(Line::from(std::mem::take(&mut current)));
                used = 0;
                // The space that forced the break does not carry over
                if word.trim().is_empty() {
                    continue;
                }
            }
            used += word_width;
            current.push(Span::styled(word, span.style));
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    if lines.is_empty() {
        lines.push(Line::default());
    }
    lines
}

/// Splits into alternating word and space runs, all preserved.
fn split_words(text: &str) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut in_space = false;

    for c in text.chars() {
        let is_space = c == ' ';
        if !current.is_empty() && is_space != in_space {
            parts.push(std::mem::take(&mut current));
        }
        in_space = is_space;
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
