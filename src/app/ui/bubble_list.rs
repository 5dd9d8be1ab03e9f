use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};

use crate::models::Turn;

use super::bubble::Bubble;

struct CacheEntry {
    turn_id: String,
    text_len: usize,
    lines: Vec<Line<'static>>,
}

/// Caches rendered bubbles per turn so only the streaming turn is
/// re-wrapped on each frame.
#[derive(Default)]
pub struct BubbleList {
    cache: Vec<CacheEntry>,
    line_width: usize,
    line_len: usize,
}

impl BubbleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_turns(&mut self, turns: &[Turn], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.cache.truncate(turns.len());

        for (i, turn) in turns.iter().enumerate() {
            let stale = match self.cache.get(i) {
                Some(entry) => entry.turn_id != turn.id() || entry.text_len != turn.text().len(),
                None => true,
            };
            if !stale {
                continue;
            }

            let entry = CacheEntry {
                turn_id: turn.id().to_string(),
                text_len: turn.text().len(),
                lines: Bubble::new(turn, line_width).as_lines(),
            };
            if i < self.cache.len() {
                self.cache[i] = entry;
            } else {
                self.cache.push(entry);
            }
        }

        self.line_len = self.cache.iter().map(|e| e.lines.len()).sum();
    }

    pub fn len(&self) -> usize {
        self.line_len
    }

    pub fn is_empty(&self) -> bool {
        self.line_len == 0
    }

    pub fn render(&self, rect: Rect, buf: &mut Buffer, scroll: usize) {
        let lines: Vec<Line> = self
            .cache
            .iter()
            .flat_map(|e| e.lines.iter().cloned())
            .collect();

        Paragraph::new(Text::from(lines))
            .scroll((scroll as u16, 0))
            .render(rect, buf);
    }
}
