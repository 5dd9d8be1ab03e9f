use std::time::Duration;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, List, ListItem},
};

use crate::models::NoticeMessage;

use super::utils::wrap_spans;

const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_secs(5);

struct Entry {
    message: NoticeMessage,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Short-lived toasts stacked in the top-right corner.
#[derive(Default)]
pub struct Notice {
    entries: Vec<Entry>,
}

impl Notice {
    pub fn add_message(&mut self, message: NoticeMessage) {
        self.entries.push(Entry {
            message,
            created_at: chrono::Utc::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add_message(NoticeMessage::info(message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add_message(NoticeMessage::warning(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add_message(NoticeMessage::error(message));
    }

    fn sync(&mut self) {
        let now = chrono::Utc::now();
        self.entries.retain(|entry| {
            let elapsed = now.signed_duration_since(entry.created_at);
            let keep_for = entry
                .message
                .duration()
                .unwrap_or(DEFAULT_DISPLAY_DURATION);
            elapsed.num_milliseconds() < keep_for.as_millis() as i64
        });
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        self.sync();
        if self.entries.is_empty() || area.width < 4 {
            return;
        }

        let max_width = area.width.saturating_sub(3) as usize;
        let mut items: Vec<ListItem> = vec![];
        for entry in self.entries.iter().rev() {
            let kind = entry.message.kind();
            let body = wrap_spans(
                vec![Span::styled(
                    entry.message.message().to_string(),
                    Style::default().fg(kind.text_color()),
                )],
                max_width,
            );
            let lines: Vec<Line> = body
                .into_iter()
                .map(|mut line| {
                    line.spans.insert(
                        0,
                        Span::styled("▌ ", Style::default().fg(kind.border_color())),
                    );
                    line
                })
                .collect();
            items.push(ListItem::new(ratatui::text::Text::from(lines)));
        }

        let wanted: usize = items.iter().map(|i| i.height()).sum();
        let area = Rect {
            height: (wanted as u16).min(area.height),
            ..area
        };

        f.render_widget(Clear, area);
        f.render_widget(List::new(items), area);
    }
}
