use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Clear,
};
use ratatui_macros::span;
use tokio::sync::mpsc;

use crate::models::{Action, Event};

use super::textarea::TextArea;

/// Popup asking for the path of an image file to attach to the next
/// submission.
pub struct AttachScreen<'a> {
    action_tx: mpsc::UnboundedSender<Action>,
    showing: bool,
    input: tui_textarea::TextArea<'a>,
}

impl AttachScreen<'_> {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> AttachScreen<'static> {
        AttachScreen {
            action_tx,
            showing: false,
            input: build_input(),
        }
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    pub fn toggle_showing(&mut self) {
        self.showing = !self.showing;
    }

    pub fn handle_key_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardEsc | Event::KeyboardCtrlO => {
                self.showing = false;
                self.input = build_input();
            }
            Event::KeyboardEnter => {
                let path = self.input.lines().join("").trim().to_string();
                if !path.is_empty() {
                    let _ = self.action_tx.send(Action::AttachFile(path));
                }
                self.showing = false;
                self.input = build_input();
            }
            Event::KeyboardPaste(text) => {
                self.input.set_yank_text(text.replace(['\r', '\n'], ""));
                self.input.paste();
            }
            Event::KeyboardCharInput(input) => {
                self.input.input(input.clone());
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.showing {
            return;
        }

        let vertical = Layout::vertical([Constraint::Length(3)]).flex(Flex::Center);
        let [area] = vertical.areas(area);

        frame.render_widget(Clear, area);
        frame.render_widget(&self.input, area);

        let hint = Line::from(vec![
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Enter"),
            " to attach, ".into(),
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Esc"),
            " to cancel".into(),
        ])
        .alignment(Alignment::Right);
        let hint_area = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(ratatui::widgets::Paragraph::new(hint), hint_area);
    }
}

fn build_input<'a>() -> tui_textarea::TextArea<'a> {
    TextArea::new(" Attach image ")
        .with_placeholder("Path to an image file (png, jpg, webp)...")
        .build()
}
