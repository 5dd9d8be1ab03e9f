use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Clear, Padding, Row, Table},
};
use ratatui_macros::span;

use crate::models::Event;

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("Enter", "Send your question"),
    ("Shift/Alt + Enter", "Insert a new line"),
    ("Ctrl + t", "Quick topics"),
    ("Ctrl + o", "Attach an image file"),
    ("Ctrl + s", "Camera snapshot"),
    ("Ctrl + r", "Dictate a question"),
    ("↑/↓", "Scroll one line"),
    ("Ctrl + u/d", "Scroll one page"),
    ("Ctrl + c", "Clear input and attachment"),
    ("F1", "Toggle this help"),
    ("Ctrl + q", "Quit"),
];

pub struct HelpScreen {
    showing: bool,
}

impl HelpScreen {
    pub fn new() -> HelpScreen {
        HelpScreen { showing: false }
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    pub fn toggle_showing(&mut self) {
        self.showing = !self.showing;
    }

    pub fn handle_key_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardF1 | Event::KeyboardEsc => self.showing = false,
            Event::KeyboardCharInput(input) => {
                if input.key == tui_textarea::Key::Char('q') {
                    self.showing = false;
                }
            }
            _ => {}
        }
    }

    pub fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "F1"),
            " help · ".into(),
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Ctrl+t"),
            " topics · ".into(),
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Ctrl+q"),
            " quit".into(),
        ]);
        frame.render_widget(
            ratatui::widgets::Paragraph::new(line).alignment(Alignment::Center),
            area,
        );
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.showing {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(vec![
                " ".into(),
                span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Esc/q"),
                " to close ".into(),
            ]));

        let rows = KEY_BINDINGS
            .iter()
            .map(|(key, description)| {
                Row::new(vec![
                    Cell::from(Line::from((*key).bold())),
                    Cell::from(*description),
                ])
            })
            .collect::<Vec<_>>();

        let table = Table::new(rows, [Constraint::Length(20), Constraint::Fill(1)]).block(block);

        frame.render_widget(Clear, area);
        frame.render_widget(table, area);
    }
}
