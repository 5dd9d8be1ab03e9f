use std::cmp::{max, min};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Clear, Padding, Row, Table, TableState},
};
use ratatui_macros::span;
use tokio::sync::mpsc;
use tui_textarea::Key;

use crate::config::constants::TOPIC_LIST;
use crate::models::Event;

/// Popup list of syllabus chapters. Selecting one submits the fixed
/// explain-this-chapter prompt.
pub struct TopicsScreen {
    event_tx: mpsc::UnboundedSender<Event>,
    showing: bool,
    topics: &'static [&'static str],
    state: TableState,
}

impl TopicsScreen {
    pub fn new(event_tx: mpsc::UnboundedSender<Event>) -> TopicsScreen {
        TopicsScreen {
            event_tx,
            showing: false,
            topics: TOPIC_LIST,
            state: TableState::default().with_selected(0),
        }
    }

    pub fn showing(&self) -> bool {
        self.showing
    }

    pub fn toggle_showing(&mut self) {
        self.showing = !self.showing;
    }

    fn next_row(&mut self) {
        let i = match self.state.selected() {
            Some(i) => max(min(self.topics.len() as i32 - 1, i as i32 + 1), 0),
            None => 0,
        } as usize;
        self.state.select(Some(i));
    }

    fn prev_row(&mut self) {
        let i = match self.state.selected() {
            Some(i) => max(0, (i as i32) - 1),
            None => 0,
        } as usize;
        self.state.select(Some(i));
    }

    fn select_topic(&mut self) {
        let index = self.state.selected().unwrap_or(0);
        if index >= self.topics.len() {
            return;
        }
        let _ = self
            .event_tx
            .send(Event::TopicSelected(self.topics[index].to_string()));
        self.showing = false;
    }

    pub fn handle_key_event(&mut self, event: &Event) {
        match event {
            Event::KeyboardCtrlT | Event::KeyboardEsc => self.showing = false,
            Event::KeyboardEnter => self.select_topic(),
            Event::UiScrollDown => self.next_row(),
            Event::UiScrollUp => self.prev_row(),
            Event::KeyboardCharInput(input) => match input.key {
                Key::Char('j') => self.next_row(),
                Key::Char('k') => self.prev_row(),
                Key::Char('q') => self.showing = false,
                _ => {}
            },
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.showing {
            return;
        }

        let instructions = vec![
            " ".into(),
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Esc/q"),
            " to close, ".into(),
            span!(Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD); "Enter"),
            " to ask, ".into(),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightBlue))
            .padding(Padding::symmetric(1, 0))
            .title(" Quick Topics ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(instructions));

        let selected_row_style = Style::default()
            .add_modifier(Modifier::REVERSED)
            .add_modifier(Modifier::BOLD);

        let rows = self
            .topics
            .iter()
            .map(|topic| Row::new(vec![Cell::from(*topic)]))
            .collect::<Vec<_>>();

        let table = Table::new(rows, [Constraint::Fill(1)])
            .block(block)
            .row_highlight_style(selected_row_style);

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
