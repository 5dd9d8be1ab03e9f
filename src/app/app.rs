use std::io;

use crate::models::{Action, Attachment, Event};
use crate::warn_notice;
use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::Result;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Margin},
    prelude::{Backend, CrosstermBackend},
    style::Stylize,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation},
};
use ratatui_macros::span;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::app::{
    app_state::AppState,
    ui::{AttachScreen, HelpScreen, Loading, Notice, TextArea, TopicsScreen, utils},
};

use super::services::EventService;

const MIN_WIDTH: u16 = 80;

pub struct App<'a> {
    action_tx: mpsc::UnboundedSender<Action>,

    events: &'a mut EventService,

    app_state: AppState,
    topics_screen: TopicsScreen,
    help_screen: HelpScreen,
    attach_screen: AttachScreen<'a>,
    input: tui_textarea::TextArea<'a>,

    notice: Notice,
    loading: Loading<'a>,

    pending_attachment: Option<Attachment>,

    cancel_token: CancellationToken,
}

impl<'a> App<'a> {
    pub fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        events: &'a mut EventService,
        cancel_token: CancellationToken,
    ) -> App<'a> {
        let event_tx = events.event_tx();
        App {
            action_tx: action_tx.clone(),
            events,
            app_state: AppState::new(),
            topics_screen: TopicsScreen::new(event_tx),
            help_screen: HelpScreen::new(),
            attach_screen: AttachScreen::new(action_tx),
            input: TextArea::default().build(),
            notice: Notice::default(),
            loading: Loading::new(vec![
                span!("Thinking...").gray(),
                span!(" The tutor is writing an answer").gray().italic(),
            ]),
            pending_attachment: None,
            cancel_token,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        enable_raw_mode()?;
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;

        let term_backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(term_backend)?;
        let result = self.start_loop(&mut terminal).await;

        self.cancel_token.cancel();

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;

        terminal.show_cursor()?;
        result
    }

    async fn start_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.render(terminal)?;
            if self.handle_next_event().await {
                return Ok(());
            }
        }
    }

    async fn handle_next_event(&mut self) -> bool {
        let event = self.events.next().await;

        if let Some(stop) = self.handle_global_event(&event) {
            return stop;
        }

        if self.help_screen.showing() {
            self.help_screen.handle_key_event(&event);
            return false;
        }

        if self.topics_screen.showing() {
            self.topics_screen.handle_key_event(&event);
            return false;
        }

        if self.attach_screen.showing() {
            self.attach_screen.handle_key_event(&event);
            return false;
        }

        self.handle_input_event(event);
        false
    }

    fn handle_global_event(&mut self, event: &Event) -> Option<bool> {
        match event {
            Event::Quit => Some(true),

            Event::ChatCompletionResponse(delta) => {
                self.app_state.handle_delta(delta);
                Some(false)
            }

            Event::ChatCompletionFailed => {
                self.app_state.handle_stream_failure();
                Some(false)
            }

            Event::DictationFinished(transcript) => {
                match transcript {
                    Some(text) => {
                        self.input.insert_str(text);
                    }
                    None => self.notice.warning("No speech recognized"),
                }
                Some(false)
            }

            Event::AttachmentReady(attachment) => {
                self.pending_attachment = Some(attachment.clone());
                self.notice
                    .info("Image attached. It will be sent with your next question");
                Some(false)
            }

            Event::TopicSelected(topic) => {
                self.handle_topic_prompt(topic);
                Some(false)
            }

            Event::Notice(msg) => {
                self.notice.add_message(msg.clone());
                Some(false)
            }

            // Fallthrough to the focused screen
            _ => None,
        }
    }

    fn handle_input_event(&mut self, event: Event) {
        match event {
            Event::KeyboardCharInput(c) => {
                if !self.app_state.controller.busy() {
                    self.input.input(c);
                }
            }

            Event::KeyboardCtrlC => {
                if !self.input.lines().join("").is_empty() {
                    self.input = TextArea::default().build();
                }
                if self.pending_attachment.take().is_some() {
                    self.notice.info("Attachment discarded");
                }
            }

            Event::KeyboardF1 => self.help_screen.toggle_showing(),

            Event::KeyboardCtrlT => {
                if !self.on_waiting_backend(true) {
                    self.topics_screen.toggle_showing();
                }
            }

            Event::KeyboardCtrlO => {
                if !self.on_waiting_backend(true) {
                    self.attach_screen.toggle_showing();
                }
            }

            Event::KeyboardCtrlR => {
                if !self.on_waiting_backend(true) {
                    self.notice.info("Listening...");
                    let _ = self.action_tx.send(Action::Dictate);
                }
            }

            Event::KeyboardCtrlS => {
                if !self.on_waiting_backend(true) {
                    self.notice.info("Capturing snapshot...");
                    let _ = self.action_tx.send(Action::CameraSnapshot);
                }
            }

            Event::KeyboardPaste(text) => {
                self.input.set_yank_text(text.replace('\r', "\n"));
                self.input.paste();
            }

            Event::KeyboardAltEnter => {
                if !self.app_state.controller.busy() {
                    self.input.insert_newline();
                }
            }

            Event::KeyboardEnter => self.handle_send_prompt(),

            Event::UiScrollDown => self.app_state.scroll.down(),
            Event::UiScrollUp => self.app_state.scroll.up(),
            Event::UiScrollPageDown => self.app_state.scroll.page_down(),
            Event::UiScrollPageUp => self.app_state.scroll.page_up(),
            _ => {}
        }
    }

    fn handle_send_prompt(&mut self) {
        if self.on_waiting_backend(true) {
            return;
        }

        let input_str = self.input.lines().join("\n");
        if input_str.trim().is_empty() && self.pending_attachment.is_none() {
            return;
        }

        let attachment = self.pending_attachment.take();
        let prompt = match self.app_state.controller.submit(&input_str, attachment) {
            Some(prompt) => prompt,
            None => return,
        };

        self.input = TextArea::default().build();
        self.app_state.sync_state();
        self.app_state.scroll.last();

        let _ = self.action_tx.send(Action::CompletionRequest(prompt));
    }

    fn handle_topic_prompt(&mut self, topic: &str) {
        if self.on_waiting_backend(true) {
            return;
        }

        let prompt = match self.app_state.controller.submit_topic(topic) {
            Some(prompt) => prompt,
            None => return,
        };

        self.app_state.sync_state();
        self.app_state.scroll.last();

        let _ = self.action_tx.send(Action::CompletionRequest(prompt));
    }

    fn on_waiting_backend(&mut self, notice: bool) -> bool {
        let busy = self.app_state.controller.busy();
        if busy && notice {
            self.notice
                .add_message(warn_notice!("The tutor is still answering, please wait..."));
        }
        busy
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|f| {
            let current_width = f.area().width;
            if current_width < MIN_WIDTH {
                f.render_widget(
                    Paragraph::new(format!(
                        "I'm too small, make me bigger! I need at least {} cells (current: {})",
                        MIN_WIDTH, current_width
                    ))
                    .alignment(Alignment::Left),
                    f.area(),
                );
                return;
            }

            let textarea_len = (self.input.lines().len() + 2).try_into().unwrap();
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Max(textarea_len),
                    Constraint::Length(1),
                ])
                .split(f.area());

            if layout[0].width as usize != self.app_state.last_known_width
                || layout[0].height as usize != self.app_state.last_known_height
            {
                self.app_state.set_rect(layout[0]);
            }

            self.app_state
                .bubble_list
                .render(layout[0], f.buffer_mut(), self.app_state.scroll.position);

            f.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .end_symbol(None)
                    .begin_symbol(None),
                layout[0].inner(Margin {
                    vertical: 1,
                    horizontal: 1,
                }),
                &mut self.app_state.scroll.scrollbar_state,
            );

            self.help_screen.render_help_line(f, layout[2]);
            if self.app_state.controller.busy() {
                self.loading.render(f, layout[1]);
            } else {
                f.render_widget(&self.input, layout[1]);
            }

            self.help_screen
                .render(f, utils::popup_area(f.area(), 40, 60));
            self.topics_screen
                .render(f, utils::popup_area(f.area(), 40, 60));
            self.attach_screen
                .render(f, utils::popup_area(f.area(), 60, 30));

            self.notice.render(f, utils::notice_area(f.area(), 30));
        })?;
        Ok(())
    }
}
