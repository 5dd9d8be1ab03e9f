use std::sync::Arc;

use tokio::sync::mpsc;
use tui_textarea::Input;

use crate::models::{Attachment, CompletionDelta, NoticeMessage};

#[derive(Debug)]
pub enum Event {
    Notice(NoticeMessage),

    ChatCompletionResponse(CompletionDelta),
    ChatCompletionFailed,
    DictationFinished(Option<String>),
    AttachmentReady(Attachment),
    TopicSelected(String),

    KeyboardCharInput(Input),
    KeyboardEsc,
    KeyboardEnter,
    KeyboardAltEnter,
    KeyboardCtrlC,
    KeyboardCtrlT,
    KeyboardCtrlO,
    KeyboardCtrlR,
    KeyboardCtrlS,
    KeyboardF1,
    KeyboardPaste(String),

    Quit,

    UiTick,
    UiScrollUp,
    UiScrollDown,
    UiScrollPageUp,
    UiScrollPageDown,
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::Sender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event).await
    }
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
