use ratatui::layout::Rect;

use crate::app::controller::ChatController;
use crate::app::ui::{BubbleList, Scroll};
use crate::models::CompletionDelta;

/// Everything the conversation view renders from: the controller plus
/// the derived bubble cache and scroll state.
pub(crate) struct AppState {
    pub controller: ChatController,
    pub bubble_list: BubbleList,
    pub scroll: Scroll,
    pub last_known_width: usize,
    pub last_known_height: usize,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            controller: ChatController::new(),
            bubble_list: BubbleList::new(),
            scroll: Scroll::default(),
            last_known_width: 0,
            last_known_height: 0,
        }
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_height = rect.height.into();
        self.last_known_width = rect.width.into();
        self.sync_state();
    }

    pub fn handle_delta(&mut self, delta: &CompletionDelta) {
        self.controller.apply_delta(delta);
        self.sync_state();
    }

    pub fn handle_stream_failure(&mut self) {
        self.controller.fail();
        self.sync_state();
    }

    pub fn sync_state(&mut self) {
        self.bubble_list.set_turns(
            self.controller.conversation().turns(),
            self.last_known_width,
        );
        let scrollbar_at_bottom = self.scroll.is_position_at_last();
        self.scroll
            .set_state(self.bubble_list.len(), self.last_known_height);
        if self.controller.busy() && scrollbar_at_bottom {
            self.scroll.last();
        }
    }
}
