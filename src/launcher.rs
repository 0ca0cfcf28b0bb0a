use tracing::{debug, info};

use crate::catalog::{Catalog, GameRecord};
use crate::player::EmbeddedFrame;
use crate::view::{DetailView, KeyOutcome, NavKey, Pagination, Screen, ViewState, PAGE_SIZE};

pub const GRID_COLUMNS: usize = 3;

/// A card on the current page.
#[derive(Clone, Copy, Debug)]
pub struct Card<'a> {
    pub index: usize,
    pub slot: usize,
    pub game: &'a GameRecord,
}

/// The view controller: one catalog, one view state, one embedded frame.
pub struct Launcher<F: EmbeddedFrame> {
    catalog: Catalog,
    state: ViewState,
    frame: F,
    cursor: usize,
    playing_label: String,
}

impl<F: EmbeddedFrame> Launcher<F> {
    pub fn new(catalog: Catalog, frame: F) -> Self {
        let mut launcher = Self {
            catalog,
            state: ViewState::new(),
            frame,
            cursor: 0,
            playing_label: String::new(),
        };
        launcher.display_page(1);
        launcher
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn frame(&self) -> &F {
        &self.frame
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn playing_label(&self) -> &str {
        &self.playing_label
    }

    pub fn pagination(&self) -> Pagination {
        self.state.pagination(self.catalog.len())
    }

    pub fn detail(&self) -> Option<DetailView<'_>> {
        self.state.detail(&self.catalog)
    }

    pub fn cards(&self) -> Vec<Card<'_>> {
        let range = self.state.visible(self.catalog.len());
        self.catalog.games()[range.clone()]
            .iter()
            .zip(range)
            .enumerate()
            .map(|(slot, (game, index))| Card { index, slot, game })
            .collect()
    }

    fn card_count(&self) -> usize {
        self.state.visible(self.catalog.len()).len()
    }

    pub fn display_page(&mut self, page: usize) {
        let range = self.state.display_page(page, self.catalog.len());
        self.cursor = 0;
        debug!(page = self.state.current_page(), first = range.start, count = range.len(), "page displayed");
    }

    pub fn prev_page(&mut self) -> bool {
        if self.state.background_locked() || !self.state.prev_page() {
            return false;
        }
        self.display_page(self.state.current_page());
        true
    }

    pub fn next_page(&mut self) -> bool {
        if self.state.background_locked() || !self.state.next_page(self.catalog.len()) {
            return false;
        }
        self.display_page(self.state.current_page());
        true
    }

    /// Move the card cursor by `delta` slots, clamped to the current page.
    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.card_count();
        if count == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    pub fn move_cursor_row(&mut self, down: bool) {
        let step = GRID_COLUMNS as isize;
        let target = self.cursor as isize + if down { step } else { -step };
        if target >= 0 && (target as usize) < self.card_count() {
            self.cursor = target as usize;
        }
    }

    /// Cycle the cursor through the page, wrapping at either end.
    pub fn cycle_cursor(&mut self, forward: bool) {
        let count = self.card_count();
        if count == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % count
        } else {
            (self.cursor + count - 1) % count
        };
    }

    /// Open the card in `slot` of the current page, if the page has one.
    pub fn open_slot(&mut self, slot: usize) -> bool {
        if self.state.background_locked() || slot >= PAGE_SIZE {
            return false;
        }
        let range = self.state.visible(self.catalog.len());
        let index = range.start + slot;
        if !range.contains(&index) {
            return false;
        }
        self.cursor = slot;
        self.open_details(index);
        true
    }

    pub fn open_selected(&mut self) -> bool {
        self.open_slot(self.cursor)
    }

    pub fn open_details(&mut self, index: usize) {
        let Some(game) = self.catalog.get(index) else { return };
        debug!(id = %game.id, "details opened");
        self.state.open_details(index);
    }

    pub fn close_details(&mut self) -> bool {
        self.state.close_details()
    }

    pub fn play_game(&mut self) -> bool {
        if self.state.screen() == Screen::Playing {
            return false;
        }
        let Some(index) = self.state.current_game() else { return false };
        let Some(game) = self.catalog.get(index) else { return false };
        self.state.play_game();
        self.frame.load(&game.play_url);
        self.playing_label = format!("Playing: {}", game.title);
        info!(id = %game.id, url = %game.play_url, "game launched");
        true
    }

    pub fn exit_game(&mut self) -> bool {
        if !self.state.exit_game() {
            return false;
        }
        self.frame.clear();
        info!("game exited");
        true
    }

    /// Escape / ArrowLeft / ArrowRight dispatch.
    pub fn handle_nav_key(&mut self, key: NavKey) -> KeyOutcome {
        let outcome = self.state.handle_key(key, self.catalog.len());
        match outcome {
            KeyOutcome::PlayerExited => {
                self.frame.clear();
                info!("game exited");
            }
            KeyOutcome::PageChanged => self.display_page(self.state.current_page()),
            KeyOutcome::DetailsClosed | KeyOutcome::Ignored => {}
        }
        outcome
    }

    /// Returns to the grid if the running game ended on its own.
    pub fn poll_player(&mut self) -> bool {
        if self.state.screen() != Screen::Playing || !self.frame.poll_ended() {
            return false;
        }
        self.exit_game()
    }

    /// Stops whatever is loaded. Called on shutdown.
    pub fn shutdown(&mut self) {
        self.exit_game();
        self.frame.clear();
    }
}
