use std::ops::Range;

use crate::catalog::{Catalog, GameRecord};

pub const PAGE_SIZE: usize = 6;

/// Which region owns the screen. The modal and the player can never be
/// visible together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Grid,
    Detail,
    Playing,
}

/// Keys the global dispatcher cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Escape,
    Left,
    Right,
}

/// What a dispatched key ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    PageChanged,
    DetailsClosed,
    PlayerExited,
}

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Catalog indices shown on `page` (1-based).
pub fn page_range(page: usize, len: usize) -> Range<usize> {
    let start = (page.saturating_sub(1) * PAGE_SIZE).min(len);
    let end = (page * PAGE_SIZE).min(len);
    start..end
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub current: usize,
    pub total: usize,
}

impl Pagination {
    pub fn prev_enabled(&self) -> bool {
        self.current > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.current < self.total
    }

    pub fn indicator(&self) -> String {
        format!("Page {}/{}", self.current, self.total)
    }
}

/// Everything the detail modal shows for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// `None` hides the image element.
    pub image: Option<&'a str>,
    pub web_ready: bool,
}

impl<'a> DetailView<'a> {
    pub fn of(game: &'a GameRecord) -> Self {
        Self {
            title: &game.title,
            description: &game.description,
            image: game.preview_image(),
            web_ready: game.web_ready,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    current_page: usize,
    current_game: Option<usize>,
    screen: Screen,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            current_game: None,
            screen: Screen::Grid,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_game(&self) -> Option<usize> {
        self.current_game
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// True while an overlay owns input and the grid behind it is frozen.
    pub fn background_locked(&self) -> bool {
        self.screen != Screen::Grid
    }

    pub fn pagination(&self, len: usize) -> Pagination {
        Pagination {
            current: self.current_page,
            total: total_pages(len),
        }
    }

    /// Jump to `page`, clamped to `[1, total_pages]`. Returns the indices to render.
    pub fn display_page(&mut self, page: usize, len: usize) -> Range<usize> {
        self.current_page = page.clamp(1, total_pages(len));
        self.visible(len)
    }

    pub fn visible(&self, len: usize) -> Range<usize> {
        page_range(self.current_page, len)
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub fn next_page(&mut self, len: usize) -> bool {
        if self.current_page >= total_pages(len) {
            return false;
        }
        self.current_page += 1;
        true
    }

    pub fn open_details(&mut self, index: usize) {
        self.current_game = Some(index);
        self.screen = Screen::Detail;
    }

    /// Leaves `current_game` in place so Play still knows what to launch.
    pub fn close_details(&mut self) -> bool {
        if self.screen != Screen::Detail {
            return false;
        }
        self.screen = Screen::Grid;
        true
    }

    /// Returns the catalog index to load into the frame, or `None` when
    /// nothing has been selected yet.
    pub fn play_game(&mut self) -> Option<usize> {
        let index = self.current_game?;
        self.screen = Screen::Playing;
        Some(index)
    }

    pub fn exit_game(&mut self) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }
        self.screen = Screen::Grid;
        true
    }

    pub fn handle_key(&mut self, key: NavKey, len: usize) -> KeyOutcome {
        match (key, self.screen) {
            (NavKey::Escape, Screen::Playing) => {
                self.exit_game();
                KeyOutcome::PlayerExited
            }
            (NavKey::Escape, Screen::Detail) => {
                self.close_details();
                KeyOutcome::DetailsClosed
            }
            (NavKey::Left, Screen::Grid) if self.prev_page() => KeyOutcome::PageChanged,
            (NavKey::Right, Screen::Grid) if self.next_page(len) => KeyOutcome::PageChanged,
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn detail<'a>(&self, catalog: &'a Catalog) -> Option<DetailView<'a>> {
        self.current_game.and_then(|i| catalog.get(i)).map(DetailView::of)
    }
}
