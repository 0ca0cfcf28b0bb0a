use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::warn;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::launcher::Launcher;
use crate::player::GameFrame;
use crate::view::{NavKey, Screen};

/// Clickable regions from the last draw.
#[derive(Clone, Debug, Default)]
pub struct HitMap {
    pub cards: Vec<(Rect, usize)>,
    pub prev: Option<Rect>,
    pub next: Option<Rect>,
    pub modal: Option<Rect>,
    pub close: Option<Rect>,
    pub back: Option<Rect>,
    pub play: Option<Rect>,
    pub exit: Option<Rect>,
}

impl HitMap {
    fn hit(region: Option<Rect>, pos: Position) -> bool {
        region.is_some_and(|r| r.contains(pos))
    }
}

pub struct App {
    pub should_quit: bool,
    pub launcher: Launcher<GameFrame>,
    pub status: Option<String>,
    pub hits: HitMap,
    auto_return: bool,
}

impl App {
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        let frame = GameFrame::for_runner(config.runner.clone());
        let mut app = Self {
            should_quit: false,
            launcher: Launcher::new(catalog, frame),
            status: None,
            hits: HitMap::default(),
            auto_return: config.auto_return,
        };
        if let Some(id) = &config.launch {
            app.launch_by_id(id);
        }
        app
    }

    fn launch_by_id(&mut self, id: &str) {
        match self.launcher.catalog().position_by_id(id) {
            Some(index) => {
                self.launcher.open_details(index);
                self.launcher.play_game();
            }
            None => {
                warn!(id, "launch requested for unknown game");
                self.status = Some(format!("Game '{id}' not found."));
            }
        }
    }

    pub fn on_tick(&mut self) {
        if self.auto_return {
            self.launcher.poll_player();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        self.status = None;

        match self.launcher.screen() {
            Screen::Playing => match key.code {
                KeyCode::Esc => {
                    self.launcher.handle_nav_key(NavKey::Escape);
                }
                KeyCode::F(10) => {
                    self.launcher.exit_game();
                }
                _ => {}
            },
            Screen::Detail => match key.code {
                KeyCode::Esc => {
                    self.launcher.handle_nav_key(NavKey::Escape);
                }
                KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.launcher.play_game();
                }
                KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('B') => {
                    self.launcher.close_details();
                }
                _ => {}
            },
            Screen::Grid => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
                KeyCode::Esc => {
                    self.launcher.handle_nav_key(NavKey::Escape);
                }
                KeyCode::Left => {
                    self.launcher.handle_nav_key(NavKey::Left);
                }
                KeyCode::Right => {
                    self.launcher.handle_nav_key(NavKey::Right);
                }
                KeyCode::Up => self.launcher.move_cursor_row(false),
                KeyCode::Down => self.launcher.move_cursor_row(true),
                KeyCode::Tab => {
                    let forward = !key.modifiers.contains(KeyModifiers::SHIFT);
                    self.launcher.cycle_cursor(forward);
                }
                KeyCode::BackTab => self.launcher.cycle_cursor(false),
                KeyCode::Enter => {
                    self.launcher.open_selected();
                }
                KeyCode::Char(c @ '1'..='6') => {
                    let slot = c as usize - '1' as usize;
                    self.launcher.open_slot(slot);
                }
                _ => {}
            },
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        self.status = None;
        let pos = Position::new(mouse.column, mouse.row);

        match self.launcher.screen() {
            Screen::Playing => {
                if HitMap::hit(self.hits.exit, pos) {
                    self.launcher.exit_game();
                }
            }
            Screen::Detail => {
                if HitMap::hit(self.hits.play, pos) {
                    self.launcher.play_game();
                } else if HitMap::hit(self.hits.close, pos)
                    || HitMap::hit(self.hits.back, pos)
                    || !HitMap::hit(self.hits.modal, pos)
                {
                    self.launcher.close_details();
                }
            }
            Screen::Grid => {
                if HitMap::hit(self.hits.prev, pos) {
                    self.launcher.prev_page();
                } else if HitMap::hit(self.hits.next, pos) {
                    self.launcher.next_page();
                } else if let Some(&(_, slot)) = self.hits.cards.iter().find(|(r, _)| r.contains(pos)) {
                    self.launcher.open_slot(slot);
                }
            }
        }
    }

    fn quit(&mut self) {
        self.launcher.shutdown();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use crate::player::EmbeddedFrame;

    fn app() -> App {
        App::new(&Config::default(), Catalog::builtin())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_keyboard_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.launcher.screen(), Screen::Detail);
        assert_eq!(app.launcher.state().current_game(), Some(3));

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.launcher.screen(), Screen::Playing);
        assert_eq!(app.launcher.frame().source(), "game-players/connected.html");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.launcher.screen(), Screen::Grid);
        assert_eq!(app.launcher.frame().source(), "");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_f10_exits_player() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.launcher.screen(), Screen::Playing);
        press(&mut app, KeyCode::F(10));
        assert_eq!(app.launcher.screen(), Screen::Grid);
    }

    #[test]
    fn test_arrows_ignored_in_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.launcher.state().current_page(), 1);
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.launcher.state().current_page(), 2);
    }

    #[test]
    fn test_q_only_quits_from_grid() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_stops_running_game() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);
        app.on_key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(app.should_quit);
        assert_eq!(app.launcher.frame().source(), "");
    }

    #[test]
    fn test_launch_by_id() {
        let config = Config {
            launch: Some("GHOSTBUSTERS".to_string()),
            ..Config::default()
        };
        let app = App::new(&config, Catalog::builtin());
        assert_eq!(app.launcher.screen(), Screen::Playing);
        assert_eq!(app.launcher.playing_label(), "Playing: GhostBusters");
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_launch_unknown_id_sets_status() {
        let config = Config {
            launch: Some("pong".to_string()),
            ..Config::default()
        };
        let mut app = App::new(&config, Catalog::builtin());
        assert_eq!(app.launcher.screen(), Screen::Grid);
        assert_eq!(app.status.as_deref(), Some("Game 'pong' not found."));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.status, None);
    }

    #[test]
    fn test_mouse_flow() {
        let mut app = app();
        app.hits.cards = vec![(Rect::new(0, 0, 10, 5), 0), (Rect::new(10, 0, 10, 5), 1)];
        app.hits.next = Some(Rect::new(30, 20, 8, 1));

        click(&mut app, 12, 2);
        assert_eq!(app.launcher.screen(), Screen::Detail);
        assert_eq!(app.launcher.state().current_game(), Some(1));

        app.hits.modal = Some(Rect::new(5, 5, 40, 15));
        app.hits.play = Some(Rect::new(10, 18, 8, 1));
        // Inside the modal but on no button
        click(&mut app, 20, 10);
        assert_eq!(app.launcher.screen(), Screen::Detail);
        // On the overlay background
        click(&mut app, 1, 1);
        assert_eq!(app.launcher.screen(), Screen::Grid);

        click(&mut app, 31, 20);
        assert_eq!(app.launcher.state().current_page(), 2);
    }

    #[test]
    fn test_mouse_play_and_exit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        app.hits.modal = Some(Rect::new(5, 5, 40, 15));
        app.hits.play = Some(Rect::new(10, 18, 8, 1));
        app.hits.exit = Some(Rect::new(70, 0, 8, 1));
        click(&mut app, 11, 18);
        assert_eq!(app.launcher.screen(), Screen::Playing);
        click(&mut app, 1, 1);
        assert_eq!(app.launcher.screen(), Screen::Playing);
        click(&mut app, 72, 0);
        assert_eq!(app.launcher.screen(), Screen::Grid);
    }
}
