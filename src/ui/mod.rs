pub mod grid;
pub mod header;
pub mod modal;
pub mod player;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, HitMap};
use crate::view::Screen;

const ACCENT: Color = Color::Rgb(255, 220, 80);
const MUTED: Color = Color::Rgb(120, 120, 140);
const KEY: Color = Color::Rgb(80, 200, 255);

pub fn render(frame: &mut Frame, app: &mut App) {
    app.hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    header::render_header(frame, app, chunks[0]);

    match app.launcher.screen() {
        Screen::Grid => grid::render_grid(frame, chunks[1], app),
        Screen::Detail => {
            grid::render_grid(frame, chunks[1], app);
            modal::render_modal(frame, frame.area(), app);
        }
        Screen::Playing => player::render_player(frame, chunks[1], app),
    }

    render_footer(frame, chunks[2], app);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(Color::Rgb(255, 120, 120)).add_modifier(Modifier::BOLD),
        )),
        None => {
            let hints: &[(&str, &str)] = match app.launcher.screen() {
                Screen::Grid => &[("←/→", "page"), ("Tab ↑↓", "select"), ("Enter/1-6", "details"), ("q", "quit")],
                Screen::Detail => &[("Enter/p", "play"), ("b", "back"), ("Esc", "close")],
                Screen::Playing => &[("Esc/F10", "return to launcher")],
            };
            let mut spans = vec![Span::raw(" ")];
            for (key, action) in hints {
                spans.push(Span::styled(*key, Style::default().fg(KEY).add_modifier(Modifier::BOLD)));
                spans.push(Span::styled(format!(" {action}  "), Style::default().fg(MUTED)));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Draws a one-line button at (x, y) and returns the region it occupies.
fn render_button(frame: &mut Frame, x: u16, y: u16, label: &str, enabled: bool, color: Color) -> Rect {
    let area = Rect::new(x, y, label.chars().count() as u16, 1).intersection(frame.area());
    let style = if enabled {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(60, 60, 80))
    };
    frame.render_widget(Paragraph::new(Span::styled(label.to_string(), style)), area);
    area
}
