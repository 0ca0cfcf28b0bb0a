use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{render_button, ACCENT, MUTED};
use crate::app::App;
use crate::launcher::{Card, GRID_COLUMNS};
use crate::view::PAGE_SIZE;

const CARD_COLOR: Color = Color::Rgb(100, 180, 255);
const CARD_BORDER: Color = Color::Rgb(50, 90, 140);

pub fn render_grid(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let dimmed = app.launcher.state().background_locked();
    let rows = PAGE_SIZE.div_ceil(GRID_COLUMNS);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(chunks[0]);

    let cursor = app.launcher.cursor();
    let mut hits = Vec::new();
    for card in app.launcher.cards() {
        let row = card.slot / GRID_COLUMNS;
        let col = card.slot % GRID_COLUMNS;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(row_areas[row]);
        let selected = !dimmed && card.slot == cursor;
        render_card(frame, cols[col], &card, selected, dimmed);
        hits.push((cols[col], card.slot));
    }
    if app.launcher.catalog().is_empty() {
        let empty = Paragraph::new("The shelf is empty.")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[0]);
    }
    app.hits.cards = hits;

    render_pagination(frame, chunks[1], app);
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, selected: bool, dimmed: bool) {
    let border_color = if selected { ACCENT } else { CARD_BORDER };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    // Preview line: the thumbnail's file name, or the placeholder
    match card.game.thumbnail.as_deref() {
        Some(path) => {
            let name = path.rsplit('/').next().unwrap_or(path);
            lines.push(Line::from(vec![
                Span::styled("▣ ", Style::default().fg(CARD_COLOR)),
                Span::styled(name.to_string(), Style::default().fg(Color::Rgb(180, 180, 200))),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "No Preview Available",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        ))),
    }
    lines.push(Line::from(""));

    let title_color = if selected { Color::Rgb(255, 255, 255) } else { CARD_COLOR };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", card.slot + 1), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(card.game.title.clone(), Style::default().fg(title_color).add_modifier(Modifier::BOLD)),
    ]));

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter for details",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
    }

    let mut p = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    if dimmed {
        p = p.style(Style::default().add_modifier(Modifier::DIM));
    }
    frame.render_widget(p, inner);
}

fn render_pagination(frame: &mut Frame, area: Rect, app: &mut App) {
    let pagination = app.launcher.pagination();
    let indicator = pagination.indicator();

    let indicator_x = area.x + area.width.saturating_sub(indicator.len() as u16) / 2;
    frame.render_widget(
        Paragraph::new(Span::styled(indicator, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))),
        Rect::new(indicator_x, area.y, area.width.saturating_sub(indicator_x - area.x), 1),
    );

    let prev_label = "◀ Prev";
    let next_label = "Next ▶";
    let prev = render_button(frame, area.x + 1, area.y, prev_label, pagination.prev_enabled(), ACCENT);
    let next_x = area.x + area.width.saturating_sub(next_label.chars().count() as u16 + 1);
    let next = render_button(frame, next_x, area.y, next_label, pagination.next_enabled(), ACCENT);
    app.hits.prev = Some(prev);
    app.hits.next = Some(next);
}
