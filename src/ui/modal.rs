use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{render_button, ACCENT, MUTED};
use crate::app::App;

const MODAL_BG: Color = Color::Rgb(15, 15, 25);
const PLAY: Color = Color::Rgb(80, 220, 80);
const BACK: Color = Color::Rgb(220, 80, 80);

pub fn render_modal(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(detail) = app.launcher.detail() else { return };

    let overlay_w = 60u16.min(area.width.saturating_sub(4));
    let overlay_h = 16u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(ACCENT))
        .title(format!(" {} ", detail.title))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(MODAL_BG));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);
    if inner.height < 3 || inner.width == 0 { return; }

    let close_label = "[x]";
    let close_x = overlay_area.right().saturating_sub(close_label.len() as u16 + 1);
    let close = render_button(frame, close_x, overlay_area.y, close_label, true, BACK);

    let mut lines = vec![Line::from("")];
    if let Some(image) = detail.image {
        lines.push(Line::from(vec![
            Span::styled("  Preview: ", Style::default().fg(MUTED)),
            Span::styled(image.to_string(), Style::default().fg(Color::Rgb(80, 200, 255))),
        ]));
    }
    if detail.web_ready {
        lines.push(Line::from(Span::styled("  ● web ready", Style::default().fg(PLAY))));
    }
    lines.push(Line::from(""));
    for text in detail.description.lines() {
        lines.push(Line::from(Span::styled(
            format!("  {text}"),
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )));
    }

    let body = Rect::new(inner.x, inner.y, inner.width, inner.height - 2);
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().bg(MODAL_BG))
            .wrap(Wrap { trim: false }),
        body,
    );

    let button_y = inner.bottom() - 1;
    let play_label = "[ Play ]";
    let back_label = "[ Back ]";
    let buttons_w = (play_label.len() + 3 + back_label.len()) as u16;
    let play_x = inner.x + inner.width.saturating_sub(buttons_w) / 2;
    let play = render_button(frame, play_x, button_y, play_label, true, PLAY);
    let back_x = play_x + play_label.len() as u16 + 3;
    let back = render_button(frame, back_x, button_y, back_label, true, BACK);

    app.hits.modal = Some(overlay_area);
    app.hits.close = Some(close);
    app.hits.play = Some(play);
    app.hits.back = Some(back);
}
