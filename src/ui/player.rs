use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{render_button, ACCENT, MUTED};
use crate::app::App;
use crate::player::{EmbeddedFrame, GameFrame};

pub fn render_player(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", app.launcher.playing_label()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );
    let exit_label = "[ Exit ]";
    let exit_x = chunks[0].right().saturating_sub(exit_label.len() as u16 + 1);
    app.hits.exit = Some(render_button(frame, exit_x, chunks[0].y, exit_label, true, Color::Rgb(220, 80, 80)));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)));
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let game_frame = app.launcher.frame();
    let source = game_frame.source();
    let status = match game_frame {
        GameFrame::Process(_) => "Running in the configured runner.",
        GameFrame::Inline(_) => "No runner configured; open the game yourself:",
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(MUTED))),
        Line::from(""),
        Line::from(Span::styled(
            source.to_string(),
            Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or F10 to return to the launcher",
            Style::default().fg(MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
