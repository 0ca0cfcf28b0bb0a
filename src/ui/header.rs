use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::view::Screen;

const SECTIONS: [(Screen, &str); 3] = [
    (Screen::Grid, " Library "),
    (Screen::Detail, " Details "),
    (Screen::Playing, " Player "),
];

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.launcher.screen();
    let titles: Vec<Line> = SECTIONS
        .iter()
        .map(|(screen, title)| {
            let style = if *screen == current {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            Line::from(Span::styled(*title, style))
        })
        .collect();
    let selected = SECTIONS.iter().position(|(s, _)| *s == current).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(" 🕹 GameShelf ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}
