use super::centered_rect;
use crate::app::App;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame) {
    let movie = match app.detail_movie() {
        Some(m) => m,
        None => return,
    };

    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let label = Style::default().fg(Color::DarkGray);
    let or_unknown = |s: &str| {
        if s.is_empty() {
            "unknown".to_string()
        } else {
            s.to_string()
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                movie.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", movie.year), label),
        ]),
        Line::from(Span::styled(
            movie.genre.join(", "),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            format!("★ {}", movie.rating),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Director: ", label),
            Span::raw(or_unknown(&movie.director)),
        ]),
        Line::from(vec![
            Span::styled("Actors:   ", label),
            Span::raw(or_unknown(&movie.actors.join(", "))),
        ]),
    ];
    if !movie.image.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Poster:   ", label),
            Span::styled(
                movie.image.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(movie.description.clone()));

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Movie Detail ")
                .title_bottom(
                    Line::from(" ↑↓/PgUp/PgDn scroll   Esc close ")
                        .alignment(Alignment::Right)
                        .style(label),
                ),
        );
    frame.render_widget(detail, area);
}
