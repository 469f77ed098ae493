use super::filters;
use crate::app::App;
use crate::catalog::Movie;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + filters(4) + list(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(
        " Movie Explorer   [{} of {} movies]",
        app.filtered_indices.len(),
        app.catalog.len()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Filter bar ──
    filters::render(app, frame, chunks[1]);

    // ── List ──
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Movies ");

    if app.filtered_indices.is_empty() {
        let placeholder = Paragraph::new("No movies matched your filters")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(list_block);
        frame.render_widget(placeholder, chunks[2]);
    } else {
        let width = chunks[2].width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = app
            .visible_movies()
            .into_iter()
            .map(|movie| ListItem::new(movie_card(movie, width)))
            .collect();

        let page_info = format!(
            " {}-{} of {} ",
            app.list_offset + 1,
            app.list_offset + items.len(),
            app.filtered_indices.len()
        );

        let list_widget = List::new(items)
            .block(list_block.title_bottom(Line::from(page_info).alignment(Alignment::Right)))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default();
        list_state.select(Some(app.list_selected));
        frame.render_stateful_widget(list_widget, chunks[2], &mut list_state);
    }

    // ── Status bar ──
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key_style),
        Span::raw(" Navigate  "),
        Span::styled("/", key_style),
        Span::raw(" Filter  "),
        Span::styled("Enter", key_style),
        Span::raw(" Detail  "),
        Span::styled("c", key_style),
        Span::raw(" Clear  "),
        Span::styled("?", key_style),
        Span::raw(" Help  "),
        Span::styled("q", key_style),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    let status_bar = Paragraph::new(status_line);
    frame.render_widget(status_bar, chunks[3]);
}

/// One list row: title and year, genres, rating, director.
fn movie_card(movie: &Movie, width: usize) -> Line<'_> {
    let title = format!("{} ({})", movie.title, movie.year);
    let genres = movie.genre.join(", ");
    let rating = format!("★ {:.1}", movie.rating);

    let title_width = (width / 3).max(12);
    let genre_width = (width / 4).max(8);
    let director_width = width.saturating_sub(title_width + genre_width + rating.width() + 6);

    Line::from(vec![
        Span::styled(
            pad(&truncate_str(&title, title_width), title_width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            pad(&truncate_str(&genres, genre_width), genre_width),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("  "),
        Span::styled(rating, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            truncate_str(&movie.director, director_width),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        result.push(c);
        used += w;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_str("Alpha", 10), "Alpha");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_str("Alphabet", 5), "Alph…");
        assert_eq!(truncate_str("Alphabet", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide
        let out = truncate_str("日本語タイトル", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_pad_fills_to_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcd", 2), "abcd");
    }
}
