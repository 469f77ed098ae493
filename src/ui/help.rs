use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<12}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Ctrl+C", "Quit from anywhere"),
        Line::from(""),
        section("List"),
        binding("↑/k ↓/j", "Navigate up/down"),
        binding("PgUp/PgDn", "Previous/next page"),
        binding("g/G", "Jump to first/last movie"),
        binding("Enter", "Open movie detail"),
        binding("/", "Edit filters"),
        binding("c", "Clear all filters"),
        Line::from(""),
        section("Filters"),
        binding("Tab/S-Tab", "Next/previous field"),
        binding("←/→", "Change genre or sort choice"),
        binding("Backspace", "Delete last character"),
        binding("Ctrl+L", "Clear all filters"),
        binding("Enter/Esc", "Back to the list"),
        Line::from(""),
        section("Detail"),
        binding("↑/↓", "Scroll"),
        binding("PgUp/PgDn", "Scroll a page"),
        binding("Esc/q", "Close"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
