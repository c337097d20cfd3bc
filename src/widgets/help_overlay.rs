use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;

pub fn render(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        section("Navigation"),
        binding("j / k / Up / Down", "Navigate / scroll"),
        binding("g / G", "Go to top / bottom"),
        binding("Enter", "Open the schedule form"),
        binding("Esc", "Back to the playbook list"),
        Line::from(""),
        section("Schedule Form"),
        binding("i / I", "Cycle inventory selection"),
        binding("x", "Use the playbook default inventory"),
        binding("+ / -", "Shift execution time by 30 minutes"),
        binding("d / D", "Shift execution time by one day"),
        binding("n", "Reset execution time to now"),
        binding("s", "Schedule the playbook"),
        Line::from(""),
        section("General"),
        binding("Ctrl+R", "Refresh"),
        binding("?", "Toggle this help"),
        binding("q", "Quit"),
    ];

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(56, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Help (? to close) ");

    frame.render_widget(Paragraph::new(lines).block(block), modal_area);
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(keys: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<20}", keys), Style::default().fg(theme::CYAN)),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
