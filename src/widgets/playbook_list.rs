use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{App, LoadState};
use crate::theme;

pub fn render(app: &mut App, frame: &mut Frame, area: Rect) {
    let playbooks = match app.playbooks.data() {
        Some(p) => p,
        None => {
            let (text, style) = match &app.playbooks {
                LoadState::Error(msg) => (
                    format!(" Failed to load playbooks: {}", msg),
                    Style::default().fg(theme::RED),
                ),
                _ => (
                    " Discovering playbooks...".to_string(),
                    Style::default().fg(theme::TEXT_DIM),
                ),
            };
            frame.render_widget(Paragraph::new(text).style(style), area);
            return;
        }
    };

    if playbooks.is_empty() {
        let empty = Paragraph::new(" No playbooks discovered on this control node")
            .style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" Name"),
        Cell::from("Path"),
        Cell::from("Pinned Inventory"),
        Cell::from("Full Path"),
    ])
    .style(
        Style::default()
            .fg(theme::CYAN)
            .add_modifier(Modifier::BOLD),
    )
    .height(1);

    let rows: Vec<Row> = playbooks
        .iter()
        .map(|pb| {
            Row::new(vec![
                Cell::from(format!(" {}", pb.name)),
                Cell::from(pb.path.path.as_str()),
                Cell::from(pb.custom_inventory.as_deref().unwrap_or("-")),
                Cell::from(pb.full_path.as_str()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(35),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE))
        .row_highlight_style(
            Style::default()
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, &mut app.playbook_table_state);
}
