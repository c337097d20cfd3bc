use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, ScheduleForm};
use crate::domain::{Message, Severity};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };

    if form.loading {
        let loading = Paragraph::new(" Loading playbook contents...")
            .style(Style::default().fg(theme::TEXT_DIM));
        frame.render_widget(loading, area);
        return;
    }

    let message_height = if form.messages.is_empty() {
        0
    } else {
        form.messages.len() as u16 + 1
    };
    let layout = Layout::vertical([
        Constraint::Length(message_height),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .split(area);

    render_messages(&form.messages, frame, layout[0]);
    render_fields(form, frame, layout[1]);
    render_content(form, frame, layout[2]);
}

fn render_messages(messages: &[Message], frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = messages
        .iter()
        .map(|msg| {
            let (tag_bg, text_fg) = match msg.severity {
                Severity::Error => (theme::RED, theme::RED),
                Severity::Success => (theme::GREEN, theme::GREEN),
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", msg.severity.as_str()),
                    Style::default().fg(theme::BG_DARK).bg(tag_bg),
                ),
                Span::styled(format!(" {}", msg.text), Style::default().fg(text_fg)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_fields(form: &ScheduleForm, frame: &mut Frame, area: Rect) {
    let options = form.inventory_options();
    let inventory_line = match &form.selected_inventory {
        Some(selected) => Line::from(vec![
            field_label("Inventory"),
            Span::styled(selected.text.clone(), Style::default().fg(theme::TEXT)),
            Span::styled(
                format!("  ({}/{})", selected.id + 1, options.len()),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]),
        None => Line::from(vec![
            field_label("Inventory"),
            Span::styled("(playbook default)", Style::default().fg(theme::TEXT_DIM)),
            Span::styled(
                format!("  ({} available)", options.len()),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]),
    };

    let control_node = form.playbook.control_node_id().to_string();
    let scheduled_at = form.scheduled_at.format("%Y-%m-%d %H:%M").to_string();
    let lines = vec![
        field_line("Playbook", &form.playbook.name),
        field_line(
            "Control Node",
            &control_node,
        ),
        field_line(
            "Earliest (UTC)",
            &scheduled_at,
        ),
        inventory_line,
        Line::from(Span::styled(
            " i/I cycle inventory, x default, +/- and d/D shift time, s schedule",
            Style::default().fg(theme::TEXT_MUTED),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::TEXT_MUTED))
        .title(" Schedule Playbook Execution ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_content(form: &ScheduleForm, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::TEXT_MUTED))
        .title(format!(" Playbook '{}' ", form.playbook.name));

    let paragraph = Paragraph::new(form.content.as_str())
        .block(block)
        .scroll((form.content_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn field_label(label: &str) -> Span<'static> {
    Span::styled(
        format!(" {:<16} ", label),
        Style::default()
            .fg(theme::CYAN)
            .add_modifier(Modifier::BOLD),
    )
}

fn field_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        field_label(label),
        Span::styled(value.to_string(), Style::default().fg(theme::TEXT)),
    ])
}
