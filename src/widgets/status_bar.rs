use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, View};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut left_spans: Vec<Span> = vec![
        Span::styled(
            " a9s ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(
            "Playbooks",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if app.view == View::ScheduleForm {
        if let Some(form) = &app.form {
            left_spans.push(Span::styled(" > ", Style::default().fg(theme::TEXT_MUTED)));
            left_spans.push(Span::styled(
                form.playbook.name.clone(),
                Style::default().fg(theme::TEXT_DIM),
            ));
        }
    }

    let mut right_spans: Vec<Span> = vec![Span::styled(
        format!("node:{}", app.minion_id),
        Style::default().fg(theme::ACCENT),
    )];
    if let Some(playbooks) = app.playbooks.data() {
        right_spans.push(Span::styled(
            format!("  [{} playbooks]", playbooks.len()),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }
    right_spans.push(Span::raw(" "));

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let gap = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right_spans);

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}
