use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, View};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints: &[(&str, &str)] = match app.view {
        View::PlaybookList => &[
            ("j/k", "nav"),
            ("Enter", "schedule"),
            ("Ctrl+R", "refresh"),
            ("?", "help"),
            ("q", "quit"),
        ],
        View::ScheduleForm => &[
            ("i/I", "inventory"),
            ("x", "default"),
            ("+/-", "±30min"),
            ("d/D", "±day"),
            ("n", "now"),
            ("s", "schedule"),
            ("j/k", "scroll"),
            ("Esc", "back"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme::ACCENT)));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}
