use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::app::View;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct RawEventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl RawEventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {} // mouse, resize, etc.
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on the current view.
pub fn key_to_action(key: KeyEvent, view: &View, help_open: bool) -> Option<Action> {
    if help_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
    }

    match key.code {
        // Global
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
        KeyCode::Char('g') => Some(Action::NavigateTop),
        KeyCode::Char('G') => Some(Action::NavigateBottom),
        KeyCode::Enter if *view == View::PlaybookList => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),

        _ if *view == View::ScheduleForm => form_key(key),
        _ => None,
    }
}

fn form_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('i') | KeyCode::Right => Some(Action::NextInventory),
        KeyCode::Char('I') | KeyCode::Left => Some(Action::PrevInventory),
        KeyCode::Char('x') => Some(Action::ClearInventory),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::AdjustScheduledAt(30)),
        KeyCode::Char('-') => Some(Action::AdjustScheduledAt(-30)),
        KeyCode::Char('d') => Some(Action::AdjustScheduledAt(24 * 60)),
        KeyCode::Char('D') => Some(Action::AdjustScheduledAt(-24 * 60)),
        KeyCode::Char('n') => Some(Action::ResetScheduledAt),
        KeyCode::Char('s') => Some(Action::Submit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_selects_only_in_the_list_view() {
        assert!(matches!(
            key_to_action(key(KeyCode::Enter), &View::PlaybookList, false),
            Some(Action::Select)
        ));
        assert!(key_to_action(key(KeyCode::Enter), &View::ScheduleForm, false).is_none());
    }

    #[test]
    fn form_keys_only_apply_in_the_form_view() {
        assert!(matches!(
            key_to_action(key(KeyCode::Char('s')), &View::ScheduleForm, false),
            Some(Action::Submit)
        ));
        assert!(key_to_action(key(KeyCode::Char('s')), &View::PlaybookList, false).is_none());

        assert!(matches!(
            key_to_action(key(KeyCode::Char('+')), &View::ScheduleForm, false),
            Some(Action::AdjustScheduledAt(30))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('D')), &View::ScheduleForm, false),
            Some(Action::AdjustScheduledAt(-1440))
        ));
    }

    #[test]
    fn help_overlay_swallows_everything_but_close_keys() {
        assert!(matches!(
            key_to_action(key(KeyCode::Char('?')), &View::PlaybookList, true),
            Some(Action::ToggleHelp)
        ));
        assert!(key_to_action(key(KeyCode::Char('j')), &View::PlaybookList, true).is_none());
    }

    #[test]
    fn ctrl_r_refreshes() {
        let event = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(matches!(
            key_to_action(event, &View::PlaybookList, false),
            Some(Action::Refresh)
        ));
    }
}
