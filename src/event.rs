use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::scroll::PaneSide;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReader {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let event_tx = tx.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                match reader.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) => {
                        if event_tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(CrosstermEvent::Mouse(mouse))) => {
                        if event_tx.send(Event::Mouse(mouse)).is_err() {
                            break;
                        }
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => {
                        if event_tx.send(Event::Resize).is_err() {
                            break;
                        }
                    }
                    Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        });

        let tick_tx = tx;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);
            loop {
                interval.tick().await;
                if tick_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// All context needed to map a key event to an action.
pub struct KeyContext {
    /// An in-flight minimap drag intercepts key input.
    pub dragging: bool,
}

/// Map a key event to an action based on current app context.
pub fn map_key_to_action(key: KeyEvent, ctx: &KeyContext) -> Option<Action> {
    // Ctrl-C / Ctrl-D always quit
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => return Some(Action::Quit),
            _ => {}
        }
    }

    // A key press during a minimap drag ends the drag before doing anything else
    if ctx.dragging {
        return Some(Action::DragEnd);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::ScrollLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::ScrollRight),
        KeyCode::PageUp => Some(Action::ScrollPageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::ScrollPageDown),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::ScrollToTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::ScrollToBottom),

        KeyCode::Char('1') => Some(Action::FocusPane(PaneSide::Left)),
        KeyCode::Char('2') => Some(Action::FocusPane(PaneSide::Right)),
        KeyCode::Tab => Some(Action::ToggleFocus),

        KeyCode::Char('m') => Some(Action::ToggleMinimap),
        KeyCode::Char('t') => Some(Action::CycleTheme),
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Char('?') => Some(Action::ToggleHud),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctx() -> KeyContext {
        KeyContext { dragging: false }
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key_to_action(ev, &ctx()), Some(Action::Quit)));
        let dragging = KeyContext { dragging: true };
        assert!(matches!(
            map_key_to_action(ev, &dragging),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_scroll_keys() {
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('j')), &ctx()),
            Some(Action::ScrollDown)
        ));
        assert!(matches!(
            map_key_to_action(key(KeyCode::PageUp), &ctx()),
            Some(Action::ScrollPageUp)
        ));
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('G')), &ctx()),
            Some(Action::ScrollToBottom)
        ));
    }

    #[test]
    fn test_key_during_drag_ends_it() {
        let dragging = KeyContext { dragging: true };
        assert!(matches!(
            map_key_to_action(key(KeyCode::Char('j')), &dragging),
            Some(Action::DragEnd)
        ));
    }

    #[test]
    fn test_unmapped_key() {
        assert!(map_key_to_action(key(KeyCode::Char('z')), &ctx()).is_none());
    }
}
