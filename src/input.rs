use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use std::io;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    PrimaryAction,
    EscapeKey,
}

/// Non-blocking source of input, drained once per frame.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// Keyboard and mouse from the terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    fn translate(ev: Event) -> Option<InputEvent> {
        match ev {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                if kind == KeyEventKind::Release {
                    return None;
                }
                match code {
                    KeyCode::Esc => Some(InputEvent::EscapeKey),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(InputEvent::Quit)
                    }
                    KeyCode::Char('q') => Some(InputEvent::Quit),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        Some(InputEvent::PrimaryAction)
                    }
                    _ => None,
                }
            }
            Event::Mouse(m) => match m.kind {
                MouseEventKind::Down(_) => Some(InputEvent::PrimaryAction),
                _ => None,
            },
            _ => None,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(ev) = Self::translate(event::read()?) {
                events.push(ev);
            }
        }
        Ok(events)
    }
}

/// Replays a fixed script, one batch per poll, then nothing.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn keys_map_to_actions() {
        let t = TerminalInput::translate;
        assert_eq!(t(key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(InputEvent::PrimaryAction));
        assert_eq!(t(key(KeyCode::Esc, KeyModifiers::NONE)), Some(InputEvent::EscapeKey));
        assert_eq!(t(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(InputEvent::Quit));
        assert_eq!(t(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(InputEvent::Quit));
        assert_eq!(t(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
        assert_eq!(t(Event::Resize(80, 24)), None);
    }

    #[test]
    fn mouse_press_flaps() {
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(TerminalInput::translate(ev), Some(InputEvent::PrimaryAction));
    }

    #[test]
    fn script_runs_out() {
        let mut input = ScriptedInput::new([vec![InputEvent::PrimaryAction], vec![]]);
        assert_eq!(input.poll().unwrap(), vec![InputEvent::PrimaryAction]);
        assert!(input.poll().unwrap().is_empty());
        assert!(input.poll().unwrap().is_empty());
    }
}
