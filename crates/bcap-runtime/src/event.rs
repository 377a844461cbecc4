#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The runtime translates terminal input into these types so models never
//! depend on the terminal backend. Only key presses and repeats are
//! delivered; releases are dropped during translation.

use bitflags::bitflags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        width: u16,
        /// New terminal height in rows.
        height: u16,
    },

    /// Bracketed paste contents.
    Paste(String),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab.
    BackTab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    F(u8),
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl Event {
    /// Translate a crossterm event, dropping anything the dashboard ignores.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event as ct;

        match event {
            ct::Event::Key(key) => {
                if key.kind == ct::KeyEventKind::Release {
                    return None;
                }
                let code = match key.code {
                    ct::KeyCode::Char(c) => KeyCode::Char(c),
                    ct::KeyCode::Enter => KeyCode::Enter,
                    ct::KeyCode::Esc => KeyCode::Escape,
                    ct::KeyCode::Backspace => KeyCode::Backspace,
                    ct::KeyCode::Tab => KeyCode::Tab,
                    ct::KeyCode::BackTab => KeyCode::BackTab,
                    ct::KeyCode::Delete => KeyCode::Delete,
                    ct::KeyCode::Home => KeyCode::Home,
                    ct::KeyCode::End => KeyCode::End,
                    ct::KeyCode::Up => KeyCode::Up,
                    ct::KeyCode::Down => KeyCode::Down,
                    ct::KeyCode::Left => KeyCode::Left,
                    ct::KeyCode::Right => KeyCode::Right,
                    ct::KeyCode::F(n) => KeyCode::F(n),
                    _ => return None,
                };
                let mut modifiers = Modifiers::NONE;
                if key.modifiers.contains(ct::KeyModifiers::SHIFT) {
                    modifiers |= Modifiers::SHIFT;
                }
                if key.modifiers.contains(ct::KeyModifiers::ALT) {
                    modifiers |= Modifiers::ALT;
                }
                if key.modifiers.contains(ct::KeyModifiers::CONTROL) {
                    modifiers |= Modifiers::CTRL;
                }
                Some(Self::Key(KeyEvent::new(code).with_modifiers(modifiers)))
            }
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            ct::Event::Paste(text) => Some(Self::Paste(text)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event as ct;

    #[test]
    fn translates_ctrl_c() {
        let raw = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('c'),
            ct::KeyModifiers::CONTROL,
        ));
        let Some(Event::Key(key)) = Event::from_crossterm(raw) else {
            panic!("expected key event");
        };
        assert!(key.is_char('c'));
        assert!(key.ctrl());
        assert!(!key.alt());
    }

    #[test]
    fn drops_key_release() {
        let mut key = ct::KeyEvent::new(ct::KeyCode::Enter, ct::KeyModifiers::NONE);
        key.kind = ct::KeyEventKind::Release;
        assert_eq!(Event::from_crossterm(ct::Event::Key(key)), None);
    }

    #[test]
    fn translates_resize_and_paste() {
        assert_eq!(
            Event::from_crossterm(ct::Event::Resize(100, 30)),
            Some(Event::Resize {
                width: 100,
                height: 30
            })
        );
        assert_eq!(
            Event::from_crossterm(ct::Event::Paste("0.4".into())),
            Some(Event::Paste("0.4".into()))
        );
    }

    #[test]
    fn ignores_focus_changes() {
        assert_eq!(Event::from_crossterm(ct::Event::FocusGained), None);
    }
}
