//! Logical key events consumed by the editor.
//!
//! The core never sees raw terminal escape sequences: an input source
//! (crossterm in the binary, a test harness in tests) decodes them into
//! these events first.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    /// A control chord, e.g. `Ctrl('q')`; the letter is lowercase
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Keys that erase the character before the cursor in a prompt
    pub fn is_erase(self) -> bool {
        matches!(self, Key::Backspace | Key::Delete | Key::Ctrl('h'))
    }

    /// The byte this key types into the document, if any
    pub fn typed_byte(self) -> Option<u8> {
        match self {
            Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => Some(c as u8),
            Key::Tab => Some(b'\t'),
            _ => None,
        }
    }
}
