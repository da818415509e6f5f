use glam::DVec2;

use crate::camera::machine::CameraMode;

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Number row / numpad digit.
    Digit(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    /// Any other printable character (`+`, `-`, `r`, ...).
    Char(char),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Home" => Some(Key::Home),
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                match c.to_digit(10) {
                    Some(d) => Some(Key::Digit(d as u8)),
                    None => Some(Key::Char(c)),
                }
            }
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false, meta: false };

    /// Bit layout used by the web bridge: shift=1, ctrl=2, alt=4, meta=8.
    pub fn from_bits(bits: u32) -> Self {
        Self {
            shift: bits & 1 != 0,
            ctrl: bits & 2 != 0,
            alt: bits & 4 != 0,
            meta: bits & 8 != 0,
        }
    }

    /// Shift, Ctrl or Meta selects the fast rotation step.
    pub fn fast(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Input events the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key: Key, modifiers: Modifiers },
    /// A click at normalized device coordinates (x right, y up, [-1, 1]).
    Click { ndc: DVec2 },
    /// Programmatic mode selection, same effect as the digit keys.
    SelectMode(CameraMode),
    /// Programmatic speed change, clamped like the keyboard path.
    SetSpeed(f64),
}

/// A queue of input events.
/// The host pushes events between frames; the engine drains them at the
/// start of the next tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Click { ndc: DVec2::new(0.1, -0.2) });
        q.push(InputEvent::KeyDown { key: Key::Digit(1), modifiers: Modifiers::NONE });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
        assert_eq!(events[0], InputEvent::Click { ndc: DVec2::new(0.1, -0.2) });
    }

    #[test]
    fn parses_dom_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name("2"), Some(Key::Digit(2)));
        assert_eq!(Key::from_name("+"), Some(Key::Char('+')));
        assert_eq!(Key::from_name("R"), Some(Key::Char('R')));
        assert_eq!(Key::from_name("Home"), Some(Key::Home));
        assert_eq!(Key::from_name("Escape"), None);
        assert_eq!(Key::from_name(""), None);
    }

    #[test]
    fn modifier_bits() {
        let m = Modifiers::from_bits(0b1010);
        assert!(!m.shift && m.ctrl && !m.alt && m.meta);
        assert!(m.fast());
        assert!(!Modifiers::from_bits(4).fast());
    }
}
