//! Trigger-agnostic actions and the keys bound to them.
//!
//! Keyboard keys, pointer presses and switch closures all end up as an
//! [`Action`]. Boards only ever see actions, never the trigger that produced
//! them.

use phf::phf_map;

/// Something a trigger asks the active board to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Append the highlighted item
    Commit,
    /// Step the cursor back one item
    Previous,
    /// Remove the last character (letters) or word (phrases)
    Back,
    /// Append a word boundary
    Space,
    /// Empty the sentence
    Clear,
}

/// Key names (DOM `KeyboardEvent.key` spelling) bound to actions.
pub static KEY_BINDINGS: phf::Map<&'static str, Action> = phf_map! {
    "Enter" => Action::Commit,
    "Return" => Action::Commit,
    "ArrowLeft" => Action::Previous,
    "Backspace" => Action::Back,
    "Delete" => Action::Clear,
    " " => Action::Space,
    "Spacebar" => Action::Space,
};

/// Look up the action bound to a key name.
pub fn action_for_key(name: &str) -> Option<Action> {
    KEY_BINDINGS.get(name).copied()
}

/// Key events the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Printable character
    Char(char),
    Enter,
    Left,
    Right,
    Backspace,
    Delete,
    Space,
    Tab,
    Escape,
}

impl KeyEvent {
    /// DOM-style key name, as used in [`KEY_BINDINGS`].
    pub fn name(&self) -> Option<&'static str> {
        match self {
            KeyEvent::Enter => Some("Enter"),
            KeyEvent::Left => Some("ArrowLeft"),
            KeyEvent::Right => Some("ArrowRight"),
            KeyEvent::Backspace => Some("Backspace"),
            KeyEvent::Delete => Some("Delete"),
            KeyEvent::Space | KeyEvent::Char(' ') => Some(" "),
            KeyEvent::Tab => Some("Tab"),
            KeyEvent::Escape => Some("Escape"),
            KeyEvent::Char(_) => None,
        }
    }

    /// Parse a DOM-style key name. Single characters become `Char`.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" | "Return" => KeyEvent::Enter,
            "ArrowLeft" => KeyEvent::Left,
            "ArrowRight" => KeyEvent::Right,
            "Backspace" => KeyEvent::Backspace,
            "Delete" => KeyEvent::Delete,
            " " | "Spacebar" => KeyEvent::Space,
            "Tab" => KeyEvent::Tab,
            "Escape" => KeyEvent::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeyEvent::Char(ch),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// The scan action this key triggers, if any.
    pub fn action(&self) -> Option<Action> {
        self.name().and_then(action_for_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_keys_are_bound() {
        assert_eq!(action_for_key("Enter"), Some(Action::Commit));
        assert_eq!(action_for_key("ArrowLeft"), Some(Action::Previous));
        assert_eq!(action_for_key("Backspace"), Some(Action::Back));
        assert_eq!(action_for_key("Delete"), Some(Action::Clear));
        assert_eq!(action_for_key(" "), Some(Action::Space));
        assert_eq!(action_for_key("ArrowRight"), None);
    }

    #[test]
    fn key_events_map_to_actions() {
        assert_eq!(KeyEvent::Enter.action(), Some(Action::Commit));
        assert_eq!(KeyEvent::Space.action(), Some(Action::Space));
        assert_eq!(KeyEvent::Char(' ').action(), Some(Action::Space));
        assert_eq!(KeyEvent::Char('a').action(), None);
        assert_eq!(KeyEvent::Tab.action(), None);
    }

    #[test]
    fn names_round_trip() {
        for key in [
            KeyEvent::Enter,
            KeyEvent::Left,
            KeyEvent::Backspace,
            KeyEvent::Delete,
            KeyEvent::Space,
            KeyEvent::Escape,
        ] {
            assert_eq!(KeyEvent::from_name(key.name().unwrap()), Some(key));
        }
        assert_eq!(KeyEvent::from_name("q"), Some(KeyEvent::Char('q')));
        assert_eq!(KeyEvent::from_name("F13"), None);
    }
}
