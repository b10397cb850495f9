//! Terminal key translation.
//!
//! Maps crossterm key events to engine keys plus a few front-end commands
//! (mode switching, speed, phrase editing, quit).

use crossterm::event::{KeyCode, KeyEvent as TermKey, KeyEventKind, KeyModifiers};
use speakeasy_core::{KeyEvent, Mode};

/// What a terminal key asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the engine
    Key(KeyEvent),
    CycleMode,
    /// Shorter scan period
    Faster,
    /// Longer scan period
    Slower,
    TogglePlay,
    /// Add the phrase sentence as a new phrase
    AddPhrase,
    /// Remove the highlighted phrase
    RemovePhrase,
    /// Restore the default phrase list
    ResetPhrases,
    Quit,
}

/// Translate a terminal key. Release and repeat events are ignored.
///
/// In typing mode printable characters always go to the engine, so speed
/// keys only work on the scanning boards.
pub fn map_key(key: &TermKey, mode: Mode) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('p') => Some(Command::AddPhrase),
            KeyCode::Char('r') => Some(Command::RemovePhrase),
            KeyCode::Char('d') => Some(Command::ResetPhrases),
            KeyCode::Char('s') => Some(Command::TogglePlay),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Tab => Command::CycleMode,
        KeyCode::Enter => Command::Key(KeyEvent::Enter),
        KeyCode::Left => Command::Key(KeyEvent::Left),
        KeyCode::Right => Command::Key(KeyEvent::Right),
        KeyCode::Backspace => Command::Key(KeyEvent::Backspace),
        KeyCode::Delete => Command::Key(KeyEvent::Delete),
        KeyCode::Char(' ') => Command::Key(KeyEvent::Space),
        KeyCode::Char('+') | KeyCode::Char('=') if mode != Mode::Typing => Command::Faster,
        KeyCode::Char('-') if mode != Mode::Typing => Command::Slower,
        KeyCode::Char(ch) => Command::Key(KeyEvent::Char(ch)),
        _ => return None,
    };
    Some(command)
}
