//! Front-end state: the engine plus terminal input routing.

use crate::keymap::{map_key, Command};
use crate::render::phrase_at;
use crossterm::event::{Event, KeyEvent as TermKey, MouseButton, MouseEvent, MouseEventKind};
use speakeasy_core::{KeyResult, Mode, ScanEngine};
use std::time::Instant;

pub struct App {
    engine: ScanEngine,
    quit: bool,
}

impl App {
    pub fn new(engine: ScanEngine) -> Self {
        Self {
            engine,
            quit: false,
        }
    }

    pub fn engine(&self) -> &ScanEngine {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Route one terminal event. Returns true if the screen needs redrawing.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(..) => true,
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: &TermKey, now: Instant) -> bool {
        let Some(command) = map_key(key, self.engine.mode()) else {
            return false;
        };
        self.run(command, now)
    }

    /// Execute a front-end command.
    pub fn run(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Key(key) => {
                return self.engine.process_key(key, now) == KeyResult::Handled;
            }
            Command::CycleMode => self.engine.cycle_mode(now),
            Command::Faster => self.engine.adjust_speed(-1, now),
            Command::Slower => self.engine.adjust_speed(1, now),
            Command::TogglePlay => self.engine.toggle_play(now),
            Command::AddPhrase => {
                let text = self.engine.phrases().sentence().to_string();
                if !self.engine.add_phrase(&text) {
                    return false;
                }
                tracing::info!(phrase = %text.trim(), "added phrase");
            }
            Command::RemovePhrase => {
                if self.engine.mode() != Mode::Phrases {
                    return false;
                }
                let Some(text) = self.engine.phrases().current_phrase().map(str::to_string) else {
                    return false;
                };
                let removed = self.engine.remove_phrase(&text, now);
                tracing::info!(phrase = %text, removed, "removed phrase");
            }
            Command::ResetPhrases => self.engine.reset_phrases(now),
            Command::Quit => self.quit = true,
        }
        true
    }

    /// Left click confirms; hovering a phrase button holds the scan on it.
    pub fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> bool {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.engine.mode() == Mode::Typing {
                    return false;
                }
                self.engine.pointer_press(now);
                true
            }
            MouseEventKind::Moved => {
                match phrase_at(self.engine.view(), mouse.row) {
                    Some(index) => {
                        if self.engine.phrases().focused() == Some(index) {
                            return false;
                        }
                        self.engine.focus_phrase(index, now);
                    }
                    None => {
                        if self.engine.phrases().focused().is_none() {
                            return false;
                        }
                        self.engine.blur_phrase(now);
                    }
                }
                true
            }
            _ => false,
        }
    }

    /// Advance the scan if a tick is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.engine.poll(now)
    }
}
