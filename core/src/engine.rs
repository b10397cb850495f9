//! Scan engine: mode routing, timing and persistence.
//!
//! `ScanEngine` ties the boards to the state store. The front-end feeds it
//! key events, pointer presses and clock polls from a single loop, then reads
//! [`ScanEngine::view`] to draw. Every mutation is applied in full before the
//! call returns.
//!
//! Only the active board's clock has a pending tick. Switching modes cancels
//! the clock being left and restarts the one being entered.

use crate::action::{Action, KeyEvent};
use crate::clock::ScanClock;
use crate::letters::LetterBoard;
use crate::phrases::{PhraseScanner, PhraseSet};
use crate::store::{AppState, Mode, StateStore, DEFAULT_SPEED};
use crate::view::ScanView;
use crate::wordlist::WordList;
use crate::Config;
use std::time::Instant;

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the engine
    Handled,
    /// Key was not handled (front-end may use it)
    NotHandled,
}

pub struct ScanEngine {
    config: Config,
    store: StateStore,
    letters: LetterBoard,
    phrases: PhraseScanner,
    view: ScanView,
}

impl ScanEngine {
    /// Build an engine from a word list and a state store.
    ///
    /// Sentences, phrases, speed and mode are restored from the store.
    pub fn new(words: WordList, store: StateStore, config: Config, now: Instant) -> Self {
        let state = store.get().clone();
        let playing = state.is_playing() && !config.start_paused;
        let clock = ScanClock::new(state.interval_ms(), playing);

        let mut letters = LetterBoard::new(words, clock.clone());
        letters.set_sentence(state.letter_sentence.clone(), now);

        let mut phrases = PhraseScanner::new(state.phrases.clone(), clock);
        phrases.set_sentence(state.phrase_sentence.clone(), now);

        let mut engine = Self {
            config,
            store,
            letters,
            phrases,
            view: ScanView::new(),
        };
        engine.enter_mode(state.mode, now);
        // the letter board may have closed a dead-end word on restore
        engine.persist_sentences();
        engine.sync_view();
        engine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        self.store.get()
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn letters(&self) -> &LetterBoard {
        &self.letters
    }

    pub fn phrases(&self) -> &PhraseScanner {
        &self.phrases
    }

    pub fn mode(&self) -> Mode {
        self.store.get().mode
    }

    /// View model for the current state.
    pub fn view(&self) -> &ScanView {
        &self.view
    }

    /// Sentence of the active board.
    pub fn sentence(&self) -> &str {
        match self.mode() {
            Mode::Letters => self.letters.sentence(),
            Mode::Phrases => self.phrases.sentence(),
            Mode::Typing => &self.store.get().typed_sentence,
        }
    }

    // ========== Events ==========

    /// Process a key event.
    pub fn process_key(&mut self, key: KeyEvent, now: Instant) -> KeyResult {
        let result = if self.mode() == Mode::Typing {
            self.process_typing_key(key)
        } else {
            match key.action() {
                Some(action) => {
                    self.apply(action, now);
                    KeyResult::Handled
                }
                None => KeyResult::NotHandled,
            }
        };
        if result == KeyResult::Handled {
            self.sync_view();
        }
        result
    }

    /// A pointer press anywhere on the board confirms the highlighted item.
    pub fn pointer_press(&mut self, now: Instant) {
        if self.mode() == Mode::Typing {
            return;
        }
        self.apply(Action::Commit, now);
        self.sync_view();
    }

    /// Run one action on the active board.
    pub fn apply(&mut self, action: Action, now: Instant) {
        match self.mode() {
            Mode::Letters => match action {
                Action::Commit => {
                    self.letters.commit(now);
                }
                Action::Previous => self.letters.previous(now),
                Action::Back => {
                    self.letters.back(now);
                }
                Action::Space => self.letters.space(now),
                Action::Clear => self.letters.clear(now),
            },
            Mode::Phrases => match action {
                Action::Commit => {
                    self.phrases.commit(now);
                }
                Action::Previous => self.phrases.previous(now),
                Action::Back => {
                    self.phrases.back();
                }
                Action::Space => self.phrases.space(now),
                Action::Clear => self.phrases.clear(now),
            },
            Mode::Typing => return,
        }
        tracing::debug!(?action, mode = ?self.mode(), sentence = %self.sentence(), "applied action");
        self.persist_sentences();
    }

    fn process_typing_key(&mut self, key: KeyEvent) -> KeyResult {
        match key {
            KeyEvent::Char(ch) if !ch.is_control() => {
                self.store.update(|s| s.typed_sentence.push(ch))
            }
            KeyEvent::Space => self.store.update(|s| s.typed_sentence.push(' ')),
            KeyEvent::Backspace => self.store.update(|s| {
                s.typed_sentence.pop();
            }),
            KeyEvent::Delete => self.store.update(|s| s.typed_sentence.clear()),
            _ => return KeyResult::NotHandled,
        }
        KeyResult::Handled
    }

    /// Fire the active clock if a tick is due. Returns true if the view changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let moved = match self.mode() {
            Mode::Letters => self.letters.poll(now),
            Mode::Phrases => self.phrases.poll(now),
            Mode::Typing => false,
        };
        if moved {
            self.sync_view();
        }
        moved
    }

    /// When the front-end should call [`poll`](Self::poll) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.mode() {
            Mode::Letters => self.letters.clock().next_deadline(),
            Mode::Phrases => self.phrases.clock().next_deadline(),
            Mode::Typing => None,
        }
    }

    // ========== Mode and speed ==========

    pub fn set_mode(&mut self, mode: Mode, now: Instant) {
        if mode == self.mode() {
            return;
        }
        self.store.update(|s| s.mode = mode);
        self.enter_mode(mode, now);
        tracing::debug!(mode = mode.label(), "switched mode");
        self.sync_view();
    }

    pub fn cycle_mode(&mut self, now: Instant) {
        self.set_mode(self.mode().next(), now);
    }

    fn enter_mode(&mut self, mode: Mode, now: Instant) {
        match mode {
            Mode::Letters => {
                // the pointer cannot stay on a phrase that is off screen
                self.phrases.blur(now);
                self.phrases.clock_mut().cancel();
                self.letters.clock_mut().reset(now);
            }
            Mode::Phrases => {
                self.letters.clock_mut().cancel();
                self.phrases.clock_mut().reschedule(now);
            }
            Mode::Typing => {
                self.phrases.blur(now);
                self.letters.clock_mut().cancel();
                self.phrases.clock_mut().cancel();
            }
        }
    }

    /// Set seconds per scan step. Zero or less pauses scanning.
    pub fn set_speed(&mut self, seconds: f64, now: Instant) {
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        self.store.update(|s| s.speed = seconds);
        let state = self.store.get();
        let (playing, interval_ms) = (state.is_playing(), state.interval_ms());

        for clock in [self.letters.clock_mut(), self.phrases.clock_mut()] {
            clock.set_interval_ms(interval_ms, now);
            clock.set_playing(playing, now);
        }
        self.cancel_inactive_clocks();
        tracing::debug!(seconds, playing, interval_ms, "speed changed");
        self.sync_view();
    }

    /// Only the active board keeps a pending tick.
    fn cancel_inactive_clocks(&mut self) {
        match self.mode() {
            Mode::Letters => self.phrases.clock_mut().cancel(),
            Mode::Phrases => self.letters.clock_mut().cancel(),
            Mode::Typing => {
                self.letters.clock_mut().cancel();
                self.phrases.clock_mut().cancel();
            }
        }
    }

    /// Nudge the speed by `steps` multiples of the configured step, kept
    /// between zero (paused) and the configured maximum.
    pub fn adjust_speed(&mut self, steps: i32, now: Instant) {
        let current = self.store.get().speed.max(0.0);
        let next = (current + self.config.get_speed_step() * f64::from(steps))
            .clamp(0.0, self.config.get_max_speed());
        self.set_speed(next, now);
    }

    /// Pause or resume scanning without touching the persisted speed.
    ///
    /// A persisted speed of zero resumes at the default speed.
    pub fn toggle_play(&mut self, now: Instant) {
        if !self.store.get().is_playing() {
            self.set_speed(DEFAULT_SPEED, now);
            return;
        }
        let playing = !self.letters.clock().is_playing();
        self.letters.clock_mut().set_playing(playing, now);
        self.phrases.clock_mut().set_playing(playing, now);
        self.cancel_inactive_clocks();
        tracing::debug!(playing, "toggled play");
        self.sync_view();
    }

    // ========== Phrase editing ==========

    /// Append a phrase to the persisted list.
    pub fn add_phrase(&mut self, text: &str) -> bool {
        if !self.phrases.add_phrase(text) {
            return false;
        }
        self.persist_phrases();
        self.sync_view();
        true
    }

    /// Remove every copy of a phrase. Returns the number removed.
    pub fn remove_phrase(&mut self, text: &str, now: Instant) -> usize {
        let removed = self.phrases.remove_phrase(text, now);
        if removed > 0 {
            if self.mode() != Mode::Phrases {
                self.phrases.clock_mut().cancel();
            }
            self.persist_phrases();
            self.sync_view();
        }
        removed
    }

    /// Pointer entered a phrase button.
    pub fn focus_phrase(&mut self, index: usize, now: Instant) {
        if self.mode() != Mode::Phrases {
            return;
        }
        self.phrases.focus(index, now);
        self.sync_view();
    }

    /// Pointer left the phrase buttons.
    pub fn blur_phrase(&mut self, now: Instant) {
        if self.mode() != Mode::Phrases {
            return;
        }
        self.phrases.blur(now);
        self.sync_view();
    }

    /// Replace the phrase list with the seed list.
    pub fn reset_phrases(&mut self, now: Instant) {
        self.phrases.set_phrases(PhraseSet::seeded(), now);
        if self.mode() != Mode::Phrases {
            self.phrases.clock_mut().cancel();
        }
        self.persist_phrases();
        self.sync_view();
    }

    // ========== Store sync ==========

    fn persist_sentences(&mut self) {
        let letter = self.letters.sentence().to_string();
        let phrase = self.phrases.sentence().to_string();
        self.store.update(|s| {
            s.letter_sentence = letter;
            s.phrase_sentence = phrase;
        });
    }

    fn persist_phrases(&mut self) {
        let phrases = self.phrases.phrases().clone();
        self.store.update(|s| s.phrases = phrases);
    }

    /// Rebuild the view model from the active board.
    fn sync_view(&mut self) {
        let mode = self.mode();
        let state = self.store.get();
        self.view.clear();
        self.view.mode = mode;
        self.view.playing = match mode {
            Mode::Letters => self.letters.clock().is_playing(),
            Mode::Phrases => self.phrases.clock().is_playing(),
            Mode::Typing => false,
        };
        self.view.interval_ms = state.interval_ms();

        match mode {
            Mode::Letters => {
                self.view.visible_cells = self.letters.visible_cells();
                self.view.candidate_words = self
                    .letters
                    .candidate_words(self.config.get_max_candidate_words())
                    .to_vec();
                self.view.sentence = self.letters.sentence().to_string();
            }
            Mode::Phrases => {
                self.view.phrases = self.phrases.cells();
                self.view.sentence = self.phrases.sentence().to_string();
            }
            Mode::Typing => {
                self.view.sentence = state.typed_sentence.clone();
            }
        }
    }
}
