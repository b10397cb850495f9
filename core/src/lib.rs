//! speakeasy-core
//!
//! Scan-selection composition engine for single-switch communication. A
//! highlight steps through a set of choices on a timer; one trigger appends
//! the highlighted choice to a sentence.
//!
//! Two boards share the same machinery:
//! - letters: the selectable set is every letter that continues a known word
//!   from the partial word at the end of the sentence, most likely first.
//! - phrases: the selectable set is a user-editable list of whole phrases.
//!
//! Public API:
//! - `ScanEngine` - Mode routing, timing and persistence for a front-end
//! - `LetterBoard` / `PhraseScanner` - The two scanning boards
//! - `predict` - Prefix filter over a `WordList`
//! - `ScanClock` - Cyclic cursor driven by an explicit timer handle
//! - `visible_cells` - Fixed-width strip around the cursor
//! - `StateStore` - Persisted application state with redb or in-memory backends
//! - `Config` - Configuration
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod prediction;
pub use prediction::{last_word, predict, Prediction, ALPHABET, LETTERS};

pub mod wordlist;
pub use wordlist::WordList;

pub mod clock;
pub use clock::{ScanClock, TimerHandle};

pub mod window;
pub use window::{strip_text, visible_cells, Cell, LOOK_BEHIND, WINDOW_SIZE};

pub mod composer;
pub use composer::{BackStyle, ScanSource, SelectionComposer};

pub mod letters;
pub use letters::LetterBoard;

pub mod phrases;
pub use phrases::{PhraseCell, PhraseScanner, PhraseSet, SEED_PHRASES};

pub mod store;
pub use store::{AppState, Backend, Mode, StateStore, StoreError};

pub mod action;
pub use action::{action_for_key, Action, KeyEvent};

pub mod view;
pub use view::{ScanView, MAX_CANDIDATE_WORDS};

pub mod engine;
pub use engine::{KeyResult, ScanEngine};

/// Engine and front-end configuration.
///
/// Paths left unset fall back to the built-in word list and an in-memory
/// state store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Newline-separated word list
    pub word_list: Option<PathBuf>,

    /// redb database holding the persisted state
    pub state_path: Option<PathBuf>,

    /// Most candidate words shown on the letter board
    pub max_candidate_words: usize,

    /// Seconds added or removed by one speed adjustment
    pub speed_step: f64,

    /// Slowest speed a speed adjustment can reach (seconds per step)
    pub max_speed: f64,

    /// Start scanning paused regardless of the persisted speed
    pub start_paused: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_list: None,
            state_path: None,
            max_candidate_words: MAX_CANDIDATE_WORDS,
            speed_step: 0.5,
            max_speed: 10.0,
            start_paused: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    // ========== Candidate Words ==========

    /// Set how many candidate words the letter board shows.
    /// Values above [`MAX_CANDIDATE_WORDS`] are clamped.
    pub fn set_max_candidate_words(&mut self, limit: usize) {
        self.max_candidate_words = limit.min(MAX_CANDIDATE_WORDS);
    }

    pub fn get_max_candidate_words(&self) -> usize {
        self.max_candidate_words.min(MAX_CANDIDATE_WORDS)
    }

    // ========== Speed Adjustment ==========

    /// Set the speed adjustment step in seconds. Non-positive steps are ignored.
    pub fn set_speed_step(&mut self, step: f64) {
        if step > 0.0 && step.is_finite() {
            self.speed_step = step;
        }
    }

    pub fn get_speed_step(&self) -> f64 {
        self.speed_step
    }

    /// Set the slowest reachable speed. Non-positive values are ignored.
    pub fn set_max_speed(&mut self, seconds: f64) {
        if seconds > 0.0 && seconds.is_finite() {
            self.max_speed = seconds;
        }
    }

    pub fn get_max_speed(&self) -> f64 {
        self.max_speed
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}
