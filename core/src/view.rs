//! View model handed to the front-end.
//!
//! `ScanView` is a plain data container. After every event the engine syncs
//! its state into it and the front-end reads the fields to draw. Pixels,
//! colors and layout are the front-end's business.

use crate::phrases::PhraseCell;
use crate::store::Mode;
use crate::window::{strip_text, Cell};

/// Most candidate words shown under the scan strip.
pub const MAX_CANDIDATE_WORDS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanView {
    /// Board on screen
    pub mode: Mode,

    /// Scan strip (letters mode), always `WINDOW_SIZE` cells
    pub visible_cells: Vec<Cell>,

    /// Words the partial word may become (letters mode)
    pub candidate_words: Vec<String>,

    /// Phrase buttons (phrases mode)
    pub phrases: Vec<PhraseCell>,

    /// Sentence of the active board
    pub sentence: String,

    /// Whether the scan is running
    pub playing: bool,

    /// Scan period
    pub interval_ms: u64,
}

impl ScanView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear board-specific content; mode and timing are kept.
    pub fn clear(&mut self) {
        self.visible_cells.clear();
        self.candidate_words.clear();
        self.phrases.clear();
        self.sentence.clear();
    }

    /// The scan strip as text.
    pub fn strip(&self) -> String {
        strip_text(&self.visible_cells)
    }

    /// Text of the highlighted item, whichever board is active.
    pub fn highlighted(&self) -> Option<String> {
        match self.mode {
            Mode::Letters => self
                .visible_cells
                .iter()
                .find(|c| c.highlighted)
                .map(|c| c.ch.to_string()),
            Mode::Phrases => self
                .phrases
                .iter()
                .find(|p| p.highlighted)
                .map(|p| p.text.clone()),
            Mode::Typing => None,
        }
    }
}
