//! Letter scanning board.
//!
//! Couples a [`SelectionComposer`] with the prefix filter: every change to the
//! sentence re-derives the selectable letters from scratch and restarts the
//! scan at the first (most likely) letter. When the partial word has no known
//! continuation the board closes the word by appending a space.

use crate::clock::ScanClock;
use crate::composer::{BackStyle, ScanSource, SelectionComposer};
use crate::prediction::{predict, Prediction};
use crate::window::{visible_cells, Cell};
use crate::wordlist::WordList;
use std::time::Instant;

impl ScanSource for Prediction {
    fn len(&self) -> usize {
        self.letters.len()
    }

    fn commit_text(&self, index: usize) -> Option<String> {
        self.letters.get(index).map(|c| c.to_string())
    }
}

/// Letter-by-letter composition driven by word-list prediction.
#[derive(Debug, Clone)]
pub struct LetterBoard {
    words: WordList,
    composer: SelectionComposer,
    prediction: Prediction,
}

impl LetterBoard {
    pub fn new(words: WordList, clock: ScanClock) -> Self {
        Self {
            words,
            composer: SelectionComposer::new(BackStyle::Character, clock),
            prediction: Prediction::full_alphabet(),
        }
    }

    pub fn sentence(&self) -> &str {
        self.composer.sentence()
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Current prediction (selectable letters and candidate words).
    pub fn prediction(&self) -> &Prediction {
        &self.prediction
    }

    pub fn letters(&self) -> &[char] {
        &self.prediction.letters
    }

    /// Candidate words, at most `limit` of them.
    pub fn candidate_words(&self, limit: usize) -> &[String] {
        let words = &self.prediction.words;
        &words[..words.len().min(limit)]
    }

    pub fn cursor(&self) -> usize {
        self.composer.cursor()
    }

    /// Letter under the cursor.
    pub fn current_letter(&self) -> Option<char> {
        self.composer
            .clock()
            .active_cursor(self.prediction.letters.len())
            .map(|i| self.prediction.letters[i])
    }

    pub fn clock(&self) -> &ScanClock {
        self.composer.clock()
    }

    pub fn clock_mut(&mut self) -> &mut ScanClock {
        self.composer.clock_mut()
    }

    /// The scan strip for display.
    pub fn visible_cells(&self) -> Vec<Cell> {
        visible_cells(&self.prediction.letters, self.cursor())
    }

    /// Restore a sentence (e.g. from persisted state).
    pub fn set_sentence<S: Into<String>>(&mut self, sentence: S, now: Instant) {
        self.composer.set_sentence(sentence, now);
        self.refresh(now);
    }

    pub fn commit(&mut self, now: Instant) -> Option<String> {
        let text = self.composer.commit(&self.prediction, now)?;
        self.refresh(now);
        Some(text)
    }

    pub fn back(&mut self, now: Instant) -> bool {
        let changed = self.composer.back();
        if changed {
            self.refresh(now);
        }
        changed
    }

    pub fn space(&mut self, now: Instant) {
        self.composer.space(now);
        self.refresh(now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.composer.clear(now);
        self.refresh(now);
    }

    pub fn previous(&mut self, now: Instant) {
        self.composer.previous(&self.prediction, now);
    }

    /// Fire the scan clock if due. Returns true if the cursor moved.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.composer.poll(&self.prediction, now)
    }

    /// Re-derive the selectable letters after a sentence change.
    fn refresh(&mut self, now: Instant) {
        self.prediction = predict(self.composer.sentence(), &self.words);
        if self.prediction.is_dead_end() {
            tracing::debug!(sentence = %self.composer.sentence(), "no continuation, closing word");
            self.composer.space(now);
            self.prediction = predict(self.composer.sentence(), &self.words);
        }
        self.composer.clock_mut().reset(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn board(words: &[&str]) -> LetterBoard {
        LetterBoard::new(
            WordList::from_words(words.iter().copied()),
            ScanClock::new(100, true),
        )
    }

    #[test]
    fn typing_narrows_letters() {
        let now = Instant::now();
        let mut b = board(&["CAT", "CAR", "DOG"]);
        b.clock_mut().set_cursor(2, 26, now); // 'C'
        assert_eq!(b.commit(now).as_deref(), Some("C"));
        assert_eq!(b.letters(), &['A']);
        assert_eq!(b.commit(now).as_deref(), Some("A"));
        assert_eq!(b.letters(), &['T', 'R']);
        assert_eq!(b.candidate_words(20).len(), 2);
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn dead_end_appends_space() {
        let now = Instant::now();
        let mut b = board(&["CAT"]);
        b.set_sentence("CA", now);
        b.commit(now); // 'T', word complete
        assert_eq!(b.sentence(), "CAT ");
        assert_eq!(b.letters().len(), 26);
        assert_eq!(b.cursor(), 0);
    }

    #[test]
    fn empty_word_list_closes_every_word() {
        let now = Instant::now();
        let mut b = board(&[]);
        b.commit(now);
        assert_eq!(b.sentence(), "A ");
    }

    #[test]
    fn back_rederives_letters() {
        let now = Instant::now();
        let mut b = board(&["CAT", "COT"]);
        b.set_sentence("CA", now);
        assert_eq!(b.letters(), &['T']);
        assert!(b.back(now));
        assert_eq!(b.sentence(), "C");
        assert_eq!(b.letters(), &['A', 'O']);
    }

    #[test]
    fn scanning_cycles_through_letters() {
        let t0 = Instant::now();
        let mut b = board(&["CAT", "CAR"]);
        b.set_sentence("CA", t0);
        let mut seen = Vec::new();
        for i in 1..=4 {
            b.poll(t0 + Duration::from_millis(100 * i));
            seen.push(b.current_letter().unwrap());
        }
        assert_eq!(seen, vec!['R', 'T', 'R', 'T']);
    }

    #[test]
    fn candidate_words_are_capped() {
        let now = Instant::now();
        let many: Vec<String> = (0..30u8)
            .map(|i| format!("A{}{}", (b'A' + i / 26) as char, (b'A' + i % 26) as char))
            .collect();
        let mut b = LetterBoard::new(WordList::from_words(many), ScanClock::default());
        b.set_sentence("A", now);
        assert_eq!(b.candidate_words(20).len(), 20);
    }
}
