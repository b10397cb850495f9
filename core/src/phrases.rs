//! Phrase scanning board.
//!
//! Scans a user-editable list of whole phrases. Committing appends the phrase
//! and a trailing space; `back` removes whole words. Hovering (focusing) a
//! phrase moves the cursor onto it and holds the clock until focus is lost.

use crate::clock::ScanClock;
use crate::composer::{BackStyle, ScanSource, SelectionComposer};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Phrases a fresh install starts with.
pub const SEED_PHRASES: [&str; 11] = [
    "Thirsty",
    "Hungry",
    "Pain",
    "Tired",
    "Medicine",
    "Dirty",
    "Need a Change",
    "Dry Mouth",
    "Get up",
    "Love",
    "You",
];

/// Ordered list of phrases. Append and remove are the only mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseSet {
    phrases: Vec<String>,
}

impl PhraseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default phrase list.
    pub fn seeded() -> Self {
        Self::from_vec(SEED_PHRASES.iter().map(|p| p.to_string()).collect())
    }

    pub fn from_vec(phrases: Vec<String>) -> Self {
        Self { phrases }
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.phrases.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.phrases.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.phrases
    }

    /// Append a phrase. Duplicates are allowed.
    pub fn push<S: Into<String>>(&mut self, phrase: S) {
        self.phrases.push(phrase.into());
    }

    /// Remove every entry equal to `phrase`, returning their former indices.
    pub fn remove_all(&mut self, phrase: &str) -> Vec<usize> {
        let removed: Vec<usize> = self
            .phrases
            .iter()
            .enumerate()
            .filter(|(_, p)| p.as_str() == phrase)
            .map(|(i, _)| i)
            .collect();
        self.phrases.retain(|p| p != phrase);
        removed
    }
}

impl ScanSource for PhraseSet {
    fn len(&self) -> usize {
        self.phrases.len()
    }

    fn commit_text(&self, index: usize) -> Option<String> {
        self.phrases.get(index).map(|p| format!("{p} "))
    }
}

/// A phrase as displayed, with its highlight state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCell {
    pub text: String,
    pub highlighted: bool,
}

/// Phrase-by-phrase composition.
#[derive(Debug, Clone)]
pub struct PhraseScanner {
    phrases: PhraseSet,
    composer: SelectionComposer,
    /// Index under the pointer, if any
    focused: Option<usize>,
}

impl PhraseScanner {
    pub fn new(phrases: PhraseSet, clock: ScanClock) -> Self {
        Self {
            phrases,
            composer: SelectionComposer::new(BackStyle::Word, clock),
            focused: None,
        }
    }

    pub fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    /// Replace the phrase list (e.g. after the state store changed).
    pub fn set_phrases(&mut self, phrases: PhraseSet, now: Instant) {
        self.phrases = phrases;
        let cursor = self.composer.cursor();
        self.composer
            .clock_mut()
            .set_cursor(cursor, self.phrases.len(), now);
        self.drop_focus(now);
    }

    pub fn sentence(&self) -> &str {
        self.composer.sentence()
    }

    pub fn set_sentence<S: Into<String>>(&mut self, sentence: S, now: Instant) {
        self.composer.set_sentence(sentence, now);
    }

    pub fn cursor(&self) -> usize {
        self.composer.cursor()
    }

    pub fn clock(&self) -> &ScanClock {
        self.composer.clock()
    }

    pub fn clock_mut(&mut self) -> &mut ScanClock {
        self.composer.clock_mut()
    }

    /// Phrase under the cursor, `None` when the list is empty.
    pub fn current_phrase(&self) -> Option<&str> {
        self.composer
            .clock()
            .active_cursor(self.phrases.len())
            .and_then(|i| self.phrases.get(i))
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Append a phrase to the list. Blank input is ignored.
    pub fn add_phrase(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.phrases.push(text);
        true
    }

    /// Remove every phrase equal to `text`. Returns the number removed.
    ///
    /// The cursor follows the phrase it was on when an earlier entry goes
    /// away, and is clamped into the shorter list.
    pub fn remove_phrase(&mut self, text: &str, now: Instant) -> usize {
        let removed = self.phrases.remove_all(text);
        if removed.is_empty() {
            return 0;
        }
        let cursor = self.composer.cursor();
        let before = removed.iter().filter(|&&i| i < cursor).count();
        self.composer
            .clock_mut()
            .set_cursor(cursor - before, self.phrases.len(), now);
        self.drop_focus(now);
        removed.len()
    }

    /// Pointer entered the phrase at `index`: select it and hold the scan.
    pub fn focus(&mut self, index: usize, now: Instant) {
        if index >= self.phrases.len() {
            return;
        }
        self.focused = Some(index);
        let clock = self.composer.clock_mut();
        clock.set_cursor(index, self.phrases.len(), now);
        clock.hold(now);
    }

    /// Pointer left: resume scanning from where the cursor is.
    pub fn blur(&mut self, now: Instant) {
        self.drop_focus(now);
    }

    fn drop_focus(&mut self, now: Instant) {
        if self.focused.take().is_some() || self.composer.clock().is_held() {
            self.composer.clock_mut().release(now);
        }
    }

    /// Append the current phrase. A hovered phrase keeps the cursor on it.
    pub fn commit(&mut self, now: Instant) -> Option<String> {
        let text = self.composer.commit(&self.phrases, now)?;
        if let Some(index) = self.focused {
            self.composer
                .clock_mut()
                .set_cursor(index, self.phrases.len(), now);
        }
        Some(text)
    }

    pub fn back(&mut self) -> bool {
        self.composer.back()
    }

    pub fn space(&mut self, now: Instant) {
        self.composer.space(now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.composer.clear(now);
    }

    pub fn previous(&mut self, now: Instant) {
        self.composer.previous(&self.phrases, now);
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.composer.poll(&self.phrases, now)
    }

    /// Every phrase with its highlight. Duplicates of the current phrase
    /// are highlighted too.
    pub fn cells(&self) -> Vec<PhraseCell> {
        let current = self.current_phrase();
        self.phrases
            .iter()
            .map(|p| PhraseCell {
                text: p.clone(),
                highlighted: Some(p.as_str()) == current,
            })
            .collect()
    }
}
