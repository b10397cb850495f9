//! Sentence composition shared by letter and phrase scanning.
//!
//! The composer owns the sentence and the scan clock for one board. The items
//! being scanned live elsewhere and are reached through [`ScanSource`], so the
//! same commit/back/space/clear/previous logic serves letters and phrases.
//! None of the operations know which trigger (key, pointer, timer) invoked
//! them.

use crate::clock::ScanClock;
use std::time::Instant;

/// An ordered set of scan targets.
pub trait ScanSource {
    /// Number of items currently in the set.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text appended to the sentence when the item at `index` is committed.
    fn commit_text(&self, index: usize) -> Option<String>;
}

/// How `back` shortens the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackStyle {
    /// Drop the last character of the trimmed sentence.
    Character,
    /// Drop the last space-delimited word.
    Word,
}

/// Sentence plus the cursor that selects what to append next.
#[derive(Debug, Clone)]
pub struct SelectionComposer {
    sentence: String,
    back_style: BackStyle,
    clock: ScanClock,
}

impl SelectionComposer {
    pub fn new(back_style: BackStyle, clock: ScanClock) -> Self {
        Self {
            sentence: String::new(),
            back_style,
            clock,
        }
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    /// Replace the sentence wholesale (e.g. restored from the state store).
    pub fn set_sentence<S: Into<String>>(&mut self, sentence: S, now: Instant) {
        self.sentence = sentence.into();
        self.clock.reset(now);
    }

    pub fn back_style(&self) -> BackStyle {
        self.back_style
    }

    pub fn clock(&self) -> &ScanClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut ScanClock {
        &mut self.clock
    }

    pub fn cursor(&self) -> usize {
        self.clock.cursor()
    }

    /// Append the item under the cursor and restart scanning from the first item.
    ///
    /// Returns the appended text, or `None` when the source is empty.
    pub fn commit<S: ScanSource + ?Sized>(&mut self, source: &S, now: Instant) -> Option<String> {
        let index = self.clock.active_cursor(source.len())?;
        let text = source.commit_text(index)?;
        self.sentence.push_str(&text);
        self.clock.reset(now);
        tracing::debug!(index, text = %text, "committed");
        Some(text)
    }

    /// Shorten the sentence. Returns true if anything was removed.
    pub fn back(&mut self) -> bool {
        if self.sentence.is_empty() {
            return false;
        }
        let shortened = match self.back_style {
            BackStyle::Character => {
                let trimmed = self.sentence.trim();
                let mut chars = trimmed.chars();
                chars.next_back();
                chars.as_str().to_string()
            }
            BackStyle::Word => {
                let trimmed = self.sentence.trim_end();
                match trimmed.rfind(' ') {
                    // keep the separator so the next commit starts a new word
                    Some(idx) => trimmed[..=idx].to_string(),
                    None => String::new(),
                }
            }
        };
        let changed = shortened != self.sentence;
        self.sentence = shortened;
        changed
    }

    /// Append a word boundary.
    pub fn space(&mut self, now: Instant) {
        self.sentence.push(' ');
        self.clock.reset(now);
    }

    /// Empty the sentence.
    pub fn clear(&mut self, now: Instant) {
        self.sentence.clear();
        self.clock.reset(now);
    }

    /// Step the cursor back one item with wraparound.
    pub fn previous<S: ScanSource + ?Sized>(&mut self, source: &S, now: Instant) {
        self.clock.previous(source.len(), now);
    }

    /// Advance on a clock tick if one is due. Returns true if the cursor moved.
    pub fn poll<S: ScanSource + ?Sized>(&mut self, source: &S, now: Instant) -> bool {
        self.clock.poll(source.len(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Letters(Vec<char>);

    impl ScanSource for Letters {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn commit_text(&self, index: usize) -> Option<String> {
            self.0.get(index).map(|c| c.to_string())
        }
    }

    fn composer(style: BackStyle) -> SelectionComposer {
        SelectionComposer::new(style, ScanClock::new(100, true))
    }

    #[test]
    fn commit_appends_item_under_cursor_and_resets() {
        let now = Instant::now();
        let source = Letters(vec!['A', 'B', 'C']);
        let mut c = composer(BackStyle::Character);
        c.clock_mut().set_cursor(2, 3, now);

        assert_eq!(c.commit(&source, now).as_deref(), Some("C"));
        assert_eq!(c.sentence(), "C");
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn commit_on_empty_source_is_noop() {
        let now = Instant::now();
        let mut c = composer(BackStyle::Character);
        assert_eq!(c.commit(&Letters(vec![]), now), None);
        assert_eq!(c.sentence(), "");
    }

    #[test]
    fn character_back_trims_then_drops_last_char() {
        let now = Instant::now();
        let mut c = composer(BackStyle::Character);
        c.set_sentence("HI THERE ", now);
        assert!(c.back());
        assert_eq!(c.sentence(), "HI THER");
    }

    #[test]
    fn word_back_drops_last_word() {
        let now = Instant::now();
        let mut c = composer(BackStyle::Word);
        c.set_sentence("Hungry Need a Change ", now);
        assert!(c.back());
        assert_eq!(c.sentence(), "Hungry Need a ");
        assert!(c.back());
        assert_eq!(c.sentence(), "Hungry Need ");
        c.set_sentence("Pain", now);
        assert!(c.back());
        assert_eq!(c.sentence(), "");
    }

    #[test]
    fn back_on_empty_is_noop() {
        let mut c = composer(BackStyle::Word);
        assert!(!c.back());
        let mut c = composer(BackStyle::Character);
        assert!(!c.back());
        assert_eq!(c.sentence(), "");
    }

    #[test]
    fn clear_is_idempotent() {
        let now = Instant::now();
        let mut c = composer(BackStyle::Character);
        c.set_sentence("HELLO", now);
        c.clock_mut().set_cursor(3, 5, now);
        c.clear(now);
        assert_eq!((c.sentence(), c.cursor()), ("", 0));
        c.clear(now);
        assert_eq!((c.sentence(), c.cursor()), ("", 0));
    }

    #[test]
    fn space_appends_boundary_and_resets() {
        let now = Instant::now();
        let mut c = composer(BackStyle::Character);
        c.set_sentence("HI", now);
        c.clock_mut().set_cursor(1, 5, now);
        c.space(now);
        assert_eq!(c.sentence(), "HI ");
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn previous_wraps() {
        let now = Instant::now();
        let source = Letters(vec!['A', 'B', 'C']);
        let mut c = composer(BackStyle::Character);
        c.previous(&source, now);
        assert_eq!(c.cursor(), 2);
        c.previous(&Letters(vec![]), now);
        assert_eq!(c.cursor(), 2);
    }
}
