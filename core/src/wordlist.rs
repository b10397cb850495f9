//! Word list used for letter prediction.
//!
//! The word list is supplied once at startup and never changes for the
//! session. It is cheap to clone (shared storage) so every component that
//! needs it can hold its own handle.
//!
//! File format: one word per line. Lines are NFC-normalized, trimmed and
//! upper-cased; blank lines are skipped. Order and duplicates are preserved
//! because prediction results follow list order.

use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Immutable, ordered list of known words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Arc<[String]>,
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: Arc::from(Vec::new()),
        }
    }
}

impl WordList {
    /// Create an empty word list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a word list from already-prepared words, keeping them as given.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse newline-delimited text into a word list.
    pub fn parse(content: &str) -> Self {
        Self {
            words: content
                .lines()
                .map(normalize_word)
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a newline-delimited word file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let list = Self::parse(&content);
        tracing::debug!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Small built-in list for demos and smoke tests.
    pub fn load_demo() -> Self {
        Self::from_words([
            "I", "IT", "IS", "IN", "AM", "AND", "THE", "THAT", "THIS", "THANK", "THANKS", "YOU",
            "YES", "NO", "NOT", "NEED", "WANT", "WATER", "HELP", "HELLO", "HUNGRY", "HURT",
            "PLEASE", "PAIN", "TIRED", "COLD", "HOT", "LOVE", "GOOD", "BAD", "BED", "BATHROOM",
            "DRINK", "FOOD", "MORE", "STOP", "TV", "OPEN", "CLOSE", "WINDOW", "DOOR",
        ])
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over words in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.words.iter()
    }

    /// All words as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

fn normalize_word(line: &str) -> String {
    crate::utils::normalize(line).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_normalizes_and_skips_blanks() {
        let list = WordList::parse("hello\n\n  World \r\nhello\n");
        assert_eq!(list.as_slice(), ["HELLO", "WORLD", "HELLO"]);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cat").unwrap();
        writeln!(file, "car").unwrap();
        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().next().map(String::as_str), Some("CAT"));
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(WordList::load("/nonexistent/words.txt").is_err());
    }

    #[test]
    fn clones_share_storage() {
        let a = WordList::load_demo();
        let b = a.clone();
        assert_eq!(a, b);
        assert!(!b.is_empty());
    }
}
