//! Prefix-driven letter prediction.
//!
//! Given the sentence being composed and a word list, this module derives the
//! letters that can follow the partial word at the end of the sentence, and
//! the words that partial word could still become.
//!
//! The derivation is a pure function of its inputs. Callers recompute it on
//! every sentence change instead of patching a previous result.

use crate::wordlist::WordList;
use once_cell::sync::Lazy;

/// The scanning alphabet, in scan order.
pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `LETTERS` split into individual characters.
pub static ALPHABET: Lazy<Vec<char>> = Lazy::new(|| LETTERS.chars().collect());

/// Check whether a character belongs to the scanning alphabet.
pub fn is_alphabet_letter(ch: char) -> bool {
    ch.is_ascii_uppercase()
}

/// Result of running the prefix filter over a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prediction {
    /// Selectable next letters, most frequent first.
    pub letters: Vec<char>,
    /// Word-list entries starting with the partial word, in word-list order.
    pub words: Vec<String>,
}

impl Prediction {
    /// Prediction used when no partial word is in progress.
    pub fn full_alphabet() -> Self {
        Self {
            letters: ALPHABET.clone(),
            words: Vec::new(),
        }
    }

    /// True when the partial word has no known continuation.
    pub fn is_dead_end(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Return the trailing, space-separated segment of `sentence`, trimmed.
///
/// An empty result means the sentence is empty or ends on a word boundary.
pub fn last_word(sentence: &str) -> &str {
    sentence.rsplit(' ').next().unwrap_or("").trim()
}

/// Derive the selectable letters and candidate words for `sentence`.
///
/// Letters are ranked by how many candidate words they continue. Letters with
/// equal counts keep the order in which they were first seen while walking the
/// candidate words; the order is never alphabetical.
pub fn predict(sentence: &str, words: &WordList) -> Prediction {
    let prefix = last_word(sentence);
    if prefix.is_empty() {
        return Prediction::full_alphabet();
    }

    let candidates: Vec<String> = words
        .iter()
        .filter(|w| w.starts_with(prefix))
        .cloned()
        .collect();

    // (letter, count) in first-seen order
    let mut tally: Vec<(char, usize)> = Vec::new();
    for word in &candidates {
        let Some(next) = word[prefix.len()..].chars().next() else {
            // fully typed, contributes nothing
            continue;
        };
        if let Some(entry) = tally.iter_mut().find(|(l, _)| *l == next) {
            entry.1 += 1;
        } else if is_alphabet_letter(next) {
            tally.push((next, 1));
        }
    }

    // sort_by is stable, ties keep first-seen order
    tally.sort_by(|a, b| b.1.cmp(&a.1));

    Prediction {
        letters: tally.into_iter().map(|(l, _)| l).collect(),
        words: candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> WordList {
        WordList::from_words(list.iter().copied())
    }

    #[test]
    fn empty_sentence_yields_alphabet() {
        let p = predict("", &words(&["CAT"]));
        assert_eq!(p.letters.len(), 26);
        assert_eq!(p.letters.first(), Some(&'A'));
        assert_eq!(p.letters.last(), Some(&'Z'));
        assert!(p.words.is_empty());
    }

    #[test]
    fn trailing_space_yields_alphabet() {
        let p = predict("HELLO ", &words(&["HELLO", "HELP"]));
        assert_eq!(p, Prediction::full_alphabet());
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let p = predict("CA", &words(&["CAT", "CAR"]));
        assert_eq!(p.letters, vec!['T', 'R']);
        assert_eq!(p.words, vec!["CAT".to_string(), "CAR".to_string()]);
    }

    #[test]
    fn higher_count_ranks_first() {
        let p = predict("C", &words(&["COW", "CAT", "CAR", "CUP", "CAN"]));
        assert_eq!(p.letters, vec!['A', 'O', 'U']);
    }

    #[test]
    fn candidate_words_preserve_list_order() {
        let list = words(&["TOP", "CAT", "TAP", "TO", "ATE"]);
        let p = predict("I SAW T", &list);
        assert_eq!(
            p.words,
            vec!["TOP".to_string(), "TAP".to_string(), "TO".to_string()]
        );
        assert_eq!(p.letters, vec!['O', 'A']);
    }

    #[test]
    fn fully_typed_word_contributes_no_letter() {
        let p = predict("TO", &words(&["TO", "TOP"]));
        assert_eq!(p.letters, vec!['P']);
        assert_eq!(p.words.len(), 2);
    }

    #[test]
    fn non_alphabet_continuations_are_ignored() {
        let p = predict("DON", &words(&["DON'T", "DONE"]));
        assert_eq!(p.letters, vec!['E']);
    }

    #[test]
    fn no_match_is_a_dead_end() {
        let p = predict("XQ", &words(&["CAT"]));
        assert!(p.is_dead_end());
        assert!(p.words.is_empty());
    }

    #[test]
    fn every_letter_continues_some_candidate() {
        let list = words(&["APPLE", "APPLY", "APT", "ACE", "BANANA"]);
        let sentence = "AP";
        let p = predict(sentence, &list);
        for letter in &p.letters {
            assert!(list.iter().any(|w| w.starts_with(sentence)
                && w[sentence.len()..].starts_with(*letter)));
        }
        let distinct: std::collections::HashSet<_> = p.letters.iter().collect();
        assert_eq!(distinct.len(), p.letters.len());
    }

    #[test]
    fn last_word_handles_boundaries() {
        assert_eq!(last_word(""), "");
        assert_eq!(last_word("HI "), "");
        assert_eq!(last_word("HI TH"), "TH");
        assert_eq!(last_word("SOLO"), "SOLO");
    }
}
