//! End-to-end scanning sessions driven through the engine
//!
//! Time is simulated by handing explicit instants to `poll`, the way the
//! terminal front-end does with the real clock.

use speakeasy_core::{
    Config, KeyEvent, KeyResult, Mode, ScanEngine, StateStore, WordList, WINDOW_SIZE,
};
use std::time::{Duration, Instant};

fn engine(words: &[&str], mode: Mode, now: Instant) -> ScanEngine {
    let mut store = StateStore::in_memory();
    store.update(|s| {
        s.mode = mode;
        s.speed = 1.0;
    });
    ScanEngine::new(
        WordList::from_words(words.iter().copied()),
        store,
        Config::default(),
        now,
    )
}

/// Wait (poll) until the highlighted item equals `target`, then press Enter.
fn select(e: &mut ScanEngine, target: &str, now: &mut Instant) {
    for _ in 0..64 {
        if e.view().highlighted().as_deref() == Some(target) {
            e.process_key(KeyEvent::Enter, *now);
            return;
        }
        *now = e.next_deadline().expect("clock should be running");
        e.poll(*now);
    }
    panic!("{target} never highlighted");
}

#[test]
fn test_spelling_a_word_by_waiting() {
    let mut now = Instant::now();
    let mut e = engine(&["HELLO", "HELP", "WATER"], Mode::Letters, now);

    select(&mut e, "H", &mut now);
    assert_eq!(e.view().candidate_words, vec!["HELLO", "HELP"]);
    assert_eq!(e.letters().letters(), &['E']);

    select(&mut e, "E", &mut now);
    select(&mut e, "L", &mut now);
    select(&mut e, "P", &mut now);
    // HELP has no continuation, so the word closes itself
    assert_eq!(e.sentence(), "HELP ");
    assert_eq!(e.letters().letters().len(), 26);
    assert_eq!(e.state().letter_sentence, "HELP ");
}

#[test]
fn test_strip_is_always_full_width() {
    let mut now = Instant::now();
    let mut e = engine(&["CAT", "CAR", "COT"], Mode::Letters, now);
    for _ in 0..30 {
        assert_eq!(e.view().visible_cells.len(), WINDOW_SIZE);
        now += Duration::from_secs(1);
        e.poll(now);
    }
    select(&mut e, "C", &mut now);
    assert_eq!(e.view().strip().trim(), "OA");
    assert_eq!(e.view().visible_cells.len(), WINDOW_SIZE);
}

#[test]
fn test_phrase_session_with_edits() {
    let mut now = Instant::now();
    let mut e = engine(&[], Mode::Phrases, now);

    select(&mut e, "Pain", &mut now);
    select(&mut e, "Medicine", &mut now);
    assert_eq!(e.sentence(), "Pain Medicine ");

    e.process_key(KeyEvent::Backspace, now);
    assert_eq!(e.sentence(), "Pain ");

    e.process_key(KeyEvent::Delete, now);
    assert_eq!(e.sentence(), "");
    assert_eq!(e.phrases().cursor(), 0);

    assert!(e.add_phrase("Open the window"));
    select(&mut e, "Open the window", &mut now);
    assert_eq!(e.sentence(), "Open the window ");
}

#[test]
fn test_hover_holds_the_scan() {
    let now = Instant::now();
    let mut e = engine(&[], Mode::Phrases, now);

    e.focus_phrase(3, now);
    assert_eq!(e.view().highlighted().as_deref(), Some("Tired"));
    assert_eq!(e.next_deadline(), None);
    assert!(!e.poll(now + Duration::from_secs(30)));

    let later = now + Duration::from_secs(30);
    e.pointer_press(later);
    assert_eq!(e.sentence(), "Tired ");
    assert_eq!(e.view().highlighted().as_deref(), Some("Tired"));

    // still hovering, so a second click repeats the phrase
    e.pointer_press(later);
    assert_eq!(e.sentence(), "Tired Tired ");
    assert_eq!(e.phrases().focused(), Some(3));
    assert_eq!(e.next_deadline(), None);

    e.blur_phrase(later);
    assert_eq!(e.next_deadline(), Some(later + Duration::from_secs(1)));
}

#[test]
fn test_mode_cycle_and_typing() {
    let now = Instant::now();
    let mut e = engine(&[], Mode::Phrases, now);

    e.cycle_mode(now);
    assert_eq!(e.mode(), Mode::Letters);
    e.cycle_mode(now);
    assert_eq!(e.mode(), Mode::Typing);

    for ch in "ok".chars() {
        assert_eq!(e.process_key(KeyEvent::Char(ch), now), KeyResult::Handled);
    }
    assert_eq!(e.view().sentence, "ok");

    e.cycle_mode(now);
    assert_eq!(e.mode(), Mode::Phrases);
    assert_eq!(e.state().typed_sentence, "ok");
    assert!(e.next_deadline().is_some());
}

#[test]
fn test_removing_highlighted_phrase_keeps_scan_valid() {
    let mut now = Instant::now();
    let mut e = engine(&[], Mode::Phrases, now);

    // walk to the last phrase
    for _ in 0..10 {
        now = e.next_deadline().unwrap();
        e.poll(now);
    }
    assert_eq!(e.view().highlighted().as_deref(), Some("You"));

    assert_eq!(e.remove_phrase("You", now), 1);
    assert_eq!(e.view().highlighted().as_deref(), Some("Love"));

    now = e.next_deadline().unwrap();
    e.poll(now);
    assert_eq!(e.view().highlighted().as_deref(), Some("Thirsty"));
}
