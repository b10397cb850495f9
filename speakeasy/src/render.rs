//! Screen layout and drawing.
//!
//! [`layout`] turns a [`ScanView`] into styled lines; [`draw`] writes them to
//! the terminal. Keeping the two apart lets the layout be tested without a tty.

use crossterm::cursor::MoveTo;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use speakeasy_core::{Mode, ScanView};
use std::io::{self, Write};

/// Row of the first phrase button (and of the letter strip).
pub const BOARD_TOP: u16 = 4;

const HELP: &str =
    "Enter select  \u{2190} back  Bksp undo  Del clear  Space space  Tab mode  +/- speed  Esc quit";

/// A run of text drawn with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub highlighted: bool,
}

impl Span {
    fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    fn lit<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// One screen row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            spans: vec![Span::plain(text)],
        }
    }

    /// Cut the line to `width` columns so it never wraps onto the next row.
    fn clip(mut self, width: usize) -> Self {
        let mut left = width;
        for span in &mut self.spans {
            let count = span.text.chars().count();
            if count > left {
                span.text = span.text.chars().take(left).collect();
            }
            left -= span.text.chars().count();
        }
        self.spans.retain(|s| !s.text.is_empty());
        self
    }

    /// Text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

fn header(view: &ScanView) -> Line {
    let mut spans = vec![Span::plain("SpeakEasy  ")];
    for mode in Mode::ALL {
        let label = format!(" {} ", mode.label());
        spans.push(if mode == view.mode {
            Span::lit(label)
        } else {
            Span::plain(label)
        });
    }
    let speed = if view.playing {
        format!("   {:.1}s per step", view.interval_ms as f64 / 1000.0)
    } else {
        "   paused".to_string()
    };
    spans.push(Span::plain(speed));
    Line { spans }
}

/// Sentence row, keeping the end of the sentence when it is too long.
fn sentence_line(sentence: &str, width: usize) -> Line {
    let room = width.saturating_sub(3);
    let count = sentence.chars().count();
    let tail: String = sentence.chars().skip(count.saturating_sub(room)).collect();
    Line::plain(format!("> {tail}_"))
}

/// Lay out the whole screen for a terminal `width` columns wide.
///
/// Every line fits in one row, so row numbers match [`phrase_at`].
pub fn layout(view: &ScanView, width: u16) -> Vec<Line> {
    let width = usize::from(width);
    let mut lines = vec![
        header(view),
        Line::default(),
        sentence_line(&view.sentence, width),
        Line::default(),
    ];

    match view.mode {
        Mode::Letters => {
            let spans = view
                .visible_cells
                .iter()
                .map(|cell| {
                    let text = format!(" {} ", cell.ch);
                    if cell.highlighted {
                        Span::lit(text)
                    } else {
                        Span::plain(text)
                    }
                })
                .collect();
            lines.push(Line { spans });
            lines.push(Line::default());
            lines.push(Line::plain(view.candidate_words.join("  ")));
        }
        Mode::Phrases => {
            if view.phrases.is_empty() {
                lines.push(Line::plain("(no phrases, Ctrl+D restores the defaults)"));
            }
            for phrase in &view.phrases {
                let text = format!(" {} ", phrase.text);
                lines.push(Line {
                    spans: vec![if phrase.highlighted {
                        Span::lit(text)
                    } else {
                        Span::plain(text)
                    }],
                });
            }
        }
        Mode::Typing => {
            lines.push(Line::plain("Type freely. Tab returns to scanning."));
        }
    }

    lines.push(Line::default());
    lines.push(Line::plain(HELP));
    lines.into_iter().map(|line| line.clip(width)).collect()
}

/// Index of the phrase button drawn on `row`, if any.
pub fn phrase_at(view: &ScanView, row: u16) -> Option<usize> {
    if view.mode != Mode::Phrases || row < BOARD_TOP {
        return None;
    }
    let index = usize::from(row - BOARD_TOP);
    (index < view.phrases.len()).then_some(index)
}

/// Write `lines` to the terminal from the top-left corner.
pub fn draw<W: Write>(out: &mut W, lines: &[Line]) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        queue!(out, MoveTo(0, row as u16))?;
        for span in &line.spans {
            if span.highlighted {
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(&span.text),
                    SetAttribute(Attribute::Reset)
                )?;
            } else {
                queue!(out, Print(&span.text))?;
            }
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakeasy_core::{visible_cells, PhraseCell};

    fn phrase_view() -> ScanView {
        ScanView {
            mode: Mode::Phrases,
            phrases: vec![
                PhraseCell {
                    text: "Hungry".into(),
                    highlighted: false,
                },
                PhraseCell {
                    text: "Pain".into(),
                    highlighted: true,
                },
            ],
            sentence: "Thirsty ".into(),
            playing: true,
            interval_ms: 1500,
            ..ScanView::default()
        }
    }

    #[test]
    fn phrases_are_one_per_row() {
        let view = phrase_view();
        let lines = layout(&view, 80);
        assert_eq!(lines[BOARD_TOP as usize].text(), " Hungry ");
        assert!(lines[BOARD_TOP as usize + 1].spans[0].highlighted);
        assert_eq!(lines[2].text(), "> Thirsty _");
        assert!(lines[0].text().ends_with("1.5s per step"));
    }

    #[test]
    fn long_sentence_stays_on_one_row() {
        let mut view = phrase_view();
        view.sentence = "Need a Change ".repeat(10);
        let lines = layout(&view, 20);
        assert_eq!(lines[2].text(), "> ge Need a Change _");
        assert!(lines.iter().all(|l| l.text().chars().count() <= 20));
        assert_eq!(lines[BOARD_TOP as usize].text(), " Hungry ");
        assert_eq!(phrase_at(&view, BOARD_TOP + 1), Some(1));
    }

    #[test]
    fn rows_map_back_to_phrases() {
        let view = phrase_view();
        assert_eq!(phrase_at(&view, BOARD_TOP - 1), None);
        assert_eq!(phrase_at(&view, BOARD_TOP), Some(0));
        assert_eq!(phrase_at(&view, BOARD_TOP + 1), Some(1));
        assert_eq!(phrase_at(&view, BOARD_TOP + 2), None);
    }

    #[test]
    fn letter_strip_marks_cursor() {
        let view = ScanView {
            mode: Mode::Letters,
            visible_cells: visible_cells(&['T', 'R'], 0),
            candidate_words: vec!["CAT".into(), "CAR".into()],
            ..ScanView::default()
        };
        let lines = layout(&view, 80);
        let strip = &lines[BOARD_TOP as usize];
        assert_eq!(strip.spans.len(), 7);
        let lit: Vec<&str> = strip
            .spans
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(lit, vec![" T "]);
        assert_eq!(lines[BOARD_TOP as usize + 2].text(), "CAT  CAR");
        assert!(lines[0].text().ends_with("paused"));
        assert_eq!(phrase_at(&view, BOARD_TOP), None);
    }

    #[test]
    fn draw_writes_highlight_escapes() {
        let mut out = Vec::new();
        draw(&mut out, &layout(&phrase_view(), 80)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Pain"));
        assert!(text.contains("\u{1b}[7m"));
    }
}
