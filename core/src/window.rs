//! Fixed-width scan strip centered on the cursor.
//!
//! The strip always has [`WINDOW_SIZE`] cells. The cursor sits
//! [`LOOK_BEHIND`] cells from the left edge and the selectable set wraps
//! around at both ends. Sets shorter than the strip are centered with blank
//! padding so the strip width never changes.

/// Number of cells in the strip.
pub const WINDOW_SIZE: usize = 7;

/// Items shown before the cursor.
pub const LOOK_BEHIND: usize = 3;

/// One cell of the scan strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub highlighted: bool,
}

impl Cell {
    fn blank() -> Self {
        Self {
            ch: ' ',
            highlighted: false,
        }
    }
}

/// Compute the visible strip for `set` with the cursor at `cursor`.
///
/// A cell is highlighted when its letter equals the letter under the cursor.
/// A set small enough to show the same letter twice can highlight more than
/// one cell. An empty set yields a blank strip.
pub fn visible_cells(set: &[char], cursor: usize) -> Vec<Cell> {
    let len = set.len();
    if len == 0 {
        return vec![Cell::blank(); WINDOW_SIZE];
    }
    let cursor = cursor.min(len - 1);
    let current = set[cursor];
    let size = WINDOW_SIZE.min(len);

    // cursor + x - LOOK_BEHIND + len, kept non-negative for any len
    let letters = (0..size).map(|x| {
        let back = LOOK_BEHIND % len;
        set[(cursor + x + len - back) % len]
    });

    let deficit = WINDOW_SIZE - size;
    let left = deficit / 2;

    let mut cells = Vec::with_capacity(WINDOW_SIZE);
    cells.extend(std::iter::repeat(Cell::blank()).take(left));
    cells.extend(letters.map(|ch| Cell {
        ch,
        highlighted: ch == current,
    }));
    cells.resize(WINDOW_SIZE, Cell::blank());
    cells
}

/// Render cells as a plain string of exactly `WINDOW_SIZE` characters.
pub fn strip_text(cells: &[Cell]) -> String {
    cells.iter().map(|c| c.ch).collect()
}
