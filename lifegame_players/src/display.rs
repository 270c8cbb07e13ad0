// Text rendering of boards for terminals.
//
// Used by the manual strategy's prompt and by the player binary's end-of-game
// summary. Layout is a grid with row and column indices:
//
//     | 0 | 1 | 2 |
//   0 | . | 1 | . |
//   1 | . | . | 2 |
//
// With `color` set, Player 1 cells are red and Player 2 cells blue (ANSI).

use std::fmt::Write;

use lifegame_engine::Field;
use lifegame_protocol::{Cell, CellCounts, Pos};

const RED: &str = "\x1b[91m";
const BLUE: &str = "\x1b[94m";
const RESET: &str = "\x1b[0m";

fn glyph(cell: Cell, color: bool) -> String {
    match (cell, color) {
        (Cell::Empty, _) => ".".into(),
        (Cell::Player1, false) => "1".into(),
        (Cell::Player2, false) => "2".into(),
        (Cell::Player1, true) => format!("{RED}1{RESET}"),
        (Cell::Player2, true) => format!("{BLUE}2{RESET}"),
    }
}

/// Render `field` as an indexed grid, one line per row plus a header.
pub fn render_board(field: &Field, color: bool) -> String {
    let label_width = field.height().saturating_sub(1).to_string().len();
    let cell_width = field.width().saturating_sub(1).to_string().len();
    let mut out = String::new();

    let _ = write!(out, "{:label_width$} |", "");
    for col in 0..field.width() {
        let _ = write!(out, " {col:>cell_width$} |");
    }
    out.push('\n');

    for row in 0..field.height() {
        let _ = write!(out, "{row:>label_width$} |");
        for col in 0..field.width() {
            let cell = field
                .get(Pos::new(row as i32, col as i32))
                .unwrap_or_default();
            let _ = write!(out, " {:>pad$}{} |", "", glyph(cell, color), pad = cell_width - 1);
        }
        out.push('\n');
    }
    out
}

/// "Player 1: n cells, Player 2: m cells"
pub fn count_line(counts: CellCounts) -> String {
    format!(
        "Player 1: {} cells, Player 2: {} cells",
        counts.player1, counts.player2
    )
}
