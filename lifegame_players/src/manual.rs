// Human-driven placement from a text terminal.
//
// Each prompt renders the mirror board and asks for `row col` (space or comma
// separated). Input that does not parse, lies outside the board or names an
// occupied cell gets an explanation and another prompt. End of input is
// `StrategyError::InputClosed`.
//
// Input and output are generic so tests can script a session; the binary
// passes the locked stdin and stdout.

use std::io::{BufRead, Write};

use lifegame_engine::{Field, Strategy, StrategyError};
use lifegame_protocol::{Cell, Player, Pos};

use crate::display::render_board;

pub const MANUAL_NAME: &str = "manual-lifegame-player";

pub struct Manual<R, W> {
    name: String,
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Manual<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            name: MANUAL_NAME.into(),
            input,
            output,
            color: false,
        }
    }

    /// Use ANSI colors when rendering the board.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse "row col" or "row,col".
fn parse_pos(line: &str) -> Option<Pos> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Pos::new(row, col))
}

impl<R: BufRead, W: Write> Strategy for Manual<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_placement(&mut self, board: &Field, me: Player) -> Result<Pos, StrategyError> {
        writeln!(self.output, "\nCurrent board (you are {me})")?;
        write!(self.output, "{}", render_board(board, self.color))?;
        loop {
            write!(
                self.output,
                "row col in [0, {}] x [0, {}]> ",
                board.height().saturating_sub(1),
                board.width().saturating_sub(1)
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(StrategyError::InputClosed);
            }
            match parse_pos(&line) {
                None => writeln!(self.output, "Please enter two integers, e.g. `2 3`.")?,
                Some(pos) => match board.get(pos) {
                    None => writeln!(self.output, "{pos} is outside the board.")?,
                    Some(Cell::Empty) => return Ok(pos),
                    Some(_) => writeln!(self.output, "{pos} is already occupied.")?,
                },
            }
        }
    }
}
