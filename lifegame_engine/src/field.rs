// Dense 2D grid and the two-player Life rule.
//
// The field is stored as a flat `Vec<Cell>` indexed by `row * width + col`,
// giving O(1) bounds-checked access. Dimensions are fixed at construction.
//
// One generation (`next_generation`) looks at the Moore neighborhood of every
// cell in the *previous* grid. Neighbors beyond the edge are absent, not
// wrapped. A living neighbor is any owned cell, regardless of owner:
// - an owned cell keeps its owner with 2 or 3 living neighbors, else dies;
// - an empty cell with exactly 3 living neighbors is born, owned by the
//   player holding the strict majority of those neighbors (a tie stays
//   empty, although 3 neighbors split between two owners cannot tie);
// - every other empty cell stays empty.
// The new grid replaces the old one in a single assignment.
//
// `next_generation_into` writes the successor into a caller-owned field so
// search strategies can step thousands of hypothetical boards without
// allocating (see `evaluate.rs`).
//
// See also: `control.rs`, the only owner of the authoritative field.

use lifegame_protocol::{Board, Cell, CellCounts, Pos};

use derive_more::{Display, Error};

/// Offsets of the 8 Moore neighbors.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Largest accepted board side. Keeps a full board observation well inside
/// the framing layer's line limit.
pub const MAX_DIMENSION: usize = 128;

/// Board dimensions or a snapshot that cannot be loaded into a `Field`.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum BoardError {
    #[display("board has no cells")]
    Empty,
    #[display("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("board sides are limited to {MAX_DIMENSION}, got {height}x{width}")]
    TooLarge { height: usize, width: usize },
    #[display("board is {found_height}x{found_width}, expected {height}x{width}")]
    Mismatch {
        height: usize,
        width: usize,
        found_height: usize,
        found_width: usize,
    },
}

/// Rectangular game board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    /// Flat storage: index = row * width + col.
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Field {
    /// Create a new field with every cell empty.
    ///
    /// Panics if `height * width` overflows. Dimensions received from a peer
    /// go through `try_new`.
    pub fn new(height: usize, width: usize) -> Self {
        let Some(len) = height.checked_mul(width) else {
            panic!("field dimensions {height}x{width} overflow");
        };
        Self {
            cells: vec![Cell::Empty; len],
            height,
            width,
        }
    }

    /// Empty field with both sides in `1..=MAX_DIMENSION`.
    pub fn try_new(height: usize, width: usize) -> Result<Self, BoardError> {
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        if height > MAX_DIMENSION || width > MAX_DIMENSION {
            return Err(BoardError::TooLarge { height, width });
        }
        Ok(Self::new(height, width))
    }

    /// Build a field from a wire snapshot. Every row must have the same
    /// non-zero length.
    pub fn from_board(board: &Board) -> Result<Self, BoardError> {
        let height = board.len();
        let width = board.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        let mut cells = Vec::with_capacity(height * width);
        for (row, line) in board.iter().enumerate() {
            if line.len() != width {
                return Err(BoardError::Ragged {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            cells.extend_from_slice(line);
        }
        Ok(Self {
            cells,
            height,
            width,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Flat index of `pos`, or `None` if out of bounds.
    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    /// Read a cell. `None` for out-of-bounds coordinates.
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Occupy an empty cell. Returns `false`, leaving the field untouched, if
    /// `pos` is out of bounds, already occupied, or `owner` is `Empty`.
    pub fn place(&mut self, owner: Cell, pos: Pos) -> bool {
        if !owner.is_alive() {
            return false;
        }
        match self.index(pos) {
            Some(i) if self.cells[i] == Cell::Empty => {
                self.cells[i] = owner;
                true
            }
            _ => false,
        }
    }

    /// Reset a cell to empty and return what it held.
    ///
    /// Undo for hypothetical placements made by search strategies on their
    /// own copies. The game controller never calls this.
    pub fn retract(&mut self, pos: Pos) -> Option<Cell> {
        let i = self.index(pos)?;
        Some(std::mem::take(&mut self.cells[i]))
    }

    /// Overwrite this field with `other`, reusing the existing allocation.
    pub fn copy_from(&mut self, other: &Field) {
        self.cells.clear();
        self.cells.extend_from_slice(&other.cells);
        self.height = other.height;
        self.width = other.width;
    }

    /// Living neighbors of the cell at flat index `i`, as
    /// `(player1_count, player2_count)`.
    fn neighbor_counts(&self, i: usize) -> (u8, u8) {
        let row = (i / self.width) as i32;
        let col = (i % self.width) as i32;
        let mut counts = (0u8, 0u8);
        for (dr, dc) in NEIGHBOR_OFFSETS {
            match self.get(Pos::new(row + dr, col + dc)) {
                Some(Cell::Player1) => counts.0 += 1,
                Some(Cell::Player2) => counts.1 += 1,
                _ => {}
            }
        }
        counts
    }

    fn successor(&self, i: usize) -> Cell {
        let (p1, p2) = self.neighbor_counts(i);
        next_state(self.cells[i], p1, p2)
    }

    /// Advance one generation in place.
    pub fn next_generation(&mut self) {
        let next: Vec<Cell> = (0..self.cells.len()).map(|i| self.successor(i)).collect();
        self.cells = next;
    }

    /// Write the next generation into `out`, which is resized to match.
    pub fn next_generation_into(&self, out: &mut Field) {
        out.height = self.height;
        out.width = self.width;
        out.cells.clear();
        out.cells
            .extend((0..self.cells.len()).map(|i| self.successor(i)));
    }

    /// Advance `generations` generations.
    pub fn advance(&mut self, generations: u32) {
        for _ in 0..generations {
            self.next_generation();
        }
    }

    /// Number of cells currently equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// Live cells per player.
    pub fn counts(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for cell in &self.cells {
            match cell {
                Cell::Player1 => counts.player1 += 1,
                Cell::Player2 => counts.player2 += 1,
                Cell::Empty => {}
            }
        }
        counts
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Independent row-major copy of the grid.
    pub fn get_board_state(&self) -> Board {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells.chunks(self.width).map(<[Cell]>::to_vec).collect()
    }

    /// Empty cells in scanline order (row by row, left to right).
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(move |(i, _)| Pos::new((i / width) as i32, (i % width) as i32))
    }
}

/// The transition rule for one cell, given its current state and how many of
/// its neighbors each player owns.
pub fn next_state(current: Cell, player1_neighbors: u8, player2_neighbors: u8) -> Cell {
    let alive = player1_neighbors + player2_neighbors;
    if current.is_alive() {
        if (2..=3).contains(&alive) {
            current
        } else {
            Cell::Empty
        }
    } else if alive == 3 {
        match player1_neighbors.cmp(&player2_neighbors) {
            std::cmp::Ordering::Greater => Cell::Player1,
            std::cmp::Ordering::Less => Cell::Player2,
            std::cmp::Ordering::Equal => Cell::Empty,
        }
    } else {
        Cell::Empty
    }
}
