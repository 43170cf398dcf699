use std::fmt;

use crate::error::BoardError;
use crate::types::{BOARD_SIZE, Cell, Position, Side, Winner};

const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub(crate) const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Board state with the four corners blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board: every square empty except the four corners.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for pos in all_positions().filter(|pos| pos.is_corner()) {
            cells[pos.row as usize][pos.col as usize] = Cell::Corner;
        }
        Self { cells }
    }

    /// Builds a board from the arbiter's `board[row][col]` encoding.
    pub fn from_rows<R: AsRef<[i8]>>(rows: &[R]) -> Result<Self, BoardError> {
        let total = rows.iter().map(|row| row.as_ref().len()).sum();
        if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.as_ref().len() != BOARD_SIZE) {
            return Err(BoardError::BadShape(total));
        }

        let flat: Vec<i8> = rows.iter().flat_map(|row| row.as_ref().iter().copied()).collect();
        Self::from_flat(&flat)
    }

    /// Builds a board from a row-major run of 64 wire values.
    pub fn from_flat(values: &[i8]) -> Result<Self, BoardError> {
        if values.len() != NUM_SQUARES {
            return Err(BoardError::BadShape(values.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (idx, &value) in values.iter().enumerate() {
            let (row, col) = (idx / BOARD_SIZE, idx % BOARD_SIZE);
            let cell = Cell::from_wire(value).ok_or(BoardError::UnknownCell { row, col, value })?;
            let corner = Position::new(row as u8, col as u8).is_corner();
            if corner != (cell == Cell::Corner) {
                return Err(BoardError::CornerMismatch { row, col });
            }
            cells[row][col] = cell;
        }
        Ok(Self { cells })
    }

    /// Row-major wire encoding.
    pub fn to_flat(&self) -> [i8; NUM_SQUARES] {
        let mut out = [0i8; NUM_SQUARES];
        for (value, pos) in out.iter_mut().zip(all_positions()) {
            *value = self.get(pos).to_wire();
        }
        out
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(!pos.is_corner(), "corners never change");
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        let mut black = 0;
        let mut white = 0;
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::Black => black += 1,
                Cell::White => white += 1,
                Cell::Empty | Cell::Corner => {}
            }
        }
        (black, white)
    }

    pub fn side_score(&self, side: Side) -> u8 {
        let (black, white) = self.score();
        match side {
            Side::Black => black,
            Side::White => white,
        }
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        self.cells.iter().flatten().filter(|&&cell| cell == Cell::Empty).count() as u8
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Full board, or neither side has a vacancy.
    pub fn is_terminal(&self) -> bool {
        self.is_full()
            || (self.vacancies(Side::Black).is_empty() && self.vacancies(Side::White).is_empty())
    }

    /// Pure score comparison, meaningful at any point of the game.
    pub fn winner(&self) -> Winner {
        let (black, white) = self.score();
        if black > white {
            Winner::Black
        } else if white > black {
            Winner::White
        } else {
            Winner::Draw
        }
    }

    /// Opponent stones that `side` would capture by playing `pos`.
    ///
    /// With `short_circuit` the walk stops after the first direction that captures
    /// anything, which is all a legality test needs.
    pub fn captured_runs(&self, pos: Position, side: Side, short_circuit: bool) -> Vec<Position> {
        let me = side.cell();
        let opp = side.opposite().cell();
        let mut flips = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut r = pos.row as i32 + dr;
            let mut c = pos.col as i32 + dc;
            let mut line = Vec::new();

            while let Some(square) = Position::checked(r, c) {
                let cell = self.get(square);
                if cell == opp {
                    line.push(square);
                } else {
                    if cell == me && !line.is_empty() {
                        flips.append(&mut line);
                        if short_circuit {
                            return flips;
                        }
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }

    /// Squares `side` may play, in row-major order.
    ///
    /// Every empty interior square counts, capture or not. Edge squares need a capture.
    pub fn vacancies(&self, side: Side) -> Vec<Position> {
        all_positions().filter(|&pos| self.is_vacancy(pos, side)).collect()
    }

    pub fn is_vacancy(&self, pos: Position, side: Side) -> bool {
        self.get(pos) == Cell::Empty
            && (pos.is_interior() || !self.captured_runs(pos, side, true).is_empty())
    }

    /// Places one stone and flips captured stones.
    /// Returns the flipped positions.
    pub fn apply(&mut self, pos: Position, side: Side) -> Vec<Position> {
        debug_assert_eq!(self.get(pos), Cell::Empty, "apply() requires an empty square");

        self.set(pos, side.cell());
        let flips = self.captured_runs(pos, side, false);
        for &square in &flips {
            self.set(square, side.cell());
        }
        flips
    }

    /// Same as [`Board::apply`] on a copy; `self` is left untouched.
    pub fn try_apply(&self, pos: Position, side: Side) -> (Board, Vec<Position>) {
        let mut next = *self;
        let flips = next.apply(pos, side);
        (next, flips)
    }

    /// Checked [`Board::apply`] for moves coming from outside the engine.
    pub fn play(&mut self, pos: Position, side: Side) -> Result<Vec<Position>, BoardError> {
        if Position::checked(pos.row as i32, pos.col as i32).is_none() {
            return Err(BoardError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            });
        }
        if !self.is_vacancy(pos, side) {
            return Err(BoardError::NotVacant { pos, side });
        }
        Ok(self.apply(pos, side))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                    Cell::Corner => '#',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Every square in row-major order.
pub fn all_positions() -> impl Iterator<Item = Position> {
    let size = BOARD_SIZE as u8;
    (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
}
