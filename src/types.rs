use serde::Serialize;

pub const BOARD_SIZE: usize = 8;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns `None` when the coordinate falls off the board.
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        let range = 0..BOARD_SIZE as i32;
        if range.contains(&row) && range.contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn is_corner(self) -> bool {
        let last = BOARD_SIZE as u8 - 1;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    /// True for the 6x6 block that excludes the outer ring.
    pub fn is_interior(self) -> bool {
        let last = BOARD_SIZE as u8 - 1;
        (1..last).contains(&self.row) && (1..last).contains(&self.col)
    }
}

/// The side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn from_is_black(is_black: bool) -> Self {
        if is_black { Side::Black } else { Side::White }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

/// State of one square.
///
/// Wire values: 0=empty, 1=black, 2=white, -1=corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
    Corner,
}

impl Cell {
    pub fn from_wire(value: i8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            -1 => Some(Cell::Corner),
            _ => None,
        }
    }

    pub fn to_wire(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
            Cell::Corner => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Draw,
}

/// Public game state returned from the game runner and WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Row-major wire encoding.
    pub board: Vec<i8>,
    pub side_to_move: Side,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: positions flipped by that move.
    /// - Pass: must be an empty list.
    pub flipped: Vec<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: Winner,
    pub black_count: u8,
    pub white_count: u8,
}
