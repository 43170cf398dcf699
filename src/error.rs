use crate::types::{Position, Side};

/// Rejections raised when a board or a move crosses a trust boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },
    #[error("position ({}, {}) is not a vacancy for {side:?}", .pos.row, .pos.col)]
    NotVacant { pos: Position, side: Side },
    #[error("board must have 8 rows of 8 cells, got {0} cells")]
    BadShape(usize),
    #[error("unknown cell value {value} at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, value: i8 },
    #[error("corner mismatch at ({row}, {col})")]
    CornerMismatch { row: usize, col: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("unknown strategy {0:?} (expected random, greedy, openness or minimax)")]
    UnknownStrategy(String),
    #[error("selector for {side:?} chose an illegal move: {source}")]
    IllegalMove { side: Side, source: BoardError },
    #[error("game is already over")]
    GameOver,
    #[error("arbiter transport failed: {0}")]
    Transport(String),
}
