use rand::RngCore;

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::types::{Position, Side};

/// Plies searched below the root move.
pub const SEARCH_DEPTH: u8 = 2;
const MAX_TARGET: u8 = 0;
const MIN_TARGET: u8 = 100;

/// Fixed-depth minimax scored by Black's stone count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimaxSelector {
    depth: u8,
}

impl MinimaxSelector {
    pub fn new(depth: u8) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Searches the best move.
    ///
    /// Ties keep the earliest vacancy, and a move is only taken when its score
    /// beats 0, so a side whose every line ends with Black wiped out passes.
    pub fn search(&self, board: &Board, side: Side) -> Option<Position> {
        let mut best_move = None;
        let mut best_score = 0;

        for pos in board.vacancies(side) {
            let (next, _) = board.try_apply(pos, side);
            let score = evaluate(&next, side.opposite(), true, self.depth);
            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
        }

        best_move
    }
}

impl Default for MinimaxSelector {
    fn default() -> Self {
        Self::new(SEARCH_DEPTH)
    }
}

impl MoveSelector for MinimaxSelector {
    fn select_move(&self, board: &Board, side: Side, _rng: &mut dyn RngCore) -> Option<Position> {
        self.search(board, side)
    }
}

/// Black's stone count at the leaves, whichever side is maximising.
///
/// A side without vacancies does not pass: the node keeps its starting target,
/// 0 when maximising and 100 when minimising.
pub fn evaluate(board: &Board, side: Side, maximizing: bool, depth: u8) -> u8 {
    if board.is_full() || depth == 0 {
        let (black, _) = board.score();
        return black;
    }

    let mut target = if maximizing { MAX_TARGET } else { MIN_TARGET };
    for pos in board.vacancies(side) {
        let (next, _) = board.try_apply(pos, side);
        let score = evaluate(&next, side.opposite(), !maximizing, depth - 1);
        if (maximizing && score > target) || (!maximizing && score < target) {
            target = score;
        }
    }
    target
}
