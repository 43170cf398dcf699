use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::board::Board;
use crate::error::EngineError;
use crate::types::{Position, Side};

pub mod heuristic;
pub mod search;

pub use heuristic::{GreedySelector, OpennessSelector, RandomSelector};
pub use search::{MinimaxSelector, SEARCH_DEPTH};

/// Picks a square for `side`. `None` means pass.
pub trait MoveSelector {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Random,
    Greedy,
    Openness,
    Minimax,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Random,
        Strategy::Greedy,
        Strategy::Openness,
        Strategy::Minimax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Openness => "openness",
            Strategy::Minimax => "minimax",
        }
    }

    /// Boxes the selector; minimax uses `depth`.
    pub fn selector(self, depth: u8) -> Box<dyn MoveSelector> {
        match self {
            Strategy::Random => Box::new(RandomSelector),
            Strategy::Greedy => Box::new(GreedySelector),
            Strategy::Openness => Box::new(OpennessSelector),
            Strategy::Minimax => Box::new(MinimaxSelector::new(depth)),
        }
    }
}

impl MoveSelector for Strategy {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position> {
        match self {
            Strategy::Random => RandomSelector.select_move(board, side, rng),
            Strategy::Greedy => GreedySelector.select_move(board, side, rng),
            Strategy::Openness => OpennessSelector.select_move(board, side, rng),
            Strategy::Minimax => MinimaxSelector::default().select_move(board, side, rng),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownStrategy(s.to_string()))
    }
}

/// Engine entry point: one call per turn handed out by the arbiter.
pub fn choose_move(
    board: &Board,
    is_black: bool,
    strategy: Strategy,
    rng: &mut dyn RngCore,
) -> Option<Position> {
    strategy.select_move(board, Side::from_is_black(is_black), rng)
}
