use log::debug;
use rand::RngCore;

use crate::ai::{Strategy, choose_move};
use crate::board::Board;
use crate::error::EngineError;
use crate::types::Position;

/// One request from the arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub stop: bool,
    pub game_id: u64,
    pub board: Board,
    pub is_black: bool,
}

/// Hands out the boards the engine has to answer.
pub trait BoardSource {
    fn next_turn(&mut self) -> Result<Turn, EngineError>;
}

/// Receives the engine's answers. `None` is a pass.
pub trait MoveSink {
    fn send_move(&mut self, game_id: u64, mv: Option<Position>) -> Result<(), EngineError>;
}

/// Answers turns until the source asks to stop. Returns the number of answers sent.
pub fn serve(
    source: &mut dyn BoardSource,
    sink: &mut dyn MoveSink,
    strategy: Strategy,
    rng: &mut dyn RngCore,
) -> Result<usize, EngineError> {
    let mut sent = 0;

    loop {
        let turn = source.next_turn()?;
        if turn.stop {
            debug!("arbiter stopped after {sent} turns");
            return Ok(sent);
        }

        let mv = choose_move(&turn.board, turn.is_black, strategy, rng);
        debug!("game {}: {strategy} answers {mv:?}", turn.game_id);
        sink.send_move(turn.game_id, mv)?;
        sent += 1;
    }
}
