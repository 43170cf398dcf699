use log::{debug, warn};
use rand::RngCore;

use crate::ai::MoveSelector;
use crate::board::Board;
use crate::error::EngineError;
use crate::types::{GameResult, GameState, Position, Side};

/// Outcome of a single turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved { pos: Position, flipped: Vec<Position> },
    Passed,
}

pub struct GameInstance {
    board: Board,
    pub side_to_move: Side,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<Position>,
    pub passes: u32,
    consecutive_passes: u8,
    black: Box<dyn MoveSelector>,
    white: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(black: Box<dyn MoveSelector>, white: Box<dyn MoveSelector>) -> Self {
        Self::from_board(Board::new(), Side::Black, black, white)
    }

    pub fn from_board(
        board: Board,
        side_to_move: Side,
        black: Box<dyn MoveSelector>,
        white: Box<dyn MoveSelector>,
    ) -> Self {
        Self {
            board,
            side_to_move,
            is_game_over: board.is_terminal(),
            is_pass: false,
            flipped: Vec::new(),
            passes: 0,
            consecutive_passes: 0,
            black,
            white,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Asks the side to move for a square and plays it.
    pub fn step(&mut self, rng: &mut dyn RngCore) -> Result<TurnOutcome, EngineError> {
        if self.is_game_over {
            return Err(EngineError::GameOver);
        }

        let side = self.side_to_move;
        let selector = match side {
            Side::Black => &self.black,
            Side::White => &self.white,
        };

        let choice = selector.select_move(&self.board, side, rng);

        let outcome = match choice {
            Some(pos) => {
                let flipped = self
                    .board
                    .play(pos, side)
                    .map_err(|source| EngineError::IllegalMove { side, source })?;
                debug!("{side:?} plays ({}, {}) flipping {}", pos.row, pos.col, flipped.len());

                self.is_pass = false;
                self.flipped = flipped.clone();
                self.consecutive_passes = 0;
                TurnOutcome::Moved { pos, flipped }
            }
            None => {
                debug!("{side:?} passes");

                self.is_pass = true;
                self.flipped.clear();
                self.passes += 1;
                self.consecutive_passes += 1;
                TurnOutcome::Passed
            }
        };

        self.side_to_move = side.opposite();

        if self.board.is_terminal() {
            self.end_game();
        } else if self.consecutive_passes >= 2 {
            warn!("both sides passed with vacancies left, ending game");
            self.end_game();
        }

        Ok(outcome)
    }

    /// Plays until the game is over and returns the final score.
    pub fn play_out(&mut self, rng: &mut dyn RngCore) -> Result<GameResult, EngineError> {
        while !self.is_game_over {
            self.step(rng)?;
        }
        Ok(self.to_game_result())
    }

    pub fn end_game(&mut self) {
        self.is_game_over = true;
    }

    pub fn get_vacancies(&self) -> Vec<Position> {
        self.board.vacancies(self.side_to_move)
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.score();
        GameState {
            board: self.board.to_flat().to_vec(),
            side_to_move: self.side_to_move,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.score();
        GameResult {
            winner: self.board.winner(),
            black_count,
            white_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::ai::Strategy;
    use crate::board::tests::board_from_diagram;
    use crate::error::BoardError;
    use crate::types::Winner;

    struct FixedMoveSelector {
        mv: Option<Position>,
    }

    impl MoveSelector for FixedMoveSelector {
        fn select_move(
            &self,
            _board: &Board,
            _side: Side,
            _rng: &mut dyn RngCore,
        ) -> Option<Position> {
            self.mv
        }
    }

    fn fixed(mv: Option<Position>) -> Box<dyn MoveSelector> {
        Box::new(FixedMoveSelector { mv })
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameInstance::new(Strategy::Random.selector(2), Strategy::Random.selector(2));
        let state = game.to_game_state();

        assert_eq!(state.side_to_move, Side::Black);
        assert_eq!(state.black_count, 0);
        assert_eq!(state.white_count, 0);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.get_vacancies().len(), 36);
    }

    #[test]
    fn illegal_selector_move_returns_error() {
        let mut game = GameInstance::new(fixed(Some(Position::new(0, 3))), fixed(None));
        let mut rng = StdRng::seed_from_u64(0);

        let err = game.step(&mut rng).unwrap_err();

        assert_eq!(
            err,
            EngineError::IllegalMove {
                side: Side::Black,
                source: BoardError::NotVacant {
                    pos: Position::new(0, 3),
                    side: Side::Black
                }
            }
        );
    }

    #[test]
    fn pass_switches_turn() {
        let mut game = GameInstance::new(fixed(None), fixed(Some(Position::new(3, 3))));
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(game.step(&mut rng), Ok(TurnOutcome::Passed));
        assert_eq!(game.side_to_move, Side::White);
        assert!(game.is_pass);
        assert!(!game.is_game_over);

        let outcome = game.step(&mut rng).unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Moved {
                pos: Position::new(3, 3),
                flipped: vec![]
            }
        );
        assert!(!game.is_pass);
        assert_eq!(game.passes, 1);
    }

    #[test]
    fn two_consecutive_passes_end_the_game() {
        let mut game = GameInstance::new(fixed(None), fixed(None));
        let mut rng = StdRng::seed_from_u64(0);

        game.step(&mut rng).unwrap();
        assert!(!game.is_game_over);
        game.step(&mut rng).unwrap();

        assert!(game.is_game_over);
        assert_eq!(game.step(&mut rng), Err(EngineError::GameOver));
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let board = board_from_diagram(
            "#XXXXXX#
             XXXXXXXX
             XXXXXXXX
             OOOOOOOO
             OOOOOOOO
             OOOOOOOO
             OOOOOOXO
             #OOOOO.#",
        );
        let white = fixed(Some(Position::new(7, 6)));
        let mut game = GameInstance::from_board(board, Side::White, fixed(None), white);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = game.step(&mut rng).unwrap();
        let state = game.to_game_state();

        assert!(state.is_game_over);
        assert_eq!(state.side_to_move, Side::Black);
        assert_eq!(
            outcome,
            TurnOutcome::Moved {
                pos: Position::new(7, 6),
                flipped: vec![Position::new(6, 6)]
            }
        );
        assert_eq!(state.flipped, vec![Position::new(6, 6)]);
        assert_eq!(game.to_game_result().winner, Winner::White);
    }

    #[test]
    fn random_games_keep_the_square_count_invariant() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..20 {
            let mut game =
                GameInstance::new(Strategy::Random.selector(2), Strategy::Greedy.selector(2));
            while !game.is_game_over {
                game.step(&mut rng).unwrap();
                let (black, white) = game.board().score();
                assert_eq!(black + white + game.board().empty_count() + 4, 64);
            }

            let result = game.to_game_result();
            assert!(game.board().is_terminal());
            assert_eq!(result.winner, game.board().winner());
        }
    }

    #[test]
    fn minimax_game_plays_out() {
        let mut rng = StdRng::seed_from_u64(77);
        let mut game =
            GameInstance::new(Strategy::Minimax.selector(2), Strategy::Openness.selector(2));

        let result = game.play_out(&mut rng).unwrap();

        assert!(game.is_game_over);
        assert!(result.black_count + result.white_count <= 60);
    }
}
