use rand::RngCore;
use rand::seq::SliceRandom;

use crate::ai::MoveSelector;
use crate::board::{Board, DIRECTIONS};
use crate::types::{Cell, Position, Side};

/// Openness assigned to a move that captures nothing.
pub const NO_CAPTURE_OPENNESS: u32 = 100;

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSelector;

impl MoveSelector for RandomSelector {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position> {
        board.vacancies(side).choose(rng).copied()
    }
}

/// Maximises the mover's own stone count after the move.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position> {
        let best = best_by_key(board.vacancies(side), |pos| {
            let (next, _) = board.try_apply(pos, side);
            i64::from(next.side_score(side))
        });
        best.choose(rng).copied()
    }
}

/// Minimises the number of empty squares around the stones a move would flip.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpennessSelector;

impl MoveSelector for OpennessSelector {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position> {
        let best = best_by_key(board.vacancies(side), |pos| {
            -i64::from(openness(board, pos, side))
        });
        best.choose(rng).copied()
    }
}

/// Empty neighbours of every stone `side` would flip by playing `pos`,
/// counted on the board before the move.
pub fn openness(board: &Board, pos: Position, side: Side) -> u32 {
    let flips = board.captured_runs(pos, side, false);
    if flips.is_empty() {
        return NO_CAPTURE_OPENNESS;
    }

    let mut score = 0;
    for square in flips {
        for (dr, dc) in DIRECTIONS {
            let neighbour = Position::checked(square.row as i32 + dr, square.col as i32 + dc);
            if neighbour.is_some_and(|n| board.get(n) == Cell::Empty) {
                score += 1;
            }
        }
    }
    score
}

/// All candidates sharing the highest key, in their original order.
fn best_by_key(candidates: Vec<Position>, mut key: impl FnMut(Position) -> i64) -> Vec<Position> {
    let mut best = Vec::new();
    let mut best_key = i64::MIN;

    for pos in candidates {
        let k = key(pos);
        if k > best_key {
            best_key = k;
            best.clear();
            best.push(pos);
        } else if k == best_key {
            best.push(pos);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::board::tests::board_from_diagram;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn terminal_board() -> Board {
        board_from_diagram(
            "#......#
             .XXXXXX.
             .XXXXXX.
             .XXXXXX.
             .XXXXXX.
             .XXXXXX.
             .XXXXXX.
             #......#",
        )
    }

    #[test]
    fn selectors_pass_without_vacancies() {
        let board = terminal_board();
        let mut rng = StdRng::seed_from_u64(0);

        for side in [Side::Black, Side::White] {
            assert_eq!(RandomSelector.select_move(&board, side, &mut rng), None);
            assert_eq!(GreedySelector.select_move(&board, side, &mut rng), None);
            assert_eq!(OpennessSelector.select_move(&board, side, &mut rng), None);
        }
    }

    #[test]
    fn random_covers_the_vacancy_set() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<Position> = (0..2000)
            .filter_map(|_| RandomSelector.select_move(&board, Side::White, &mut rng))
            .collect();

        assert_eq!(seen.len(), 36);
        assert!(seen.iter().all(|p| p.is_interior()));
    }

    #[test]
    fn greedy_takes_the_biggest_capture() {
        let board = board_from_diagram(
            "#......#
             .X......
             .O......
             .O......
             .O.OOX..
             ........
             ........
             #......#",
        );
        let mut rng = StdRng::seed_from_u64(3);

        // (5,1) flips three vertically, (4,2) flips two horizontally.
        for _ in 0..20 {
            assert_eq!(GreedySelector.select_move(&board, Side::Black, &mut rng), Some(pos(5, 1)));
        }
    }

    #[test]
    fn greedy_breaks_ties_among_maximal_moves_only() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(9);

        // Nothing captures on an empty board, so every interior square ties at 1.
        let seen: HashSet<Position> = (0..2000)
            .filter_map(|_| GreedySelector.select_move(&board, Side::Black, &mut rng))
            .collect();

        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn openness_counts_empty_neighbours_of_flipped_stones() {
        let board = board_from_diagram(
            "#......#
             ........
             ........
             ...XOO..
             ........
             ........
             ........
             #......#",
        );

        // Flipping (3,4) and (3,5) from (3,6): (3,4) has 6 empty neighbours, (3,5) has 7
        // including the target square itself.
        assert_eq!(openness(&board, pos(3, 6), Side::Black), 13);
        assert_eq!(openness(&board, pos(2, 2), Side::Black), NO_CAPTURE_OPENNESS);
    }

    #[test]
    fn openness_picks_the_capture_over_sentinel_interior_moves() {
        let board = board_from_diagram(
            "#......#
             ........
             ........
             ...XOO..
             ........
             ........
             ........
             #......#",
        );
        let mut rng = StdRng::seed_from_u64(21);

        for _ in 0..50 {
            assert_eq!(OpennessSelector.select_move(&board, Side::Black, &mut rng), Some(pos(3, 6)));
        }
    }

    #[test]
    fn openness_lower_capture_score_wins() {
        let board = board_from_diagram(
            "#......#
             ........
             ..XO....
             ........
             ....OOO.
             .....OX.
             ....OOO.
             #......#",
        );
        let mut rng = StdRng::seed_from_u64(13);

        // (2,4) flips (2,3) in open space; (5,4) flips (5,5), ringed by White.
        assert_eq!(openness(&board, pos(2, 4), Side::Black), 7);
        assert_eq!(openness(&board, pos(5, 4), Side::Black), 1);
        for _ in 0..50 {
            assert_eq!(OpennessSelector.select_move(&board, Side::Black, &mut rng), Some(pos(5, 4)));
        }
    }

    #[test]
    fn openness_prefers_the_most_enclosed_capture() {
        let board = board_from_diagram(
            "#OOOOOX#
             OOOOOOOO
             OOOOOOOO
             OOOOOOOO
             OOOOOOOO
             OOOOOOOO
             OOOOOOOO
             #OOOO..#",
        );
        let mut rng = StdRng::seed_from_u64(5);

        // (7,6) flips column 6 up to (0,6); only (6,6) touches empty squares.
        assert_eq!(openness(&board, pos(7, 6), Side::Black), 2);
        assert_eq!(openness(&board, pos(7, 5), Side::Black), NO_CAPTURE_OPENNESS);
        assert_eq!(OpennessSelector.select_move(&board, Side::Black, &mut rng), Some(pos(7, 6)));
    }

    #[test]
    fn openness_ties_on_sentinel_when_nothing_captures() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(11);

        let mv = OpennessSelector.select_move(&board, Side::Black, &mut rng);

        assert!(mv.is_some_and(|p| p.is_interior()));
    }
}
