use std::fmt;
use std::ops::Add;

use log::info;
use rand::RngCore;
use serde::Serialize;
use web_time::Instant;

use crate::ai::{SEARCH_DEPTH, Strategy};
use crate::error::EngineError;
use crate::game::GameInstance;
use crate::types::{Side, Winner};

/// Settings for a batch of self-play games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub games: u32,
    pub black: Strategy,
    pub white: Strategy,
    /// Minimax depth for whichever side uses it.
    pub depth: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            black: Strategy::Minimax,
            white: Strategy::Random,
            depth: SEARCH_DEPTH,
        }
    }
}

/// Plays `config.games` games one after another and tabulates the outcomes.
pub fn run(
    config: &SimulationConfig,
    rng: &mut dyn RngCore,
) -> Result<SimulationReport, EngineError> {
    let mut totals = Tally::default();

    for i in 0..config.games {
        let tally = play_game(config, rng)?;
        let verdict = match tally.winner() {
            Winner::Black => "black win",
            Winner::White => "white win",
            Winner::Draw => "draw",
        };
        info!("game {i}/{}, {verdict}", config.games);
        totals = totals + tally;
    }

    let report = SimulationReport::new(config.games, totals);
    info!("{report}");
    Ok(report)
}

fn play_game(config: &SimulationConfig, rng: &mut dyn RngCore) -> Result<Tally, EngineError> {
    let mut game = GameInstance::new(
        config.black.selector(config.depth),
        config.white.selector(config.depth),
    );
    let mut tally = Tally::default();

    while !game.is_game_over {
        let side = game.side_to_move;
        let start = Instant::now();
        game.step(rng)?;
        let elapsed = start.elapsed().as_secs_f32();

        match side {
            Side::Black => {
                tally.time_black += elapsed;
                tally.moves_black += 1;
            }
            Side::White => {
                tally.time_white += elapsed;
                tally.moves_white += 1;
            }
        }
    }

    let result = game.to_game_result();
    match result.winner {
        Winner::Black => tally.wins_black = 1,
        Winner::White => tally.wins_white = 1,
        Winner::Draw => tally.draws = 1,
    }
    tally.passes = game.passes;
    Ok(tally)
}

#[derive(Default, Debug, Copy, Clone)]
struct Tally {
    wins_black: u32,
    wins_white: u32,
    draws: u32,
    passes: u32,
    time_black: f32,
    time_white: f32,
    moves_black: u32,
    moves_white: u32,
}

impl Tally {
    /// Only meaningful for the tally of a single game.
    fn winner(&self) -> Winner {
        if self.wins_black > 0 {
            Winner::Black
        } else if self.wins_white > 0 {
            Winner::White
        } else {
            Winner::Draw
        }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Tally {
            wins_black: self.wins_black + rhs.wins_black,
            wins_white: self.wins_white + rhs.wins_white,
            draws: self.draws + rhs.draws,
            passes: self.passes + rhs.passes,
            time_black: self.time_black + rhs.time_black,
            time_white: self.time_white + rhs.time_white,
            moves_black: self.moves_black + rhs.moves_black,
            moves_white: self.moves_white + rhs.moves_white,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use]
pub struct SimulationReport {
    pub games: u32,
    pub wins_black: u32,
    pub wins_white: u32,
    pub draws: u32,
    pub passes: u32,

    pub win_rate_black: f32,
    pub win_rate_white: f32,
    pub draw_rate: f32,

    // time per move (turns including passes) in seconds
    pub time_black: f32,
    pub time_white: f32,
}

impl SimulationReport {
    fn new(games: u32, totals: Tally) -> Self {
        SimulationReport {
            games,
            wins_black: totals.wins_black,
            wins_white: totals.wins_white,
            draws: totals.draws,
            passes: totals.passes,
            win_rate_black: rate(totals.wins_black, games),
            win_rate_white: rate(totals.wins_white, games),
            draw_rate: rate(totals.draws, games),
            time_black: per_move(totals.time_black, totals.moves_black),
            time_white: per_move(totals.time_white, totals.moves_white),
        }
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "black: {}%, white: {}%, draw: {}%",
            self.win_rate_black * 100.0,
            self.win_rate_white * 100.0,
            self.draw_rate * 100.0
        )
    }
}

fn rate(count: u32, games: u32) -> f32 {
    if games == 0 { 0.0 } else { count as f32 / games as f32 }
}

fn per_move(total: f32, moves: u32) -> f32 {
    if moves == 0 { 0.0 } else { total / moves as f32 }
}
