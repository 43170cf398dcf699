use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::ai::{Strategy, choose_move};
use crate::board::Board;
use crate::error::EngineError;
use crate::types::Position;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Row-major wire encoding of the starting board.
#[wasm_bindgen]
pub fn init_board() -> Vec<i8> {
    Board::new().to_flat().to_vec()
}

/// Returns `{ row, col }`, or `null` for a pass.
#[wasm_bindgen(js_name = chooseMove)]
pub fn choose_move_js(
    cells: Vec<i8>,
    is_black: bool,
    strategy: &str,
    seed: u64,
) -> Result<JsValue, JsValue> {
    let mv = choose_move_from_cells(&cells, is_black, strategy, seed)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(mv.serialize(&Serializer::json_compatible())?)
}

fn choose_move_from_cells(
    cells: &[i8],
    is_black: bool,
    strategy: &str,
    seed: u64,
) -> Result<Option<Position>, EngineError> {
    let board = Board::from_flat(cells)?;
    let strategy: Strategy = strategy.parse()?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(choose_move(&board, is_black, strategy, &mut rng))
}
