pub mod ai;
pub mod arbiter;
pub mod arena;
pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use ai::{MoveSelector, Strategy, choose_move};
pub use board::Board;
pub use error::{BoardError, EngineError};
pub use types::{Cell, Position, Side, Winner};
