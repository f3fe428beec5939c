use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod movegen;
pub mod moves;
pub mod types;
pub mod wasm;

pub use board::{Board, BoardView};
pub use error::QirkatError;
pub use moves::Move;
pub use types::{PieceColor, Square};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
