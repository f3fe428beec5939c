use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::GameInstance;
use crate::types::PieceColor;

/// Browser-facing handle on one game against the engine.
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(ai_plays_white: bool, depth: u8) -> WasmGame {
        let ai_color = if ai_plays_white {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        WasmGame {
            inner: GameInstance::new_with_ai(ai_color, depth),
        }
    }

    /// Current `GameState` as a plain JS object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_state())
    }

    /// Applies the player's move and returns the new state.
    pub fn play(&mut self, mv: &str) -> Result<JsValue, JsValue> {
        self.inner.play(mv).map_err(to_js_error)?;
        self.state()
    }

    /// Lets the engine move and returns the new state.
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        self.inner.do_ai_move().map_err(to_js_error)?;
        self.state()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.inner.is_ai_turn()
    }

    /// Takes back one ply; `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.inner.undo().is_some()
    }

    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.to_game_result())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: crate::error::QirkatError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
