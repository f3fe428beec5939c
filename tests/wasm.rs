#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use qirkat::wasm::WasmGame;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn state_exposes_opening_position() {
    let game = WasmGame::new(false, 2);
    let state = game.state().unwrap();

    assert_eq!(
        field(&state, "board").as_string().as_deref(),
        Some("wwwwwwwwwwbb-wwbbbbbbbbbb")
    );
    assert_eq!(field(&state, "whose_move").as_string().as_deref(), Some("white"));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn player_move_then_engine_reply() {
    let mut game = WasmGame::new(false, 2);

    game.play("c2-c3").unwrap();
    assert!(game.is_ai_turn());
    let state = game.ai_move().unwrap();

    assert_eq!(field(&state, "last_move").as_string().as_deref(), Some("c4-c2"));
    assert!(game.undo());
}

#[wasm_bindgen_test]
fn illegal_move_surfaces_as_error_string() {
    let mut game = WasmGame::new(false, 2);

    let err = game.play("a1-a2").unwrap_err();

    assert_eq!(err.as_string().as_deref(), Some("illegal move: a1-a2"));
}
