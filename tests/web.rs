// Browser tests: run with `wasm-pack test --headless --firefox` (or chrome).
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn start_game_mounts_overlay_once() {
    page_tetris::start_game().unwrap();
    let doc = document();
    assert!(doc.get_element_by_id(page_tetris::config::CONTAINER_ID).is_some());
    assert!(doc.get_element_by_id(page_tetris::config::CANVAS_ID).is_some());
    let button = doc.get_element_by_id(page_tetris::config::RESTART_ID).unwrap();
    assert_eq!(button.text_content().as_deref(), Some("Restart Game"));

    // second call restarts rather than mounting again
    page_tetris::start_game().unwrap();
    let canvases = doc.query_selector_all("canvas").unwrap();
    assert_eq!(canvases.length(), 1);
}
