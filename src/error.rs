use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures coming from the host page. Gameplay itself never fails: blocked
/// moves are reverted and game over is a state, not an error.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("element `{0}` has an unexpected type")]
    WrongElement(&'static str),
    #[error("javascript error: {0}")]
    Js(String),
    #[error("entropy source unavailable: {0}")]
    Entropy(getrandom::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        let text = value.as_string().unwrap_or_else(|| format!("{value:?}"));
        GameError::Js(text)
    }
}

// Not `#[from]`: getrandom implements `std::error::Error` only with its `std` feature.
impl From<getrandom::Error> for GameError {
    fn from(err: getrandom::Error) -> Self {
        GameError::Entropy(err)
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
