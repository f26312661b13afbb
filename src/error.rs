use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Validation error: {0}")]
    Validation(&'static str),
}

impl ApiError {
    /// A rejected fetch promise carries an opaque JsValue.
    pub fn network(value: JsValue) -> Self {
        ApiError::Network(format!("{value:?}"))
    }

    pub fn decode(value: JsValue) -> Self {
        ApiError::Decode(format!("{value:?}"))
    }
}

impl From<serde_wasm_bindgen::Error> for ApiError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
