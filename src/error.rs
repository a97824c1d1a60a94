use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum StarfieldError {
    /// `window`, `document` or `<body>` is unavailable
    #[error("browser global unavailable: {0}")]
    MissingGlobal(&'static str),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("config is not valid JSON: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<JsValue> for StarfieldError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string()))
            .unwrap_or_else(|| "unknown JS exception".to_string());
        StarfieldError::Dom(message)
    }
}

pub type Result<T> = std::result::Result<T, StarfieldError>;
