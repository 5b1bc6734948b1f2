//! Structured error types for crosstab.
//!
//! Every fallible operation in the crate returns [`Result`]. Duplicate axis
//! insertions are not errors: they are idempotent no-ops.

use crate::types::Axis;

/// All errors that can occur while loading catalogs or editing a table.
#[derive(Debug, thiserror::Error)]
pub enum CrosstabError {
    /// A catalog entry failed validation (strict parse mode only).
    #[error("Malformed catalog entry #{index}: {reason}")]
    MalformedCatalogEntry { index: usize, reason: String },

    /// Remove/reorder/move with an index outside the axis.
    #[error("Index {index} out of range for {axis} axis of length {len}")]
    OutOfRange { axis: Axis, index: usize, len: usize },

    /// A question id that is not part of the loaded catalog.
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// A label colour that is not `#rrggbb`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config error.
    #[error("Config: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CrosstabError>;

#[cfg(target_arch = "wasm32")]
impl From<CrosstabError> for wasm_bindgen::JsValue {
    fn from(e: CrosstabError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
