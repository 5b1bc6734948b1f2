//! crosstab - cross-tabulation table builder core
//!
//! Survey questions are dragged onto the row and column axes of a pivot-style
//! grid; this crate turns the axes into a matrix of aggregated cells:
//! - Catalog loading from the survey-response JSON (strict or lenient)
//! - Axis registry with add/remove/reorder/move and duplicate protection
//! - Matrix generation with a diagonal self-intersection case and a pluggable
//!   aggregation rule
//! - Multi-select batch insertion and `SavedTable` export/import
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TableBuilderHandle } from 'crosstab';
//! await init();
//! const builder = new TableBuilderHandle(catalogJson, { parse_mode: 'lenient' });
//! builder.add_question('row', 'Q1');
//! builder.add_question('column', 'Q2');
//! const matrix = builder.matrix();
//! ```

pub mod axis;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod matrix;
pub mod selection;
pub mod session;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use wasm_bindgen::prelude::*;

pub use axis::AxisRegistry;
pub use catalog::Catalog;
pub use config::BuilderConfig;
pub use error::{CrosstabError, Result};
pub use matrix::{generate, CellAggregator, MeanOfMarginals};
pub use session::TableBuilder;
#[cfg(target_arch = "wasm32")]
pub use wasm::TableBuilderHandle;

pub use types::*;

/// Validate catalog JSON (lenient mode) and return the questions as JSON
///
/// # Errors
/// Returns an error if the input is not valid catalog JSON.
#[wasm_bindgen]
pub fn parse_catalog(json: &str) -> std::result::Result<String, JsValue> {
    let catalog = Catalog::from_json(json, &BuilderConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(catalog.questions())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Validate catalog JSON and return the questions as a `JsValue`
///
/// # Errors
/// Returns an error if the input is not valid catalog JSON.
#[wasm_bindgen]
pub fn parse_catalog_to_js(json: &str) -> std::result::Result<JsValue, JsValue> {
    let catalog = Catalog::from_json(json, &BuilderConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(catalog.questions())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
