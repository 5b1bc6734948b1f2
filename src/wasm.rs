//! JavaScript surface for the table builder.
//!
//! `TableBuilderHandle` wraps a [`TableBuilder`] session for the view layer.
//! Axis names are passed as `"row"` / `"column"`; structured values cross
//! the boundary through `serde-wasm-bindgen`. The two output events are
//! delivered to callbacks registered with `set_on_table_generated` and
//! `set_on_close`.

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::BuilderConfig;
use crate::session::TableBuilder;
use crate::types::{Axis, BuilderEvent, SavedTable};

#[wasm_bindgen]
pub struct TableBuilderHandle {
    builder: TableBuilder,
    on_table_generated: Option<Function>,
    on_close: Option<Function>,
}

fn parse_axis(axis: &str) -> Result<Axis, JsValue> {
    axis.parse::<Axis>().map_err(|e| JsValue::from_str(&e))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[wasm_bindgen]
impl TableBuilderHandle {
    /// Load a catalog and start an empty table.
    ///
    /// `config` may be `undefined`/`null` or a partial `BuilderConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str, config: JsValue) -> Result<TableBuilderHandle, JsValue> {
        console_error_panic_hook::set_once();

        let config: BuilderConfig = if config.is_undefined() || config.is_null() {
            BuilderConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };

        let builder = TableBuilder::from_catalog_json(catalog_json, config)?;
        Ok(TableBuilderHandle {
            builder,
            on_table_generated: None,
            on_close: None,
        })
    }

    // ---- Catalog / selection ----

    #[wasm_bindgen]
    pub fn questions(&self) -> Result<JsValue, JsValue> {
        to_js(self.builder.catalog().questions())
    }

    #[wasm_bindgen]
    pub fn search(&self, term: &str) -> Result<JsValue, JsValue> {
        to_js(&self.builder.catalog().search(term))
    }

    #[wasm_bindgen]
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        self.builder.toggle_selection(id)
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        self.builder.clear_selection();
    }

    #[wasm_bindgen]
    pub fn is_selected(&self, id: &str) -> bool {
        self.builder.selection().contains(id)
    }

    #[wasm_bindgen]
    pub fn drag_preview_text(&self) -> String {
        self.builder.drag_preview_text()
    }

    #[wasm_bindgen]
    pub fn focused_answers(&self) -> Vec<String> {
        self.builder
            .focused_answers()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // ---- Axis mutations ----

    #[wasm_bindgen]
    pub fn add_question(&mut self, axis: &str, id: &str) -> Result<bool, JsValue> {
        Ok(self.builder.add_question(parse_axis(axis)?, id)?)
    }

    #[wasm_bindgen]
    pub fn drop_from_catalog(&mut self, axis: &str, dragged: Option<String>) -> Result<usize, JsValue> {
        Ok(self
            .builder
            .drop_from_catalog(parse_axis(axis)?, dragged.as_deref())?)
    }

    #[wasm_bindgen]
    pub fn remove_question(&mut self, axis: &str, index: usize) -> Result<(), JsValue> {
        self.builder.remove_question(parse_axis(axis)?, index)?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn reorder(&mut self, axis: &str, from: usize, to: usize) -> Result<(), JsValue> {
        Ok(self.builder.reorder(parse_axis(axis)?, from, to)?)
    }

    #[wasm_bindgen]
    pub fn move_between_axes(
        &mut self,
        from_axis: &str,
        to_axis: &str,
        from: usize,
        to: usize,
    ) -> Result<bool, JsValue> {
        Ok(self
            .builder
            .move_between_axes(parse_axis(from_axis)?, parse_axis(to_axis)?, from, to)?)
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.builder.reset();
    }

    #[wasm_bindgen]
    pub fn set_label_color(&mut self, axis: &str, index: usize, color: &str) -> Result<(), JsValue> {
        Ok(self
            .builder
            .set_label_color(parse_axis(axis)?, index, color)?)
    }

    #[wasm_bindgen]
    pub fn toggle_color_picker(&mut self, axis: &str, index: usize) -> Result<bool, JsValue> {
        Ok(self.builder.toggle_color_picker(parse_axis(axis)?, index)?)
    }

    // ---- Read-back ----

    #[wasm_bindgen]
    pub fn matrix(&self) -> Result<JsValue, JsValue> {
        to_js(self.builder.matrix())
    }

    #[wasm_bindgen]
    pub fn axis_questions(&self, axis: &str) -> Result<JsValue, JsValue> {
        to_js(self.builder.registry().questions(parse_axis(axis)?))
    }

    #[wasm_bindgen]
    pub fn layout(&self, axis: &str) -> Result<JsValue, JsValue> {
        to_js(&self.builder.layout(parse_axis(axis)?))
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.builder.snapshot())
    }

    /// Restore axes from a previously saved table.
    #[wasm_bindgen]
    pub fn restore(&mut self, saved: JsValue) -> Result<(), JsValue> {
        let saved: SavedTable = serde_wasm_bindgen::from_value(saved)
            .map_err(|e| JsValue::from_str(&format!("Invalid saved table: {e}")))?;
        self.builder.restore(&saved);
        Ok(())
    }

    // ---- Events ----

    #[wasm_bindgen]
    pub fn set_on_table_generated(&mut self, callback: Option<Function>) {
        self.on_table_generated = callback;
    }

    #[wasm_bindgen]
    pub fn set_on_close(&mut self, callback: Option<Function>) {
        self.on_close = callback;
    }

    #[wasm_bindgen]
    pub fn confirm_and_save(&mut self) -> Result<(), JsValue> {
        self.builder.confirm_and_save();
        self.dispatch_events()
    }

    #[wasm_bindgen]
    pub fn close(&mut self) -> Result<(), JsValue> {
        self.builder.close();
        self.dispatch_events()
    }
}

impl TableBuilderHandle {
    fn dispatch_events(&mut self) -> Result<(), JsValue> {
        for event in self.builder.drain_events() {
            match event {
                BuilderEvent::TableGenerated(table) => {
                    if let Some(callback) = &self.on_table_generated {
                        callback.call1(&JsValue::NULL, &to_js(&table)?)?;
                    }
                }
                BuilderEvent::Closed => {
                    if let Some(callback) = &self.on_close {
                        callback.call0(&JsValue::NULL)?;
                    }
                }
            }
        }
        Ok(())
    }
}
