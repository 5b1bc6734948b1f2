//! Table-builder session.
//!
//! `TableBuilder` owns one table's state: the catalog it draws from, the axis
//! registry, the multi-selection and the current matrix. Every successful axis
//! mutation regenerates the matrix before returning, so [`TableBuilder::matrix`]
//! always reflects the current axis order. Sessions share nothing.

use tracing::{debug, info};

use crate::axis::AxisRegistry;
use crate::catalog::Catalog;
use crate::config::BuilderConfig;
use crate::error::{CrosstabError, Result};
use crate::export;
use crate::layout::AxisLayout;
use crate::matrix::{self, CellAggregator};
use crate::selection::SelectionTracker;
use crate::types::{Axis, AxisQuestion, BuilderEvent, Matrix, SavedTable};

#[derive(Debug)]
pub struct TableBuilder {
    config: BuilderConfig,
    catalog: Catalog,
    registry: AxisRegistry,
    selection: SelectionTracker,
    matrix: Matrix,
    aggregator: Box<dyn CellAggregator>,
    /// Output events not yet collected by the host
    events: Vec<BuilderEvent>,
}

impl TableBuilder {
    pub fn new(catalog: Catalog, config: BuilderConfig) -> Self {
        let aggregator = matrix::aggregator_for(&config);
        Self {
            config,
            catalog,
            registry: AxisRegistry::new(),
            selection: SelectionTracker::new(),
            matrix: Matrix::new(),
            aggregator,
            events: Vec::new(),
        }
    }

    /// Load catalog JSON with `config` and start an empty session.
    pub fn from_catalog_json(json: &str, config: BuilderConfig) -> Result<Self> {
        let catalog = Catalog::from_json(json, &config)?;
        Ok(Self::new(catalog, config))
    }

    /// Replace the aggregation rule and regenerate.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Box<dyn CellAggregator>) -> Self {
        self.aggregator = aggregator;
        self.regenerate();
        self
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &AxisRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn layout(&self, axis: Axis) -> AxisLayout {
        AxisLayout::new(self.registry.questions(axis))
    }

    // ---- Selection ----

    pub fn toggle_selection(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Answer labels of the focused question, for the answers panel.
    pub fn focused_answers(&self) -> Vec<&str> {
        self.selection
            .focused()
            .and_then(|id| self.catalog.get(id))
            .map(|q| q.answer_labels())
            .unwrap_or_default()
    }

    pub fn drag_preview_text(&self) -> String {
        self.selection.drag_preview_text(&self.catalog)
    }

    // ---- Axis mutations ----

    /// Add one catalog question to an axis. Returns `false` for a duplicate.
    pub fn add_question(&mut self, axis: Axis, id: &str) -> Result<bool> {
        let question = self
            .catalog
            .get(id)
            .ok_or_else(|| CrosstabError::UnknownQuestion(id.to_string()))?;
        let added = self.registry.add_question(axis, question);
        self.regenerate();
        Ok(added)
    }

    /// Complete a drop from the catalog list onto `axis`.
    ///
    /// With a non-empty selection, every selected question is inserted in
    /// catalog order and the selection is cleared; otherwise only `dragged`
    /// is inserted. Returns how many questions were actually added.
    pub fn drop_from_catalog(&mut self, axis: Axis, dragged: Option<&str>) -> Result<usize> {
        let batch: Vec<&str> = if self.selection.is_empty() {
            match dragged {
                Some(id) => {
                    if self.catalog.get(id).is_none() {
                        return Err(CrosstabError::UnknownQuestion(id.to_string()));
                    }
                    vec![id]
                }
                None => return Ok(0),
            }
        } else {
            self.selection
                .selected_in(&self.catalog)
                .into_iter()
                .map(|q| q.id.as_str())
                .collect()
        };

        let mut added = 0;
        for id in batch {
            if let Some(question) = self.catalog.get(id) {
                if self.registry.add_question(axis, question) {
                    added += 1;
                }
            }
        }
        debug!(%axis, added, "dropped questions from catalog");

        self.selection.clear();
        self.regenerate();
        Ok(added)
    }

    pub fn remove_question(&mut self, axis: Axis, index: usize) -> Result<AxisQuestion> {
        let removed = self.registry.remove_question(axis, index)?;
        self.regenerate();
        Ok(removed)
    }

    pub fn reorder(&mut self, axis: Axis, from: usize, to: usize) -> Result<()> {
        self.registry.reorder(axis, from, to)?;
        self.regenerate();
        Ok(())
    }

    pub fn move_between_axes(
        &mut self,
        from_axis: Axis,
        to_axis: Axis,
        from: usize,
        to: usize,
    ) -> Result<bool> {
        let moved = self
            .registry
            .move_between_axes(from_axis, to_axis, from, to)?;
        self.regenerate();
        Ok(moved)
    }

    /// Empty both axes and the matrix.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.matrix = Matrix::new();
    }

    // Colour state does not feed the matrix, so no regeneration.

    pub fn set_label_color(&mut self, axis: Axis, index: usize, bg_color: &str) -> Result<()> {
        self.registry.set_label_color(axis, index, bg_color)
    }

    pub fn toggle_color_picker(&mut self, axis: Axis, index: usize) -> Result<bool> {
        self.registry.toggle_color_picker(axis, index)
    }

    // ---- Export / events ----

    pub fn snapshot(&self) -> SavedTable {
        export::snapshot(&self.registry, &self.matrix)
    }

    /// Load axis contents from a saved table and regenerate.
    pub fn restore(&mut self, saved: &SavedTable) {
        self.registry = export::registry_from(saved);
        self.regenerate();
    }

    /// Emit `TableGenerated` with a snapshot, then `Closed`.
    pub fn confirm_and_save(&mut self) -> SavedTable {
        let table = self.snapshot();
        info!(
            rows = table.row_questions.len(),
            columns = table.column_questions.len(),
            "table saved"
        );
        self.events.push(BuilderEvent::TableGenerated(table.clone()));
        self.events.push(BuilderEvent::Closed);
        table
    }

    pub fn close(&mut self) {
        self.events.push(BuilderEvent::Closed);
    }

    /// Take all pending output events, oldest first.
    pub fn drain_events(&mut self) -> Vec<BuilderEvent> {
        std::mem::take(&mut self.events)
    }

    fn regenerate(&mut self) {
        self.matrix = matrix::generate(
            self.registry.rows(),
            self.registry.columns(),
            self.aggregator.as_ref(),
        );
    }
}
