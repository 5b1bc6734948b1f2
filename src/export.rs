//! Table export pipeline.
//!
//! A [`SavedTable`] is a deep copy of the axes and matrix at the moment of
//! saving. It round-trips through JSON; re-importing it and regenerating the
//! matrix from its axes yields the matrix it was saved with.

use crate::axis::AxisRegistry;
use crate::error::Result;
use crate::matrix::{self, CellAggregator};
use crate::types::{Axis, Cell, Matrix, SavedTable};

/// Copy the current axes and matrix into an independent snapshot.
pub fn snapshot(registry: &AxisRegistry, matrix: &[Vec<Cell>]) -> SavedTable {
    SavedTable {
        column_questions: registry.columns().to_vec(),
        row_questions: registry.rows().to_vec(),
        table_matrix: matrix.to_vec(),
    }
}

pub fn to_json(table: &SavedTable) -> Result<String> {
    Ok(serde_json::to_string(table)?)
}

pub fn to_json_pretty(table: &SavedTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

pub fn from_json(json: &str) -> Result<SavedTable> {
    Ok(serde_json::from_str(json)?)
}

/// Rebuild a registry from a saved table, keeping label colours.
///
/// Duplicate ids within one saved axis are dropped, as on any insert.
pub fn registry_from(table: &SavedTable) -> AxisRegistry {
    let mut registry = AxisRegistry::new();
    for q in &table.row_questions {
        registry.insert(Axis::Row, q.clone());
    }
    for q in &table.column_questions {
        registry.insert(Axis::Column, q.clone());
    }
    registry
}

/// Regenerate the matrix a saved table's axes describe.
pub fn regenerate<A>(table: &SavedTable, aggregator: &A) -> Matrix
where
    A: CellAggregator + ?Sized,
{
    matrix::generate(&table.row_questions, &table.column_questions, aggregator)
}
