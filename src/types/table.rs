use serde::{Deserialize, Serialize};

use super::{AxisQuestion, Cell};

/// The persisted form of a finished table.
///
/// Written once on save and never mutated afterwards; it owns deep copies of
/// the axis contents and matrix it was taken from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTable {
    pub column_questions: Vec<AxisQuestion>,
    pub row_questions: Vec<AxisQuestion>,
    pub table_matrix: Vec<Vec<Cell>>,
}

/// Externally observable output of a table-builder session.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderEvent {
    /// The user confirmed the table.
    TableGenerated(SavedTable),
    /// The builder was dismissed.
    Closed,
}
