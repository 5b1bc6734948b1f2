use serde::{Deserialize, Serialize};

/// One aggregated intersection of a row answer and a column answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub count: u64,
    /// `None` means "not applicable", which is not the same as 0%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl Cell {
    pub fn new(count: u64, percentage: Option<f64>) -> Self {
        Self { count, percentage }
    }

    /// Percentage as shown in the grid: `"25%"`, `"19.64%"`, or `"-"`.
    pub fn percentage_label(&self) -> String {
        match self.percentage {
            Some(p) => format!("{p}%"),
            None => "-".to_string(),
        }
    }
}

/// Row-major grid of cells. Empty when either axis is empty.
pub type Matrix = Vec<Vec<Cell>>;

/// `(rows, columns)` of a matrix; columns is 0 for an empty matrix.
pub fn matrix_dimensions(matrix: &[Vec<Cell>]) -> (usize, usize) {
    (matrix.len(), matrix.first().map_or(0, Vec::len))
}
