//! Matrix generation.
//!
//! [`generate`] is a pure function of the two axes: it never patches a previous
//! matrix, and every call allocates fresh cells.
//!
//! Three cases:
//! - either axis empty: the empty matrix
//! - the same single question on both axes: a diagonal identity over its answers
//! - anything else: every flattened row answer against every flattened column
//!   answer, combined by a [`CellAggregator`]
//!
//! The default aggregator, [`MeanOfMarginals`], is a provisional approximation.
//! The source data carries only marginal counts, so it cannot produce a true
//! joint distribution; swap the aggregator once joint counts are available.

use std::fmt;

use tracing::debug;

use crate::config::{AggregationKind, BuilderConfig};
use crate::types::{Answer, AxisQuestion, Cell, Matrix};

/// Combines one row answer with one column answer into a cell.
pub trait CellAggregator: fmt::Debug {
    fn aggregate(&self, row: &Answer, column: &Answer) -> Cell;
}

/// Unweighted mean of the two marginals.
///
/// `count` is rounded half-up to an integer. `percentage` is rounded to
/// `decimals` places and is only present when both answers carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeanOfMarginals {
    pub decimals: u8,
}

impl Default for MeanOfMarginals {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl CellAggregator for MeanOfMarginals {
    fn aggregate(&self, row: &Answer, column: &Answer) -> Cell {
        let percentage = match (row.percentage, column.percentage) {
            (Some(r), Some(c)) => Some(round_to((r + c) / 2.0, self.decimals)),
            _ => None,
        };
        Cell {
            count: mean_count(row.count, column.count),
            percentage,
        }
    }
}

/// Aggregator selected by the configuration.
pub fn aggregator_for(config: &BuilderConfig) -> Box<dyn CellAggregator> {
    match config.aggregation {
        AggregationKind::MeanOfMarginals => Box::new(MeanOfMarginals {
            decimals: config.percentage_decimals,
        }),
    }
}

/// `round((a + b) / 2)` with halves rounded up, without overflow.
pub fn mean_count(a: u64, b: u64) -> u64 {
    a / 2 + b / 2 + (a % 2 + b % 2 + 1) / 2
}

/// Round to a fixed number of decimal places.
///
/// Scales by `10^decimals` and applies [`f64::round`] (ties away from zero)
/// to the scaled binary value. Inputs whose decimal text sits on a tie but
/// whose binary value lies just below it (`1.115`) can round up here where a
/// decimal-string rounding such as JavaScript `toFixed` rounds down.
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}

/// Which generation branch a pair of axes falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    Empty,
    SelfIntersection,
    General,
}

pub fn classify(rows: &[AxisQuestion], columns: &[AxisQuestion]) -> Intersection {
    match (rows, columns) {
        ([], _) | (_, []) => Intersection::Empty,
        ([row], [column]) if row.id == column.id => Intersection::SelfIntersection,
        _ => Intersection::General,
    }
}

/// Build the matrix for the current axis contents, in current axis order.
pub fn generate<A>(rows: &[AxisQuestion], columns: &[AxisQuestion], aggregator: &A) -> Matrix
where
    A: CellAggregator + ?Sized,
{
    let kind = classify(rows, columns);
    let matrix = match (kind, rows, columns) {
        (Intersection::SelfIntersection, [row], [column]) => {
            diagonal(&row.answers, &column.answers)
        }
        (Intersection::General, _, _) => pairwise(rows, columns, aggregator),
        _ => Matrix::new(),
    };

    debug!(
        ?kind,
        rows = matrix.len(),
        columns = matrix.first().map_or(0, Vec::len),
        "matrix generated"
    );
    matrix
}

fn diagonal(row_answers: &[Answer], column_answers: &[Answer]) -> Matrix {
    row_answers
        .iter()
        .map(|r| {
            column_answers
                .iter()
                .map(|c| {
                    if r.key == c.key {
                        Cell::new(r.count, r.percentage)
                    } else {
                        Cell::new(0, None)
                    }
                })
                .collect()
        })
        .collect()
}

fn pairwise<A>(rows: &[AxisQuestion], columns: &[AxisQuestion], aggregator: &A) -> Matrix
where
    A: CellAggregator + ?Sized,
{
    let column_answers: Vec<&Answer> = columns.iter().flat_map(|q| &q.answers).collect();

    rows.iter()
        .flat_map(|q| &q.answers)
        .map(|r| {
            column_answers
                .iter()
                .map(|c| aggregator.aggregate(r, c))
                .collect()
        })
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Question;
    use test_case::test_case;

    fn axis_question(id: &str, answers: Vec<Answer>) -> AxisQuestion {
        AxisQuestion::from(&Question::new(id, id, answers))
    }

    #[test_case(5, 3 => 4; "even sum")]
    #[test_case(7, 3 => 5; "q1 second answer")]
    #[test_case(1, 0 => 1; "half rounds up")]
    #[test_case(0, 0 => 0; "zeros")]
    #[test_case(u64::MAX, u64::MAX => u64::MAX; "no overflow")]
    #[test_case(u64::MAX, u64::MAX - 1 => u64::MAX; "no overflow rounding up")]
    fn test_mean_count(a: u64, b: u64) -> u64 {
        mean_count(a, b)
    }

    #[test_case(25.0, 2 => 25.0; "exact")]
    #[test_case(19.6449, 2 => 19.64; "down")]
    #[test_case(19.646, 2 => 19.65; "up")]
    #[test_case(19.646, 0 => 20.0; "integer places")]
    #[test_case(1.115, 2 => 1.12; "scaled binary tie rounds away from zero")]
    fn test_round_to(value: f64, decimals: u8) -> f64 {
        round_to(value, decimals)
    }

    #[test]
    fn test_percentage_requires_both_sides() {
        let agg = MeanOfMarginals::default();
        let r = Answer::new("a", "A", 10).with_percentage(20.0);
        let c = Answer::new("b", "B", 20);
        assert_eq!(agg.aggregate(&r, &c), Cell::new(15, None));
    }

    #[test]
    fn test_aggregation_is_symmetric() {
        let agg = MeanOfMarginals::default();
        let a = Answer::new("a", "A", 11).with_percentage(19.64);
        let b = Answer::new("b", "B", 18).with_percentage(17.86);
        assert_eq!(agg.aggregate(&a, &b), agg.aggregate(&b, &a));
    }

    #[test]
    fn test_classify() {
        let q1 = axis_question("Q1", vec![Answer::new("a", "A", 1)]);
        let q2 = axis_question("Q2", vec![Answer::new("a", "A", 1)]);
        assert_eq!(classify(&[], &[q1.clone()]), Intersection::Empty);
        assert_eq!(
            classify(&[q1.clone()], &[q1.clone()]),
            Intersection::SelfIntersection
        );
        assert_eq!(classify(&[q1.clone()], &[q2.clone()]), Intersection::General);
        assert_eq!(
            classify(&[q1.clone(), q2.clone()], &[q1]),
            Intersection::General
        );
    }

    #[test]
    fn test_zero_answer_question_contributes_nothing() {
        let empty = axis_question("E", vec![]);
        let q = axis_question("Q", vec![Answer::new("a", "A", 4), Answer::new("b", "B", 6)]);
        let matrix = generate(&[empty.clone(), q.clone()], &[q], &MeanOfMarginals::default());
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].len(), 2);

        let only_empty = generate(&[empty.clone()], &[empty], &MeanOfMarginals::default());
        assert!(only_empty.is_empty());
    }
}
