//! Header layout: maps axis questions onto matrix row/column ranges.
//!
//! Each question on an axis covers a contiguous band of matrix indices, one
//! per answer, in axis order. The view uses these bands to draw grouped
//! headers and to look up the matrix row for a given header answer.

use serde::Serialize;

use crate::types::AxisQuestion;

/// The band of matrix indices one axis question covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSpan {
    pub offset: usize,
    pub len: usize,
}

impl HeaderSpan {
    /// One past the last index of the band.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Spans for every question on one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLayout {
    pub spans: Vec<HeaderSpan>,
    /// Total answers on the axis
    pub total: usize,
}

impl AxisLayout {
    pub fn new(questions: &[AxisQuestion]) -> Self {
        let mut offset = 0;
        let spans = questions
            .iter()
            .map(|q| {
                let span = HeaderSpan {
                    offset,
                    len: q.span(),
                };
                offset += span.len;
                span
            })
            .collect();
        Self {
            spans,
            total: offset,
        }
    }

    /// Question index and answer index for a flattened matrix index.
    pub fn locate(&self, flat_index: usize) -> Option<(usize, usize)> {
        self.spans
            .iter()
            .enumerate()
            .find(|(_, s)| flat_index >= s.offset && flat_index < s.end())
            .map(|(qi, s)| (qi, flat_index - s.offset))
    }
}

/// Flattened matrix index of answer `answer_index` of the question at
/// `question_index`. `None` when either index is out of range.
pub fn global_index(
    questions: &[AxisQuestion],
    question_index: usize,
    answer_index: usize,
) -> Option<usize> {
    let question = questions.get(question_index)?;
    if answer_index >= question.span() {
        return None;
    }
    let before: usize = questions
        .iter()
        .take(question_index)
        .map(AxisQuestion::span)
        .sum();
    Some(before + answer_index)
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
    use crate::types::{Answer, Question};

    fn questions() -> Vec<AxisQuestion> {
        let q = |id: &str, n: u64| {
            AxisQuestion::from(&Question::new(
                id,
                id,
                (0..n).map(|i| Answer::new(i.to_string(), "x", i)).collect(),
            ))
        };
        vec![q("A", 2), q("B", 0), q("C", 3)]
    }

    #[test]
    fn test_spans() {
        let layout = AxisLayout::new(&questions());
        assert_eq!(layout.total, 5);
        assert_eq!(layout.spans[0], HeaderSpan { offset: 0, len: 2 });
        assert_eq!(layout.spans[1], HeaderSpan { offset: 2, len: 0 });
        assert_eq!(layout.spans[2], HeaderSpan { offset: 2, len: 3 });
    }

    #[test]
    fn test_global_index_and_locate_agree() {
        let qs = questions();
        let layout = AxisLayout::new(&qs);
        assert_eq!(global_index(&qs, 2, 1), Some(3));
        assert_eq!(layout.locate(3), Some((2, 1)));
        assert_eq!(layout.locate(1), Some((0, 1)));
        assert_eq!(layout.locate(5), None);
        assert_eq!(global_index(&qs, 1, 0), None);
        assert_eq!(global_index(&qs, 3, 0), None);
    }
}
