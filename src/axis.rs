//! Axis registry: the ordered row and column question lists.
//!
//! Order is display order, and it is also the order the matrix generator
//! flattens answers in. Index errors are reported, never clamped.

use crate::color;
use crate::error::{CrosstabError, Result};
use crate::types::{Axis, AxisQuestion, Question};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisRegistry {
    rows: Vec<AxisQuestion>,
    columns: Vec<AxisQuestion>,
}

impl AxisRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[AxisQuestion] {
        &self.rows
    }

    pub fn columns(&self) -> &[AxisQuestion] {
        &self.columns
    }

    pub fn questions(&self, axis: Axis) -> &[AxisQuestion] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    fn list_mut(&mut self, axis: Axis) -> &mut Vec<AxisQuestion> {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.columns,
        }
    }

    /// Ids on an axis, in order.
    pub fn ids(&self, axis: Axis) -> Vec<&str> {
        self.questions(axis).iter().map(|q| q.id.as_str()).collect()
    }

    pub fn contains(&self, axis: Axis, id: &str) -> bool {
        self.questions(axis).iter().any(|q| q.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    /// Append `question` to `axis` unless its id is already there.
    ///
    /// Returns whether the axis changed.
    pub fn add_question(&mut self, axis: Axis, question: &Question) -> bool {
        self.insert(axis, AxisQuestion::from(question))
    }

    /// Append an already-wrapped question (keeps its display state).
    pub fn insert(&mut self, axis: Axis, question: AxisQuestion) -> bool {
        if self.contains(axis, &question.id) {
            return false;
        }
        self.list_mut(axis).push(question);
        true
    }

    pub fn remove_question(&mut self, axis: Axis, index: usize) -> Result<AxisQuestion> {
        check_index(axis, index, self.questions(axis).len())?;
        Ok(self.list_mut(axis).remove(index))
    }

    /// Move the question at `from` to position `to` on the same axis.
    pub fn reorder(&mut self, axis: Axis, from: usize, to: usize) -> Result<()> {
        let len = self.questions(axis).len();
        check_index(axis, from, len)?;
        check_index(axis, to, len)?;
        if from != to {
            let list = self.list_mut(axis);
            let item = list.remove(from);
            list.insert(to, item);
        }
        Ok(())
    }

    /// Move the question at `from` on `from_axis` to position `to` on `to_axis`.
    ///
    /// `to` may equal the target length (append). Moving onto an axis that
    /// already holds the same id leaves both axes untouched and returns `false`.
    /// Same-axis moves behave like [`AxisRegistry::reorder`].
    pub fn move_between_axes(
        &mut self,
        from_axis: Axis,
        to_axis: Axis,
        from: usize,
        to: usize,
    ) -> Result<bool> {
        if from_axis == to_axis {
            self.reorder(from_axis, from, to)?;
            return Ok(true);
        }

        check_index(from_axis, from, self.questions(from_axis).len())?;
        let target_len = self.questions(to_axis).len();
        if to > target_len {
            return Err(CrosstabError::OutOfRange {
                axis: to_axis,
                index: to,
                len: target_len,
            });
        }

        let duplicate = self
            .questions(from_axis)
            .get(from)
            .is_some_and(|q| self.contains(to_axis, &q.id));
        if duplicate {
            return Ok(false);
        }

        let item = self.list_mut(from_axis).remove(from);
        self.list_mut(to_axis).insert(to, item);
        Ok(true)
    }

    /// Empty both axes.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.columns.clear();
    }

    fn entry_mut(&mut self, axis: Axis, index: usize) -> Result<&mut AxisQuestion> {
        let len = self.questions(axis).len();
        self.list_mut(axis)
            .get_mut(index)
            .ok_or(CrosstabError::OutOfRange { axis, index, len })
    }

    /// Set a header label background and its derived text colour.
    pub fn set_label_color(&mut self, axis: Axis, index: usize, bg_color: &str) -> Result<()> {
        let bg = color::normalize_hex(bg_color)?;
        let text = color::contrast_text_color(&bg)?;
        let entry = self.entry_mut(axis, index)?;
        entry.label_bg_color = Some(bg);
        entry.label_text_color = Some(text.to_string());
        Ok(())
    }

    /// Flip colour-picker visibility; returns the new state.
    pub fn toggle_color_picker(&mut self, axis: Axis, index: usize) -> Result<bool> {
        let entry = self.entry_mut(axis, index)?;
        entry.show_color_picker = !entry.show_color_picker;
        Ok(entry.show_color_picker)
    }
}

fn check_index(axis: Axis, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(CrosstabError::OutOfRange { axis, index, len })
    }
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
    use crate::types::Answer;

    fn question(id: &str) -> Question {
        Question::new(id, format!("Text {id}"), vec![Answer::new("a", "A", 1)])
    }

    fn registry_with_rows(ids: &[&str]) -> AxisRegistry {
        let mut registry = AxisRegistry::new();
        for id in ids {
            registry.add_question(Axis::Row, &question(id));
        }
        registry
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut registry = AxisRegistry::new();
        assert!(registry.add_question(Axis::Row, &question("Q1")));
        assert!(!registry.add_question(Axis::Row, &question("Q1")));
        assert_eq!(registry.rows().len(), 1);
        // Same id on the other axis is fine.
        assert!(registry.add_question(Axis::Column, &question("Q1")));
    }

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let mut registry = registry_with_rows(&["A", "B", "C", "D"]);
        registry.reorder(Axis::Row, 0, 2).unwrap();
        assert_eq!(registry.ids(Axis::Row), vec!["B", "C", "A", "D"]);
        registry.reorder(Axis::Row, 3, 0).unwrap();
        assert_eq!(registry.ids(Axis::Row), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_out_of_range_does_not_clamp() {
        let mut registry = registry_with_rows(&["A", "B"]);
        let err = registry.reorder(Axis::Row, 0, 2).unwrap_err();
        assert!(matches!(
            err,
            CrosstabError::OutOfRange {
                axis: Axis::Row,
                index: 2,
                len: 2
            }
        ));
        assert_eq!(registry.ids(Axis::Row), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut registry = registry_with_rows(&["A"]);
        assert!(registry.remove_question(Axis::Row, 1).is_err());
        assert!(registry.remove_question(Axis::Column, 0).is_err());
        assert_eq!(registry.remove_question(Axis::Row, 0).unwrap().id, "A");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_move_between_axes_inserts_at_position() {
        let mut registry = registry_with_rows(&["A", "B"]);
        registry.add_question(Axis::Column, &question("X"));
        assert!(registry.move_between_axes(Axis::Row, Axis::Column, 1, 0).unwrap());
        assert_eq!(registry.ids(Axis::Row), vec!["A"]);
        assert_eq!(registry.ids(Axis::Column), vec!["B", "X"]);
        // Append position is len.
        assert!(registry.move_between_axes(Axis::Row, Axis::Column, 0, 2).unwrap());
        assert_eq!(registry.ids(Axis::Column), vec!["B", "X", "A"]);
        assert!(registry.rows().is_empty());
    }

    #[test]
    fn test_move_onto_axis_holding_same_id_is_a_noop() {
        let mut registry = registry_with_rows(&["A"]);
        registry.add_question(Axis::Column, &question("A"));
        assert!(!registry.move_between_axes(Axis::Row, Axis::Column, 0, 0).unwrap());
        assert_eq!(registry.ids(Axis::Row), vec!["A"]);
        assert_eq!(registry.ids(Axis::Column), vec!["A"]);
    }

    #[test]
    fn test_move_target_index_past_end_fails() {
        let mut registry = registry_with_rows(&["A"]);
        assert!(registry.move_between_axes(Axis::Row, Axis::Column, 0, 1).is_err());
        assert_eq!(registry.ids(Axis::Row), vec!["A"]);
    }

    #[test]
    fn test_label_color() {
        let mut registry = registry_with_rows(&["A"]);
        registry.set_label_color(Axis::Row, 0, "#1F1F1F").unwrap();
        let q = &registry.rows()[0];
        assert_eq!(q.label_bg_color.as_deref(), Some("#1f1f1f"));
        assert_eq!(q.label_text_color.as_deref(), Some("#fff"));

        assert!(registry.set_label_color(Axis::Row, 0, "nope").is_err());
        assert!(registry.set_label_color(Axis::Column, 0, "#ffffff").is_err());
        assert!(registry.toggle_color_picker(Axis::Row, 0).unwrap());
        assert!(!registry.toggle_color_picker(Axis::Row, 0).unwrap());
    }
}
