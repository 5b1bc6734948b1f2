//! Multi-select state for dragging several catalog questions at once.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::types::Question;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: HashSet<String>,
    /// Last question clicked, shown in the answers panel
    focused: Option<String>,
}

impl SelectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`; returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.focused = Some(id.to_string());
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Focus a question without changing the selection.
    pub fn focus(&mut self, id: &str) {
        self.focused = Some(id.to_string());
    }

    /// Empty the selection. Focus is kept.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Selected questions in catalog order.
    pub fn selected_in<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Question> {
        catalog
            .questions()
            .iter()
            .filter(|q| self.selected.contains(&q.id))
            .collect()
    }

    /// Text for the drag ghost: all selected ids when several are selected,
    /// otherwise the focused id.
    pub fn drag_preview_text(&self, catalog: &Catalog) -> String {
        if self.selected.len() > 1 {
            return self
                .selected_in(catalog)
                .iter()
                .map(|q| q.id.as_str())
                .collect::<Vec<_>>()
                .join(",");
        }
        self.focused.clone().unwrap_or_default()
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

    fn catalog() -> Catalog {
        Catalog::from_questions(
            ["Q1", "Q2", "Q3"]
                .iter()
                .map(|id| Question::new(*id, *id, vec![Answer::new("a", "A", 1)]))
                .collect(),
        )
    }

    #[test]
    fn test_toggle_flips_membership_and_focuses() {
        let mut selection = SelectionTracker::new();
        assert!(selection.toggle("Q2"));
        assert!(selection.contains("Q2"));
        assert!(!selection.toggle("Q2"));
        assert!(selection.is_empty());
        assert_eq!(selection.focused(), Some("Q2"));
    }

    #[test]
    fn test_selected_in_catalog_order() {
        let catalog = catalog();
        let mut selection = SelectionTracker::new();
        selection.toggle("Q3");
        selection.toggle("Q1");
        let ids: Vec<_> = selection
            .selected_in(&catalog)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(ids, vec!["Q1", "Q3"]);
        assert_eq!(selection.drag_preview_text(&catalog), "Q1,Q3");
    }

    #[test]
    fn test_drag_preview_single_uses_focus() {
        let catalog = catalog();
        let mut selection = SelectionTracker::new();
        assert_eq!(selection.drag_preview_text(&catalog), "");
        selection.toggle("Q2");
        selection.focus("Q3");
        assert_eq!(selection.drag_preview_text(&catalog), "Q3");
    }

    #[test]
    fn test_clear_keeps_focus() {
        let mut selection = SelectionTracker::new();
        selection.toggle("Q1");
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.focused(), Some("Q1"));
    }
}
