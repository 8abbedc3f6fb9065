//! Row Selection
//!
//! Selected ids for bulk actions on a list view.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: BTreeSet<u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: u32) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn remove(&mut self, id: u32) {
        self.ids.remove(&id);
    }

    /// Select every id, or clear when all are already selected
    pub fn toggle_all(&mut self, ids: impl IntoIterator<Item = u32>) {
        let ids: BTreeSet<u32> = ids.into_iter().collect();
        if !ids.is_empty() && ids.is_subset(&self.ids) {
            self.ids.retain(|id| !ids.contains(id));
        } else {
            self.ids.extend(ids);
        }
    }

    /// Drop ids that are no longer in the list (after a re-fetch)
    pub fn retain_existing(&mut self, ids: impl IntoIterator<Item = u32>) {
        let existing: BTreeSet<u32> = ids.into_iter().collect();
        self.ids.retain(|id| existing.contains(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.ids.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut sel = Selection::new();
        sel.toggle(3);
        sel.toggle(1);
        assert_eq!(sel.ids(), vec![1, 3]);
        sel.toggle(3);
        assert_eq!(sel.ids(), vec![1]);
    }

    #[test]
    fn test_toggle_all() {
        let mut sel = Selection::new();
        sel.toggle(2);
        sel.toggle_all([1, 2, 3]);
        assert_eq!(sel.len(), 3);
        sel.toggle_all([1, 2, 3]);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_retain_existing() {
        let mut sel = Selection::new();
        sel.toggle_all([1, 2, 3]);
        sel.retain_existing([1, 3, 9]);
        assert_eq!(sel.ids(), vec![1, 3]);
    }
}
