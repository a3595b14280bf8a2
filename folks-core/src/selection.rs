use crate::model::PersonId;

/// Ids marked for bulk action.
///
/// Membership is independent of the page on screen: ids stay selected across
/// pagination and filter changes until cleared, so an id may refer to a row
/// that is not visible or no longer exists. Insertion order is preserved and
/// is the order bulk deletion walks. Operations return new snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<PersonId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = PersonId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            if !selection.contains(id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Checking replaces the selection with exactly the page ids (no union);
    /// unchecking clears it.
    pub fn toggled_all(&self, page_ids: &[PersonId], checked: bool) -> Self {
        if checked {
            Self::from_ids(page_ids.iter().copied())
        } else {
            Self::new()
        }
    }

    /// Symmetric difference with `{id}`
    pub fn toggled(&self, id: PersonId) -> Self {
        let mut ids = self.ids.clone();
        if let Some(pos) = ids.iter().position(|&i| i == id) {
            ids.remove(pos);
        } else {
            ids.push(id);
        }
        Self { ids }
    }

    /// Keep only ids that also appear in `keep`
    pub fn retained(&self, keep: &[PersonId]) -> Self {
        Self {
            ids: self
                .ids
                .iter()
                .copied()
                .filter(|id| keep.contains(id))
                .collect(),
        }
    }

    /// Whether the selection is exactly the given page, not a superset of it.
    ///
    /// Drives the "select all" checkbox: a larger cross-page selection that
    /// happens to include every visible row does not count as all checked.
    pub fn covers_exactly(&self, page_ids: &[PersonId]) -> bool {
        if page_ids.is_empty() {
            return false;
        }
        let page = Self::from_ids(page_ids.iter().copied());
        page.len() == self.len() && page.ids.iter().all(|&id| self.contains(id))
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[PersonId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
