use crate::model::item::{PriorityItem, RegularItem};

/// In-memory session state: both lists plus the dirty flag tracking
/// divergence from disk. Lists keep insertion order; the priority list's
/// display order is derived, never stored.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub priority: Vec<PriorityItem>,
    pub regular: Vec<RegularItem>,
    dirty: bool,
}

impl Board {
    pub fn new(priority: Vec<PriorityItem>, regular: Vec<RegularItem>) -> Self {
        Board {
            priority,
            regular,
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called after a successful commit.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Priority items sorted ascending by key. The sort is stable, though
    /// equal keys must not persist past a resolver call.
    pub fn sorted_priority(&self) -> Vec<&PriorityItem> {
        let mut sorted: Vec<&PriorityItem> = self.priority.iter().collect();
        sorted.sort_by_key(|item| item.key);
        sorted
    }

    pub fn find_key(&self, key: i64) -> Option<&PriorityItem> {
        self.priority.iter().find(|item| item.key == key)
    }
}
