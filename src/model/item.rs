/// An item on the priority list. Keys are unique among priority items at the
/// end of every list-mutating operation; conflicts are transient inside the
/// resolver and never survive it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityItem {
    pub key: i64,
    pub description: String,
}

impl PriorityItem {
    pub fn new(key: i64, description: impl Into<String>) -> Self {
        PriorityItem {
            key,
            description: description.into(),
        }
    }
}

/// An item on the regular list. Insertion ordered, duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularItem {
    pub description: String,
}

impl RegularItem {
    pub fn new(description: impl Into<String>) -> Self {
        RegularItem {
            description: description.into(),
        }
    }
}
