//! Removal of priority items, optional gap compaction, and duplicate-key
//! detection.

use indexmap::IndexMap;

use crate::model::config::CompactionPolicy;
use crate::model::item::PriorityItem;

#[derive(Debug, thiserror::Error)]
pub enum RemoveError {
    #[error("no priority item with key {0}")]
    NotFound(i64),
}

/// A key held by more than one item after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: i64,
    pub count: usize,
}

/// What a removal did to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: PriorityItem,
    /// Items whose key was decremented to close the gap.
    pub compacted: usize,
    /// Duplicate keys left in the list. Reported, never auto-resolved.
    pub warnings: Vec<DuplicateKey>,
}

/// Remove the first item holding `key`, then apply the compaction policy
/// (decrement every key above the removed one, or leave gaps alone).
///
/// Compaction after removal can collide keys — e.g. a list that was already
/// carrying a duplicate, or keys exactly one apart from a pre-existing
/// duplicate pair. Those are surfaced as warnings in the report; resolving
/// them is the user's call.
pub fn remove_and_compact(
    items: &mut Vec<PriorityItem>,
    key: i64,
    policy: CompactionPolicy,
) -> Result<RemovalReport, RemoveError> {
    let idx = items
        .iter()
        .position(|item| item.key == key)
        .ok_or(RemoveError::NotFound(key))?;
    let removed = items.remove(idx);

    let mut compacted = 0;
    if policy == CompactionPolicy::CloseGap {
        for item in items.iter_mut() {
            if item.key > key {
                item.key -= 1;
                compacted += 1;
            }
        }
    }

    Ok(RemovalReport {
        removed,
        compacted,
        warnings: duplicate_keys(items),
    })
}

/// Keys held by more than one item, in first-seen order.
pub fn duplicate_keys(items: &[PriorityItem]) -> Vec<DuplicateKey> {
    let mut counts: IndexMap<i64, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item.key).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(key, count)| DuplicateKey { key, count })
        .collect()
}
