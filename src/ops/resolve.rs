//! Priority-conflict resolution for insertions.
//!
//! The resolver is a pure function over the list and the decisions supplied
//! through [`ResolveDecider`]; it never reads input or prints. Bump always
//! restores the unique-key invariant. A manual pass restores it when every
//! conflicting item ends up on a free key; declining to move an item (skip,
//! or keeping its current key) can leave a duplicate behind, which the caller
//! detects with [`crate::ops::duplicate_keys`] and reports.

use crate::model::config::ReassignPolicy;
use crate::model::item::PriorityItem;

/// Everything the caller needs to present a conflict to the user.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The contested key.
    pub key: i64,
    /// The item currently holding that key.
    pub holder: PriorityItem,
    /// All items with key >= the contested key, sorted ascending. This is
    /// the set a bump would shift and a manual pass would walk.
    pub conflict_set: Vec<PriorityItem>,
}

/// Strategy picked when an insertion hits an occupied key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Bump,
    Reassign,
    Cancel,
}

/// Result of [`resolve_insert`]. Every variant except `Cancelled` means the
/// new item is in the list and keys are unique again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No conflict; appended directly.
    Inserted,
    /// Auto-bump: `shifted` items had their keys incremented by one.
    Bumped { shifted: usize },
    /// Manual pass: `changed` items got new keys, `kept` stayed put.
    Reassigned { changed: usize, kept: usize },
    /// Nothing was mutated.
    Cancelled,
}

impl InsertOutcome {
    pub fn inserted(&self) -> bool {
        !matches!(self, InsertOutcome::Cancelled)
    }
}

/// Supplies user decisions to the resolver.
pub trait ResolveDecider {
    /// Pick a strategy for the presented conflict.
    fn choose_strategy(&mut self, conflict: &Conflict) -> ConflictChoice;

    /// Solicit a replacement key for `item` during a manual pass.
    ///
    /// `rejected` carries the previously proposed key when re-soliciting
    /// after a collision. Returning `None` keeps the item's current key.
    fn reassign_key(&mut self, item: &PriorityItem, rejected: Option<i64>) -> Option<i64>;
}

/// Insert a new priority item with key `key`, resolving any conflict through
/// `decider`.
///
/// No conflict: the item is appended and nothing else changes. On conflict
/// the decider picks bump (one pass incrementing every key >= `key`), manual
/// reassignment (walk the conflict set ascending, soliciting replacement
/// keys), or cancel. A manual proposal is rejected if it collides with any
/// other occupied key, including `key` itself, which the new item takes;
/// `policy` decides whether rejection re-solicits or skips the item.
pub fn resolve_insert(
    items: &mut Vec<PriorityItem>,
    key: i64,
    description: &str,
    decider: &mut dyn ResolveDecider,
    policy: ReassignPolicy,
) -> InsertOutcome {
    let holder = match items.iter().find(|item| item.key == key) {
        Some(holder) => holder.clone(),
        None => {
            items.push(PriorityItem::new(key, description));
            return InsertOutcome::Inserted;
        }
    };

    let mut conflict_set: Vec<PriorityItem> = items
        .iter()
        .filter(|item| item.key >= key)
        .cloned()
        .collect();
    conflict_set.sort_by_key(|item| item.key);

    let conflict = Conflict {
        key,
        holder,
        conflict_set,
    };

    match decider.choose_strategy(&conflict) {
        ConflictChoice::Cancel => InsertOutcome::Cancelled,
        ConflictChoice::Bump => {
            let mut shifted = 0;
            for item in items.iter_mut() {
                if item.key >= key {
                    item.key += 1;
                    shifted += 1;
                }
            }
            items.push(PriorityItem::new(key, description));
            InsertOutcome::Bumped { shifted }
        }
        ConflictChoice::Reassign => {
            let (changed, kept) = reassign_pass(items, key, decider, policy);
            items.push(PriorityItem::new(key, description));
            InsertOutcome::Reassigned { changed, kept }
        }
    }
}

/// Walk the conflict set in ascending key order, soliciting replacement keys.
fn reassign_pass(
    items: &mut [PriorityItem],
    key: i64,
    decider: &mut dyn ResolveDecider,
    policy: ReassignPolicy,
) -> (usize, usize) {
    let mut order: Vec<usize> = (0..items.len())
        .filter(|&i| items[i].key >= key)
        .collect();
    order.sort_by_key(|&i| items[i].key);

    let mut changed = 0;
    let mut kept = 0;

    for &idx in &order {
        let mut rejected = None;
        loop {
            let Some(proposal) = decider.reassign_key(&items[idx], rejected) else {
                kept += 1;
                break;
            };
            if proposal == items[idx].key {
                kept += 1;
                break;
            }
            let occupied = proposal == key
                || items
                    .iter()
                    .enumerate()
                    .any(|(j, item)| j != idx && item.key == proposal);
            if occupied {
                match policy {
                    ReassignPolicy::RetryUntilValid => {
                        rejected = Some(proposal);
                        continue;
                    }
                    ReassignPolicy::SkipOnReject => {
                        kept += 1;
                        break;
                    }
                }
            }
            items[idx].key = proposal;
            changed += 1;
            break;
        }
    }

    (changed, kept)
}
