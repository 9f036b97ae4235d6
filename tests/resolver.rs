//! End-to-end conflict scenarios: load from disk, resolve with a scripted
//! decision source, commit, reload.

use std::collections::VecDeque;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tally::io::store::{PRIORITY_FILE, load_priority, save_priority};
use tally::model::{PriorityItem, ReassignPolicy};
use tally::ops::{
    Conflict, ConflictChoice, InsertOutcome, ResolveDecider, duplicate_keys, resolve_insert,
};

struct Script {
    strategy: ConflictChoice,
    answers: VecDeque<Option<i64>>,
}

impl Script {
    fn new(strategy: ConflictChoice, answers: Vec<Option<i64>>) -> Self {
        Script {
            strategy,
            answers: answers.into(),
        }
    }
}

impl ResolveDecider for Script {
    fn choose_strategy(&mut self, _conflict: &Conflict) -> ConflictChoice {
        self.strategy
    }

    fn reassign_key(&mut self, _item: &PriorityItem, _rejected: Option<i64>) -> Option<i64> {
        self.answers.pop_front().unwrap_or(None)
    }
}

fn sorted_pairs(items: &[PriorityItem]) -> Vec<(i64, String)> {
    let mut pairs: Vec<(i64, String)> = items
        .iter()
        .map(|item| (item.key, item.description.clone()))
        .collect();
    pairs.sort();
    pairs
}

#[test]
fn bump_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);
    std::fs::write(&path, "1|a\n2|b\n").unwrap();

    let mut items = load_priority(&path).unwrap().items;
    let outcome = resolve_insert(
        &mut items,
        1,
        "new",
        &mut Script::new(ConflictChoice::Bump, vec![]),
        ReassignPolicy::RetryUntilValid,
    );
    assert_eq!(outcome, InsertOutcome::Bumped { shifted: 2 });

    save_priority(&path, &items).unwrap();
    let reloaded = load_priority(&path).unwrap().items;
    assert_eq!(
        sorted_pairs(&reloaded),
        vec![
            (1, "new".to_string()),
            (2, "a".to_string()),
            (3, "b".to_string()),
        ]
    );
    assert!(duplicate_keys(&reloaded).is_empty());
}

#[test]
fn manual_reassign_with_retries_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);
    std::fs::write(&path, "3|c\n1|a\n2|b\n").unwrap();

    let mut items = load_priority(&path).unwrap().items;
    // Conflict on key 2: set is [(2,b),(3,c)], walked ascending.
    // b: proposes 3 (occupied) -> retry -> 10. c: proposes 2 (the incoming
    // key) -> retry -> keeps via blank answer.
    let mut script = Script::new(
        ConflictChoice::Reassign,
        vec![Some(3), Some(10), Some(2), None],
    );
    let outcome = resolve_insert(
        &mut items,
        2,
        "new",
        &mut script,
        ReassignPolicy::RetryUntilValid,
    );
    assert_eq!(outcome, InsertOutcome::Reassigned { changed: 1, kept: 1 });

    save_priority(&path, &items).unwrap();
    let reloaded = load_priority(&path).unwrap().items;
    assert_eq!(
        sorted_pairs(&reloaded),
        vec![
            (1, "a".to_string()),
            (2, "new".to_string()),
            (3, "c".to_string()),
            (10, "b".to_string()),
        ]
    );
    assert!(duplicate_keys(&reloaded).is_empty());
}

#[test]
fn skip_policy_can_leave_a_duplicate_that_is_reported() {
    let mut items = vec![PriorityItem::new(1, "a"), PriorityItem::new(2, "b")];
    // Under SkipOnReject, "a" proposing occupied key 2 is skipped and stays
    // on key 1, which the new item also takes.
    let mut script = Script::new(ConflictChoice::Reassign, vec![Some(2), Some(9)]);
    let outcome = resolve_insert(
        &mut items,
        1,
        "new",
        &mut script,
        ReassignPolicy::SkipOnReject,
    );
    assert_eq!(outcome, InsertOutcome::Reassigned { changed: 1, kept: 1 });

    let dups = duplicate_keys(&items);
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].key, 1);
    assert_eq!(dups[0].count, 2);
}

#[test]
fn cancel_is_a_no_op_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);
    std::fs::write(&path, "1|a\n").unwrap();

    let mut items = load_priority(&path).unwrap().items;
    let outcome = resolve_insert(
        &mut items,
        1,
        "new",
        &mut Script::new(ConflictChoice::Cancel, vec![]),
        ReassignPolicy::RetryUntilValid,
    );
    assert_eq!(outcome, InsertOutcome::Cancelled);
    assert_eq!(sorted_pairs(&items), vec![(1, "a".to_string())]);
}
