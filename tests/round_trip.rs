use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tally::io::store::{
    PRIORITY_FILE, REGULAR_FILE, load_priority, load_regular, save_priority, save_regular,
};
use tally::layout::render_box_plain;
use tally::model::{Board, PriorityItem, RegularItem};

#[test]
fn priority_save_load_equivalence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);

    let items = vec![
        PriorityItem::new(5, "write report"),
        PriorityItem::new(2, "file taxes | this year"),
        PriorityItem::new(9, "héllo wörld"),
    ];
    save_priority(&path, &items).unwrap();
    let report = load_priority(&path).unwrap();

    assert_eq!(report.items, items);
    assert!(report.skipped.is_empty());
}

#[test]
fn regular_save_load_equivalence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REGULAR_FILE);

    let items = vec![
        RegularItem::new("water plants"),
        RegularItem::new("water plants"),
        RegularItem::new("call back"),
    ];
    save_regular(&path, &items).unwrap();

    assert_eq!(load_regular(&path).unwrap(), items);
}

#[test]
fn file_order_does_not_dictate_display_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);
    fs::write(&path, "3|Buy milk\n1|Pay rent\n").unwrap();

    let report = load_priority(&path).unwrap();
    // Load preserves file order...
    assert_eq!(report.items[0].description, "Buy milk");

    // ...display sorts by key.
    let board = Board::new(report.items, Vec::new());
    let lines: Vec<String> = board
        .sorted_priority()
        .iter()
        .map(|item| format!("[{}] {}", item.key, item.description))
        .collect();
    assert_eq!(lines, vec!["[1] Pay rent", "[3] Buy milk"]);

    let rendered = render_box_plain("PRIORITY TODO LIST", &lines);
    let rent = rendered.find("Pay rent").unwrap();
    let milk = rendered.find("Buy milk").unwrap();
    assert!(rent < milk, "{rendered}");
}

#[test]
fn save_is_faithful_after_reload() {
    // load -> save -> load is a fixed point
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);
    fs::write(&path, "3|Buy milk\n1|Pay rent\n").unwrap();

    let first = load_priority(&path).unwrap();
    save_priority(&path, &first.items).unwrap();
    let second = load_priority(&path).unwrap();

    assert_eq!(first.items, second.items);
    assert_eq!(fs::read_to_string(&path).unwrap(), "3|Buy milk\n1|Pay rent\n");
}

#[test]
fn malformed_lines_survive_until_commit_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(PRIORITY_FILE);
    fs::write(&path, "1|ok\ngarbage\n2|fine\n").unwrap();

    let report = load_priority(&path).unwrap();
    assert_eq!(report.items.len(), 2);
    assert_eq!(report.skipped.len(), 1);

    // Committing what loaded drops the garbage line.
    save_priority(&path, &report.items).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "1|ok\n2|fine\n");
}
