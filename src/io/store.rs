//! Flat-file persistence for the two lists.
//!
//! The priority file holds one `<key>|<description>` record per line (first
//! `|` delimits, no escaping); the regular file holds raw descriptions. A
//! missing file is an empty list. Malformed priority records are skipped and
//! reported, never fatal. Each file is written atomically via temp file +
//! rename; the two-file commit as a whole is not transactional.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::item::{PriorityItem, RegularItem};

pub const PRIORITY_FILE: &str = "priority_todo.txt";
pub const REGULAR_FILE: &str = "regular_todo.txt";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Why a priority record was skipped at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("missing '|' delimiter")]
    MissingDelimiter,
    #[error("key is not an integer")]
    BadKey,
}

/// A malformed line dropped during load, with enough context to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file.
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of loading the priority file: the good records plus whatever was
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub items: Vec<PriorityItem>,
    pub skipped: Vec<SkippedLine>,
}

/// Load the priority file. Missing file yields an empty report.
pub fn load_priority(path: &Path) -> Result<LoadReport, StoreError> {
    let Some(text) = read_if_present(path)? else {
        return Ok(LoadReport::default());
    };

    let mut report = LoadReport::default();
    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_priority_line(line) {
            Ok(item) => report.items.push(item),
            Err(reason) => report.skipped.push(SkippedLine {
                line: i + 1,
                text: line.to_string(),
                reason,
            }),
        }
    }
    Ok(report)
}

/// Load the regular file. Missing file yields an empty list.
pub fn load_regular(path: &Path) -> Result<Vec<RegularItem>, StoreError> {
    let Some(text) = read_if_present(path)? else {
        return Ok(Vec::new());
    };
    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(RegularItem::new)
        .collect())
}

/// Save the priority list in memory order (display sorting is derived, not
/// stored).
pub fn save_priority(path: &Path, items: &[PriorityItem]) -> Result<(), StoreError> {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!("{}|{}\n", item.key, item.description));
    }
    atomic_write(path, out.as_bytes()).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn save_regular(path: &Path, items: &[RegularItem]) -> Result<(), StoreError> {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.description);
        out.push('\n');
    }
    atomic_write(path, out.as_bytes()).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_if_present(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn parse_priority_line(line: &str) -> Result<PriorityItem, SkipReason> {
    let (key, description) = line.split_once('|').ok_or(SkipReason::MissingDelimiter)?;
    let key: i64 = key.trim().parse().map_err(|_| SkipReason::BadKey)?;
    Ok(PriorityItem::new(key, description))
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
