//! The interactive session: menu loop, prompts, and wiring between the
//! cores and the terminal. Everything here is sequential I/O glue; the
//! layout engine and the resolver never see stdin or stdout.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;

use crate::cli::commands::Cli;
use crate::io::config_io::{self, ConfigError};
use crate::io::state::{self, SessionState};
use crate::io::store::{self, SkippedLine, StoreError};
use crate::layout::indent;
use crate::model::{AppConfig, Board, PriorityItem, RegularItem};
use crate::ops::{
    self, Conflict, ConflictChoice, InsertOutcome, RemoveError, ResolveDecider,
};
use crate::session::screen::{self, Screen};
use crate::session::theme::{self, Theme};
use crate::util::unicode::truncate_to_width;

/// Cosmetic pacing before "press ENTER" prompts.
const PAUSE: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Where the two list files live.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub dir: PathBuf,
    pub priority: PathBuf,
    pub regular: PathBuf,
}

impl StorePaths {
    pub fn in_dir(dir: PathBuf) -> Self {
        let priority = dir.join(store::PRIORITY_FILE);
        let regular = dir.join(store::REGULAR_FILE);
        StorePaths {
            dir,
            priority,
            regular,
        }
    }
}

/// Run the session against the real terminal.
pub fn run(cli: &Cli) -> Result<(), SessionError> {
    let stdin = io::stdin();
    run_with(cli, stdin.lock(), screen::stdout_screen())
}

/// Run the session with injected input and output, for tests.
pub fn run_with<R: BufRead, W: Write>(
    cli: &Cli,
    mut input: R,
    mut screen: Screen<W>,
) -> Result<(), SessionError> {
    let (dir, mode) = resolve_storage_dir(cli, &mut input, &mut screen)?;
    fs::create_dir_all(&dir)?;

    let config = config_io::load_config(&dir)?;
    let theme = Theme::new(config.color && !cli.no_color);

    let paths = StorePaths::in_dir(dir);
    let priority = store::load_priority(&paths.priority)?;
    let regular = store::load_regular(&paths.regular)?;

    let mut state = state::read_session_state(&paths.dir).unwrap_or_default();
    state.storage_mode = mode.to_string();

    let mut app = App {
        input,
        screen,
        theme,
        config,
        paths,
        state,
        board: Board::new(priority.items, regular),
        load_skipped: priority.skipped,
    };
    app.run()
}

/// Pick the storage directory from flags, falling back to the interactive
/// startup prompt. Only the platform home variable is consulted for the
/// global location.
fn resolve_storage_dir<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    screen: &mut Screen<W>,
) -> Result<(PathBuf, &'static str), SessionError> {
    if let Some(dir) = &cli.dir {
        return Ok((dir.clone(), "custom"));
    }
    if cli.local {
        return Ok((PathBuf::from("."), "local"));
    }
    if cli.global {
        return Ok((global_dir(), "global"));
    }

    screen.print(&format!(
        "\n{}",
        crate::layout::render_box_plain(
            "",
            &["░▒▓ TALLY v0.1 ▓▒░", "Your retro task tracker"]
        )
    ))?;
    screen.print(
        "\n  ═══ FILE LOCATION SETUP ═══\n\n\
         \x20 [1] Local - todo lists in the current directory\n\
         \x20 [2] Global - todo lists in ~/Documents/todo\n\n\
         \x20 > Select mode: ",
    )?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.trim() == "2" {
        Ok((global_dir(), "global"))
    } else {
        Ok((PathBuf::from("."), "local"))
    }
}

fn global_dir() -> PathBuf {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let home = std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("Documents").join("todo")
}

struct App<R: BufRead, W: Write> {
    input: R,
    screen: Screen<W>,
    theme: Theme,
    config: AppConfig,
    paths: StorePaths,
    state: SessionState,
    board: Board,
    load_skipped: Vec<SkippedLine>,
}

impl<R: BufRead, W: Write> App<R, W> {
    fn run(&mut self) -> Result<(), SessionError> {
        self.report_load_issues()?;

        loop {
            self.screen.clear()?;
            self.draw_header()?;
            self.show_priority_list()?;
            self.show_regular_list()?;
            self.show_menu()?;

            let Some(choice) = read_line(&mut self.input)? else {
                break; // stdin closed
            };
            match choice.trim() {
                "1" => self.view_list()?,
                "2" => self.add_item()?,
                "3" => self.remove_item()?,
                "4" => self.commit_changes()?,
                "5" => {
                    if self.confirm_exit()? {
                        self.notice("═══ Thanks for using tally! ═══\n\n")?;
                        break;
                    }
                }
                _ => {
                    self.error("Invalid option")?;
                    self.pause()?;
                }
            }
        }
        Ok(())
    }

    /// Lines dropped while loading the priority file are reported once, up
    /// front, so nothing disappears silently on the next commit.
    fn report_load_issues(&mut self) -> Result<(), SessionError> {
        if self.load_skipped.is_empty() {
            return Ok(());
        }
        self.error(&format!(
            "Skipped {} malformed line(s) in {}:",
            self.load_skipped.len(),
            self.paths.priority.display()
        ))?;
        let skipped = std::mem::take(&mut self.load_skipped);
        for s in &skipped {
            self.screen
                .print(&format!("      line {}: {} ({})\n", s.line, s.text, s.reason))?;
        }
        self.screen
            .print("  These lines will not survive the next commit.\n")?;
        self.pause()?;
        Ok(())
    }

    // ── rendering ──────────────────────────────────────────────────

    fn draw_header(&mut self) -> Result<(), SessionError> {
        let banner = self.theme.boxed(
            "",
            &["░▒▓ TALLY v0.1 ▓▒░", "A retro two-list todo tracker"],
            self.theme.header_style(),
        );
        self.screen.print(&banner)?;

        if self.board.is_dirty() {
            let line = format!(
                "{}  [*] UNCOMMITTED CHANGES{}\n\n",
                self.theme.paint(theme::YELLOW),
                self.theme.reset()
            );
            self.screen.print(&line)?;
        } else {
            let line = format!(
                "{}  [✓] All changes committed{}\n\n",
                self.theme.paint(theme::GREEN),
                self.theme.reset()
            );
            self.screen.print(&line)?;
        }
        Ok(())
    }

    fn priority_lines(&self) -> Vec<String> {
        let sorted = self.board.sorted_priority();
        if sorted.is_empty() {
            return vec!["(empty)".to_string()];
        }
        let budget = self.screen.width().saturating_sub(10).max(20);
        sorted
            .iter()
            .map(|item| truncate_to_width(&format!("[{}] {}", item.key, item.description), budget))
            .collect()
    }

    fn regular_lines(&self) -> Vec<String> {
        if self.board.regular.is_empty() {
            return vec!["(empty)".to_string()];
        }
        let budget = self.screen.width().saturating_sub(10).max(20);
        self.board
            .regular
            .iter()
            .map(|item| truncate_to_width(&format!("• {}", item.description), budget))
            .collect()
    }

    fn show_priority_list(&mut self) -> Result<(), SessionError> {
        let boxed = self.theme.boxed(
            "PRIORITY TODO LIST",
            &self.priority_lines(),
            self.theme.priority_style(),
        );
        self.screen.print(&indent(&boxed, "  "))?;
        Ok(())
    }

    fn show_regular_list(&mut self) -> Result<(), SessionError> {
        let boxed = self.theme.boxed(
            "REGULAR TODO LIST",
            &self.regular_lines(),
            self.theme.regular_style(),
        );
        self.screen.print(&indent(&boxed, "  "))?;
        Ok(())
    }

    fn separator(&mut self) -> Result<(), SessionError> {
        let line = format!(
            "{}{}{}\n",
            self.theme.paint(theme::BLUE),
            "=".repeat(72),
            self.theme.reset()
        );
        self.screen.print(&line)?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), SessionError> {
        self.separator()?;
        let commit_marker = if self.board.is_dirty() { "[*] " } else { "" };
        let menu = format!(
            "{}  [1] View TODO list\n\
             \x20 [2] Add item\n\
             \x20 [3] Remove item\n\
             \x20 [4] {}Commit changes\n\
             \x20 [5] Exit (discard uncommitted changes){}\n",
            self.theme.paint(theme::CYAN),
            commit_marker,
            self.theme.reset()
        );
        self.screen.print(&menu)?;
        self.separator()?;
        self.prompt("\n  > Enter command: ")?;
        Ok(())
    }

    // ── menu actions ───────────────────────────────────────────────

    fn view_list(&mut self) -> Result<(), SessionError> {
        self.screen.clear()?;
        self.draw_header()?;
        self.screen.print(
            "  ═══ CHOOSE LIST TO VIEW ═══\n\n  [1] Priority list\n  [2] Regular list\n\n",
        )?;
        self.prompt("  > Select list: ")?;
        let choice = read_line(&mut self.input)?.unwrap_or_default();
        if choice.trim() == "2" {
            self.show_regular_list()?;
        } else {
            self.show_priority_list()?;
        }
        self.pause()?;
        Ok(())
    }

    fn add_item(&mut self) -> Result<(), SessionError> {
        self.screen.clear()?;
        self.draw_header()?;
        self.screen
            .print("  ═══ ADD TODO ITEM ═══\n\n  [1] Priority item\n  [2] Regular item\n\n")?;
        self.prompt("  > Select type: ")?;
        let choice = read_line(&mut self.input)?.unwrap_or_default();

        match choice.trim() {
            "1" => self.add_priority_item()?,
            "2" => self.add_regular_item()?,
            _ => self.error("Invalid selection")?,
        }
        self.pause()?;
        Ok(())
    }

    fn add_priority_item(&mut self) -> Result<(), SessionError> {
        self.prompt("\n  Enter priority number: ")?;
        let Some(key) = read_line(&mut self.input)?.and_then(|l| l.trim().parse::<i64>().ok())
        else {
            self.error("Priority must be an integer")?;
            return Ok(());
        };

        self.prompt("  Enter description: ")?;
        let description = read_line(&mut self.input)?.unwrap_or_default();
        let description = description.trim();
        if description.is_empty() {
            self.error("Description cannot be empty")?;
            return Ok(());
        }

        let App {
            input,
            screen,
            theme,
            board,
            config,
            ..
        } = self;
        let mut decider = InteractiveDecider {
            input,
            screen,
            theme: &*theme,
        };
        let outcome = ops::resolve_insert(
            &mut board.priority,
            key,
            description,
            &mut decider,
            config.reassign_retry,
        );

        match outcome {
            InsertOutcome::Inserted => {
                self.board.mark_dirty();
                self.success("Priority item added")?;
            }
            InsertOutcome::Bumped { shifted } => {
                self.board.mark_dirty();
                self.success(&format!("Item added, {shifted} key(s) bumped up"))?;
            }
            InsertOutcome::Reassigned { changed, kept } => {
                self.board.mark_dirty();
                self.success(&format!(
                    "Item added ({changed} reassigned, {kept} kept)"
                ))?;
                self.warn_duplicates()?;
            }
            InsertOutcome::Cancelled => {
                self.error("Addition cancelled")?;
            }
        }
        Ok(())
    }

    fn add_regular_item(&mut self) -> Result<(), SessionError> {
        self.prompt("\n  Enter description: ")?;
        let description = read_line(&mut self.input)?.unwrap_or_default();
        let description = description.trim();
        if description.is_empty() {
            self.error("Description cannot be empty")?;
            return Ok(());
        }
        self.board.regular.push(RegularItem::new(description));
        self.board.mark_dirty();
        self.success("Regular item added")?;
        Ok(())
    }

    fn remove_item(&mut self) -> Result<(), SessionError> {
        self.screen.clear()?;
        self.draw_header()?;
        self.screen
            .print("  ═══ REMOVE TODO ITEM ═══\n\n  [1] Priority list\n  [2] Regular list\n\n")?;
        self.prompt("  > Select list: ")?;
        let choice = read_line(&mut self.input)?.unwrap_or_default();

        match choice.trim() {
            "1" => self.remove_priority_item()?,
            "2" => self.remove_regular_item()?,
            _ => self.error("Invalid selection")?,
        }
        self.pause()?;
        Ok(())
    }

    fn remove_priority_item(&mut self) -> Result<(), SessionError> {
        if self.board.priority.is_empty() {
            self.error("Priority list is empty")?;
            return Ok(());
        }

        self.screen.print("\n")?;
        self.show_priority_list()?;
        self.prompt("\n  > Enter key to remove (blank to cancel): ")?;
        let Some(key) = read_line(&mut self.input)?.and_then(|l| l.trim().parse::<i64>().ok())
        else {
            self.error("Removal cancelled")?;
            return Ok(());
        };

        let Some(item) = self.board.find_key(key) else {
            self.error("Key not found")?;
            return Ok(());
        };
        let prompt = format!("\n  Remove: {}? (y/n): ", item.description);
        if !self.confirm(&prompt)? {
            self.error("Removal cancelled")?;
            return Ok(());
        }

        match ops::remove_and_compact(&mut self.board.priority, key, self.config.compact_on_remove)
        {
            Ok(report) => {
                self.board.mark_dirty();
                if report.compacted > 0 {
                    self.success(&format!(
                        "Item removed, {} key(s) shifted down",
                        report.compacted
                    ))?;
                } else {
                    self.success("Item removed")?;
                }
                for w in &report.warnings {
                    self.error(&format!(
                        "Key {} is now held by {} items",
                        w.key, w.count
                    ))?;
                }
            }
            Err(RemoveError::NotFound(_)) => {
                self.error("Key not found")?;
            }
        }
        Ok(())
    }

    fn remove_regular_item(&mut self) -> Result<(), SessionError> {
        if self.board.regular.is_empty() {
            self.error("Regular list is empty")?;
            return Ok(());
        }

        self.screen.print("\n")?;
        for (i, item) in self.board.regular.iter().enumerate() {
            self.screen
                .print(&format!("  [{}] {}\n", i + 1, item.description))?;
        }
        self.prompt("\n  > Select item to remove (blank to cancel): ")?;
        let Some(index) = read_line(&mut self.input)?.and_then(|l| l.trim().parse::<usize>().ok())
        else {
            self.error("Removal cancelled")?;
            return Ok(());
        };
        if index < 1 || index > self.board.regular.len() {
            self.error("Removal cancelled")?;
            return Ok(());
        }

        let prompt = format!(
            "\n  Remove: {}? (y/n): ",
            self.board.regular[index - 1].description
        );
        if self.confirm(&prompt)? {
            self.board.regular.remove(index - 1);
            self.board.mark_dirty();
            self.success("Item removed")?;
        } else {
            self.error("Removal cancelled")?;
        }
        Ok(())
    }

    fn commit_changes(&mut self) -> Result<(), SessionError> {
        if !self.board.is_dirty() {
            self.notice("[i] No changes to commit\n")?;
            self.pause()?;
            return Ok(());
        }

        self.screen.clear()?;
        self.draw_header()?;
        self.screen
            .print("  ═══ COMMIT CHANGES ═══\n\n  The following will be saved:\n\n")?;
        self.show_priority_list()?;
        self.show_regular_list()?;

        if !self.confirm("  Confirm commit? (y/n): ")? {
            self.error("Commit cancelled")?;
            self.pause()?;
            return Ok(());
        }

        // Per-file atomicity only; a failure leaves memory and the dirty
        // flag untouched so the commit can be retried.
        let result = store::save_priority(&self.paths.priority, &self.board.priority)
            .and_then(|()| store::save_regular(&self.paths.regular, &self.board.regular));
        match result {
            Ok(()) => {
                self.board.clear_dirty();
                self.state.last_commit = Some(Utc::now());
                if let Err(e) = state::write_session_state(&self.paths.dir, &self.state) {
                    self.error(&format!("Could not record session state: {e}"))?;
                }
                self.success("Changes committed successfully!")?;
            }
            Err(e) => {
                self.error(&format!("{e}"))?;
                self.error("Commit aborted; your changes are still in memory")?;
            }
        }
        self.pause()?;
        Ok(())
    }

    fn confirm_exit(&mut self) -> Result<bool, SessionError> {
        if !self.board.is_dirty() {
            return Ok(true);
        }
        self.confirm("\n  [!] You have uncommitted changes. Exit anyway? (y/n): ")
    }

    // ── prompting helpers ──────────────────────────────────────────

    fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        let line = format!(
            "{}{}{}",
            self.theme.paint(theme::YELLOW),
            text,
            self.theme.reset()
        );
        self.screen.print(&line)?;
        Ok(())
    }

    fn confirm(&mut self, text: &str) -> Result<bool, SessionError> {
        self.prompt(text)?;
        let answer = read_line(&mut self.input)?.unwrap_or_default();
        Ok(matches!(answer.trim(), "y" | "Y"))
    }

    fn pause(&mut self) -> Result<(), SessionError> {
        std::thread::sleep(PAUSE);
        self.prompt("\n  Press ENTER to continue...")?;
        read_line(&mut self.input)?;
        self.screen.print("\n")?;
        Ok(())
    }

    fn success(&mut self, text: &str) -> Result<(), SessionError> {
        let line = format!(
            "{}\n  [✓] {}{}\n",
            self.theme.paint(theme::GREEN),
            text,
            self.theme.reset()
        );
        self.screen.print(&line)?;
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<(), SessionError> {
        let line = format!(
            "{}\n  [✗] {}{}\n",
            self.theme.paint(theme::RED),
            text,
            self.theme.reset()
        );
        self.screen.print(&line)?;
        Ok(())
    }

    fn notice(&mut self, text: &str) -> Result<(), SessionError> {
        let line = format!(
            "{}\n  {}{}",
            self.theme.paint(theme::CYAN),
            text,
            self.theme.reset()
        );
        self.screen.print(&line)?;
        Ok(())
    }

    fn warn_duplicates(&mut self) -> Result<(), SessionError> {
        let warnings = ops::duplicate_keys(&self.board.priority);
        for w in &warnings {
            self.error(&format!("Key {} is now held by {} items", w.key, w.count))?;
        }
        Ok(())
    }
}

/// Read one line, trimming the terminator. `None` means stdin is closed.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Conflict decisions sourced from the interactive prompt. A read failure
/// or unparseable answer degrades to the safe choice (cancel / keep).
struct InteractiveDecider<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    screen: &'a mut Screen<W>,
    theme: &'a Theme,
}

impl<R: BufRead, W: Write> InteractiveDecider<'_, R, W> {
    fn say(&mut self, text: &str) {
        let _ = self.screen.print(text);
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.say(&format!(
            "{}{}{}",
            self.theme.paint(theme::YELLOW),
            prompt,
            self.theme.reset()
        ));
        read_line(self.input).ok().flatten()
    }
}

impl<R: BufRead, W: Write> ResolveDecider for InteractiveDecider<'_, R, W> {
    fn choose_strategy(&mut self, conflict: &Conflict) -> ConflictChoice {
        self.say(&format!(
            "{}\n  [!] Priority {} already exists!{}\n",
            self.theme.paint(theme::RED),
            conflict.key,
            self.theme.reset()
        ));
        self.say(&format!(
            "      Current item: {}{}{}\n\n",
            self.theme.paint(theme::CYAN),
            conflict.holder.description,
            self.theme.reset()
        ));
        self.say(
            "  [1] Bump - shift every key at or above it up by one\n\
             \x20 [2] Reassign - pick replacement keys by hand\n\
             \x20 [3] Cancel\n\n",
        );

        match self.ask("  > Select option: ").as_deref().map(str::trim) {
            Some("1") => ConflictChoice::Bump,
            Some("2") => {
                self.say("\n  ═══ MANUAL PRIORITY REASSIGNMENT ═══\n\n  Items that need reassignment:\n\n");
                for item in &conflict.conflict_set {
                    self.say(&format!("  [{}] {}\n", item.key, item.description));
                }
                self.say(&format!("\n  New item:\n  [{}] (incoming)\n\n", conflict.key));
                ConflictChoice::Reassign
            }
            _ => ConflictChoice::Cancel,
        }
    }

    fn reassign_key(&mut self, item: &PriorityItem, rejected: Option<i64>) -> Option<i64> {
        if let Some(key) = rejected {
            self.say(&format!(
                "{}  [!] Priority {} is already assigned. Try again.{}\n",
                self.theme.paint(theme::RED),
                key,
                self.theme.reset()
            ));
        } else {
            self.say(&format!(
                "{}  Reassign [{}] {}{}\n",
                self.theme.paint(theme::CYAN),
                item.key,
                item.description,
                self.theme.reset()
            ));
        }
        self.ask("  New priority (blank to keep): ")?
            .trim()
            .parse::<i64>()
            .ok()
    }
}
