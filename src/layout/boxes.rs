//! Bordered-box rendering and block indentation.
//!
//! Boxes are built from double-line corners with single-line sides, the
//! title centered in the top border, and every body row centered within the
//! inner width. All measurement goes through [`visible_width`], so content
//! and styles may carry ANSI escapes without breaking alignment.

use crate::layout::width::{has_visible_content, visible_width};

/// Fixed padding added to the widest content line / title.
pub const PADDING: usize = 2;

/// Minimum border fill on each side of a centered title.
const MIN_TITLE_MARGIN: usize = 3;

/// SGR reset, appended after every styled row.
pub const RESET: &str = "\x1b[0m";

/// ANSI prefixes applied per row of a styled box.
#[derive(Debug, Clone, Copy)]
pub struct BoxStyle {
    /// Prefix for body rows (content plus side borders).
    pub body: &'static str,
    /// Prefix for the top and bottom border rows.
    pub bar: &'static str,
}

/// Render a styled box. Each row is wrapped in the relevant style prefix and
/// followed by a reset. The reset lands after the row's newline, matching the
/// trailing-fragment rule in [`indent`].
pub fn render_box<S: AsRef<str>>(title: &str, lines: &[S], style: &BoxStyle) -> String {
    let title = padded_title(title);
    let width = inner_width(&title, lines);

    let mut out = String::new();
    out.push_str(style.bar);
    out.push_str(&top_border(&title, width));
    out.push_str(RESET);
    for line in lines {
        out.push_str(style.body);
        out.push_str(&body_row(line.as_ref(), width));
        out.push_str(RESET);
    }
    out.push_str(style.bar);
    out.push_str(&bottom_border(width));
    out.push_str(RESET);
    out
}

/// Render a box with the same layout as [`render_box`] but no styling.
pub fn render_box_plain<S: AsRef<str>>(title: &str, lines: &[S]) -> String {
    let title = padded_title(title);
    let width = inner_width(&title, lines);

    let mut out = String::new();
    out.push_str(&top_border(&title, width));
    for line in lines {
        out.push_str(&body_row(line.as_ref(), width));
    }
    out.push_str(&bottom_border(width));
    out
}

/// Render a box around a single body line, unstyled.
///
/// Unlike the multi-line shapes this one applies no minimum-title-width
/// rule: the inner width is just the wider of title and body plus padding.
pub fn render_box_line(title: &str, body: &str) -> String {
    let title = padded_title(title);
    let width = visible_width(&title).max(visible_width(body)) + PADDING;

    let mut out = String::new();
    out.push_str(&top_border(&title, width));
    out.push_str(&body_row(body, width));
    out.push_str(&bottom_border(width));
    out
}

/// Prefix every complete line of `text` with `prefix`.
///
/// A trailing fragment without a terminating newline is prefixed only when
/// it has visible content; leftover reset codes or blank padding after the
/// last newline are appended verbatim so they don't pick up indentation.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::new();
    let mut line = String::new();

    for c in text.chars() {
        line.push(c);
        if c == '\n' {
            out.push_str(prefix);
            out.push_str(&line);
            line.clear();
        }
    }

    if !line.is_empty() {
        if has_visible_content(&line) {
            out.push_str(prefix);
        }
        out.push_str(&line);
    }

    out
}

fn padded_title(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" {title} ")
    }
}

/// Inner width: widest of padded title and content, plus padding, with a
/// minimum when a title is present so it keeps `MIN_TITLE_MARGIN` border
/// cells on each side.
fn inner_width<S: AsRef<str>>(padded_title: &str, lines: &[S]) -> usize {
    let max_content = lines
        .iter()
        .map(|l| visible_width(l.as_ref()))
        .max()
        .unwrap_or(0);
    let title_width = visible_width(padded_title);
    let mut width = title_width.max(max_content) + PADDING;
    if !padded_title.is_empty() {
        width = width.max(title_width + 2 * MIN_TITLE_MARGIN);
    }
    width
}

fn top_border(padded_title: &str, width: usize) -> String {
    if padded_title.is_empty() {
        return format!("╔{}╗\n", "═".repeat(width));
    }
    let (left, right) = centering(visible_width(padded_title), width);
    format!("╔{}{}{}╗\n", "═".repeat(left), padded_title, "═".repeat(right))
}

fn body_row(content: &str, width: usize) -> String {
    let (left, right) = centering(visible_width(content), width);
    format!("│{}{}{}│\n", " ".repeat(left), content, " ".repeat(right))
}

fn bottom_border(width: usize) -> String {
    format!("╚{}╝\n", "═".repeat(width))
}

/// Floor-division centering; when the slack is odd the right side gets the
/// extra cell.
fn centering(content_width: usize, inner_width: usize) -> (usize, usize) {
    let slack = inner_width.saturating_sub(content_width);
    let left = slack / 2;
    (left, slack - left)
}
