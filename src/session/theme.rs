//! ANSI palette for the session shell. The cores only ever see the SGR
//! strings; whether they are applied at all is decided here.

use crate::layout::{BoxStyle, render_box, render_box_plain};

pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const CYAN_BOLD: &str = "\x1b[36m\x1b[1m";
pub const MAGENTA_BOLD: &str = "\x1b[35m\x1b[1m";
pub const GREEN_BOLD: &str = "\x1b[32m\x1b[1m";

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Theme { color }
    }

    /// The SGR prefix, or nothing when colors are off.
    pub fn paint(&self, code: &'static str) -> &'static str {
        if self.color { code } else { "" }
    }

    pub fn reset(&self) -> &'static str {
        self.paint(RESET)
    }

    /// Render a box through the styled or plain call shape depending on the
    /// color setting.
    pub fn boxed<S: AsRef<str>>(&self, title: &str, lines: &[S], style: BoxStyle) -> String {
        if self.color {
            render_box(title, lines, &style)
        } else {
            render_box_plain(title, lines)
        }
    }

    pub fn header_style(&self) -> BoxStyle {
        BoxStyle {
            body: CYAN_BOLD,
            bar: CYAN_BOLD,
        }
    }

    pub fn priority_style(&self) -> BoxStyle {
        BoxStyle {
            body: CYAN,
            bar: MAGENTA_BOLD,
        }
    }

    pub fn regular_style(&self) -> BoxStyle {
        BoxStyle {
            body: CYAN,
            bar: GREEN_BOLD,
        }
    }
}
