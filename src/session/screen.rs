//! Output sink for the session shell. The cores return strings; everything
//! that actually touches a terminal goes through here, so tests can swap in
//! a buffer.

use std::io::{self, Write};

use crossterm::{cursor, execute, terminal};

pub struct Screen<W: Write> {
    out: W,
    /// When false (tests, pipes) clear-screen is a no-op and the width is a
    /// fixed 80 columns.
    interactive: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, interactive: bool) -> Self {
        Screen { out, interactive }
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        if self.interactive {
            execute!(
                self.out,
                terminal::Clear(terminal::ClearType::All),
                cursor::MoveTo(0, 0)
            )?;
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        if self.interactive {
            terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
        } else {
            80
        }
    }
}

/// The real thing: stdout with clear-screen enabled.
pub fn stdout_screen() -> Screen<io::Stdout> {
    Screen::new(io::stdout(), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_screen_collects_output() {
        let mut screen = Screen::new(Vec::new(), false);
        screen.print("hello ").unwrap();
        screen.clear().unwrap();
        screen.print("world").unwrap();
        assert_eq!(screen.out, b"hello world");
        assert_eq!(screen.width(), 80);
    }
}
