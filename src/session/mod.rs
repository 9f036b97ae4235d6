pub mod app;
pub mod screen;
pub mod theme;

pub use app::{run, run_with, SessionError};
pub use screen::Screen;
pub use theme::Theme;
