pub mod board;
pub mod config;
pub mod item;

pub use board::*;
pub use config::*;
pub use item::*;
