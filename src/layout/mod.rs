pub mod boxes;
pub mod width;

pub use boxes::*;
pub use width::*;
