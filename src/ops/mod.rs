pub mod remove;
pub mod resolve;

pub use remove::*;
pub use resolve::*;
