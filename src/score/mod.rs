pub mod aggregate;
pub mod scoreboard;
pub mod sort_utils;

pub use aggregate::*;
pub use scoreboard::*;
