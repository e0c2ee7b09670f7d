pub mod aggregate;
pub mod apply;
pub mod delta;
pub mod grid;
pub mod schedule;
pub mod suggestions;
