//! Grid coordinates and cardinal moves.

pub mod position;

pub use position::{manhattan, Direction, Position, CARDINAL_DIRECTIONS};
