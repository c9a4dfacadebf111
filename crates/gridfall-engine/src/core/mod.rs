//! Core data structures: the board grid and the falling piece.

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

/// Number of rows in the playfield.
pub const ROWS: usize = 20;
/// Number of columns in the playfield.
pub const COLUMNS: usize = 10;
