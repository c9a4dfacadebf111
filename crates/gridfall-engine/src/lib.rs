pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned by piece operations (move, rotate, soft drop) whose tentative
/// position would overlap the board or its boundaries. Callers treat this
/// as a game-logic outcome, not a fault.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding at the attempted position")]
pub struct PieceCollisionError;

/// Returned when hold is attempted a second time for the same active piece.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("hold already used for this piece")]
pub struct HoldError;

/// Returned when a freshly spawned piece immediately overlaps the board.
///
/// This is the sole fatal condition for a session; [`GameSession`] reacts
/// by wiping the board and starting over rather than terminating.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("freshly spawned piece collides with the board")]
pub struct SpawnCollisionError;
