//! Game engine logic and state management.
//!
//! - [`GameField`] - board, falling piece, hold slot, and piece source
//! - [`GameSession`] - gravity timing, scoring, and session restarts
//! - [`GameStats`] - score, line counts, and the derived drop interval
//! - [`PieceSource`] - seedable uniform piece generation
//!
//! A session advances by feeding elapsed time into
//! [`GameSession::advance`]; input actions are applied immediately through
//! the `try_*` methods, each validated by the same collision rule as
//! gravity. When a freshly spawned piece collides, the session wipes the
//! board and continues as a new game.

pub use self::{game_field::*, game_session::*, game_stats::*, piece_source::*};

mod game_field;
mod game_session;
mod game_stats;
mod piece_source;
