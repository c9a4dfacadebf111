use std::time::Duration;

use crate::{
    HoldError, PieceCollisionError,
    core::{board::Board, piece::Piece},
};

use super::{GameField, GameStats, HeldPiece, piece_source::PieceSource};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
}

/// A running game: field, statistics, and gravity timing.
///
/// The session is advanced by feeding it elapsed wall-clock time through
/// [`Self::advance`]; it accumulates time and performs one gravity drop
/// each time the accumulator crosses the current drop interval. The caller
/// may supply a fixed interval or frame deltas, as long as elapsed time
/// keeps increasing.
///
/// A spawn collision is handled inside the session: the board is wiped,
/// the score and drop interval reset, and play continues as a new game.
/// There is no terminal state.
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    state: SessionState,
    drop_interval: Duration,
    gravity_accumulator: Duration,
    completed_sessions: usize,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(PieceSource::new())
    }

    /// Like [`Self::new`], but drawing pieces from the given source.
    #[must_use]
    pub fn with_source(piece_source: PieceSource) -> Self {
        let stats = GameStats::new();
        let drop_interval = stats.drop_interval();
        Self {
            field: GameField::with_source(piece_source),
            stats,
            state: SessionState::Playing,
            drop_interval,
            gravity_accumulator: Duration::ZERO,
            completed_sessions: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<&HeldPiece> {
        self.field.held_piece()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The current time between gravity drops.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.drop_interval
    }

    /// Number of games that ended in a top-out since the session started.
    #[must_use]
    pub fn completed_sessions(&self) -> usize {
        self.completed_sessions
    }

    /// Where the falling piece would land if dropped straight down.
    #[must_use]
    pub fn drop_preview(&self) -> Piece {
        self.field.drop_preview()
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
        };
    }

    /// Feeds elapsed time into the gravity accumulator, performing one
    /// gravity drop per crossed drop interval. No-op while paused.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.state.is_paused() {
            return;
        }
        self.gravity_accumulator += elapsed;
        while self.gravity_accumulator >= self.drop_interval {
            self.gravity_accumulator -= self.drop_interval;
            self.gravity_step();
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.field.try_move_left()
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.field.try_move_right()
    }

    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        self.field.try_rotate()
    }

    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        self.field.try_hold()
    }

    /// Player-initiated drop: one gravity step applied immediately,
    /// locking the piece in if it is already resting.
    pub fn soft_drop(&mut self) {
        self.gravity_step();
    }

    fn gravity_step(&mut self) {
        if self.field.try_soft_drop().is_ok() {
            return;
        }
        self.complete_piece_drop();
    }

    fn complete_piece_drop(&mut self) {
        let (cleared_lines, spawn) = self.field.complete_piece_drop();
        self.stats.complete_piece_drop(cleared_lines);
        if cleared_lines > 0 {
            self.drop_interval = self.stats.drop_interval();
        }
        if spawn.is_err() {
            self.restart();
        }
    }

    /// Game over: wipe the board and start a fresh game with zeroed score
    /// and base gravity. The freshly spawned piece stays in play.
    fn restart(&mut self) {
        self.field.reset_board();
        self.stats = GameStats::new();
        self.drop_interval = self.stats.drop_interval();
        self.gravity_accumulator = Duration::ZERO;
        self.completed_sessions += 1;
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut GameField {
        &mut self.field
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{COLUMNS, ROWS, board::Cell, piece::PieceKind};

    use super::*;

    fn session_with_seed(seed: &str) -> GameSession {
        GameSession::with_source(PieceSource::with_seed(seed.parse().unwrap()))
    }

    fn drop_until_scored(session: &mut GameSession) {
        for _ in 0..100 {
            session.soft_drop();
            if session.stats().score() > 0 {
                return;
            }
        }
        panic!("piece never landed on the prefilled row");
    }

    #[test]
    fn test_gravity_follows_elapsed_time() {
        let mut session = session_with_seed("0123456789abcdef0123456789abcdef");
        let start_y = session.falling_piece().y();

        // 499ms: below the 500ms base interval, no drop yet.
        session.advance(Duration::from_millis(499));
        assert_eq!(session.falling_piece().y(), start_y);

        // 600ms total: one drop, 100ms carried over.
        session.advance(Duration::from_millis(101));
        assert_eq!(session.falling_piece().y(), start_y + 1);

        // 1000ms total: second drop.
        session.advance(Duration::from_millis(400));
        assert_eq!(session.falling_piece().y(), start_y + 2);
    }

    #[test]
    fn test_advance_is_noop_while_paused() {
        let mut session = session_with_seed("0123456789abcdef0123456789abcdef");
        let start_y = session.falling_piece().y();

        session.toggle_pause();
        assert!(session.state().is_paused());
        session.advance(Duration::from_secs(10));
        assert_eq!(session.falling_piece().y(), start_y);

        session.toggle_pause();
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_line_clear_scores_and_keeps_base_interval() {
        let mut session = session_with_seed("0123456789abcdef0123456789abcdef");
        for x in 0..COLUMNS {
            session.field_mut().board_mut().set_cell(x, ROWS - 1, Cell::Piece(PieceKind::I));
        }

        drop_until_scored(&mut session);

        // One cleared line: +100 points, still below the first speedup step.
        assert_eq!(session.stats().score(), 100);
        assert_eq!(session.drop_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_spawn_collision_restarts_the_game() {
        let mut session = session_with_seed("0123456789abcdef0123456789abcdef");

        // Earn some score first so the reset is observable.
        for x in 0..COLUMNS {
            session.field_mut().board_mut().set_cell(x, ROWS - 1, Cell::Piece(PieceKind::I));
        }
        drop_until_scored(&mut session);
        assert_eq!(session.stats().score(), 100);

        // Occupy everything except one wall column: nothing can clear, and
        // the spawn after the next landing has nowhere to go.
        for y in 0..ROWS {
            for x in 1..COLUMNS {
                session.field_mut().board_mut().set_cell(x, y, Cell::Piece(PieceKind::Z));
            }
        }
        session.soft_drop();

        assert_eq!(session.stats().score(), 0);
        assert_eq!(session.drop_interval(), Duration::from_millis(500));
        assert_eq!(session.completed_sessions(), 1);
        assert!(session.board().rows().all(|row| row.iter().all(|c| c.is_empty())));
        assert!(!session.board().collides(session.falling_piece()));
    }

    #[test]
    fn test_hold_is_once_per_spawn_at_session_surface() {
        let mut session = session_with_seed("0123456789abcdef0123456789abcdef");
        session.try_hold().unwrap();
        let held = session.held_piece().cloned();
        let falling = session.falling_piece().clone();

        assert!(session.try_hold().is_err());

        assert_eq!(session.held_piece().cloned(), held);
        assert_eq!(*session.falling_piece(), falling);
    }
}
