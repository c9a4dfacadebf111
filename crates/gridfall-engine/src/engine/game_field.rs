use crate::{
    HoldError, PieceCollisionError, SpawnCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind, Shape},
    },
};

use super::piece_source::PieceSource;

/// Snapshot of the piece banked in the hold slot.
///
/// Only kind and shape are stored: the shape keeps whatever rotation the
/// piece had when held, and board coordinates are re-derived (centered, top
/// row) when the piece is swapped back into play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldPiece {
    kind: PieceKind,
    shape: Shape,
}

impl HeldPiece {
    fn of(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            shape: piece.shape().clone(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Single-piece game state: the board, the falling piece, the hold slot,
/// and the piece source.
///
/// The falling piece is always in a non-colliding position; every `try_*`
/// operation validates the tentative position and leaves the field
/// untouched on failure.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    held_piece: Option<HeldPiece>,
    can_hold: bool,
    piece_source: PieceSource,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(PieceSource::new())
    }

    /// Like [`Self::new`], but drawing pieces from the given source.
    #[must_use]
    pub fn with_source(mut piece_source: PieceSource) -> Self {
        let falling_piece = Piece::spawn(piece_source.next_kind());
        Self {
            board: Board::new(),
            falling_piece,
            held_piece: None,
            can_hold: true,
            piece_source,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<&HeldPiece> {
        self.held_piece.as_ref()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.collides(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Shifts the falling piece horizontally by `dx` cells; no-op on collision.
    pub fn try_shift(&mut self, dx: i32) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.translated(dx, 0);
        self.set_falling_piece(piece)
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(-1)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(1)
    }

    /// Moves the falling piece down one cell. An `Err` means the piece is
    /// resting on something: the caller decides when to lock it in with
    /// [`Self::complete_piece_drop`].
    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.translated(0, 1);
        self.set_falling_piece(piece)
    }

    /// Rotates the falling piece 90° clockwise; the rotation is discarded if
    /// the rotated shape collides at the current position (no wall kicks).
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.falling_piece.rotated();
        self.set_falling_piece(piece)
    }

    /// Banks the falling piece in the hold slot, at most once per spawn.
    ///
    /// With an empty slot the next piece is drawn from the source; with an
    /// occupied slot the held piece re-enters play centered on the top row.
    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        if !self.can_hold {
            return Err(HoldError);
        }
        let banked = HeldPiece::of(&self.falling_piece);
        self.falling_piece = match self.held_piece.replace(banked) {
            Some(previous) => Piece::centered(previous.kind, previous.shape),
            None => Piece::spawn(self.piece_source.next_kind()),
        };
        self.can_hold = false;
        Ok(())
    }

    /// Where the falling piece would land if dropped straight down.
    #[must_use]
    pub fn drop_preview(&self) -> Piece {
        let mut preview = self.falling_piece.clone();
        loop {
            let next = preview.translated(0, 1);
            if self.board.collides(&next) {
                return preview;
            }
            preview = next;
        }
    }

    /// Locks the falling piece into the board, clears full lines, and spawns
    /// the next piece (re-enabling hold).
    ///
    /// Returns the number of lines cleared, and an `Err` if the fresh piece
    /// immediately collides — the session-level game-over condition.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), SpawnCollisionError>) {
        self.board.merge(&self.falling_piece);
        let cleared_lines = self.board.clear_full_lines();

        self.falling_piece = Piece::spawn(self.piece_source.next_kind());
        self.can_hold = true;
        if self.board.collides(&self.falling_piece) {
            return (cleared_lines, Err(SpawnCollisionError));
        }

        (cleared_lines, Ok(()))
    }

    /// Wipes the board for a session restart. The already-spawned falling
    /// piece stays active on the now-empty grid; the hold slot is untouched.
    pub fn reset_board(&mut self) {
        self.board = Board::new();
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}
