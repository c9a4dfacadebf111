use super::{
    COLUMNS, ROWS,
    piece::{Piece, PieceKind},
};

/// A single cell in the playfield grid.
///
/// A locked piece keeps its kind so the renderer can color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Locked piece of a specific kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// The fixed 20×10 playfield grid.
///
/// Dimensions never change. A row is full iff every cell is non-empty.
/// The board knows nothing about the falling piece beyond the collision
/// query; ownership of the active piece lives in
/// [`GameField`](crate::engine::GameField).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; COLUMNS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an all-empty board. Also the session-reset board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLUMNS]> {
        self.rows.iter()
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Overwrites a single cell. Intended for board setup and analysis;
    /// gameplay mutations go through [`Self::merge`] and
    /// [`Self::clear_full_lines`].
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Whether the piece overlaps the board boundaries or an occupied cell.
    ///
    /// Occupied shape cells above the top of the grid (`y < 0`) do not
    /// collide: that is the spawn area. Any other out-of-bounds cell counts
    /// as a collision, which is what pins pieces inside the walls and floor.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.occupied_cells().any(|(x, y)| {
            if y < 0 {
                return false;
            }
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                return true;
            };
            x >= COLUMNS || y >= ROWS || !self.rows[y][x].is_empty()
        })
    }

    /// Locks the piece into the grid, writing its kind into every occupied
    /// cell. Assumes a non-colliding position; shape cells still above the
    /// top of the grid are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            self.rows[y][x] = Cell::Piece(piece.kind());
        }
    }

    /// Clears full rows and returns the number of rows cleared.
    ///
    /// Remaining rows shift down without reordering, and the same number of
    /// empty rows appears at the top, so the row count stays `ROWS`.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        for y in (0..ROWS).rev() {
            if self.rows[y].iter().all(|cell| !cell.is_empty()) {
                cleared += 1;
                continue;
            }
            if cleared > 0 {
                self.rows[y + cleared] = self.rows[y];
            }
        }
        self.rows[..cleared].fill([Cell::Empty; COLUMNS]);
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..COLUMNS {
            board.set_cell(x, y, Cell::Piece(PieceKind::I));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in board.rows() {
            for cell in row {
                assert!(cell.is_empty());
            }
        }
    }

    #[test]
    fn test_no_collision_on_empty_board() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T);
        assert!(!board.collides(&piece));
    }

    #[test]
    fn test_collision_with_left_wall() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O).translated(-5, 0);
        assert!(board.collides(&piece));
    }

    #[test]
    fn test_collision_with_right_wall() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O).translated(5, 0);
        assert!(board.collides(&piece));
    }

    #[test]
    fn test_collision_with_floor() {
        let board = Board::new();
        // O spawns with height 2; y = ROWS - 2 rests on the floor.
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let bottom = (ROWS as i32) - 2;
        let resting = Piece::spawn(PieceKind::O).translated(0, bottom);
        assert!(!board.collides(&resting));
        assert!(board.collides(&resting.translated(0, 1)));
    }

    #[test]
    fn test_no_collision_above_the_top() {
        // The spawn area above the grid never collides on an empty board.
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::O).translated(0, -5);
        assert!(!board.collides(&piece));
    }

    #[test]
    fn test_collision_with_occupied_cell() {
        let mut board = Board::new();
        board.set_cell(4, 1, Cell::Piece(PieceKind::Z));
        let piece = Piece::spawn(PieceKind::O);
        assert!(board.collides(&piece));
    }

    #[test]
    fn test_merge_writes_piece_kind() {
        let mut board = Board::new();
        let piece = Piece::spawn(PieceKind::O);
        board.merge(&piece);
        assert_eq!(board.cell(4, 0), Cell::Piece(PieceKind::O));
        assert_eq!(board.cell(5, 0), Cell::Piece(PieceKind::O));
        assert_eq!(board.cell(4, 1), Cell::Piece(PieceKind::O));
        assert_eq!(board.cell(5, 1), Cell::Piece(PieceKind::O));
        assert!(board.cell(3, 0).is_empty());
        assert!(board.cell(6, 0).is_empty());
    }

    #[test]
    fn test_clear_nothing_when_no_row_is_full() {
        let mut board = Board::new();
        for x in 0..COLUMNS - 1 {
            board.set_cell(x, ROWS - 1, Cell::Piece(PieceKind::S));
        }
        assert_eq!(board.clear_full_lines(), 0);
        assert_eq!(board.cell(0, ROWS - 1), Cell::Piece(PieceKind::S));
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut board = Board::new();
        fill_row(&mut board, ROWS - 1);
        board.set_cell(0, ROWS - 2, Cell::Piece(PieceKind::T));

        assert_eq!(board.clear_full_lines(), 1);

        // The partial row above shifted down; the top is empty again.
        assert_eq!(board.cell(0, ROWS - 1), Cell::Piece(PieceKind::T));
        assert!(board.cell(1, ROWS - 1).is_empty());
        for row in board.rows().take(ROWS - 1) {
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
    }

    #[test]
    fn test_clear_preserves_order_of_partial_rows() {
        let mut board = Board::new();
        // Bottom-up: partial(T), full, partial(Z), full.
        board.set_cell(0, ROWS - 4, Cell::Piece(PieceKind::Z));
        fill_row(&mut board, ROWS - 3);
        board.set_cell(0, ROWS - 2, Cell::Piece(PieceKind::T));
        fill_row(&mut board, ROWS - 1);

        assert_eq!(board.clear_full_lines(), 2);

        assert_eq!(board.cell(0, ROWS - 1), Cell::Piece(PieceKind::T));
        assert_eq!(board.cell(0, ROWS - 2), Cell::Piece(PieceKind::Z));
        for row in board.rows().take(ROWS - 2) {
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
    }

    #[test]
    fn test_clear_non_adjacent_full_rows() {
        let mut board = Board::new();
        fill_row(&mut board, ROWS - 1);
        board.set_cell(3, ROWS - 2, Cell::Piece(PieceKind::J));
        fill_row(&mut board, ROWS - 3);

        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.cell(3, ROWS - 1), Cell::Piece(PieceKind::J));
    }

    #[test]
    fn test_clear_all_rows() {
        let mut board = Board::new();
        for y in 0..ROWS {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_full_lines(), ROWS);
        for row in board.rows() {
            assert!(row.iter().all(|cell| cell.is_empty()));
        }
    }
}
