use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::COLUMNS;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// L-piece.
    L = 1,
    /// J-piece.
    J = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

/// Uniform selection over the 7 piece kinds.
///
/// Spawn randomness is deliberately uniform per draw (no bag system), so
/// droughts and repeats can happen.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::L,
            2 => PieceKind::J,
            3 => PieceKind::O,
            4 => PieceKind::S,
            5 => PieceKind::T,
            _ => PieceKind::Z,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// Returns the spawn-orientation shape for this kind.
    #[must_use]
    pub fn shape(self) -> Shape {
        Shape::from_template(TEMPLATES[self as usize])
    }
}

type Template = &'static [&'static [u8]];

/// Shape templates, one per kind, constant for the process lifetime.
///
/// Each template is the tight bounding box of the spawn orientation; rows
/// and columns with no occupied cell are not padded out. The spawn centering
/// rule (`x = COLUMNS / 2 - width / 2`) depends on these tight widths.
const TEMPLATES: [Template; PieceKind::LEN] = [
    // I-piece
    &[&[1, 1, 1, 1]],
    // L-piece
    &[&[1, 1, 1], &[0, 0, 1]],
    // J-piece
    &[&[1, 1, 1], &[1, 0, 0]],
    // O-piece
    &[&[1, 1], &[1, 1]],
    // S-piece
    &[&[0, 1, 1], &[1, 1, 0]],
    // T-piece
    &[&[0, 1, 0], &[1, 1, 1]],
    // Z-piece
    &[&[1, 1, 0], &[0, 1, 1]],
];

/// A piece shape: a 2-D occupancy matrix.
///
/// Dimensions vary per kind (I is 1×4, O is 2×2, the rest 2×3) and swap on
/// rotation. Rotation recomputes the matrix rather than indexing into a
/// precomputed table; the shape is small enough that this never matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    fn from_template(template: Template) -> Self {
        let rows = template
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        Self { rows }
    }

    /// Width of the bounding box in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Height of the bounding box in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the cell at `(x, y)` within the bounding box is occupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x]
    }

    /// Returns the shape rotated 90° clockwise (transpose then row-reverse).
    ///
    /// Width and height swap; applying this four times yields the original.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let (width, height) = (self.width(), self.height());
        let rows = (0..width)
            .map(|x| (0..height).rev().map(|y| self.rows[y][x]).collect())
            .collect();
        Self { rows }
    }

    /// Returns an iterator of occupied `(x, y)` positions within the bounding box.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, &occupied)| occupied.then_some((x, y)))
        })
    }
}

/// The active falling piece: a kind, its current shape, and the top-left
/// offset of the shape's bounding box in board coordinates.
///
/// Coordinates are signed: `y` may be negative while part of a shape sits in
/// the spawn area above the visible grid. Movement and rotation helpers are
/// pure and return new `Piece` values; collision validation lives in
/// [`Board`](super::board::Board) and [`GameField`](crate::engine::GameField).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of the given kind in spawn orientation, centered
    /// horizontally on the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self::centered(kind, kind.shape())
    }

    /// Places an existing kind/shape pair at the horizontal center of the
    /// top row. Used when a held piece re-enters play.
    #[must_use]
    pub fn centered(kind: PieceKind, shape: Shape) -> Self {
        let x = centered_x(&shape);
        Self { kind, shape, x, y: 0 }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the piece shifted by `(dx, dy)` cells.
    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.clone(),
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the piece rotated 90° clockwise in place.
    ///
    /// The offset is unchanged; there is no wall-kick compensation, so a
    /// rotation near a wall may collide and be discarded by the caller.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape.rotated(),
            x: self.x,
            y: self.y,
        }
    }

    /// Returns an iterator of occupied cells in board coordinates.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_positions().map(|(dx, dy)| {
            #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let cell = (self.x + dx as i32, self.y + dy as i32);
            cell
        })
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn centered_x(shape: &Shape) -> i32 {
    (COLUMNS / 2) as i32 - (shape.width() / 2) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    #[test]
    fn test_rotation_cycle_of_four() {
        for kind in ALL_KINDS {
            let original = kind.shape();
            let rotated = original.rotated().rotated().rotated().rotated();
            assert_eq!(rotated, original, "{kind:?} should cycle back after 4 rotations");
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        for kind in ALL_KINDS {
            let shape = kind.shape();
            let rotated = shape.rotated();
            assert_eq!(rotated.width(), shape.height());
            assert_eq!(rotated.height(), shape.width());
        }
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // S-piece spawn:      rotated clockwise:
        //   . # #                # .
        //   # # .                # #
        //                        . #
        let rotated = PieceKind::S.shape().rotated();
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 3);
        let occupied: Vec<_> = rotated.occupied_positions().collect();
        assert_eq!(occupied, vec![(0, 0), (0, 1), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_o_piece_spawns_centered() {
        let piece = Piece::spawn(PieceKind::O);
        assert_eq!(piece.x(), 4);
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn test_spawn_centering_per_kind() {
        // x = COLUMNS / 2 - width / 2 with the tight template widths.
        assert_eq!(Piece::spawn(PieceKind::I).x(), 3); // width 4
        assert_eq!(Piece::spawn(PieceKind::T).x(), 4); // width 3
        assert_eq!(Piece::spawn(PieceKind::O).x(), 4); // width 2
        for kind in ALL_KINDS {
            assert_eq!(Piece::spawn(kind).y(), 0);
        }
    }

    #[test]
    fn test_translated_offsets_occupied_cells() {
        let piece = Piece::spawn(PieceKind::O).translated(-2, 3);
        assert_eq!(piece.x(), 2);
        assert_eq!(piece.y(), 3);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, vec![(2, 3), (3, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn test_occupied_cells_skip_template_holes() {
        // T spawn at x=4: top row has a single occupied cell at (5, 0).
        let piece = Piece::spawn(PieceKind::T);
        let cells: Vec<_> = piece.occupied_cells().collect();
        assert_eq!(cells, vec![(5, 0), (4, 1), (5, 1), (6, 1)]);
    }
}
