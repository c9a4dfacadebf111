use std::iter;

use gridfall_engine::{Board, COLUMNS, Piece, ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Total height of a bordered board, for layout arithmetic.
#[expect(clippy::cast_possible_truncation)]
pub const BOARD_HEIGHT: u16 = ROWS as u16 + 2;

/// The playfield: settled cells, the landing preview, and the falling piece.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    falling_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn falling_piece(self, piece: &'a Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLUMNS as u16 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Overwrites the grid entries covered by `piece`, skipping cells above the
/// top edge.
fn overlay(grid: &mut [Vec<CellDisplay>], piece: &Piece, display: impl Fn() -> CellDisplay) {
    for (x, y) in piece.occupied_cells() {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            continue;
        };
        if x < COLUMNS && y < ROWS {
            grid[y][x] = display();
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut grid: Vec<Vec<CellDisplay>> = self
            .board
            .rows()
            .map(|row| row.iter().map(|cell| CellDisplay::from_cell(*cell)).collect())
            .collect();
        // Ghost first, so the falling piece wins where they overlap.
        if let Some(ghost) = &self.ghost {
            overlay(&mut grid, ghost, CellDisplay::ghost);
        }
        if let Some(piece) = self.falling_piece {
            overlay(&mut grid, piece, || CellDisplay::piece(piece.kind()));
        }

        let col_constraints = (0..COLUMNS).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLUMNS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, grid) {
            for (grid_cell, cell_display) in iter::zip(grid_row, row) {
                cell_display.render(grid_cell, buf);
            }
        }
    }
}
