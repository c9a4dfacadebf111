use gridfall_engine::HeldPiece;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::CellDisplay;

/// Shapes fit in a 4x4 box in every rotation.
const PANEL_CELLS: u16 = 4;

/// A single piece drawn in its own panel, used for the hold slot.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a HeldPiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: &'a HeldPiece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PANEL_CELLS * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        PANEL_CELLS * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Default for PieceDisplay<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };

        // The held shape keeps its banked rotation, so the box is sized per
        // piece and centered in the panel.
        let shape = piece.shape();
        let piece_area = area.centered(
            Constraint::Length(shape.width() as u16 * CellDisplay::width()),
            Constraint::Length(shape.height() as u16 * CellDisplay::height()),
        );

        let col_constraints = (0..shape.width()).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints =
            (0..shape.height()).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_display = CellDisplay::piece(piece.kind());
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if shape.is_occupied(x, y) {
                    Widget::render(&occupied_display, grid_cell, buf);
                }
            }
        }
    }
}
