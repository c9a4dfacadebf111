use std::iter;

use gridfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::style;

/// Session statistics panel: score, line and piece counts, gravity speed,
/// and the number of finished games.
pub struct StatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        16 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(&'static dyn Fn(&GameSession) -> String),
    LabelValue(&'static str, &'static dyn Fn(&GameSession) -> String),
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|session| session.stats().score().to_string()),
    Row::Empty,
    Row::LabelValue("LINES:", &|session| {
        session.stats().total_cleared_lines().to_string()
    }),
    Row::LabelValue("PIECES:", &|session| {
        session.stats().completed_pieces().to_string()
    }),
    Row::LabelValue("SPEED:", &|session| {
        format!("{}ms", session.drop_interval().as_millis())
    }),
    Row::LabelValue("GAMES:", &|session| {
        session.completed_sessions().to_string()
    }),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas[..].iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.session), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}
