use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use gridfall_engine::{GameSession, PieceSource, SessionState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::widgets::{BOARD_HEIGHT, SessionDisplay};

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(piece_source: PieceSource, show_ghost: bool) -> Self {
        Self {
            session: GameSession::with_source(piece_source),
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session, self.show_ghost);
        let help_text = match self.session.state() {
            SessionState::Playing => {
                "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hold) | P (Pause) | Q (Quit)"
            }
            SessionState::Paused => "Controls: P (Resume) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(BOARD_HEIGHT), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    /// Applies a key-down event. Auto-repeat key-downs are applied like any
    /// other press; key releases are ignored.
    pub fn handle_event(&mut self, event: &Event) {
        let is_playing = self.session.state().is_playing();

        if let Some(event) = event.as_key_event() {
            if event.kind == KeyEventKind::Release {
                return;
            }
            match event.code {
                KeyCode::Left if is_playing => _ = self.session.try_move_left(),
                KeyCode::Right if is_playing => _ = self.session.try_move_right(),
                KeyCode::Down if is_playing => self.session.soft_drop(),
                KeyCode::Up if is_playing => _ = self.session.try_rotate(),
                KeyCode::Char(' ') if is_playing => _ = self.session.try_hold(),
                KeyCode::Char('p') => self.session.toggle_pause(),
                KeyCode::Char('q') => self.is_exiting = true,
                _ => {}
            }
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.advance(elapsed);
    }
}
