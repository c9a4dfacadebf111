use std::time::Duration;

use crossterm::event::Event;
use gridfall_engine::PieceSource;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, RenderMode, Tui},
};

const FPS: f64 = 60.0;

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub fn new(piece_source: PieceSource, show_ghost: bool) -> Self {
        Self {
            screen: PlayScreen::new(piece_source, show_ghost),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(FPS);
        tui.set_render_mode(RenderMode::Interval(Duration::from_secs_f64(1.0 / FPS)));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        self.screen.handle_event(&event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
