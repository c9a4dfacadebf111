use gridfall_engine::{PieceSource, SourceSeed};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex characters); random if omitted
    #[clap(long)]
    seed: Option<SourceSeed>,
    /// Do not show the landing preview on the board
    #[clap(long, default_value_t = false)]
    hide_ghost: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, hide_ghost } = arg;

    let piece_source = match seed {
        Some(seed) => PieceSource::with_seed(*seed),
        None => PieceSource::new(),
    };

    let mut app = PlayApp::new(piece_source, !hide_ghost);
    Tui::new().run(&mut app)
}
