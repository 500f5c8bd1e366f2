mod action;
mod app;
mod cli;
mod components;
mod config;
mod diff;
mod event;
mod loader;
mod minimap;
mod render;
mod scroll;
mod state;
mod theme;
mod tui;

use anyhow::Result;
use clap::Parser;

use crate::app::App;
use crate::cli::Cli;
use crate::state::AppState;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        let _ = tui::restore();
        default_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();

    // Validate both documents exist before launching the TUI
    for path in [&cli.left, &cli.right] {
        if !path.is_file() {
            eprintln!("specdiff: {}: not a readable file", path.display());
            std::process::exit(1);
        }
    }

    let settings = config::resolve(&cli, config::load_config());
    let state = AppState::new(settings.theme, settings.tab_width, settings.minimap_visible);
    let mut app = App::new(cli.left, cli.right, state);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore()?;

    if let Err(ref e) = result {
        eprintln!("specdiff: {e:#}");
    }

    result
}
