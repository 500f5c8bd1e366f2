use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "specdiff",
    version,
    about = "TUI side-by-side spec comparison viewer with minimap navigation"
)]
pub struct Cli {
    /// Left-hand document (the "before" side)
    pub left: PathBuf,

    /// Right-hand document (the "after" side)
    pub right: PathBuf,

    /// Color theme (one-dark, github-dark, dracula, solarized-dark)
    #[arg(long)]
    pub theme: Option<String>,

    /// Tab stop width used when rendering document lines
    #[arg(long)]
    pub tab_width: Option<usize>,

    /// Hide the minimap columns
    #[arg(long)]
    pub no_minimap: bool,
}
