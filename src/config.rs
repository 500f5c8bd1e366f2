use serde::Deserialize;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::theme::{apply_overrides, Theme, ThemeOverrides};

pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Clone)]
pub struct SpecdiffConfig {
    pub theme: Theme,
    pub tab_width: Option<usize>,
    pub minimap: Option<bool>,
}

impl Default for SpecdiffConfig {
    fn default() -> Self {
        Self {
            theme: Theme::from_name("one-dark"),
            tab_width: None,
            minimap: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    tab_width: Option<usize>,
    #[serde(default)]
    minimap: Option<bool>,
}

fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("specdiff");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `~/.config/specdiff/config.toml`, falling back to
/// defaults when the file is missing or unparseable.
pub fn load_config() -> SpecdiffConfig {
    let contents = match std::fs::read_to_string(config_path()) {
        Ok(c) => c,
        Err(_) => return SpecdiffConfig::default(),
    };
    parse_config(&contents)
}

fn parse_config(contents: &str) -> SpecdiffConfig {
    let file: ConfigFile = match toml::from_str(contents) {
        Ok(f) => f,
        Err(_) => return SpecdiffConfig::default(),
    };

    let theme_name = file.theme.as_deref().unwrap_or("one-dark");
    let mut theme = Theme::from_name(theme_name);
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut theme, overrides);
    }

    SpecdiffConfig {
        theme,
        tab_width: file.tab_width,
        minimap: file.minimap,
    }
}

/// Final launch settings after merging CLI flags over the config file.
#[derive(Debug)]
pub struct ResolvedSettings {
    pub theme: Theme,
    pub tab_width: usize,
    pub minimap_visible: bool,
}

/// Merge CLI flags with config-file settings (CLI wins).
pub fn resolve(cli: &Cli, config: SpecdiffConfig) -> ResolvedSettings {
    let theme = match cli.theme.as_deref() {
        Some(name) => Theme::from_name(name),
        None => config.theme,
    };
    let tab_width = cli
        .tab_width
        .or(config.tab_width)
        .unwrap_or(DEFAULT_TAB_WIDTH);
    let minimap_visible = if cli.no_minimap {
        false
    } else {
        config.minimap.unwrap_or(true)
    };

    ResolvedSettings {
        theme,
        tab_width,
        minimap_visible,
    }
}
