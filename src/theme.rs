use ratatui::style::Color;
use serde::Deserialize;

/// All semantic color slots for the specdiff UI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // General UI
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,

    // Diff panes
    pub diff_add_bg: Color,
    pub diff_del_bg: Color,
    pub diff_add_fg: Color,
    pub diff_del_fg: Color,
    pub placeholder_bg: Color,

    // Minimaps
    pub minimap_removed: Color,
    pub minimap_added: Color,
    pub minimap_dim: Color,
    pub minimap_viewport: Color,

    // Status indicators
    pub success: Color,
    pub error: Color,
}

pub const THEME_NAMES: &[&str] = &["one-dark", "github-dark", "dracula", "solarized-dark"];

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" => github_dark(),
            "dracula" => dracula(),
            "solarized-dark" => solarized_dark(),
            _ => one_dark(),
        }
    }
}

pub fn next_theme(current: &str) -> &'static str {
    let idx = THEME_NAMES.iter().position(|&n| n == current).unwrap_or(0);
    THEME_NAMES[(idx + 1) % THEME_NAMES.len()]
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    // Length is in bytes; reject non-ASCII so the slices below can't split a char
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Serde-compatible override struct ──────────────────────────────

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub surface: Option<String>,
    pub diff_add_bg: Option<String>,
    pub diff_del_bg: Option<String>,
    pub diff_add_fg: Option<String>,
    pub diff_del_fg: Option<String>,
    pub placeholder_bg: Option<String>,
    pub minimap_removed: Option<String>,
    pub minimap_added: Option<String>,
    pub minimap_dim: Option<String>,
    pub minimap_viewport: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
}

pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(ref hex) = overrides.$field {
                if let Some(c) = parse_hex_color(hex) {
                    theme.$field = c;
                }
            }
        };
    }
    apply!(accent);
    apply!(text);
    apply!(text_muted);
    apply!(surface);
    apply!(diff_add_bg);
    apply!(diff_del_bg);
    apply!(diff_add_fg);
    apply!(diff_del_fg);
    apply!(placeholder_bg);
    apply!(minimap_removed);
    apply!(minimap_added);
    apply!(minimap_dim);
    apply!(minimap_viewport);
    apply!(success);
    apply!(error);
}

// ── Palettes ──────────────────────────────────────────────────────

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Rgb(97, 175, 239),
        text: Color::Rgb(171, 178, 191),
        text_muted: Color::Rgb(92, 99, 112),
        surface: Color::Rgb(30, 34, 39),
        diff_add_bg: Color::Rgb(35, 56, 44),
        diff_del_bg: Color::Rgb(62, 39, 45),
        diff_add_fg: Color::Rgb(152, 195, 121),
        diff_del_fg: Color::Rgb(224, 108, 117),
        placeholder_bg: Color::Rgb(36, 40, 46),
        minimap_removed: Color::Rgb(224, 108, 117),
        minimap_added: Color::Rgb(152, 195, 121),
        minimap_dim: Color::Rgb(70, 75, 86),
        minimap_viewport: Color::Rgb(97, 175, 239),
        success: Color::Rgb(152, 195, 121),
        error: Color::Rgb(224, 108, 117),
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        accent: Color::Rgb(88, 166, 255),
        text: Color::Rgb(201, 209, 217),
        text_muted: Color::Rgb(110, 118, 129),
        surface: Color::Rgb(22, 27, 34),
        diff_add_bg: Color::Rgb(28, 57, 40),
        diff_del_bg: Color::Rgb(68, 36, 41),
        diff_add_fg: Color::Rgb(86, 211, 100),
        diff_del_fg: Color::Rgb(248, 81, 73),
        placeholder_bg: Color::Rgb(28, 33, 40),
        minimap_removed: Color::Rgb(248, 81, 73),
        minimap_added: Color::Rgb(86, 211, 100),
        minimap_dim: Color::Rgb(68, 76, 86),
        minimap_viewport: Color::Rgb(88, 166, 255),
        success: Color::Rgb(86, 211, 100),
        error: Color::Rgb(248, 81, 73),
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(189, 147, 249),
        text: Color::Rgb(248, 248, 242),
        text_muted: Color::Rgb(98, 114, 164),
        surface: Color::Rgb(40, 42, 54),
        diff_add_bg: Color::Rgb(41, 59, 48),
        diff_del_bg: Color::Rgb(64, 41, 52),
        diff_add_fg: Color::Rgb(80, 250, 123),
        diff_del_fg: Color::Rgb(255, 85, 85),
        placeholder_bg: Color::Rgb(46, 48, 61),
        minimap_removed: Color::Rgb(255, 85, 85),
        minimap_added: Color::Rgb(80, 250, 123),
        minimap_dim: Color::Rgb(68, 71, 90),
        minimap_viewport: Color::Rgb(189, 147, 249),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "solarized-dark".to_string(),
        accent: Color::Rgb(38, 139, 210),
        text: Color::Rgb(131, 148, 150),
        text_muted: Color::Rgb(88, 110, 117),
        surface: Color::Rgb(0, 43, 54),
        diff_add_bg: Color::Rgb(7, 54, 50),
        diff_del_bg: Color::Rgb(54, 38, 43),
        diff_add_fg: Color::Rgb(133, 153, 0),
        diff_del_fg: Color::Rgb(220, 50, 47),
        placeholder_bg: Color::Rgb(4, 49, 59),
        minimap_removed: Color::Rgb(220, 50, 47),
        minimap_added: Color::Rgb(133, 153, 0),
        minimap_dim: Color::Rgb(60, 84, 92),
        minimap_viewport: Color::Rgb(38, 139, 210),
        success: Color::Rgb(133, 153, 0),
        error: Color::Rgb(220, 50, 47),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#xyz"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        // 6 bytes but not 6 ASCII digits; must not panic on the slice
        assert_eq!(parse_hex_color("0\u{20ac}00"), None);
        assert_eq!(parse_hex_color("#ff00\u{e9}"), None);
    }

    #[test]
    fn test_theme_cycle_wraps() {
        let mut name = "one-dark";
        for _ in 0..THEME_NAMES.len() {
            name = next_theme(name);
        }
        assert_eq!(name, "one-dark");
    }

    #[test]
    fn test_unknown_name_falls_back() {
        assert_eq!(Theme::from_name("no-such-theme").name, "one-dark");
    }

    #[test]
    fn test_overrides_apply() {
        let mut theme = Theme::from_name("one-dark");
        let overrides = ThemeOverrides {
            accent: Some("#123456".to_string()),
            diff_add_bg: Some("not-a-color".to_string()),
            ..Default::default()
        };
        let original_add_bg = theme.diff_add_bg;
        apply_overrides(&mut theme, &overrides);
        assert_eq!(theme.accent, Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(theme.diff_add_bg, original_add_bg);
    }
}
