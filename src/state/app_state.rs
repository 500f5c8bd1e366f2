use crate::scroll::PaneSide;
use crate::state::ComparisonView;
use crate::theme::Theme;

pub struct AppState {
    /// Pane receiving keyboard scroll commands. Scrolls mirror to the other
    /// pane either way; focus only decides which side originates them.
    pub focus: PaneSide,
    pub comparison: Option<ComparisonView>,
    pub loading: bool,
    pub minimap_visible: bool,
    pub hud_expanded: bool,
    pub status_message: Option<(String, bool)>, // (message, is_error)
    pub should_quit: bool,
    pub theme: Theme,
    pub tab_width: usize,
}

impl AppState {
    pub fn new(theme: Theme, tab_width: usize, minimap_visible: bool) -> Self {
        Self {
            focus: PaneSide::Left,
            comparison: None,
            loading: false,
            minimap_visible,
            hud_expanded: false,
            status_message: None,
            should_quit: false,
            theme,
            tab_width,
        }
    }
}
