use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::minimap::{layout_markers, viewport_indicator, Marker, MarkerKind};
use crate::scroll::PaneSide;
use crate::state::AppState;

use super::Component;

/// Total width of a minimap column: one indicator cell plus two marker cells.
pub const MINIMAP_WIDTH: u16 = 3;

/// Compressed change-location summary for one pane, doubling as a scrollbar.
pub struct MinimapColumn {
    pub side: PaneSide,
}

impl MinimapColumn {
    fn marker_side(&self) -> MarkerKind {
        match self.side {
            PaneSide::Left => MarkerKind::Removed,
            PaneSide::Right => MarkerKind::Added,
        }
    }
}

impl Component for MinimapColumn {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let Some(view) = state.comparison.as_ref() else {
            return;
        };
        if area.height == 0 {
            return;
        }

        let markers = layout_markers(
            &view.groups,
            self.marker_side(),
            view.total_rows,
            area.height,
        );
        let scroll = view.sync.pane(self.side);
        let indicator = viewport_indicator(scroll, area.height);

        let lines: Vec<Line> = (0..area.height)
            .map(|y| {
                let in_indicator = indicator
                    .is_some_and(|ind| y >= ind.top && y < ind.top + ind.height);
                let indicator_span = if in_indicator {
                    Span::styled("\u{2590}", Style::default().fg(theme.minimap_viewport))
                } else {
                    Span::styled(" ", Style::default().bg(theme.surface))
                };

                let marker_span = match marker_at(&markers, y) {
                    Some(marker) => {
                        let color = if !marker.on_side {
                            theme.minimap_dim
                        } else if marker.kind == MarkerKind::Removed {
                            theme.minimap_removed
                        } else {
                            theme.minimap_added
                        };
                        Span::styled("\u{2588}\u{2588}", Style::default().fg(color))
                    }
                    None => Span::styled("  ", Style::default().bg(theme.surface)),
                };

                Line::from(vec![indicator_span, marker_span])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn marker_at(markers: &[Marker], y: u16) -> Option<&Marker> {
    markers
        .iter()
        .find(|m| y >= m.top && y < m.top + m.height)
}
