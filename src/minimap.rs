use crate::diff::{EditOp, EditScript};
use crate::scroll::{PaneSide, ScrollState};

/// Floor on marker height so single-row changes stay visible at any length.
const MIN_MARKER_HEIGHT: f64 = 1.0;
/// Floor on the viewport indicator height so it stays grabbable.
const MIN_VIEWPORT_HEIGHT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Removed,
    Added,
}

/// A run of consecutive script rows of the same non-equal kind.
/// Rows are contiguous in row-index space; a gap starts a new group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerGroup {
    pub kind: MarkerKind,
    pub start_row: usize,
    pub end_row: usize,
}

/// Compress an edit script into marker groups for minimap rendering.
pub fn group_markers(script: &EditScript) -> Vec<MarkerGroup> {
    let mut groups: Vec<MarkerGroup> = Vec::new();
    for (row, op) in script.iter().enumerate() {
        let kind = match op {
            EditOp::Removed { .. } => MarkerKind::Removed,
            EditOp::Added { .. } => MarkerKind::Added,
            EditOp::Equal { .. } => continue,
        };
        match groups.last_mut() {
            Some(last) if last.kind == kind && last.end_row + 1 == row => {
                last.end_row = row;
            }
            _ => groups.push(MarkerGroup {
                kind,
                start_row: row,
                end_row: row,
            }),
        }
    }
    groups
}

/// A marker positioned in minimap space, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub top: u16,
    pub height: u16,
    /// Whether this marker's kind matches the minimap's side (removed on the
    /// left, added on the right). Off-side markers render dimmed.
    pub on_side: bool,
}

/// Project marker groups onto a minimap of `height` rows.
///
/// Positions and sizes are proportional to the group's share of the total row
/// count, with a floor on height. An empty script or a zero-height minimap
/// yields no markers.
pub fn layout_markers(
    groups: &[MarkerGroup],
    side: MarkerKind,
    total_rows: usize,
    height: u16,
) -> Vec<Marker> {
    if total_rows == 0 || height == 0 {
        return Vec::new();
    }
    let scale = f64::from(height) / total_rows as f64;
    groups
        .iter()
        .map(|group| {
            let top = group.start_row as f64 * scale;
            let rows = (group.end_row - group.start_row + 1) as f64;
            let marker_height = (rows * scale).max(MIN_MARKER_HEIGHT);
            let top = (top as u16).min(height - 1);
            Marker {
                kind: group.kind,
                top,
                height: (marker_height.ceil() as u16).min(height - top),
                on_side: group.kind == side,
            }
        })
        .collect()
}

/// The draggable rectangle mirroring the pane's visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportIndicator {
    pub top: u16,
    pub height: u16,
}

/// Compute the indicator for a pane's current scroll position, or None when
/// the content fits without scrolling (the indicator is hidden entirely).
pub fn viewport_indicator(scroll: &ScrollState, minimap_height: u16) -> Option<ViewportIndicator> {
    let m = scroll.metrics;
    if minimap_height == 0 || m.content_height == 0 || m.fits_vertically() {
        return None;
    }
    let scale = f64::from(minimap_height) / m.content_height as f64;
    let top = scroll.top as f64 * scale;
    let height = (m.viewport_height as f64 * scale).max(MIN_VIEWPORT_HEIGHT);
    let top = (top as u16).min(minimap_height.saturating_sub(1));
    Some(ViewportIndicator {
        top,
        height: (height.ceil() as u16).min(minimap_height - top).max(1),
    })
}

/// Map a click at `y` rows down the minimap to a pane scroll_top: the clicked
/// fraction of minimap height maps to the same fraction of scrollable height.
pub fn click_scroll_target(y: u16, minimap_height: u16, scroll: &ScrollState) -> usize {
    if minimap_height == 0 {
        return 0;
    }
    let ratio = f64::from(y.min(minimap_height)) / f64::from(minimap_height);
    (ratio * scroll.metrics.max_top() as f64).round() as usize
}

/// Drag interaction on the viewport indicator, modeled as an explicit state
/// machine so the transitions are testable without real pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        side: PaneSide,
        grab_y: u16,
        grab_top: usize,
    },
}

impl DragState {
    /// Press on a minimap at `y` (relative to the minimap top). Starts a drag
    /// only when the press lands on the viewport indicator; returns whether
    /// the press was consumed.
    pub fn press(
        &mut self,
        side: PaneSide,
        y: u16,
        indicator: Option<ViewportIndicator>,
        scroll: &ScrollState,
    ) -> bool {
        let Some(ind) = indicator else {
            return false;
        };
        if y >= ind.top && y < ind.top + ind.height {
            *self = DragState::Dragging {
                side,
                grab_y: y,
                grab_top: scroll.top,
            };
            true
        } else {
            false
        }
    }

    /// Pointer moved to `y` while dragging. Returns the pane and its new
    /// scroll_top (drag delta scaled by content/minimap ratio, clamped), or
    /// None when idle.
    pub fn drag_to(&self, y: u16, minimap_height: u16, scroll: &ScrollState) -> Option<(PaneSide, usize)> {
        let DragState::Dragging {
            side,
            grab_y,
            grab_top,
        } = *self
        else {
            return None;
        };
        if minimap_height == 0 {
            return None;
        }
        let scale = scroll.metrics.content_height as f64 / f64::from(minimap_height);
        let delta = (f64::from(y) - f64::from(grab_y)) * scale;
        let target = (grab_top as f64 + delta)
            .clamp(0.0, scroll.metrics.max_top() as f64)
            .round() as usize;
        Some((side, target))
    }

    pub fn release(&mut self) {
        *self = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn side(&self) -> Option<PaneSide> {
        match self {
            DragState::Dragging { side, .. } => Some(*side),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::ScrollMetrics;

    fn script_with_removed_rows(rows: &[usize], total: usize) -> EditScript {
        (0..total)
            .map(|row| {
                if rows.contains(&row) {
                    EditOp::Removed { left: row }
                } else {
                    EditOp::Equal {
                        left: row,
                        right: row,
                    }
                }
            })
            .collect()
    }

    fn scroll(content_height: usize, viewport_height: usize, top: usize) -> ScrollState {
        let mut s = ScrollState::new(ScrollMetrics {
            content_height,
            content_width: 80,
            viewport_height,
            viewport_width: 80,
        });
        s.top = top;
        s
    }

    #[test]
    fn test_grouping_merges_only_adjacent_rows() {
        let script = script_with_removed_rows(&[2, 3, 4, 7], 10);
        let groups = group_markers(&script);
        assert_eq!(
            groups,
            vec![
                MarkerGroup {
                    kind: MarkerKind::Removed,
                    start_row: 2,
                    end_row: 4
                },
                MarkerGroup {
                    kind: MarkerKind::Removed,
                    start_row: 7,
                    end_row: 7
                },
            ]
        );
    }

    #[test]
    fn test_grouping_splits_on_kind_change() {
        let script = vec![
            EditOp::Removed { left: 0 },
            EditOp::Added { right: 0 },
            EditOp::Added { right: 1 },
        ];
        let groups = group_markers(&script);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, MarkerKind::Removed);
        assert_eq!(groups[1].kind, MarkerKind::Added);
        assert_eq!(groups[1].start_row, 1);
        assert_eq!(groups[1].end_row, 2);
    }

    #[test]
    fn test_grouping_skips_equal_rows() {
        let script = script_with_removed_rows(&[], 5);
        assert!(group_markers(&script).is_empty());
    }

    #[test]
    fn test_layout_proportions() {
        let groups = vec![MarkerGroup {
            kind: MarkerKind::Added,
            start_row: 50,
            end_row: 59,
        }];
        let markers = layout_markers(&groups, MarkerKind::Added, 100, 40);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].top, 20);
        assert_eq!(markers[0].height, 4);
        assert!(markers[0].on_side);
    }

    #[test]
    fn test_layout_floors_tiny_groups() {
        // A single changed row in a large document still gets one visible row.
        let groups = vec![MarkerGroup {
            kind: MarkerKind::Removed,
            start_row: 1999,
            end_row: 1999,
        }];
        let markers = layout_markers(&groups, MarkerKind::Removed, 2000, 40);
        assert_eq!(markers[0].height, 1);
        assert!(markers[0].top < 40);
    }

    #[test]
    fn test_layout_empty_script() {
        assert!(layout_markers(&[], MarkerKind::Removed, 0, 40).is_empty());
    }

    #[test]
    fn test_off_side_markers_dimmed() {
        let groups = vec![MarkerGroup {
            kind: MarkerKind::Added,
            start_row: 0,
            end_row: 0,
        }];
        let markers = layout_markers(&groups, MarkerKind::Removed, 10, 10);
        assert!(!markers[0].on_side);
    }

    #[test]
    fn test_viewport_indicator_hidden_when_content_fits() {
        let s = scroll(15, 20, 0);
        assert_eq!(viewport_indicator(&s, 40), None);
    }

    #[test]
    fn test_viewport_indicator_tracks_scroll() {
        let s = scroll(200, 20, 90);
        let ind = viewport_indicator(&s, 40).unwrap();
        assert_eq!(ind.top, 18);
        assert_eq!(ind.height, 4);
    }

    #[test]
    fn test_viewport_indicator_min_height() {
        let s = scroll(4000, 20, 0);
        let ind = viewport_indicator(&s, 40).unwrap();
        assert_eq!(ind.height, 2);
    }

    #[test]
    fn test_click_maps_fraction_to_scroll() {
        let s = scroll(220, 20, 0);
        // Half-way down the minimap -> half of max_top (200).
        assert_eq!(click_scroll_target(20, 40, &s), 100);
        assert_eq!(click_scroll_target(0, 40, &s), 0);
        assert_eq!(click_scroll_target(40, 40, &s), 200);
    }

    #[test]
    fn test_drag_press_requires_indicator_hit() {
        let s = scroll(200, 20, 90);
        let ind = viewport_indicator(&s, 40);
        let mut drag = DragState::default();
        assert!(!drag.press(PaneSide::Left, 5, ind, &s));
        assert!(!drag.is_dragging());
        assert!(drag.press(PaneSide::Left, 19, ind, &s));
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_drag_scales_and_clamps() {
        let s = scroll(200, 20, 90);
        let ind = viewport_indicator(&s, 40);
        let mut drag = DragState::default();
        assert!(drag.press(PaneSide::Right, 18, ind, &s));

        // 2 rows down the minimap moves content by 2 * 200/40 = 10 rows.
        let (side, top) = drag.drag_to(20, 40, &s).unwrap();
        assert_eq!(side, PaneSide::Right);
        assert_eq!(top, 100);

        // Dragging far past the end clamps to max_top.
        let (_, top) = drag.drag_to(200, 40, &s).unwrap();
        assert_eq!(top, 180);
        // And far above the start clamps to zero.
        let (_, top) = drag.drag_to(0, 40, &s).unwrap();
        assert_eq!(top, 0);

        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.drag_to(20, 40, &s), None);
    }
}
