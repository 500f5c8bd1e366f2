use crate::diff::{self, EditScript};
use crate::loader::LoadedDocument;
use crate::minimap::{group_markers, DragState, MarkerGroup};
use crate::render::{render_panes, PaneView};
use crate::scroll::{ScrollMetrics, ScrollSynchronizer};

/// Everything belonging to one active comparison: the rendered pane views,
/// the minimap marker groups and the scroll synchronizer.
///
/// Built whole from a pair of documents and discarded whole; a reload never
/// reuses parts of a previous view.
pub struct ComparisonView {
    pub left_name: String,
    pub right_name: String,
    pub left_pane: PaneView,
    pub right_pane: PaneView,
    /// Row count of the edit script, shared by both panes.
    pub total_rows: usize,
    pub groups: Vec<MarkerGroup>,
    pub sync: ScrollSynchronizer,
    pub drag: DragState,
    pub removed: usize,
    pub added: usize,
}

impl ComparisonView {
    /// Single entry point: lines in, fully wired view out.
    pub fn build(left: &LoadedDocument, right: &LoadedDocument, tab_width: usize) -> Self {
        let left_lines: Vec<&str> = left.content.split('\n').collect();
        let right_lines: Vec<&str> = right.content.split('\n').collect();

        let script: EditScript = diff::compute(&left_lines, &right_lines);
        let (removed, added) = diff::edit_counts(&script);
        let (left_pane, right_pane) = render_panes(&script, &left_lines, &right_lines, tab_width);
        let groups = group_markers(&script);

        let total_rows = script.len();
        let metrics = |pane: &PaneView| ScrollMetrics {
            content_height: total_rows,
            content_width: pane.max_width,
            // Real viewport sizes arrive with the first frame.
            viewport_height: 0,
            viewport_width: 0,
        };
        let sync = ScrollSynchronizer::new(metrics(&left_pane), metrics(&right_pane));

        Self {
            left_name: left.file_name.clone(),
            right_name: right.file_name.clone(),
            left_pane,
            right_pane,
            total_rows,
            groups,
            sync,
            drag: DragState::Idle,
            removed,
            added,
        }
    }
}
