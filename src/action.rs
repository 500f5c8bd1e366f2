use crate::scroll::PaneSide;

/// Central action enum — all state mutations flow through here.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,
    Resize,

    // Keyboard scrolling (originates at the focused pane, mirrored by the synchronizer)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,
    ScrollLeft,
    ScrollRight,

    // Focus
    FocusPane(PaneSide),
    ToggleFocus,

    // View toggles
    ToggleMinimap,
    ToggleHud,
    CycleTheme,
    Reload,

    // Mouse: panes
    PaneWheel { side: PaneSide, delta: isize },

    // Mouse: minimaps. A press either grabs the viewport indicator (drag) or
    // jumps the paired pane to the clicked fraction; the wheel forwards to the
    // paired pane without scrolling the minimap itself.
    MinimapPress { side: PaneSide, y: u16 },
    MinimapWheel { side: PaneSide, delta: isize },
    DragMove { y: u16 },
    DragEnd,
}
