use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use std::cell::Cell;
use std::path::PathBuf;
use std::time::Duration;

use crate::action::Action;
use crate::components::action_hud::ActionHud;
use crate::components::header_bar::HeaderBar;
use crate::components::minimap_column::{MinimapColumn, MINIMAP_WIDTH};
use crate::components::pane::{Pane, GUTTER_WIDTH};
use crate::components::Component;
use crate::event::{map_key_to_action, Event, EventReader, KeyContext};
use crate::loader::{DocumentWorker, FetchRequest};
use crate::minimap::{click_scroll_target, viewport_indicator};
use crate::scroll::PaneSide;
use crate::state::{AppState, ComparisonView};
use crate::theme::{next_theme, Theme};
use crate::tui::Tui;

/// Per-frame screen regions, cached for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct LayoutAreas {
    left_pane: Rect,
    left_minimap: Rect,
    right_pane: Rect,
    right_minimap: Rect,
}

impl LayoutAreas {
    fn pane(&self, side: PaneSide) -> Rect {
        match side {
            PaneSide::Left => self.left_pane,
            PaneSide::Right => self.right_pane,
        }
    }

    fn minimap(&self, side: PaneSide) -> Rect {
        match side {
            PaneSide::Left => self.left_minimap,
            PaneSide::Right => self.right_minimap,
        }
    }
}

fn compute_layout(area: Rect, minimap_visible: bool) -> (Rect, LayoutAreas, Rect) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(outer[1]);

    let split_half = |half: Rect| -> (Rect, Rect) {
        if minimap_visible {
            let parts = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(10), Constraint::Length(MINIMAP_WIDTH)])
                .split(half);
            (parts[0], parts[1])
        } else {
            (half, Rect::default())
        }
    };
    let (left_pane, left_minimap) = split_half(halves[0]);
    let (right_pane, right_minimap) = split_half(halves[1]);

    (
        outer[0],
        LayoutAreas {
            left_pane,
            left_minimap,
            right_pane,
            right_minimap,
        },
        outer[2],
    )
}

pub struct App {
    state: AppState,
    worker: DocumentWorker,
    left_path: PathBuf,
    right_path: PathBuf,
    generation: u64,
    status_clear_countdown: u32,
    areas: Cell<LayoutAreas>,
}

impl App {
    pub fn new(left_path: PathBuf, right_path: PathBuf, state: AppState) -> Self {
        Self {
            state,
            worker: DocumentWorker::new(),
            left_path,
            right_path,
            generation: 0,
            status_clear_countdown: 0,
            areas: Cell::new(LayoutAreas::default()),
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.request_fetch();

        let mut events = EventReader::new(Duration::from_millis(50));

        let header_bar = HeaderBar;
        let left_pane = Pane {
            side: PaneSide::Left,
        };
        let right_pane = Pane {
            side: PaneSide::Right,
        };
        let left_minimap = MinimapColumn {
            side: PaneSide::Left,
        };
        let right_minimap = MinimapColumn {
            side: PaneSide::Right,
        };
        let action_hud = ActionHud;

        loop {
            self.poll_fetch_results();

            // Recompute layout before drawing so scroll extents and mouse
            // hit-testing agree with what ends up on screen.
            let size = terminal.size()?;
            let full = Rect::new(0, 0, size.width, size.height);
            let (header_area, areas, hud_area) =
                compute_layout(full, self.state.minimap_visible);
            self.areas.set(areas);

            if let Some(view) = self.state.comparison.as_mut() {
                // On odd widths the 50/50 split leaves the halves one column
                // apart, so each pane gets its own rect-derived extent.
                for side in [PaneSide::Left, PaneSide::Right] {
                    let pane = areas.pane(side);
                    let inner_h = pane.height.saturating_sub(2) as usize;
                    let inner_w = (pane.width as usize).saturating_sub(2 + GUTTER_WIDTH + 1);
                    view.sync.set_viewport(side, inner_h, inner_w);
                }
            }

            terminal.draw(|frame| {
                header_bar.render(frame, header_area, &self.state);
                left_pane.render(frame, areas.left_pane, &self.state);
                right_pane.render(frame, areas.right_pane, &self.state);
                if self.state.minimap_visible {
                    left_minimap.render(frame, areas.left_minimap, &self.state);
                    right_minimap.render(frame, areas.right_minimap, &self.state);
                }
                action_hud.render(frame, hud_area, &self.state);
            })?;

            // Wait for at least one event, then drain all pending events
            // to avoid input lag from buffered scroll/key events.
            let first = events.next().await;
            let mut pending = Vec::new();
            if let Some(ev) = first {
                pending.push(ev);
            }
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            self.process_events(pending);

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Map and apply a drained batch of events. Runs of scroll events coalesce
    /// into one net movement; everything else is applied in arrival order, so
    /// the key-mapping context sees state changes from earlier in the batch
    /// (a press that grabs the minimap indicator makes the very next key end
    /// the drag).
    fn process_events(&mut self, pending: Vec<Event>) {
        let mut scroll_delta: i32 = 0;

        for event in pending {
            let ctx = KeyContext {
                dragging: self
                    .state
                    .comparison
                    .as_ref()
                    .is_some_and(|v| v.drag.is_dragging()),
            };
            let action = match event {
                Event::Key(key) => map_key_to_action(key, &ctx),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize => Some(Action::Resize),
                Event::Tick => Some(Action::Tick),
            };
            match action {
                Some(Action::ScrollUp) => scroll_delta -= 1,
                Some(Action::ScrollDown) => scroll_delta += 1,
                Some(other) => {
                    self.flush_scroll(&mut scroll_delta);
                    self.update(other);
                }
                None => {}
            }
        }

        self.flush_scroll(&mut scroll_delta);
    }

    fn flush_scroll(&mut self, delta: &mut i32) {
        if *delta != 0 {
            self.scroll_focused(*delta as isize);
            *delta = 0;
        }
    }

    fn request_fetch(&mut self) {
        self.generation += 1;
        self.state.loading = true;
        self.worker.request(FetchRequest {
            generation: self.generation,
            left: self.left_path.clone(),
            right: self.right_path.clone(),
        });
    }

    fn poll_fetch_results(&mut self) {
        while let Some(result) = self.worker.try_recv() {
            if result.generation < self.generation {
                continue;
            }
            self.state.loading = false;
            match result.documents {
                Ok((left, right)) => {
                    // Discard-and-rebuild: the previous view (panes, minimaps,
                    // synchronizer) is dropped wholesale, never patched.
                    self.state.comparison =
                        Some(ComparisonView::build(&left, &right, self.state.tab_width));
                }
                Err(e) => {
                    self.state.comparison = None;
                    self.set_status(format!("Comparison aborted: {e}"), true);
                }
            }
        }
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::Tick => {
                if self.status_clear_countdown > 0 {
                    self.status_clear_countdown -= 1;
                    if self.status_clear_countdown == 0 {
                        self.state.status_message = None;
                    }
                }
            }
            Action::Resize => {}

            Action::ScrollUp => self.scroll_focused(-1),
            Action::ScrollDown => self.scroll_focused(1),
            Action::ScrollPageUp => {
                let page = self.viewport_height() as isize;
                self.scroll_focused(-page);
            }
            Action::ScrollPageDown => {
                let page = self.viewport_height() as isize;
                self.scroll_focused(page);
            }
            Action::ScrollToTop => {
                let focus = self.state.focus;
                if let Some(view) = self.state.comparison.as_mut() {
                    view.sync.scroll_to_top(focus);
                }
            }
            Action::ScrollToBottom => {
                let focus = self.state.focus;
                if let Some(view) = self.state.comparison.as_mut() {
                    view.sync.scroll_to_bottom(focus);
                }
            }
            Action::ScrollLeft => self.scroll_focused_horiz(-4),
            Action::ScrollRight => self.scroll_focused_horiz(4),

            Action::FocusPane(side) => {
                self.state.focus = side;
            }
            Action::ToggleFocus => {
                self.state.focus = self.state.focus.other();
            }

            Action::ToggleMinimap => {
                self.state.minimap_visible = !self.state.minimap_visible;
            }
            Action::ToggleHud => {
                self.state.hud_expanded = !self.state.hud_expanded;
            }
            Action::CycleTheme => {
                let name = next_theme(&self.state.theme.name);
                self.state.theme = Theme::from_name(name);
                self.set_status(format!("Theme: {name}"), false);
            }
            Action::Reload => {
                self.request_fetch();
            }

            Action::PaneWheel { side, delta } => {
                if let Some(view) = self.state.comparison.as_mut() {
                    view.sync.scroll_by(side, delta);
                }
            }
            Action::MinimapWheel { side, delta } => {
                // The minimap never scrolls itself; the delta lands on its pane.
                if let Some(view) = self.state.comparison.as_mut() {
                    view.sync.scroll_by(side, delta);
                }
            }
            Action::MinimapPress { side, y } => {
                let height = self.areas.get().minimap(side).height;
                if let Some(view) = self.state.comparison.as_mut() {
                    let scroll = *view.sync.pane(side);
                    let indicator = viewport_indicator(&scroll, height);
                    if !view.drag.press(side, y, indicator, &scroll) {
                        let target = click_scroll_target(y, height, &scroll);
                        view.sync.scroll_to(side, target);
                    }
                }
            }
            Action::DragMove { y } => {
                let areas = self.areas.get();
                if let Some(view) = self.state.comparison.as_mut() {
                    let Some(side) = view.drag.side() else {
                        return;
                    };
                    let height = areas.minimap(side).height;
                    let scroll = *view.sync.pane(side);
                    if let Some((side, top)) = view.drag.drag_to(y, height, &scroll) {
                        view.sync.scroll_to(side, top);
                    }
                }
            }
            Action::DragEnd => {
                if let Some(view) = self.state.comparison.as_mut() {
                    view.drag.release();
                }
            }
        }
    }

    fn scroll_focused(&mut self, delta: isize) {
        let focus = self.state.focus;
        if let Some(view) = self.state.comparison.as_mut() {
            view.sync.scroll_by(focus, delta);
        }
    }

    fn scroll_focused_horiz(&mut self, delta: isize) {
        let focus = self.state.focus;
        if let Some(view) = self.state.comparison.as_mut() {
            view.sync.scroll_horiz_by(focus, delta);
        }
    }

    fn viewport_height(&self) -> usize {
        self.state
            .comparison
            .as_ref()
            .map(|v| v.sync.pane(self.state.focus).metrics.viewport_height)
            .unwrap_or(0)
    }

    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        let areas = self.areas.get();
        let pos = Position::new(mouse.column, mouse.row);
        let hit = |side: PaneSide| -> Option<PaneSide> {
            if areas.minimap(side).contains(pos) {
                Some(side)
            } else {
                None
            }
        };
        let minimap_hit = hit(PaneSide::Left).or_else(|| hit(PaneSide::Right));
        let pane_hit = [PaneSide::Left, PaneSide::Right]
            .into_iter()
            .find(|&side| areas.pane(side).contains(pos));

        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let delta: isize = if mouse.kind == MouseEventKind::ScrollUp {
                    -3
                } else {
                    3
                };
                if let Some(side) = minimap_hit {
                    Some(Action::MinimapWheel { side, delta })
                } else if let Some(side) = pane_hit {
                    Some(Action::PaneWheel { side, delta })
                } else {
                    None
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(side) = minimap_hit {
                    let y = mouse.row.saturating_sub(areas.minimap(side).y);
                    Some(Action::MinimapPress { side, y })
                } else {
                    pane_hit.map(Action::FocusPane)
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let view = self.state.comparison.as_ref()?;
                let side = view.drag.side()?;
                let y = mouse.row.saturating_sub(areas.minimap(side).y);
                Some(Action::DragMove { y })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let view = self.state.comparison.as_ref()?;
                view.drag.is_dragging().then_some(Action::DragEnd)
            }
            _ => None,
        }
    }

    fn set_status(&mut self, msg: String, is_error: bool) {
        self.state.status_message = Some((msg, is_error));
        // ~3 seconds at 50ms tick rate
        self.status_clear_countdown = 60;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadedDocument;
    use crate::theme::Theme;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn doc(name: &str, lines: usize) -> LoadedDocument {
        LoadedDocument {
            file_name: name.to_string(),
            content: (0..lines)
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn test_app() -> App {
        let state = AppState::new(Theme::from_name("one-dark"), 4, true);
        let mut app = App::new(PathBuf::from("l"), PathBuf::from("r"), state);
        let view = ComparisonView::build(&doc("l", 200), &doc("r", 200), 4);
        app.state.comparison = Some(view);
        app.state
            .comparison
            .as_mut()
            .unwrap()
            .sync
            .set_viewports(20, 60);
        app.areas.set(LayoutAreas {
            left_pane: Rect::new(0, 1, 77, 40),
            left_minimap: Rect::new(77, 1, 3, 40),
            right_pane: Rect::new(80, 1, 77, 40),
            right_minimap: Rect::new(157, 1, 3, 40),
        });
        app
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_scroll_runs_coalesce() {
        let mut app = test_app();
        app.process_events(vec![
            key(KeyCode::Char('j')),
            key(KeyCode::Char('j')),
            key(KeyCode::Char('j')),
            key(KeyCode::Char('k')),
        ]);
        let view = app.state.comparison.as_ref().unwrap();
        assert_eq!(view.sync.pane(PaneSide::Left).top, 2);
        assert_eq!(view.sync.pane(PaneSide::Right).top, 2);
    }

    #[tokio::test]
    async fn test_key_after_indicator_grab_ends_drag() {
        let mut app = test_app();
        // Press on the viewport indicator (top rows of the left minimap)
        let grab = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 77,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        // Grab and key arrive in the same drained batch; the key must see the
        // drag started by the grab and end it rather than scroll.
        app.process_events(vec![grab, key(KeyCode::Char('j'))]);
        let view = app.state.comparison.as_ref().unwrap();
        assert!(!view.drag.is_dragging());
        assert_eq!(view.sync.pane(PaneSide::Left).top, 0);
    }
}
