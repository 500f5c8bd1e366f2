/// Which of the two comparison panes an event or state refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneSide {
    Left,
    Right,
}

impl PaneSide {
    pub fn other(self) -> PaneSide {
        match self {
            PaneSide::Left => PaneSide::Right,
            PaneSide::Right => PaneSide::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            PaneSide::Left => 0,
            PaneSide::Right => 1,
        }
    }
}

/// Scrollable extent of a pane: content size vs. visible window size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMetrics {
    pub content_height: usize,
    pub content_width: usize,
    pub viewport_height: usize,
    pub viewport_width: usize,
}

impl ScrollMetrics {
    pub fn max_top(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn max_left(&self) -> usize {
        self.content_width.saturating_sub(self.viewport_width)
    }

    /// True when every row fits in the viewport and no vertical scrolling is possible.
    pub fn fits_vertically(&self) -> bool {
        self.viewport_height > 0 && self.content_height <= self.viewport_height
    }
}

/// Per-pane scroll position. Lives for the duration of one comparison view.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    pub top: usize,
    pub left: usize,
    pub metrics: ScrollMetrics,
}

impl ScrollState {
    pub fn new(metrics: ScrollMetrics) -> Self {
        Self {
            top: 0,
            left: 0,
            metrics,
        }
    }

    fn clamp(&mut self) {
        self.top = self.top.min(self.metrics.max_top());
        self.left = self.left.min(self.metrics.max_left());
    }

    fn set_top(&mut self, top: usize) {
        self.top = top.min(self.metrics.max_top());
    }

    fn add_top(&mut self, delta: isize) {
        self.top = self.top.saturating_add_signed(delta);
        self.clamp();
    }

    fn add_left(&mut self, delta: isize) {
        self.left = self.left.saturating_add_signed(delta);
        self.clamp();
    }
}

/// Bidirectionally links the two panes so a scroll on either side is mirrored
/// onto the other, without feedback oscillation.
///
/// Each mirrored write arms a one-shot suppress flag for the receiving pane;
/// the notification that write provokes consumes the flag and stops there
/// instead of propagating back. All state is per-instance, so independent
/// comparison views never interfere.
pub struct ScrollSynchronizer {
    panes: [ScrollState; 2],
    suppress: [bool; 2],
    notified: [u64; 2],
}

impl ScrollSynchronizer {
    pub fn new(left: ScrollMetrics, right: ScrollMetrics) -> Self {
        Self {
            panes: [ScrollState::new(left), ScrollState::new(right)],
            suppress: [false, false],
            notified: [0, 0],
        }
    }

    pub fn pane(&self, side: PaneSide) -> &ScrollState {
        &self.panes[side.index()]
    }

    /// Resize one pane's viewport. The position is re-clamped against the new
    /// extent. Widths can differ between sides when the pane split is uneven.
    pub fn set_viewport(&mut self, side: PaneSide, height: usize, width: usize) {
        let pane = &mut self.panes[side.index()];
        pane.metrics.viewport_height = height;
        pane.metrics.viewport_width = width;
        pane.clamp();
    }

    /// Resize both viewports to the same dimensions.
    pub fn set_viewports(&mut self, height: usize, width: usize) {
        self.set_viewport(PaneSide::Left, height, width);
        self.set_viewport(PaneSide::Right, height, width);
    }

    /// Set a pane's vertical position directly (minimap click / drag target).
    pub fn scroll_to(&mut self, side: PaneSide, top: usize) {
        self.panes[side.index()].set_top(top);
        self.notify(side);
    }

    pub fn scroll_by(&mut self, side: PaneSide, delta: isize) {
        self.panes[side.index()].add_top(delta);
        self.notify(side);
    }

    pub fn scroll_horiz_by(&mut self, side: PaneSide, delta: isize) {
        self.panes[side.index()].add_left(delta);
        self.notify(side);
    }

    pub fn scroll_to_top(&mut self, side: PaneSide) {
        self.scroll_to(side, 0);
    }

    pub fn scroll_to_bottom(&mut self, side: PaneSide) {
        let max = self.panes[side.index()].metrics.max_top();
        self.scroll_to(side, max);
    }

    /// A pane's position changed. Mirror it to the partner unless this
    /// notification is the echo of a mirror we just performed.
    fn notify(&mut self, side: PaneSide) {
        let idx = side.index();
        self.notified[idx] += 1;
        if self.suppress[idx] {
            self.suppress[idx] = false;
            return;
        }

        let other = side.other();
        let (top, left) = (self.panes[idx].top, self.panes[idx].left);
        let partner = &mut self.panes[other.index()];
        partner.top = top;
        partner.left = left;
        partner.clamp();
        self.suppress[other.index()] = true;
        self.notify(other);
    }

    #[cfg(test)]
    fn notification_count(&self, side: PaneSide) -> u64 {
        self.notified[side.index()]
    }
}
