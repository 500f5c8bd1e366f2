use crate::diff::{EditOp, EditScript};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Line present unchanged in both panes.
    Context,
    /// Left-only line, shown with a removed tint.
    Removed,
    /// Right-only line, shown with an added tint.
    Added,
    /// Blank filler keeping this pane aligned with the other side.
    Placeholder,
}

/// One visual row of a pane. Placeholder rows carry no line number and no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneRow {
    pub kind: RowKind,
    pub lineno: Option<usize>,
    pub text: String,
}

impl PaneRow {
    fn placeholder() -> Self {
        Self {
            kind: RowKind::Placeholder,
            lineno: None,
            text: String::new(),
        }
    }
}

/// Toolkit-independent view model for one pane of the comparison.
#[derive(Debug, Clone, Default)]
pub struct PaneView {
    pub rows: Vec<PaneRow>,
    /// Widest row in display columns, for horizontal scroll extent.
    pub max_width: usize,
}

impl PaneView {
    fn push(&mut self, row: PaneRow) {
        self.max_width = self.max_width.max(row.text.chars().count());
        self.rows.push(row);
    }
}

/// Project an edit script onto two row-aligned pane views.
///
/// Line numbers are independent per-pane counters that only advance when the
/// pane has real content on a row, reproducing each file's own numbering
/// despite the alignment placeholders.
pub fn render_panes<S: AsRef<str>>(
    script: &EditScript,
    left_lines: &[S],
    right_lines: &[S],
    tab_width: usize,
) -> (PaneView, PaneView) {
    let mut left = PaneView::default();
    let mut right = PaneView::default();
    let mut left_no = 0usize;
    let mut right_no = 0usize;

    for op in script {
        match *op {
            EditOp::Equal { left: li, right: ri } => {
                left_no += 1;
                right_no += 1;
                left.push(PaneRow {
                    kind: RowKind::Context,
                    lineno: Some(left_no),
                    text: sanitize(left_lines[li].as_ref(), tab_width),
                });
                right.push(PaneRow {
                    kind: RowKind::Context,
                    lineno: Some(right_no),
                    text: sanitize(right_lines[ri].as_ref(), tab_width),
                });
            }
            EditOp::Removed { left: li } => {
                left_no += 1;
                left.push(PaneRow {
                    kind: RowKind::Removed,
                    lineno: Some(left_no),
                    text: sanitize(left_lines[li].as_ref(), tab_width),
                });
                right.push(PaneRow::placeholder());
            }
            EditOp::Added { right: ri } => {
                right_no += 1;
                left.push(PaneRow::placeholder());
                right.push(PaneRow {
                    kind: RowKind::Added,
                    lineno: Some(right_no),
                    text: sanitize(right_lines[ri].as_ref(), tab_width),
                });
            }
        }
    }

    (left, right)
}

/// Make a raw document line safe for the terminal cell grid: tabs become
/// spaces, control characters are dropped. The terminal analog of escaping
/// before embedding into rendered output.
pub fn sanitize(line: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\t' => {
                let width = tab_width.max(1);
                let pad = width - (out.chars().count() % width);
                out.extend(std::iter::repeat(' ').take(pad));
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
