use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::render::{PaneRow, RowKind};
use crate::scroll::PaneSide;
use crate::state::AppState;
use crate::theme::Theme;

use super::Component;

/// Width of the line-number gutter, excluding the trailing space.
pub const GUTTER_WIDTH: usize = 5;

/// One side of the comparison, bound to its PaneView and ScrollState.
pub struct Pane {
    pub side: PaneSide,
}

impl Component for Pane {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let is_focused = state.focus == self.side;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text_muted)
        };

        let Some(view) = state.comparison.as_ref() else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style);
            let content = if state.loading {
                " Loading..."
            } else {
                " No comparison loaded"
            };
            let paragraph = Paragraph::new(content)
                .style(Style::default().fg(theme.text_muted))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let (pane_view, name) = match self.side {
            PaneSide::Left => (&view.left_pane, &view.left_name),
            PaneSide::Right => (&view.right_pane, &view.right_name),
        };
        let scroll = view.sync.pane(self.side);

        let block = Block::default()
            .title(format!(" {name} "))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let content_width = (inner.width as usize).saturating_sub(GUTTER_WIDTH + 1);
        let lines: Vec<Line> = pane_view
            .rows
            .iter()
            .skip(scroll.top)
            .take(inner.height as usize)
            .map(|row| make_row_line(row, scroll.left, content_width, theme))
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn make_row_line<'a>(
    row: &PaneRow,
    scroll_left: usize,
    content_width: usize,
    theme: &Theme,
) -> Line<'a> {
    let (gutter_text, gutter_bg, content_style) = match row.kind {
        RowKind::Context => (
            format_lineno(row.lineno),
            None,
            Style::default().fg(theme.text),
        ),
        RowKind::Removed => (
            format_lineno(row.lineno),
            Some(theme.diff_del_bg),
            Style::default().fg(theme.diff_del_fg).bg(theme.diff_del_bg),
        ),
        RowKind::Added => (
            format_lineno(row.lineno),
            Some(theme.diff_add_bg),
            Style::default().fg(theme.diff_add_fg).bg(theme.diff_add_bg),
        ),
        RowKind::Placeholder => (
            " ".repeat(GUTTER_WIDTH + 1),
            Some(theme.placeholder_bg),
            Style::default().bg(theme.placeholder_bg),
        ),
    };

    let mut gutter_style = Style::default().fg(theme.text_muted);
    if let Some(bg) = gutter_bg {
        gutter_style = gutter_style.bg(bg);
    }

    // Horizontal window into the row, padded so changed-row backgrounds span
    // the full pane width.
    let mut visible: String = row
        .text
        .chars()
        .skip(scroll_left)
        .take(content_width)
        .collect();
    if content_style.bg.is_some() {
        let pad = content_width.saturating_sub(visible.chars().count());
        visible.extend(std::iter::repeat(' ').take(pad));
    }

    Line::from(vec![
        Span::styled(gutter_text, gutter_style),
        Span::styled(visible, content_style),
    ])
}

fn format_lineno(lineno: Option<usize>) -> String {
    let width = GUTTER_WIDTH;
    match lineno {
        Some(n) => format!("{n:>width$} "),
        None => " ".repeat(width + 1),
    }
}
