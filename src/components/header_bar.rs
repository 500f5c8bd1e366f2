use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

pub struct HeaderBar;

impl Component for HeaderBar {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        let mut spans = vec![
            Span::styled(
                " specdiff ",
                Style::default().fg(Color::Black).bg(theme.accent),
            ),
            Span::raw("  "),
        ];

        match state.comparison.as_ref() {
            Some(view) => {
                spans.push(Span::styled(
                    view.left_name.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    " \u{21c4} ",
                    Style::default().fg(theme.text_muted),
                ));
                spans.push(Span::styled(
                    view.right_name.clone(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("-{}", view.removed),
                    Style::default().fg(theme.diff_del_fg),
                ));
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!("+{}", view.added),
                    Style::default().fg(theme.diff_add_fg),
                ));
                if view.removed == 0 && view.added == 0 {
                    spans.push(Span::styled(
                        "  identical",
                        Style::default().fg(theme.success),
                    ));
                }
            }
            None if state.loading => {
                spans.push(Span::styled(
                    "loading\u{2026}",
                    Style::default().fg(theme.text_muted),
                ));
            }
            None => {}
        }

        if state.loading && state.comparison.is_some() {
            spans.push(Span::styled(
                "  reloading\u{2026}",
                Style::default().fg(theme.text_muted),
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}
