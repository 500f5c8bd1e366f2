use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

pub struct ActionHud;

impl Component for ActionHud {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;

        // A status message takes over the whole bar until it expires
        if let Some((ref msg, is_error)) = state.status_message {
            let color = if is_error { theme.error } else { theme.success };
            let bar = Paragraph::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(msg.as_str(), Style::default().fg(color)),
            ]))
            .style(Style::default().bg(theme.surface));
            frame.render_widget(bar, area);
            return;
        }

        let bindings: &[(&str, &str)] = if state.hud_expanded {
            &[
                ("q", "quit"),
                ("j/k", "scroll"),
                ("h/l", "pan"),
                ("g/G", "top/bottom"),
                ("PgUp/PgDn", "page"),
                ("Tab", "focus"),
                ("1/2", "pane"),
                ("m", "minimap"),
                ("t", "theme"),
                ("r", "reload"),
                ("?", "less"),
            ]
        } else {
            &[
                ("q", "quit"),
                ("j/k", "scroll"),
                ("Tab", "focus"),
                ("r", "reload"),
                ("?", "help"),
            ]
        };

        let mut spans = Vec::new();
        spans.push(Span::raw(" "));
        for (i, (key, desc)) in bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{key}]"),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                (*desc).to_string(),
                Style::default().fg(theme.text_muted),
            ));
        }

        let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.surface));
        frame.render_widget(bar, area);
    }
}
