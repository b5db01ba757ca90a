//! Footer widget with keybinding hints

use crate::app::{App, InputMode};
use crate::connection::ConnectionStatus;
use crate::constants::APP_VERSION;
use crate::theme;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BRACKET: Color = Color::Rgb(60, 60, 60);

/// Hints for the current mode and connection stage.
fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.input_mode {
        InputMode::ServerPicker { .. } => {
            return vec![("↑↓", "Move"), ("Enter", "Select"), ("Esc", "Cancel")];
        }
        InputMode::Suggest { .. } | InputMode::Browse { .. } => {
            return vec![("Enter", "Submit"), ("Esc", "Cancel")];
        }
        InputMode::Normal => {}
    }

    let mut hints = match app.machine.status() {
        ConnectionStatus::Disconnected => {
            let mut h = vec![("Enter", "Connect"), ("s", "Servers")];
            if !app.is_suggesting {
                h.push(("a", "AI Suggest"));
            }
            h
        }
        ConnectionStatus::Connected => vec![("Enter", "Disconnect"), ("b", "Browse")],
        _ => vec![("…", "Please wait")],
    };
    hints.extend([("j/k", "Logs"), ("?", "Help"), ("q", "Quit")]);
    hints
}

/// Render dashboard footer
pub fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    render_hints(frame, area, &hints(app));
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = vec![Span::raw(" ")];

    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled("[", Style::default().fg(BRACKET)));
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("]", Style::default().fg(BRACKET)));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*action, Style::default().fg(theme::TEXT_SECONDARY)));
    }

    let line = Line::from(spans);
    let area_width = area.width as usize;
    let line_width = line.width();

    frame.render_widget(Paragraph::new(line), area);

    // Version, right-aligned when there is room
    let version = format!("v{APP_VERSION} · simulated ");
    let version_width = version.chars().count();
    if area_width > line_width + version_width + 2 {
        #[allow(clippy::cast_possible_truncation)]
        let version_area = Rect::new(
            area.x + area.width - version_width as u16,
            area.y,
            version_width as u16,
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(version, Style::default().fg(BRACKET))),
            version_area,
        );
    }
}
