//! Help overlay

use super::centered_rect;
use crate::app::App;
use crate::constants::APP_VERSION;
use crate::theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "CONNECTION",
        &[
            ("c/Enter", "Connect / Disconnect"),
            ("d", "Disconnect"),
        ],
    ),
    (
        "SERVERS",
        &[
            ("s", "Pick server (type to search)"),
            ("a", "Ask AI for a server"),
        ],
    ),
    (
        "SESSION",
        &[("b", "Open a site in the secure browser")],
    ),
    (
        "ACTIVITY LOG",
        &[("j/k", "Scroll logs")],
    ),
    (
        "GLOBAL",
        &[("?", "Toggle help"), ("q", "Quit")],
    ),
];

/// Render help overlay
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 80, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT_PRIMARY))
        .title(" Help ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key_style = Style::default()
        .fg(theme::ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme::TEXT_PRIMARY);
    let header_style = Style::default()
        .fg(theme::WARNING)
        .add_modifier(Modifier::BOLD);
    let subtle_style = Style::default().fg(theme::TEXT_SECONDARY);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "DRIFTVPN",
                Style::default()
                    .fg(theme::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - Simulated VPN Client "),
            Span::styled(format!("v{APP_VERSION}"), subtle_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("No traffic is tunneled; every number on screen is simulated.", subtle_style),
        ]),
        Line::from(""),
        Line::from(vec![Span::raw("  "), Span::styled("KEYBINDINGS", header_style)]),
    ];

    for (section, keys) in KEYS {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(*section, header_style),
        ]));
        for (key, desc) in *keys {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{key:<10}"), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
    }

    if !app.ai_enabled {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                "AI suggestions need API_KEY (or --api-key).",
                Style::default().fg(theme::WARNING),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        subtle_style,
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
