//! Free-text input popups for the AI suggestion and the secure browser.

use super::centered_fixed;
use crate::app::App;
use crate::theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn render_input(frame: &mut Frame, title: &str, hint: Vec<Line<'_>>, value: &str) {
    let area = centered_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT_PRIMARY))
        .title(format!(" {title} "))
        .title_bottom(Line::from(" [Enter] Submit  [Esc] Cancel ").centered());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut text = vec![Line::from("")];
    text.extend(hint);
    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::styled(" > ", Style::default().fg(theme::TEXT_SECONDARY)),
        Span::styled(value, Style::default().fg(theme::TEXT_PRIMARY)),
        Span::styled(
            "█",
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]));

    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

/// Render the AI suggestion prompt
pub fn render_suggest(frame: &mut Frame, query: &str) {
    let hint = vec![
        Line::from(Span::styled(
            " Describe what you need, e.g.",
            Style::default().fg(theme::TEXT_PRIMARY),
        )),
        Line::from(Span::styled(
            "   \"fastest server for gaming in EU\"",
            Style::default().fg(theme::NORD_PURPLE),
        )),
    ];
    render_input(frame, "AI Server Suggestion", hint, query);
}

/// Render the secure browser address bar
pub fn render_browse(frame: &mut Frame, app: &App, url: &str) {
    let country = app.machine.selected().country;
    let hint = vec![
        Line::from(vec![
            Span::styled(" Visit a site through ", Style::default().fg(theme::TEXT_PRIMARY)),
            Span::styled(
                country,
                Style::default()
                    .fg(theme::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "   e.g. example.com",
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
    ];
    render_input(frame, "Secure Browser", hint, url);
}
