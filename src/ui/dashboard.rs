use crate::app::App;
use crate::browse::BrowseState;
use crate::connection::ConnectionStatus;
use crate::constants::{APP_NAME, APP_VERSION, MSG_NO_DATA, STAGE_DWELL};
use crate::session::Session;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use super::widgets;
use crate::theme;

/// Render the dashboard view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // 1. Status Header (1 row)
    // 2. Main Content (Flexible)
    // 3. Command Footer (1 row)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    widgets::footer::render_dashboard(frame, app, chunks[2]);

    // Main Content: Left (Connection + Server) | Right (Session + Browser + Log)
    let main_layout = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    let left = Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[0]);

    render_connection_panel(frame, app, left[0]);
    render_server_panel(frame, app, left[1]);

    let right = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .split(main_layout[1]);

    render_session_panel(frame, app, right[0]);
    render_browser_panel(frame, app, right[1]);
    render_activity_log(frame, app, right[2]);
}

fn separator() -> Span<'static> {
    Span::styled(" │ ", Style::default().fg(theme::NORD_POLAR_NIGHT_4))
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.machine.status();
    let (status_text, color) = match status {
        ConnectionStatus::Disconnected => ("○ DISCONNECTED", theme::ERROR),
        ConnectionStatus::Connected => ("● CONNECTED", theme::SUCCESS),
        ConnectionStatus::Disconnecting => ("◑ DISCONNECTING", theme::status_color(status)),
        _ => ("◐ CONNECTING", theme::status_color(status)),
    };

    let server = app.machine.selected();
    let address = match app.machine.address() {
        "" => MSG_NO_DATA,
        ip => ip,
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} v{APP_VERSION} ", APP_NAME.to_uppercase()),
            Style::default()
                .fg(theme::ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::raw("Status: "),
        Span::styled(
            status_text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::raw("Server: "),
        Span::styled(
            format!("{} {}", server.flag, server.country),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        separator(),
        Span::raw("IP: "),
        Span::styled(address.to_string(), Style::default().fg(theme::TEXT_PRIMARY)),
        separator(),
        Span::raw("Uptime: "),
        Span::styled(
            app.machine.elapsed_display(),
            Style::default().fg(theme::ACCENT_SECONDARY),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Progress through the connect chain, 0.0 to 1.0.
fn stage_progress(app: &App, now: Instant) -> f64 {
    let status = app.machine.status();
    let completed = match status {
        ConnectionStatus::Disconnected => return 0.0,
        ConnectionStatus::Connected => return 1.0,
        ConnectionStatus::Connecting | ConnectionStatus::Disconnecting => 0.0,
        ConnectionStatus::Authenticating => 1.0,
        ConnectionStatus::Securing => 2.0,
    };

    let remaining = app
        .machine
        .next_stage_at()
        .map_or(0.0, |at| at.saturating_duration_since(now).as_secs_f64());
    let within = (1.0 - remaining / STAGE_DWELL.as_secs_f64()).clamp(0.0, 1.0);

    if status == ConnectionStatus::Disconnecting {
        1.0 - within
    } else {
        (completed + within) / 3.0
    }
}

fn render_connection_panel(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.machine.status();
    let color = theme::status_color(status);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if status == ConnectionStatus::Connected {
            theme::BORDER_FOCUSED
        } else {
            theme::BORDER_DEFAULT
        }))
        .title(" Connection ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(inner);

    let button = match status {
        ConnectionStatus::Disconnected => "[ ⏻  CONNECT ]",
        ConnectionStatus::Connected => "[ ⏻  DISCONNECT ]",
        _ => "[ ⏻  ... ]",
    };

    let power = vec![
        Line::from(Span::styled(
            button,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            status.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(power).alignment(Alignment::Center),
        chunks[1],
    );

    let ratio = stage_progress(app, Instant::now());
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(theme::NORD_POLAR_NIGHT_3))
        .ratio(ratio)
        .label("");
    frame.render_widget(gauge, chunks[3]);

    let elapsed = Line::from(vec![
        Span::styled("Elapsed: ", Style::default().fg(theme::TEXT_SECONDARY)),
        Span::styled(
            app.machine.elapsed_display(),
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(elapsed).alignment(Alignment::Center),
        chunks[4],
    );
}

fn render_server_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Server ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let server = app.machine.selected();
    let locked = app.machine.status() != ConnectionStatus::Disconnected;

    let ai_status = if app.is_suggesting {
        Span::styled("thinking...", Style::default().fg(theme::NORD_PURPLE))
    } else if app.ai_enabled {
        Span::styled("ready [a]", Style::default().fg(theme::SUCCESS))
    } else {
        Span::styled("no API key", Style::default().fg(theme::INACTIVE))
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Location : ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(
                format!("{} {}", server.flag, server.country),
                Style::default()
                    .fg(theme::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("City     : ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(server.city, Style::default().fg(theme::TEXT_PRIMARY)),
        ]),
        Line::from(vec![
            Span::styled("Subnet   : ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(
                format!("{}.x", server.ip_prefix),
                Style::default().fg(theme::NORD_POLAR_NIGHT_4),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Change   : ", Style::default().fg(theme::TEXT_SECONDARY)),
            if locked {
                Span::styled("locked while active", Style::default().fg(theme::WARNING))
            } else {
                Span::styled("[s] pick", Style::default().fg(theme::TEXT_PRIMARY))
            },
        ]),
        Line::from(vec![
            Span::styled("AI       : ", Style::default().fg(theme::TEXT_SECONDARY)),
            ai_status,
        ]),
    ];

    frame.render_widget(Paragraph::new(text), inner);
}

fn render_session_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Session ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rates = app.machine.rates();
    let session = app.machine.session();
    let address = session.map_or(MSG_NO_DATA, Session::address);
    let exit = session.map_or_else(
        || MSG_NO_DATA.to_string(),
        |s| format!("{} {}", s.server().flag, s.server().city),
    );

    let text = vec![
        Line::from(vec![
            Span::styled(" ▼ Download : ", Style::default().fg(theme::NORD_FROST_2)),
            Span::styled(
                crate::utils::format_rate(rates.download),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::styled(" ▲ Upload   : ", Style::default().fg(theme::NORD_GREEN)),
            Span::styled(
                crate::utils::format_rate(rates.upload),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::styled(" ◆ New IP   : ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(
                address.to_string(),
                Style::default()
                    .fg(theme::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" ◎ Exit     : ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(exit, Style::default().fg(theme::TEXT_PRIMARY)),
        ]),
    ];

    frame.render_widget(Paragraph::new(text), inner);
}

fn render_browser_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Secure Browser ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(session) = app.machine.session() else {
        frame.render_widget(
            Paragraph::new("Connect to browse securely")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme::INACTIVE)),
            inner,
        );
        return;
    };

    let width = inner.width.saturating_sub(2) as usize;
    let line = match session.browser().state() {
        BrowseState::Idle => Line::from(vec![
            Span::styled("Press ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(
                "[b]",
                Style::default()
                    .fg(theme::ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " to open a site through the tunnel",
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
        ]),
        BrowseState::Loading { url, .. } => Line::from(vec![
            Span::styled("⟳ Loading ", Style::default().fg(theme::WARNING)),
            Span::styled(
                crate::utils::truncate(url, width.saturating_sub(10)),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
        ]),
        BrowseState::Done { message } => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme::SUCCESS),
        )),
    };

    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
}

fn render_activity_log(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(" Event Log ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.logs.is_empty() {
        frame.render_widget(
            Paragraph::new("No activity yet").alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let logs: Vec<Line> = app
        .logs
        .iter()
        .map(|msg| {
            let (timestamp, content) = msg.split_once(' ').unwrap_or(("", msg.as_str()));

            let style = if content.starts_with("ERROR") || content.contains("Error") {
                Style::default().fg(theme::ERROR)
            } else if content.starts_with("SUCCESS") {
                Style::default().fg(theme::SUCCESS)
            } else if content.starts_with("WARN") {
                Style::default().fg(theme::WARNING)
            } else if content.starts_with("AI") {
                Style::default().fg(theme::NORD_PURPLE)
            } else if content.starts_with("STATUS") || content.starts_with("BROWSE") {
                Style::default().fg(theme::ACCENT_SECONDARY)
            } else {
                Style::default().fg(theme::INACTIVE)
            };

            Line::from(vec![
                Span::styled(
                    format!("[{timestamp}] "),
                    Style::default().fg(theme::TEXT_SECONDARY),
                ),
                Span::styled(content, style),
            ])
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    let scroll_offset = if app.logs_auto_scroll {
        logs.len().saturating_sub(inner.height as usize) as u16
    } else {
        app.logs_scroll
    };

    frame.render_widget(
        Paragraph::new(logs)
            .wrap(Wrap { trim: true })
            .scroll((scroll_offset, 0)),
        inner,
    );
}
