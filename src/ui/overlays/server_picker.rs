//! Searchable server list

use super::centered_rect;
use crate::app::App;
use crate::catalog::{self, SERVERS};
use crate::theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

/// Render the server picker with the rows matching `search`.
pub fn render(frame: &mut Frame, app: &mut App, search: &str) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(" Select Server ")
        .title_bottom(Line::from(" [↑↓] Move  [Enter] Select  [Esc] Cancel ").centered());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).split(inner);

    let search_line = Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(theme::TEXT_SECONDARY)),
        Span::styled(search, Style::default().fg(theme::TEXT_PRIMARY)),
        Span::styled(
            "█",
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);
    frame.render_widget(Paragraph::new(search_line), chunks[0]);

    let matches = catalog::filter(SERVERS, search);
    if matches.is_empty() {
        frame.render_widget(
            Paragraph::new(format!("No servers match \"{search}\""))
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme::INACTIVE)),
            chunks[1],
        );
        return;
    }

    let current = app.machine.selected().id;
    let rows: Vec<Row> = matches
        .iter()
        .map(|server| {
            let is_current = server.id == current;
            let marker = if is_current { "●" } else { " " };
            Row::new(vec![
                Cell::from(Span::styled(marker, Style::default().fg(theme::SUCCESS))),
                Cell::from(server.flag),
                Cell::from(server.country),
                Cell::from(Span::styled(
                    server.city,
                    Style::default().fg(theme::TEXT_SECONDARY),
                )),
            ])
            .style(if is_current {
                Style::default().fg(theme::SUCCESS)
            } else {
                Style::default().fg(theme::TEXT_PRIMARY)
            })
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ],
    )
    .header(
        Row::new(vec!["", "", "Country", "City"])
            .style(Style::default().fg(theme::TEXT_SECONDARY).add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(
        Style::default()
            .bg(theme::ROW_SELECTED_BG)
            .fg(theme::ROW_SELECTED_FG)
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(table, chunks[1], &mut app.server_list_state);
}
