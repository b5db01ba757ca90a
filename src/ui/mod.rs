//! UI rendering module

mod dashboard;
mod overlays;
mod widgets;

use crate::app::{App, InputMode};
use ratatui::Frame;

/// Main render function - dispatches to appropriate view
pub fn render(frame: &mut Frame, app: &mut App) {
    dashboard::render(frame, app);

    // Input overlays sit above the dashboard
    match app.input_mode.clone() {
        InputMode::ServerPicker { search } => overlays::server_picker::render(frame, app, &search),
        InputMode::Suggest { query } => overlays::prompt::render_suggest(frame, &query),
        InputMode::Browse { url } => overlays::prompt::render_browse(frame, app, &url),
        InputMode::Normal => {}
    }

    if app.show_help {
        overlays::help::render(frame, app);
    }

    if app.toast.is_some() {
        overlays::toast::render(frame, app);
    }
}
