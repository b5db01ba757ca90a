//! Nord-based color theme.
//!
//! Raw palette entries plus the semantic aliases the widgets use, and the
//! mapping from connection stage to status color.

use crate::connection::ConnectionStatus;
use ratatui::style::Color;

// === Nord Palette ===

// Polar night: separators, gauge track, muted chrome
pub const NORD_POLAR_NIGHT_3: Color = Color::Rgb(67, 76, 94);
pub const NORD_POLAR_NIGHT_4: Color = Color::Rgb(76, 86, 106);
pub const NORD_SNOW_STORM_1: Color = Color::Rgb(216, 222, 233);
// Frost
pub const NORD_FROST_2: Color = Color::Rgb(136, 192, 208);
pub const NORD_FROST_3: Color = Color::Rgb(129, 161, 193);
// Aurora
pub const NORD_RED: Color = Color::Rgb(191, 97, 106);
pub const NORD_ORANGE: Color = Color::Rgb(208, 135, 112);
pub const NORD_YELLOW: Color = Color::Rgb(235, 203, 139);
pub const NORD_GREEN: Color = Color::Rgb(163, 190, 140);
/// Used for everything AI-related.
pub const NORD_PURPLE: Color = Color::Rgb(180, 142, 173);

// === Semantic Aliases ===

pub const TEXT_PRIMARY: Color = NORD_SNOW_STORM_1;
pub const TEXT_SECONDARY: Color = NORD_POLAR_NIGHT_4;
pub const ACCENT_PRIMARY: Color = NORD_FROST_2;
pub const ACCENT_SECONDARY: Color = NORD_FROST_3;
pub const SUCCESS: Color = NORD_GREEN;
pub const WARNING: Color = NORD_YELLOW;
pub const ERROR: Color = NORD_RED;
pub const INACTIVE: Color = Color::Gray;
pub const BORDER_DEFAULT: Color = NORD_POLAR_NIGHT_3;
/// Border of the panel that reflects a live session.
pub const BORDER_FOCUSED: Color = NORD_FROST_2;
pub const ROW_SELECTED_BG: Color = Color::Rgb(40, 40, 40);
pub const ROW_SELECTED_FG: Color = NORD_FROST_2;

/// Color used for a connection stage.
///
/// Connect stages share the warning color; teardown gets its own so a
/// disconnect in progress is not mistaken for a connect.
pub fn status_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Disconnected => INACTIVE,
        ConnectionStatus::Connecting
        | ConnectionStatus::Authenticating
        | ConnectionStatus::Securing => WARNING,
        ConnectionStatus::Connected => SUCCESS,
        ConnectionStatus::Disconnecting => NORD_ORANGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_stages_are_distinguishable() {
        assert_eq!(status_color(ConnectionStatus::Securing), WARNING);
        assert_ne!(
            status_color(ConnectionStatus::Disconnecting),
            status_color(ConnectionStatus::Connecting)
        );
        assert_ne!(
            status_color(ConnectionStatus::Connected),
            status_color(ConnectionStatus::Disconnected)
        );
    }
}
