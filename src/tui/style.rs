//! Color constants for the TUI.

use ratatui::style::Color;

use crate::assets::Sector;

/// Demand sector accent.
pub const DEMAND_COLOR: Color = Color::Magenta;
/// Supply sector accent.
pub const SUPPLY_COLOR: Color = Color::Green;
/// Rows whose type is outside the known set.
pub const UNRECOGNIZED_COLOR: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Inline error text.
pub const ERROR_FG: Color = Color::Red;
/// Highlighted table row / focused field.
pub const HIGHLIGHT_BG: Color = Color::Blue;

/// Returns the accent color for a sector.
pub fn sector_color(sector: Sector) -> Color {
    match sector {
        Sector::Demand => DEMAND_COLOR,
        Sector::Supply => SUPPLY_COLOR,
    }
}
