//! Color constants for the TrendPost UI.
//!
//! Minimal dark palette; status colors follow the web client's badge
//! scheme (green posted, red failed, magenta scheduled, blue otherwise).

use ratatui::style::Color;

use crate::models::PostStatus;

/// Primary border color.
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent for focused elements and the active tab.
pub const COLOR_ACCENT: Color = Color::Cyan;

/// Header / logo text.
pub const COLOR_HEADER: Color = Color::White;

/// Regular text.
pub const COLOR_TEXT: Color = Color::White;

/// Dim text for secondary info.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Cursor block background in text inputs.
pub const COLOR_CURSOR_BG: Color = Color::Cyan;

/// Running/online elements.
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Error accents.
pub const COLOR_ERROR: Color = Color::Red;

/// Selected card highlight.
pub const COLOR_SELECTED: Color = Color::LightCyan;

/// Badge color for a post status.
pub fn status_color(status: PostStatus) -> Color {
    match status {
        PostStatus::Posted => Color::LightGreen,
        PostStatus::Failed => Color::Red,
        PostStatus::Scheduled => Color::Magenta,
        PostStatus::Approved => Color::LightBlue,
        PostStatus::Pending => Color::Blue,
    }
}
