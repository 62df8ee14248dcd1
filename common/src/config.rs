//! Layout engine configuration constants.
//!
//! Everything here is a compile-time default. Runtime layout settings (gap,
//! reference edges, widget list) live in [`LayoutConfig`](crate::layout::LayoutConfig).

use crate::widget::Magnet;

// =============================================================================
// Registry Configuration
// =============================================================================

/// Maximum number of top-level widgets a registry or layout will accept.
pub const MAX_WIDGETS: usize = 16;

/// Default horizontal gap in pixels between docked widgets.
pub const DEFAULT_GAP_X: i32 = 0;

// =============================================================================
// Widget Defaults
// =============================================================================

/// Docking affinity used when a widget's init args do not name one.
pub const DEFAULT_MAGNET: Magnet = Magnet::Right;

/// Number of characters a text widget renders when no capacity is configured.
pub const DEFAULT_TEXT_CAPACITY: usize = 15;

/// Smallest capacity a text widget can be negotiated down to.
pub const MIN_TEXT_CAPACITY: usize = 1;

/// Character used to measure a text widget's maximum width.
/// A wide glyph keeps proportional fonts from under-reserving space.
pub const DEFAULT_PADDING_CHAR: char = '8';

// =============================================================================
// Composite Row Geometry
// =============================================================================

/// Vertical pitch between stacked text rows in composite widgets.
pub const ROW_PITCH: i32 = 11;

/// Character capacity a chat widget starts with before its first negotiation.
pub const CHAT_INITIAL_CAPACITY: usize = 16;

// =============================================================================
// Pixel Motion
// =============================================================================

/// Height of the bouncing dot column.
pub const MOTION_HEIGHT: i32 = 32;

// =============================================================================
// Weather
// =============================================================================

/// Edge length of a square condition icon when none is configured.
pub const WEATHER_ICON_SIZE: u32 = 32;

/// First hour (inclusive) that uses night icons.
pub const NIGHT_START_HOUR: u8 = 21;

/// First hour (inclusive) that goes back to day icons.
pub const NIGHT_END_HOUR: u8 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_capacity_bounds() {
        assert!(MIN_TEXT_CAPACITY >= 1, "a text widget must always be able to hold one character");
        assert!(DEFAULT_TEXT_CAPACITY >= MIN_TEXT_CAPACITY);
    }

    #[test]
    fn test_night_window_wraps_midnight() {
        assert!(NIGHT_START_HOUR > NIGHT_END_HOUR, "night window is expected to wrap past midnight");
    }
}
