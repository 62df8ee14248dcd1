//! Color constants for status bar widgets.
//!
//! Standard colors come from the `RgbColor` trait constants so they match the
//! values `embedded_graphics` uses everywhere else. Rgb565 is native to the
//! small SPI panels and LED matrices this crate targets, so no conversion
//! happens on the way to the display buffer.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Default blank (erase) color for every widget.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Default font color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Daily high temperature row.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Pixel motion dot.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue. Daily low temperature row.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow. Chat rows.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Magenta. Badges and counters that should stand out.
pub const PINK: Rgb565 = Rgb565::MAGENTA;

// =============================================================================
// Custom Colors
// =============================================================================

/// Teal for the current temperature row.
/// RGB565: (0, 40, 20).
pub const TEAL: Rgb565 = Rgb565::new(0, 40, 20);

/// Orange for warnings (pending updates, stale data).
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for outlines drawn while debugging layout.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
