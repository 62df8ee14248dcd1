//! Widget engine for small pixel status displays.
//!
//! This crate is platform-agnostic and shared between the desktop simulator
//! and any embedded target that provides an `embedded-graphics` draw target:
//!
//! - [`widget`]: Widget lifecycle, dirty tracking and capacity negotiation
//! - [`widgets`]: Text, composite and graphical widget kinds
//! - [`registry`]: Per-frame update fan-out and LEFT/RIGHT/AUTO docking
//! - [`layout`]: Declarative widget list, resource routing and the frame loop
//! - [`args_bag`]: Type-keyed container for kind-specific init arguments
//! - [`canvas`]: Drawing surface abstraction over `embedded-graphics`
//! - [`icons`]: Day/night icon lookup for weather conditions
//! - [`log_buffer`]: Fixed-size ring of recent log lines
//! - [`colors`] and [`config`]: RGB565 palette and engine constants
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` with `alloc`. Diagnostics go through the `log`
//! facade, so the binary chooses where they end up.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

extern crate alloc;

pub mod args_bag;
pub mod canvas;
pub mod colors;
pub mod config;
pub mod icons;
pub mod layout;
pub mod log_buffer;
pub mod registry;
pub mod widget;
pub mod widgets;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use args_bag::ArgsBag;
pub use canvas::{Canvas, DisplayCanvas, Font, Icon};
pub use colors::*;
pub use config::*;
pub use layout::{DisplaySession, LayoutConfig, WidgetConfig, WidgetKind, WidgetSet};
pub use registry::{Handle, WidgetRegistry};
pub use widget::{CapacityNegotiation, InitArgs, Magnet, PostArgs, ValueFormat, Widget};
