//! The widget contract shared by every on-screen element.
//!
//! # Lifecycle
//!
//! A widget is constructed empty and becomes usable only after
//! [`Widget::initialize`] accepts its [`InitArgs`]. A widget whose required
//! inputs are missing logs an error and stays uninitialized; every later call
//! on it is a no-op.
//!
//! # Post / Update
//!
//! Data sources call [`Widget::post`] whenever they have a value, as often as
//! they like. `post` compares the payload with the stored value and sets the
//! dirty flag only on change. Once per frame the registry calls
//! [`Widget::update`], which redraws only dirty widgets:
//!
//! | Step | Canvas access |
//! |------|---------------|
//! | `post(v)` with `v` unchanged | none, dirty untouched |
//! | `post(v)` with `v` changed | none, dirty set |
//! | `update()` while clean | none |
//! | `update()` while dirty | erase last-drawn box, draw, clear dirty |
//!
//! # Visibility
//!
//! Hidden widgets still receive posts and updates but report zero width, so
//! docking reflows around them. Disabled widgets are skipped by the registry
//! entirely.

use alloc::string::String;
use core::any::Any;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::args_bag::ArgsBag;
use crate::canvas::{Canvas, Font};
use crate::config::DEFAULT_MAGNET;

// =============================================================================
// Docking Affinity
// =============================================================================

/// Which part of the screen a widget is laid out against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Magnet {
    /// Packed left to right from the left reference edge.
    Left,
    /// Packed right to left from the right reference edge.
    Right,
    /// Elastic: fills whatever is left between the left and right blocks.
    Auto,
}

impl Magnet {
    /// Short lowercase name used in config dumps.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Auto => "auto",
        }
    }
}

// =============================================================================
// Init / Post Arguments
// =============================================================================

/// Construction parameters common to all widget kinds.
///
/// Optional fields are only read by the kinds that need them. Kind-specific
/// parameters travel in [`InitArgs::extras`].
#[derive(Clone)]
pub struct InitArgs {
    pub id: String,
    pub anchor: Point,
    pub priority: u8,
    pub magnet: Option<Magnet>,
    pub font: Option<Font>,
    pub align: Option<Alignment>,
    pub font_color: Option<Rgb565>,
    pub blank_color: Option<Rgb565>,
    pub fmt: Option<ValueFormat>,
    pub font2: Option<Font>,
    pub font2_color: Option<Rgb565>,
    pub extras: ArgsBag,
}

impl InitArgs {
    /// Args with only the identity and position filled in.
    pub fn new(
        id: impl Into<String>,
        anchor: Point,
    ) -> Self {
        Self {
            id: id.into(),
            anchor,
            priority: 0,
            magnet: None,
            font: None,
            align: None,
            font_color: None,
            blank_color: None,
            fmt: None,
            font2: None,
            font2_color: None,
            extras: ArgsBag::new(),
        }
    }
}

/// Printf-style width/precision applied when a value is formatted for display.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ValueFormat {
    /// Minimum rendered width, right-justified with spaces.
    pub width: Option<usize>,
    /// Digits after the decimal point (floating point values only).
    pub precision: Option<usize>,
}

impl ValueFormat {
    pub const fn new(
        width: Option<usize>,
        precision: Option<usize>,
    ) -> Self {
        Self { width, precision }
    }
}

/// Payload delivered to [`Widget::post`].
///
/// The payload is type-erased; each widget downcasts to the one type it
/// understands and ignores anything else.
#[derive(Clone, Copy, Default)]
pub struct PostArgs<'a> {
    extras: Option<&'a dyn Any>,
}

impl<'a> PostArgs<'a> {
    pub fn new(payload: &'a dyn Any) -> Self { Self { extras: Some(payload) } }

    /// A post without payload, used to tick animated widgets.
    pub const fn empty() -> Self { Self { extras: None } }

    /// The payload as `P`, or `None` if absent or of another type.
    pub fn get<P>(&self) -> Option<&'a P>
    where
        P: Any,
    {
        self.extras.and_then(|payload| payload.downcast_ref::<P>())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.extras.is_none() }
}

// =============================================================================
// Shared Widget State
// =============================================================================

/// State every widget carries, embedded by each concrete kind.
#[derive(Clone, Debug)]
pub struct WidgetBase {
    pub id: String,
    pub anchor: Point,
    pub priority: u8,
    pub magnet: Magnet,
    pub enabled: bool,
    pub visible: bool,
    pub initialized: bool,
    pub dirty: bool,
}

impl WidgetBase {
    /// Base state before `initialize` has run.
    pub const fn new() -> Self {
        Self {
            id: String::new(),
            anchor: Point::new(-1, -1),
            priority: 0,
            magnet: DEFAULT_MAGNET,
            enabled: true,
            visible: true,
            initialized: false,
            dirty: false,
        }
    }

    /// Copy the common fields out of `args`. Does not mark initialized.
    pub fn configure(
        &mut self,
        args: &InitArgs,
    ) {
        self.id.clone_from(&args.id);
        self.anchor = args.anchor;
        self.priority = args.priority;
        self.magnet = args.magnet.unwrap_or(DEFAULT_MAGNET);
    }

    /// Move the anchor horizontally.
    pub fn shift(
        &mut self,
        dx: i32,
    ) {
        log::debug!("[widget={}] horizontal_shift(): x {} -> {}", self.id, self.anchor.x, self.anchor.x + dx);
        self.anchor.x += dx;
    }
}

impl Default for WidgetBase {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Capacity Negotiation
// =============================================================================

/// Opt-in capability for elastic widgets whose content buffer can be resized
/// to fit the space the registry has left over.
///
/// Capacity is counted in content units (characters for text). The registry
/// converts available pixels to units with [`CapacityNegotiation::unit_width`].
pub trait CapacityNegotiation {
    /// Pixel cost of one unit of content.
    fn unit_width(&self) -> i32;

    /// Resize to `count` units. With `preserve`, existing content is kept
    /// (truncated when shrinking); otherwise it is cleared.
    fn set_capacity(
        &mut self,
        count: usize,
        preserve: bool,
    );

    /// Current capacity in units.
    fn capacity(&self) -> usize;
}

// =============================================================================
// Widget Trait
// =============================================================================

/// An element that renders one value (or a group of values) on the canvas.
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Accept construction parameters. Leaves the widget uninitialized if a
    /// required parameter is missing.
    fn initialize(
        &mut self,
        args: &InitArgs,
    );

    /// Erase the last-drawn region.
    fn blank(
        &mut self,
        canvas: &mut dyn Canvas,
    );

    /// Draw the current content. Must not be called while hidden.
    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    );

    /// Offer a new value. Stored and marked dirty only if it differs.
    fn post(
        &mut self,
        args: &PostArgs<'_>,
    );

    /// Redraw if dirty.
    fn update(
        &mut self,
        canvas: &mut dyn Canvas,
    );

    /// Declared footprint width. Zero while hidden.
    fn width(
        &self,
        canvas: &dyn Canvas,
    ) -> i32;

    /// Declared footprint height.
    fn height(
        &self,
        canvas: &dyn Canvas,
    ) -> i32;

    /// Move horizontally by `dx` pixels without drawing.
    fn horizontal_shift(
        &mut self,
        dx: i32,
    ) {
        self.base_mut().shift(dx);
    }

    /// The capacity-negotiation capability, for widgets that opt in.
    fn capacity_mut(&mut self) -> Option<&mut dyn CapacityNegotiation> { None }

    // -------------------------------------------------------------------------
    // Provided accessors
    // -------------------------------------------------------------------------

    fn id(&self) -> &str { &self.base().id }

    fn anchor(&self) -> Point { self.base().anchor }

    fn priority(&self) -> u8 { self.base().priority }

    fn magnet(&self) -> Magnet { self.base().magnet }

    fn is_enabled(&self) -> bool { self.base().enabled }

    fn set_enabled(
        &mut self,
        state: bool,
    ) {
        self.base_mut().enabled = state;
    }

    fn is_visible(&self) -> bool { self.base().visible }

    fn set_visible(
        &mut self,
        state: bool,
    ) {
        self.base_mut().visible = state;
    }

    fn is_initialized(&self) -> bool { self.base().initialized }

    fn is_dirty(&self) -> bool { self.base().dirty }

    fn set_dirty(
        &mut self,
        state: bool,
    ) {
        self.base_mut().dirty = state;
    }

    fn left_edge_x(&self) -> i32 { self.anchor().x }

    fn right_edge_x(
        &self,
        canvas: &dyn Canvas,
    ) -> i32 {
        self.anchor().x + self.width(canvas)
    }

    /// Declared footprint as a rectangle.
    fn footprint(
        &self,
        canvas: &dyn Canvas,
    ) -> Rectangle {
        let w = self.width(canvas).max(0) as u32;
        let h = self.height(canvas).max(0) as u32;
        Rectangle::new(self.anchor(), Size::new(w, h))
    }
}

// =============================================================================
// Last-Drawn Box Helpers
// =============================================================================

/// Whether `area` covers at least one pixel.
#[inline]
pub const fn is_drawn(area: &Rectangle) -> bool { area.size.width > 0 && area.size.height > 0 }

/// `area` moved horizontally by `dx`.
#[inline]
pub fn shifted(
    area: Rectangle,
    dx: i32,
) -> Rectangle {
    Rectangle::new(area.top_left + Point::new(dx, 0), area.size)
}

/// Fill the last-drawn box with `color`, if anything was drawn.
pub fn wipe(
    canvas: &mut dyn Canvas,
    prev_box: &Rectangle,
    color: Rgb565,
) {
    if is_drawn(prev_box) {
        canvas.fill_rect(*prev_box, color);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Reading(f32);

    #[test]
    fn test_post_args_downcast() {
        let reading = Reading(21.5);
        let args = PostArgs::new(&reading);
        assert_eq!(args.get::<Reading>(), Some(&Reading(21.5)));
        assert!(args.get::<i32>().is_none(), "mismatched payload type reads as absent");
        assert!(!args.is_empty());
    }

    #[test]
    fn test_post_args_empty() {
        let args = PostArgs::empty();
        assert!(args.is_empty());
        assert!(args.get::<Reading>().is_none());
    }

    #[test]
    fn test_base_configure_defaults_magnet() {
        let mut base = WidgetBase::new();
        let mut args = InitArgs::new("clock", Point::new(3, 4));
        args.priority = 7;
        base.configure(&args);

        assert_eq!(base.id, "clock");
        assert_eq!(base.anchor, Point::new(3, 4));
        assert_eq!(base.priority, 7);
        assert_eq!(base.magnet, DEFAULT_MAGNET);
        assert!(!base.initialized, "configure alone must not initialize");
    }

    #[test]
    fn test_base_shift() {
        let mut base = WidgetBase::new();
        base.anchor = Point::new(10, 2);
        base.shift(-4);
        assert_eq!(base.anchor, Point::new(6, 2), "shift only moves x");
    }

    #[test]
    fn test_shifted_box() {
        let area = Rectangle::new(Point::new(1, 1), Size::new(5, 5));
        assert_eq!(shifted(area, 3).top_left, Point::new(4, 1));
        assert_eq!(shifted(area, 3).size, area.size);
    }

    #[test]
    fn test_is_drawn() {
        assert!(!is_drawn(&Rectangle::zero()));
        assert!(is_drawn(&Rectangle::new(Point::zero(), Size::new(1, 1))));
    }
}
