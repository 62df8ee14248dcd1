//! Single-value text widget, generic over the displayed value type.
//!
//! One widget covers integers, floats and strings. The value type decides how
//! it is formatted and when two values count as equal ([`WidgetValue`]); the
//! widget handles dirty tracking, hide-if-equal and runtime capacity.
//!
//! The declared width is the width of `capacity` padding characters, not of
//! the current text, so a docked neighbour does not jump around as digits come
//! and go. Output longer than the capacity is cut.

use alloc::string::String;
use core::fmt::Write;
use core::iter;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::canvas::{Canvas, Font, text_bounds};
use crate::colors::{BLACK, WHITE};
use crate::config::{DEFAULT_PADDING_CHAR, DEFAULT_TEXT_CAPACITY, MIN_TEXT_CAPACITY};
use crate::widget::{CapacityNegotiation, InitArgs, PostArgs, ValueFormat, Widget, WidgetBase, shifted, wipe};

// =============================================================================
// Value Formatting
// =============================================================================

/// A value a [`TextWidget`] can display.
pub trait WidgetValue: Clone + 'static {
    /// Append the display form of `self` to `out`.
    fn render(
        &self,
        fmt: &ValueFormat,
        out: &mut String,
    );

    /// Whether posting `other` after `self` would change nothing on screen.
    fn same(
        &self,
        other: &Self,
    ) -> bool;
}

impl WidgetValue for i32 {
    fn render(
        &self,
        fmt: &ValueFormat,
        out: &mut String,
    ) {
        let width = fmt.width.unwrap_or(0);
        write!(out, "{:>width$}", self).ok();
    }

    fn same(
        &self,
        other: &Self,
    ) -> bool {
        self == other
    }
}

impl WidgetValue for u32 {
    fn render(
        &self,
        fmt: &ValueFormat,
        out: &mut String,
    ) {
        let width = fmt.width.unwrap_or(0);
        write!(out, "{:>width$}", self).ok();
    }

    fn same(
        &self,
        other: &Self,
    ) -> bool {
        self == other
    }
}

impl WidgetValue for f32 {
    /// Precision defaults to zero decimals.
    fn render(
        &self,
        fmt: &ValueFormat,
        out: &mut String,
    ) {
        let width = fmt.width.unwrap_or(0);
        let precision = fmt.precision.unwrap_or(0);
        write!(out, "{:>width$.precision$}", self).ok();
    }

    /// NaN is treated as equal to NaN so an unavailable reading is not
    /// redrawn every frame.
    fn same(
        &self,
        other: &Self,
    ) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl WidgetValue for String {
    fn render(
        &self,
        fmt: &ValueFormat,
        out: &mut String,
    ) {
        let width = fmt.width.unwrap_or(0);
        match fmt.precision {
            Some(precision) => write!(out, "{:>width$.precision$}", self).ok(),
            None => write!(out, "{:>width$}", self).ok(),
        };
    }

    fn same(
        &self,
        other: &Self,
    ) -> bool {
        self == other
    }
}

// =============================================================================
// Init / Post Arguments
// =============================================================================

/// Text-specific init parameters, carried in [`InitArgs::extras`].
#[derive(Clone, Debug)]
pub struct TextInitArgs<V> {
    /// Right-justify the text inside the declared width.
    pub right_align: Option<bool>,
    /// Glyph used to measure the maximum width.
    pub max_width_padding_char: Option<char>,
    /// Pixels removed from the top of the declared height.
    pub trim_pixels_top: Option<i32>,
    /// Pixels removed from the bottom of the declared height.
    pub trim_pixels_bottom: Option<i32>,
    /// Hide the widget while its value equals this sentinel.
    pub hide_if_equal: Option<V>,
    /// Initial capacity in characters.
    pub capacity: Option<usize>,
}

impl<V> Default for TextInitArgs<V> {
    fn default() -> Self {
        Self {
            right_align: None,
            max_width_padding_char: None,
            trim_pixels_top: None,
            trim_pixels_bottom: None,
            hide_if_equal: None,
            capacity: None,
        }
    }
}

/// Payload accepted by [`TextWidget::post`](Widget::post).
#[derive(Clone, Debug, PartialEq)]
pub struct TextPostArgs<V> {
    pub value: V,
}

impl<V> TextPostArgs<V> {
    pub const fn new(value: V) -> Self { Self { value } }
}

// =============================================================================
// Text Widget
// =============================================================================

pub type IntWidget = TextWidget<i32>;
pub type UIntWidget = TextWidget<u32>;
pub type FloatWidget = TextWidget<f32>;
pub type StringWidget = TextWidget<String>;

pub struct TextWidget<V> {
    base: WidgetBase,
    prev_box: Rectangle,
    font: Option<Font>,
    align: Alignment,
    font_color: Rgb565,
    blank_color: Rgb565,
    fmt: ValueFormat,
    right_align: bool,
    padding_char: char,
    trim_top: i32,
    trim_bottom: i32,
    hide_if_equal: Option<V>,
    capacity: usize,
    last: Option<V>,
    buf: String,
}

impl<V> TextWidget<V>
where
    V: WidgetValue,
{
    pub const fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            prev_box: Rectangle::zero(),
            font: None,
            align: Alignment::Left,
            font_color: WHITE,
            blank_color: BLACK,
            fmt: ValueFormat::new(None, None),
            right_align: false,
            padding_char: DEFAULT_PADDING_CHAR,
            trim_top: 0,
            trim_bottom: 0,
            hide_if_equal: None,
            capacity: DEFAULT_TEXT_CAPACITY,
            last: None,
            buf: String::new(),
        }
    }

    /// Last accepted value.
    pub const fn value(&self) -> Option<&V> { self.last.as_ref() }

    /// Text as of the last redraw.
    pub fn text(&self) -> &str { &self.buf }

    /// Box covered by the last draw.
    pub const fn drawn_box(&self) -> Rectangle { self.prev_box }

    fn has_trims(&self) -> bool { self.trim_top > 0 || self.trim_bottom > 0 }

    fn padding(&self) -> String { iter::repeat_n(self.padding_char, self.capacity).collect() }

    /// Width of a full-capacity line, measured without a canvas.
    fn max_width(&self) -> i32 {
        self.font.map_or(0, |font| {
            text_bounds(self.base.anchor, &self.padding(), font, self.align).size.width as i32
        })
    }

    fn prep(&mut self) {
        self.buf.clear();
        if let Some(value) = &self.last {
            value.render(&self.fmt, &mut self.buf);
        }
        if let Some((cut, _)) = self.buf.char_indices().nth(self.capacity) {
            self.buf.truncate(cut);
        }
    }
}

impl<V> Default for TextWidget<V>
where
    V: WidgetValue,
{
    fn default() -> Self { Self::new() }
}

impl<V> Widget for TextWidget<V>
where
    V: WidgetValue,
{
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.base.configure(args);
        let Some(font) = args.font else {
            log::error!("[widget={}] initialize(): Required font parameter missing", self.base.id);
            return;
        };

        self.font = Some(font);
        self.align = args.align.unwrap_or(Alignment::Left);
        self.font_color = args.font_color.unwrap_or(WHITE);
        self.blank_color = args.blank_color.unwrap_or(BLACK);
        self.fmt = args.fmt.unwrap_or_default();

        if let Some(text) = args.extras.get::<TextInitArgs<V>>() {
            self.right_align = text.right_align.unwrap_or(false);
            self.padding_char = text.max_width_padding_char.unwrap_or(DEFAULT_PADDING_CHAR);
            self.trim_top = text.trim_pixels_top.unwrap_or(0).max(0);
            self.trim_bottom = text.trim_pixels_bottom.unwrap_or(0).max(0);
            self.hide_if_equal.clone_from(&text.hide_if_equal);
            self.capacity = text.capacity.unwrap_or(DEFAULT_TEXT_CAPACITY).max(MIN_TEXT_CAPACITY);
        }

        self.last = None;
        self.buf.clear();
        self.prev_box = Rectangle::zero();
        self.base.initialized = true;
    }

    fn blank(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        if !self.base.initialized {
            return;
        }
        if self.has_trims() {
            let clip = Rectangle::new(
                self.base.anchor,
                Size::new(self.width(canvas).max(0) as u32 + 1, self.height(canvas).max(0) as u32),
            );
            canvas.start_clipping(clip);
            wipe(canvas, &self.prev_box, self.blank_color);
            canvas.end_clipping();
        } else {
            wipe(canvas, &self.prev_box, self.blank_color);
        }
    }

    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        let Some(font) = self.font else {
            return;
        };
        let y = self.base.anchor.y - self.trim_top;
        let x = if self.right_align {
            let current = canvas.measure_text(self.base.anchor, &self.buf, font, self.align).size.width as i32;
            self.base.anchor.x + (self.width(canvas) - current)
        } else {
            self.base.anchor.x
        };

        let origin = Point::new(x, y);
        canvas.draw_text(origin, font, self.font_color, self.align, &self.buf);
        self.prev_box = canvas.measure_text(origin, &self.buf, font, self.align);
    }

    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        if !self.base.initialized {
            return;
        }
        let Some(post) = args.get::<TextPostArgs<V>>() else {
            return;
        };
        if self.last.as_ref().is_some_and(|last| last.same(&post.value)) {
            return;
        }
        self.last = Some(post.value.clone());
        self.base.dirty = true;
    }

    fn update(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        if !self.base.initialized {
            return;
        }
        let Some(last) = &self.last else {
            return;
        };

        match self.hide_if_equal.as_ref().map(|sentinel| sentinel.same(last)) {
            Some(true) => {
                if self.base.visible {
                    self.blank(canvas);
                    self.prev_box = Rectangle::zero();
                    self.base.visible = false;
                }
                self.base.dirty = false;
                return;
            }
            Some(false) if !self.base.visible => self.base.visible = true,
            _ => {}
        }

        if !self.base.dirty {
            return;
        }
        self.prep();
        self.blank(canvas);
        self.write(canvas);
        self.base.dirty = false;
    }

    fn width(
        &self,
        canvas: &dyn Canvas,
    ) -> i32 {
        if !self.base.initialized || !self.base.visible {
            return 0;
        }
        self.font.map_or(0, |font| {
            canvas.measure_text(self.base.anchor, &self.padding(), font, self.align).size.width as i32
        })
    }

    fn height(
        &self,
        canvas: &dyn Canvas,
    ) -> i32 {
        if !self.base.initialized {
            return 0;
        }
        self.font.map_or(0, |font| {
            let full = canvas.measure_text(self.base.anchor, &self.padding(), font, self.align).size.height as i32;
            (full - self.trim_top - self.trim_bottom).max(0)
        })
    }

    fn horizontal_shift(
        &mut self,
        dx: i32,
    ) {
        self.base.shift(dx);
        self.prev_box = shifted(self.prev_box, dx);
    }

    fn capacity_mut(&mut self) -> Option<&mut dyn CapacityNegotiation> { Some(self) }
}

impl<V> CapacityNegotiation for TextWidget<V>
where
    V: WidgetValue,
{
    fn unit_width(&self) -> i32 {
        let mut glyph = [0u8; 4];
        let glyph = self.padding_char.encode_utf8(&mut glyph);
        self.font.map_or(0, |font| {
            text_bounds(Point::zero(), glyph, font, Alignment::Left).size.width as i32
        })
    }

    fn set_capacity(
        &mut self,
        count: usize,
        preserve: bool,
    ) {
        let count = count.max(MIN_TEXT_CAPACITY);
        log::debug!("[widget={}] set_capacity(): {} -> {} chars", self.base.id, self.capacity, count);
        self.capacity = count;

        if preserve {
            if let Some((cut, _)) = self.buf.char_indices().nth(count) {
                self.buf.truncate(cut);
            }
        } else {
            self.buf.clear();
            self.last = None;
        }

        // Cover the wider of the old and new footprints on the next blank.
        let width = self.max_width().max(0) as u32;
        if width > self.prev_box.size.width {
            self.prev_box.size.width = width;
        }
        self.base.dirty = true;
    }

    fn capacity(&self) -> usize { self.capacity }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    use super::*;
    use crate::args_bag::ArgsBag;
    use crate::colors::RED;
    use crate::testing::{Op, RecordingCanvas};

    fn init_args(extras: ArgsBag) -> InitArgs {
        let mut args = InitArgs::new("text", Point::new(10, 2));
        args.font = Some(&FONT_6X10);
        args.font_color = Some(RED);
        args.extras = extras;
        args
    }

    fn int_widget(capacity: usize) -> IntWidget {
        let mut widget = IntWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<i32> {
            capacity: Some(capacity),
            ..Default::default()
        })));
        widget
    }

    fn post<V: WidgetValue>(
        widget: &mut TextWidget<V>,
        value: V,
    ) {
        widget.post(&PostArgs::new(&TextPostArgs::new(value)));
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[test]
    fn test_initialize_requires_font() {
        let mut widget = IntWidget::new();
        widget.initialize(&InitArgs::new("nofont", Point::zero()));
        assert!(!widget.is_initialized());

        let mut canvas = RecordingCanvas::new();
        post(&mut widget, 3);
        widget.update(&mut canvas);
        assert!(!widget.is_dirty(), "uninitialized widget ignores posts");
        assert!(canvas.ops.is_empty());
        assert_eq!(widget.width(&canvas), 0);
    }

    #[test]
    fn test_post_is_idempotent() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = int_widget(4);

        post(&mut widget, 5);
        assert!(widget.is_dirty());
        widget.update(&mut canvas);
        assert!(!widget.is_dirty());
        assert_eq!(canvas.texts(), ["5"]);

        canvas.clear();
        post(&mut widget, 5);
        assert!(!widget.is_dirty(), "same value must not dirty the widget");
        widget.update(&mut canvas);
        assert!(canvas.ops.is_empty(), "clean update must not touch the canvas");
    }

    #[test]
    fn test_mismatched_payload_ignored() {
        let mut widget = int_widget(4);
        widget.post(&PostArgs::new(&TextPostArgs::new(1.5_f32)));
        assert!(!widget.is_dirty());
        assert!(widget.value().is_none());
    }

    #[test]
    fn test_redraw_erases_previous_box() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = int_widget(4);

        post(&mut widget, 42);
        widget.update(&mut canvas);
        let first_box = widget.drawn_box();

        canvas.clear();
        post(&mut widget, 7);
        widget.update(&mut canvas);
        assert_eq!(canvas.ops.first(), Some(&Op::Fill(first_box, BLACK)), "old text erased before drawing");
        assert_eq!(canvas.texts(), ["7"]);
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    #[test]
    fn test_width_follows_capacity() {
        let canvas = RecordingCanvas::new();
        let mut widget = int_widget(4);
        assert_eq!(widget.width(&canvas), 24, "4 chars of a 6px font");
        assert_eq!(widget.height(&canvas), 10);

        widget.set_visible(false);
        assert_eq!(widget.width(&canvas), 0, "hidden widget has no width");
    }

    #[test]
    fn test_trims_reduce_height() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = IntWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<i32> {
            trim_pixels_top: Some(1),
            trim_pixels_bottom: Some(2),
            capacity: Some(2),
            ..Default::default()
        })));
        assert_eq!(widget.height(&canvas), 7);

        post(&mut widget, 9);
        widget.update(&mut canvas);
        assert_eq!(canvas.text_origins(), [Point::new(10, 1)], "drawn above the anchor by the top trim");

        canvas.clear();
        post(&mut widget, 8);
        widget.update(&mut canvas);
        assert_eq!(canvas.ops.first(), Some(&Op::Clip(Rectangle::new(Point::new(10, 2), Size::new(13, 7)))));
        assert_eq!(canvas.ops.get(2), Some(&Op::Unclip));
    }

    #[test]
    fn test_right_align() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = IntWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<i32> {
            right_align: Some(true),
            capacity: Some(4),
            ..Default::default()
        })));

        post(&mut widget, 7);
        widget.update(&mut canvas);
        assert_eq!(canvas.text_origins(), [Point::new(28, 2)], "one glyph flush with the right end of 24px");
    }

    #[test]
    fn test_horizontal_shift_moves_drawn_box() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = int_widget(3);
        post(&mut widget, 1);
        widget.update(&mut canvas);
        let before = widget.drawn_box();

        widget.horizontal_shift(-4);
        assert_eq!(widget.anchor(), Point::new(6, 2));
        assert_eq!(widget.drawn_box().top_left, before.top_left - Point::new(4, 0));

        canvas.clear();
        widget.blank(&mut canvas);
        assert_eq!(canvas.fills(), [(widget.drawn_box(), BLACK)]);
    }

    // -------------------------------------------------------------------------
    // Hide-if-equal
    // -------------------------------------------------------------------------

    #[test]
    fn test_hide_if_equal_erases_once() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = IntWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<i32> {
            hide_if_equal: Some(0),
            capacity: Some(3),
            ..Default::default()
        })));

        post(&mut widget, 12);
        widget.update(&mut canvas);
        assert!(widget.is_visible());

        canvas.clear();
        post(&mut widget, 0);
        widget.update(&mut canvas);
        assert!(!widget.is_visible());
        assert!(widget.is_enabled(), "hiding must not disable");
        assert_eq!(widget.width(&canvas), 0);
        assert_eq!(canvas.fills().len(), 1, "erased exactly once");
        assert!(canvas.texts().is_empty());

        canvas.clear();
        widget.update(&mut canvas);
        post(&mut widget, 0);
        widget.update(&mut canvas);
        assert!(canvas.ops.is_empty(), "no further erases while hidden");

        post(&mut widget, 3);
        widget.update(&mut canvas);
        assert!(widget.is_visible());
        assert_eq!(canvas.texts(), ["3"]);
    }

    #[test]
    fn test_hidden_widget_forgets_drawn_box() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = IntWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<i32> {
            hide_if_equal: Some(0),
            ..Default::default()
        })));

        post(&mut widget, 12);
        widget.update(&mut canvas);
        post(&mut widget, 0);
        widget.update(&mut canvas);
        assert_eq!(widget.drawn_box(), Rectangle::zero());

        canvas.clear();
        widget.horizontal_shift(-6);
        widget.blank(&mut canvas);
        assert!(canvas.fills().is_empty(), "hidden widget must not erase its old spot again");
    }

    // -------------------------------------------------------------------------
    // Formatting and capacity
    // -------------------------------------------------------------------------

    #[test]
    fn test_float_format() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = FloatWidget::new();
        let mut args = init_args(ArgsBag::new());
        args.fmt = Some(ValueFormat::new(Some(3), Some(0)));
        widget.initialize(&args);

        post(&mut widget, 21.6);
        widget.update(&mut canvas);
        assert_eq!(widget.text(), " 22");
    }

    #[test]
    fn test_nan_not_redrawn() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = FloatWidget::new();
        widget.initialize(&init_args(ArgsBag::new()));

        post(&mut widget, f32::NAN);
        widget.update(&mut canvas);
        post(&mut widget, f32::NAN);
        assert!(!widget.is_dirty(), "NaN after NaN is not a change");
    }

    #[test]
    fn test_output_cut_to_capacity() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = StringWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<String> {
            capacity: Some(4),
            ..Default::default()
        })));

        post(&mut widget, String::from("status"));
        widget.update(&mut canvas);
        assert_eq!(widget.text(), "stat");
    }

    #[test]
    fn test_set_capacity_preserves_and_truncates() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = StringWidget::new();
        widget.initialize(&init_args(ArgsBag::new().with(TextInitArgs::<String> {
            capacity: Some(11),
            ..Default::default()
        })));
        post(&mut widget, String::from("hello world"));
        widget.update(&mut canvas);

        widget.set_capacity(5, true);
        assert_eq!(widget.capacity(), 5);
        assert_eq!(widget.text(), "hello");
        assert!(widget.is_dirty(), "resize schedules a redraw");
        assert_eq!(widget.width(&canvas), 30);

        widget.update(&mut canvas);
        assert_eq!(widget.text(), "hello");
    }

    #[test]
    fn test_set_capacity_without_preserve_clears() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = StringWidget::new();
        widget.initialize(&init_args(ArgsBag::new()));
        post(&mut widget, String::from("abc"));
        widget.update(&mut canvas);

        widget.set_capacity(8, false);
        assert_eq!(widget.text(), "");
        assert!(widget.value().is_none());
    }

    #[test]
    fn test_set_capacity_widens_erase_box() {
        let mut canvas = RecordingCanvas::new();
        let mut widget = int_widget(2);
        post(&mut widget, 5);
        widget.update(&mut canvas);
        assert_eq!(widget.drawn_box().size.width, 6);

        widget.set_capacity(6, true);
        assert_eq!(widget.drawn_box().size.width, 36, "next blank covers the whole new footprint");
    }

    #[test]
    fn test_capacity_floor_and_unit_width() {
        let mut widget = int_widget(4);
        widget.set_capacity(0, true);
        assert_eq!(widget.capacity(), MIN_TEXT_CAPACITY);
        assert_eq!(widget.unit_width(), 6);
    }
}
