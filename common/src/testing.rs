//! Test doubles shared by the unit tests of every module.
//!
//! [`RecordingCanvas`] measures text with real font metrics but only records
//! what was drawn. [`ProbeWidget`] has a fixed footprint and counts its
//! blank/write calls, which is all the docking tests need.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::canvas::{Canvas, Font, Icon, text_bounds};
use crate::colors::{BLACK, WHITE};
use crate::widget::{CapacityNegotiation, InitArgs, Magnet, PostArgs, Widget, WidgetBase};

// =============================================================================
// Recording Canvas
// =============================================================================

/// One recorded canvas call.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Fill(Rectangle, Rgb565),
    Text { origin: Point, text: String, color: Rgb565 },
    Image { origin: Point, size: Size, on: Rgb565 },
    Clip(Rectangle),
    Unclip,
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new() -> Self { Self::default() }

    pub fn clear(&mut self) { self.ops.clear(); }

    pub fn fills(&self) -> Vec<(Rectangle, Rgb565)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(area, color) => Some((*area, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_origins(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        self.ops.push(Op::Fill(area, color));
    }

    fn measure_text(
        &self,
        origin: Point,
        text: &str,
        font: Font,
        align: Alignment,
    ) -> Rectangle {
        text_bounds(origin, text, font, align)
    }

    fn draw_text(
        &mut self,
        origin: Point,
        _font: Font,
        color: Rgb565,
        _align: Alignment,
        text: &str,
    ) {
        self.ops.push(Op::Text {
            origin,
            text: text.to_string(),
            color,
        });
    }

    fn draw_image(
        &mut self,
        origin: Point,
        icon: &Icon,
        on: Rgb565,
        _off: Option<Rgb565>,
    ) {
        self.ops.push(Op::Image {
            origin,
            size: icon.size(),
            on,
        });
    }

    fn start_clipping(
        &mut self,
        area: Rectangle,
    ) {
        self.ops.push(Op::Clip(area));
    }

    fn end_clipping(&mut self) { self.ops.push(Op::Unclip); }
}

// =============================================================================
// Probe Widget
// =============================================================================

/// Payload that resizes a probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeWidth(pub i32);

/// Fixed-footprint widget that records what the registry did to it.
pub struct ProbeWidget {
    base: WidgetBase,
    width: i32,
    height: i32,
    elastic: Option<Elastic>,
    /// Anchor x at every `blank()` call.
    pub blanked_at: Vec<i32>,
    /// Anchor x at every `write()` call.
    pub written_at: Vec<i32>,
}

struct Elastic {
    unit: i32,
    count: usize,
    resizes: Vec<(usize, bool)>,
}

impl ProbeWidget {
    pub fn new(
        id: &str,
        x: i32,
        width: i32,
        magnet: Magnet,
        priority: u8,
    ) -> Self {
        let mut args = InitArgs::new(id, Point::new(x, 0));
        args.magnet = Some(magnet);
        args.priority = priority;

        let mut probe = Self {
            base: WidgetBase::new(),
            width,
            height: 8,
            elastic: None,
            blanked_at: Vec::new(),
            written_at: Vec::new(),
        };
        probe.initialize(&args);
        probe
    }

    /// An AUTO probe whose width is `unit * count` and which negotiates capacity.
    pub fn elastic(
        id: &str,
        x: i32,
        unit: i32,
        count: usize,
    ) -> Self {
        let mut probe = Self::new(id, x, 0, Magnet::Auto, 0);
        probe.elastic = Some(Elastic {
            unit,
            count,
            resizes: Vec::new(),
        });
        probe
    }

    /// Every `(count, preserve)` passed to `set_capacity`.
    pub fn resizes(&self) -> &[(usize, bool)] { self.elastic.as_ref().map_or(&[], |e| e.resizes.as_slice()) }

    pub fn reset_counters(&mut self) {
        self.blanked_at.clear();
        self.written_at.clear();
    }
}

impl Widget for ProbeWidget {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.base.configure(args);
        self.base.initialized = true;
    }

    fn blank(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        self.blanked_at.push(self.base.anchor.x);
        let area = self.footprint(canvas);
        canvas.fill_rect(area, BLACK);
    }

    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        self.written_at.push(self.base.anchor.x);
        let area = self.footprint(canvas);
        canvas.fill_rect(area, WHITE);
    }

    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        if let Some(&ProbeWidth(width)) = args.get::<ProbeWidth>() {
            if width != self.width {
                self.width = width;
                self.base.dirty = true;
            }
        }
    }

    fn update(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        if !self.base.dirty {
            return;
        }
        self.blank(canvas);
        if self.base.visible {
            self.write(canvas);
        }
        self.base.dirty = false;
    }

    fn width(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        if !self.base.visible {
            return 0;
        }
        match &self.elastic {
            Some(e) => e.unit * e.count as i32,
            None => self.width,
        }
    }

    fn height(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        self.height
    }

    fn capacity_mut(&mut self) -> Option<&mut dyn CapacityNegotiation> {
        if self.elastic.is_some() { Some(self) } else { None }
    }
}

impl CapacityNegotiation for ProbeWidget {
    fn unit_width(&self) -> i32 { self.elastic.as_ref().map_or(1, |e| e.unit) }

    fn set_capacity(
        &mut self,
        count: usize,
        preserve: bool,
    ) {
        if let Some(e) = self.elastic.as_mut() {
            e.count = count;
            e.resizes.push((count, preserve));
        }
    }

    fn capacity(&self) -> usize { self.elastic.as_ref().map_or(0, |e| e.count) }
}
