//! A single dot bouncing up and down a one-pixel column.
//!
//! Every post, payload or not, advances the dot one step, so the widget is
//! dirty after every post. The layout ticks it with an empty post each frame
//! which makes a stalled render loop visible at a glance.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::Canvas;
use crate::colors::{BLACK, GREEN};
use crate::config::MOTION_HEIGHT;
use crate::widget::{InitArgs, PostArgs, Widget, WidgetBase};

pub struct PixelMotionWidget {
    base: WidgetBase,
    color: Rgb565,
    blank_color: Rgb565,
    /// Dot row relative to the anchor.
    position: i32,
    drawn: Option<Point>,
    forward: bool,
}

impl PixelMotionWidget {
    pub const fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            color: GREEN,
            blank_color: BLACK,
            position: MOTION_HEIGHT / 2,
            drawn: None,
            forward: true,
        }
    }

    /// Dot row relative to the anchor.
    pub const fn position(&self) -> i32 { self.position }

    fn step(&mut self) {
        let last = MOTION_HEIGHT - 1;
        if self.forward {
            if self.position < last {
                self.position += 1;
            } else {
                self.position -= 1;
                self.forward = false;
            }
        } else if self.position > 0 {
            self.position -= 1;
        } else {
            self.position += 1;
            self.forward = true;
        }
    }

    fn dot(at: Point) -> Rectangle { Rectangle::new(at, Size::new(1, 1)) }
}

impl Default for PixelMotionWidget {
    fn default() -> Self { Self::new() }
}

impl Widget for PixelMotionWidget {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.base.configure(args);
        self.color = args.font_color.unwrap_or(GREEN);
        self.blank_color = args.blank_color.unwrap_or(BLACK);
        self.position = MOTION_HEIGHT / 2;
        self.forward = true;
        self.drawn = None;
        self.base.initialized = true;
    }

    fn blank(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        if let Some(at) = self.drawn {
            canvas.fill_rect(Self::dot(at), self.blank_color);
        }
    }

    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        let at = self.base.anchor + Point::new(0, self.position);
        canvas.fill_rect(Self::dot(at), self.color);
        self.drawn = Some(at);
    }

    fn post(
        &mut self,
        _args: &PostArgs<'_>,
    ) {
        if !self.base.initialized {
            return;
        }
        self.step();
        self.base.dirty = true;
    }

    fn update(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        if !self.base.initialized || !self.base.dirty {
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
        i32::from(self.base.visible)
    }

    fn height(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        MOTION_HEIGHT
    }

    fn horizontal_shift(
        &mut self,
        dx: i32,
    ) {
        self.base.shift(dx);
        self.drawn = self.drawn.map(|at| at + Point::new(dx, 0));
    }
}
