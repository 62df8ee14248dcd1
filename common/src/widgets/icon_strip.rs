//! Horizontal strip of equally sized icons, e.g. avatars of live streamers.
//!
//! The posted image is a pre-composed strip; only the first `count` icon
//! cells of it are shown, so the declared width grows and shrinks with the
//! count and docked neighbours follow.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::{Canvas, Icon};
use crate::colors::{BLACK, WHITE};
use crate::widget::{InitArgs, PostArgs, Widget, WidgetBase, shifted, wipe};

/// Strip geometry. Required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconStripInitArgs {
    pub icon_width: i32,
    pub icon_height: i32,
    pub max_icons: usize,
}

/// Strip image and number of cells to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconStripPostArgs {
    pub icon: Icon,
    pub count: usize,
}

pub struct IconStripWidget {
    base: WidgetBase,
    geometry: IconStripInitArgs,
    on_color: Rgb565,
    blank_color: Rgb565,
    last: Option<IconStripPostArgs>,
    prev_box: Rectangle,
}

impl IconStripWidget {
    pub const fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            geometry: IconStripInitArgs {
                icon_width: 0,
                icon_height: 0,
                max_icons: 0,
            },
            on_color: WHITE,
            blank_color: BLACK,
            last: None,
            prev_box: Rectangle::zero(),
        }
    }

    /// Number of cells currently shown.
    pub fn count(&self) -> usize { self.last.map_or(0, |last| last.count) }

    /// Box covered by the last draw.
    pub const fn drawn_box(&self) -> Rectangle { self.prev_box }
}

impl Default for IconStripWidget {
    fn default() -> Self { Self::new() }
}

impl Widget for IconStripWidget {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.base.configure(args);
        let Some(geometry) = args.extras.get::<IconStripInitArgs>() else {
            log::error!("[widget={}] initialize(): Required icon geometry missing", self.base.id);
            return;
        };
        self.geometry = *geometry;
        self.on_color = args.font_color.unwrap_or(WHITE);
        self.blank_color = args.blank_color.unwrap_or(BLACK);
        self.last = None;
        self.prev_box = Rectangle::zero();
        self.base.initialized = true;
    }

    fn blank(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        wipe(canvas, &self.prev_box, self.blank_color);
    }

    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        let Some(last) = self.last else {
            return;
        };
        let area = self.footprint(canvas);
        canvas.start_clipping(area);
        canvas.draw_image(self.base.anchor, &last.icon, self.on_color, Some(self.blank_color));
        canvas.end_clipping();
        self.prev_box = area;
    }

    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        if !self.base.initialized {
            return;
        }
        let Some(post) = args.get::<IconStripPostArgs>() else {
            return;
        };
        let post = IconStripPostArgs {
            icon: post.icon,
            count: post.count.min(self.geometry.max_icons),
        };
        if self.last == Some(post) {
            return;
        }
        self.last = Some(post);
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
        self.write(canvas);
        self.base.dirty = false;
    }

    fn width(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        if !self.base.initialized || !self.base.visible {
            return 0;
        }
        self.geometry.icon_width * self.count() as i32
    }

    fn height(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        if !self.base.initialized {
            return 0;
        }
        self.geometry.icon_height
    }

    fn horizontal_shift(
        &mut self,
        dx: i32,
    ) {
        self.base.shift(dx);
        self.prev_box = shifted(self.prev_box, dx);
    }
}

// =============================================================================
// Tests
// =============================================================================
