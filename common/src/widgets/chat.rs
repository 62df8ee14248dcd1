//! Three-line chat ticker that stretches to fill the elastic middle slot.
//!
//! The widget is meant to dock with [`Magnet::Auto`](crate::widget::Magnet).
//! The registry hands it the pixels left between the left and right blocks,
//! converted to characters at `pixels_per_character`. The widget reserves
//! exactly that many pixels; each row holds as many whole glyphs of its font
//! as fit in the reservation.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use embedded_graphics::prelude::*;

use super::composite::{CompositeWidget, delegate_composite};
use super::text::{StringWidget, TextInitArgs, TextPostArgs};
use crate::args_bag::ArgsBag;
use crate::canvas::{Canvas, glyph_advance};
use crate::colors::YELLOW;
use crate::config::CHAT_INITIAL_CAPACITY;
use crate::widget::{CapacityNegotiation, InitArgs, PostArgs, Widget};

/// Vertical offset of each row from the anchor.
const ROW_OFFSETS: [i32; 3] = [0, 11, 21];

/// Chat-specific init parameters, carried in [`InitArgs::extras`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ChatInitArgs {
    /// Pixel cost of one character. Defaults to the font's glyph advance.
    pub pixels_per_character: Option<i32>,
}

/// The three most recent chat lines, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatPostArgs {
    pub rows: [String; 3],
}

impl ChatPostArgs {
    pub fn new(
        first: &str,
        second: &str,
        third: &str,
    ) -> Self {
        Self {
            rows: [String::from(first), String::from(second), String::from(third)],
        }
    }
}

pub struct ChatWidget {
    inner: CompositeWidget<3>,
    pixels_per_character: i32,
    /// Advance of one glyph of the row font.
    glyph_width: i32,
    capacity: usize,
}

impl ChatWidget {
    pub const fn new() -> Self {
        Self {
            inner: CompositeWidget::new(),
            pixels_per_character: 1,
            glyph_width: 1,
            capacity: 0,
        }
    }

    pub fn row(
        &self,
        index: usize,
    ) -> Option<&dyn Widget> {
        self.inner.member(index)
    }

    /// Glyphs per row that fit in `count` characters' worth of pixels.
    fn row_capacity(
        &self,
        count: usize,
    ) -> usize {
        (count as i32 * self.pixels_per_character / self.glyph_width).max(1) as usize
    }
}

impl Default for ChatWidget {
    fn default() -> Self { Self::new() }
}

impl Widget for ChatWidget {
    delegate_composite!(custom_width);

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.inner.initialize(args);
        let Some(font) = args.font else {
            log::error!("[widget={}] initialize(): Required font parameter missing", args.id);
            self.inner.base_mut().initialized = false;
            return;
        };

        self.pixels_per_character = args
            .extras
            .get::<ChatInitArgs>()
            .and_then(|chat| chat.pixels_per_character)
            .unwrap_or(glyph_advance(font) as i32)
            .max(1);
        self.glyph_width = (glyph_advance(font) as i32).max(1);
        self.capacity = CHAT_INITIAL_CAPACITY;

        for (i, dy) in ROW_OFFSETS.iter().enumerate() {
            let mut row = InitArgs::new(
                format!("{}[line{}]", args.id, i + 1),
                Point::new(args.anchor.x, args.anchor.y + dy),
            );
            row.font = Some(font);
            row.font_color = Some(args.font_color.unwrap_or(YELLOW));
            row.blank_color = args.blank_color;
            row.extras = ArgsBag::new().with(TextInitArgs::<String> {
                capacity: Some(self.row_capacity(self.capacity)),
                ..Default::default()
            });
            self.inner.install(i, Box::new(StringWidget::new()), &row);
        }
    }

    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        let Some(post) = args.get::<ChatPostArgs>() else {
            return;
        };
        for (i, line) in post.rows.iter().enumerate() {
            self.inner.post_to(i, &PostArgs::new(&TextPostArgs::new(line.clone())));
        }
    }

    fn width(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        if !self.inner.is_initialized() || !self.inner.is_visible() {
            return 0;
        }
        self.capacity as i32 * self.pixels_per_character
    }

    fn capacity_mut(&mut self) -> Option<&mut dyn CapacityNegotiation> { Some(self) }
}

impl CapacityNegotiation for ChatWidget {
    fn unit_width(&self) -> i32 { self.pixels_per_character }

    fn set_capacity(
        &mut self,
        count: usize,
        preserve: bool,
    ) {
        if !self.inner.is_initialized() || count == 0 {
            return;
        }
        let glyphs = self.row_capacity(count);
        for row in self.inner.members_mut() {
            if let Some(resizable) = row.capacity_mut() {
                resizable.set_capacity(glyphs, preserve);
            }
        }
        self.capacity = count;
    }

    fn capacity(&self) -> usize { self.capacity }
}

// =============================================================================
// Tests
// =============================================================================
