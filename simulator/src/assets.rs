//! Icon bitmaps for the simulated scene, rasterized at compile time.
//!
//! Each weather icon is a 32x32 1bpp bitmap painted from a short list of
//! shapes. Later shapes paint over earlier ones, so a [`Shape::Hole`] after a
//! [`Shape::Disc`] carves a crescent.

use std::rc::Rc;

use status_bar_common::Icon;
use status_bar_common::icons::IconRegistry;

const SIZE: usize = 32;
const STRIDE: usize = SIZE / 8;

type Bitmap = [u8; STRIDE * SIZE];

#[derive(Clone, Copy)]
enum Shape {
    Disc { cx: i32, cy: i32, r: i32 },
    Hole { cx: i32, cy: i32, r: i32 },
    Bar { x: i32, y: i32, w: i32, h: i32 },
}

const fn in_disc(
    x: i32,
    y: i32,
    cx: i32,
    cy: i32,
    r: i32,
) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

const fn paint(shapes: &[Shape]) -> Bitmap {
    let mut bits = [0u8; STRIDE * SIZE];
    let mut y = 0;
    while y < SIZE {
        let mut x = 0;
        while x < SIZE {
            let (px, py) = (x as i32, y as i32);
            let mut on = false;
            let mut i = 0;
            while i < shapes.len() {
                match shapes[i] {
                    Shape::Disc { cx, cy, r } => {
                        if in_disc(px, py, cx, cy, r) {
                            on = true;
                        }
                    }
                    Shape::Hole { cx, cy, r } => {
                        if in_disc(px, py, cx, cy, r) {
                            on = false;
                        }
                    }
                    Shape::Bar { x: bx, y: by, w, h } => {
                        if px >= bx && px < bx + w && py >= by && py < by + h {
                            on = true;
                        }
                    }
                }
                i += 1;
            }
            if on {
                bits[y * STRIDE + x / 8] |= 0x80 >> (x % 8);
            }
            x += 1;
        }
        y += 1;
    }
    bits
}

// =============================================================================
// Weather
// =============================================================================

static SUN: Bitmap = paint(&[
    Shape::Disc { cx: 16, cy: 16, r: 7 },
    Shape::Bar { x: 15, y: 1, w: 2, h: 5 },
    Shape::Bar { x: 15, y: 26, w: 2, h: 5 },
    Shape::Bar { x: 1, y: 15, w: 5, h: 2 },
    Shape::Bar { x: 26, y: 15, w: 5, h: 2 },
]);

static MOON: Bitmap = paint(&[
    Shape::Disc { cx: 16, cy: 16, r: 10 },
    Shape::Hole { cx: 21, cy: 12, r: 9 },
]);

static CLOUD: Bitmap = paint(&[
    Shape::Disc { cx: 10, cy: 19, r: 6 },
    Shape::Disc { cx: 17, cy: 14, r: 8 },
    Shape::Disc { cx: 24, cy: 19, r: 6 },
    Shape::Bar { x: 10, y: 19, w: 14, h: 7 },
]);

static SUN_AND_CLOUD: Bitmap = paint(&[
    Shape::Disc { cx: 10, cy: 9, r: 6 },
    Shape::Hole { cx: 19, cy: 19, r: 10 },
    Shape::Disc { cx: 13, cy: 21, r: 5 },
    Shape::Disc { cx: 19, cy: 17, r: 6 },
    Shape::Disc { cx: 25, cy: 21, r: 5 },
    Shape::Bar { x: 13, y: 21, w: 12, h: 6 },
]);

static MOON_AND_CLOUD: Bitmap = paint(&[
    Shape::Disc { cx: 10, cy: 10, r: 7 },
    Shape::Hole { cx: 14, cy: 7, r: 6 },
    Shape::Hole { cx: 19, cy: 19, r: 10 },
    Shape::Disc { cx: 13, cy: 21, r: 5 },
    Shape::Disc { cx: 19, cy: 17, r: 6 },
    Shape::Disc { cx: 25, cy: 21, r: 5 },
    Shape::Bar { x: 13, y: 21, w: 12, h: 6 },
]);

static RAIN: Bitmap = paint(&[
    Shape::Disc { cx: 10, cy: 14, r: 6 },
    Shape::Disc { cx: 17, cy: 10, r: 7 },
    Shape::Disc { cx: 24, cy: 14, r: 6 },
    Shape::Bar { x: 10, y: 14, w: 14, h: 6 },
    Shape::Bar { x: 10, y: 23, w: 1, h: 5 },
    Shape::Bar { x: 16, y: 25, w: 1, h: 5 },
    Shape::Bar { x: 22, y: 23, w: 1, h: 5 },
]);

/// Condition keys understood by [`weather_icons`], in feed order.
pub const CONDITIONS: [&str; 4] = ["sunny", "partlycloudy", "cloudy", "rainy"];

pub fn weather_icons() -> Rc<IconRegistry> {
    let icon = |bits: &'static Bitmap| Icon::new(bits, SIZE as u32);

    let mut icons = IconRegistry::new();
    icons.register("sunny", icon(&SUN), icon(&MOON));
    icons.register("partlycloudy", icon(&SUN_AND_CLOUD), icon(&MOON_AND_CLOUD));
    icons.register("cloudy", icon(&CLOUD), icon(&CLOUD));
    icons.register("rainy", icon(&RAIN), icon(&RAIN));
    Rc::new(icons)
}

// =============================================================================
// Strip
// =============================================================================

/// 8x8 heart, one per subscriber in the strip.
pub const HEART: Icon = Icon::new(&[0x66, 0xFF, 0xFF, 0xFF, 0x7E, 0x3C, 0x18, 0x00], 8);
