//! Drawing surface boundary used by every widget.
//!
//! Widgets never talk to a display directly. They issue the handful of
//! operations in [`Canvas`], which keeps them platform independent and lets
//! tests count exactly what a frame touched.
//!
//! [`DisplayCanvas`] adapts any `DrawTarget<Color = Rgb565>` (ST7789 driver,
//! `SimulatorDisplay`, `MockDisplay`, ...) to the trait.

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::colors::WHITE;

/// Font handle accepted by text widgets.
pub type Font = &'static MonoFont<'static>;

// =============================================================================
// Icon
// =============================================================================

/// A 1 bit per pixel image stored row-major, MSB first, rows padded to bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Icon {
    data: &'static [u8],
    width: u32,
}

impl Icon {
    /// Wrap raw bitmap data that is `width` pixels wide.
    pub const fn new(
        data: &'static [u8],
        width: u32,
    ) -> Self {
        Self { data, width }
    }

    /// Pixel size of the bitmap.
    pub const fn size(&self) -> Size {
        if self.width == 0 {
            return Size::zero();
        }
        let stride = self.width.div_ceil(8) as usize;
        Size::new(self.width, (self.data.len() / stride) as u32)
    }

    fn raw(&self) -> ImageRaw<'static, BinaryColor> { ImageRaw::new(self.data, self.width) }
}

// =============================================================================
// Canvas Trait
// =============================================================================

/// Primitive drawing operations a widget may issue.
///
/// Text is always laid out with a top baseline so a widget anchor is the top
/// left corner of its glyph cells.
pub trait Canvas {
    /// Fill `area` with a solid color.
    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    );

    /// Bounding box `text` would occupy if drawn at `origin`.
    fn measure_text(
        &self,
        origin: Point,
        text: &str,
        font: Font,
        align: Alignment,
    ) -> Rectangle;

    /// Draw `text` at `origin`.
    fn draw_text(
        &mut self,
        origin: Point,
        font: Font,
        color: Rgb565,
        align: Alignment,
        text: &str,
    );

    /// Draw a 1-bpp image. Off pixels are left untouched when `off` is `None`.
    fn draw_image(
        &mut self,
        origin: Point,
        icon: &Icon,
        on: Rgb565,
        off: Option<Rgb565>,
    );

    /// Restrict every following draw to `area` until [`Canvas::end_clipping`].
    fn start_clipping(
        &mut self,
        area: Rectangle,
    );

    /// Remove the clip region.
    fn end_clipping(&mut self);
}

/// Top-baseline text style with the requested alignment.
#[inline]
pub fn text_style(align: Alignment) -> TextStyle { TextStyleBuilder::new().alignment(align).baseline(Baseline::Top).build() }

/// Measure `text` with a monospace font, independent of any display.
pub fn text_bounds(
    origin: Point,
    text: &str,
    font: Font,
    align: Alignment,
) -> Rectangle {
    let style = MonoTextStyle::new(font, WHITE);
    Text::with_text_style(text, origin, style, text_style(align)).bounding_box()
}

/// Horizontal advance of one glyph, including inter-character spacing.
#[inline]
pub const fn glyph_advance(font: Font) -> u32 { font.character_size.width + font.character_spacing }

// =============================================================================
// DisplayCanvas
// =============================================================================

/// [`Canvas`] over any embedded-graphics draw target.
///
/// Draw errors are discarded: a status display keeps rendering the rest of
/// the frame rather than aborting it.
pub struct DisplayCanvas<'d, D> {
    target: &'d mut D,
    clip: Option<Rectangle>,
}

impl<'d, D> DisplayCanvas<'d, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'d mut D) -> Self { Self { target, clip: None } }

    /// The wrapped draw target.
    pub fn target(&self) -> &D { self.target }

    /// Active clip region, if any.
    pub const fn clip(&self) -> Option<Rectangle> { self.clip }

    fn clip_area(&self) -> Rectangle { self.clip.unwrap_or_else(|| self.target.bounding_box()) }
}

impl<D> Canvas for DisplayCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        let clip = self.clip_area();
        area.into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target.clipped(&clip))
            .ok();
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
        font: Font,
        color: Rgb565,
        align: Alignment,
        text: &str,
    ) {
        let clip = self.clip_area();
        Text::with_text_style(text, origin, MonoTextStyle::new(font, color), text_style(align))
            .draw(&mut self.target.clipped(&clip))
            .ok();
    }

    fn draw_image(
        &mut self,
        origin: Point,
        icon: &Icon,
        on: Rgb565,
        off: Option<Rgb565>,
    ) {
        let clip = self.clip_area();
        let raw = icon.raw();
        let mut clipped = self.target.clipped(&clip);
        let mut recolor = Recolor {
            target: &mut clipped,
            on,
            off,
        };
        Image::new(&raw, origin).draw(&mut recolor).ok();
    }

    fn start_clipping(
        &mut self,
        area: Rectangle,
    ) {
        self.clip = Some(area);
    }

    fn end_clipping(&mut self) { self.clip = None; }
}

/// Maps a 1-bpp image onto an Rgb565 target.
struct Recolor<'a, T> {
    target: &'a mut T,
    on: Rgb565,
    off: Option<Rgb565>,
}

impl<T> Dimensions for Recolor<'_, T>
where
    T: Dimensions,
{
    fn bounding_box(&self) -> Rectangle { self.target.bounding_box() }
}

impl<T> DrawTarget for Recolor<'_, T>
where
    T: DrawTarget<Color = Rgb565>,
{
    type Color = BinaryColor;
    type Error = T::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (on, off) = (self.on, self.off);
        self.target
            .draw_iter(pixels.into_iter().filter_map(move |Pixel(point, color)| match color {
                BinaryColor::On => Some(Pixel(point, on)),
                BinaryColor::Off => off.map(|c| Pixel(point, c)),
            }))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    use super::*;
    use crate::colors::{BLACK, RED};

    const CHECKER: [u8; 2] = [0b1000_0000, 0b0100_0000];

    fn mock() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn test_text_bounds_monospace() {
        let bounds = text_bounds(Point::new(4, 2), "abc", &FONT_6X10, Alignment::Left);
        assert_eq!(bounds.top_left, Point::new(4, 2));
        assert_eq!(bounds.size, Size::new(18, 10), "FONT_6X10 advances 6px per glyph");
    }

    #[test]
    fn test_glyph_advance() {
        assert_eq!(glyph_advance(&FONT_6X10), 6);
    }

    #[test]
    fn test_icon_size() {
        let icon = Icon::new(&CHECKER, 2);
        assert_eq!(icon.size(), Size::new(2, 2));
        assert_eq!(Icon::new(&CHECKER, 0).size(), Size::zero());
    }

    #[test]
    fn test_fill_rect_respects_clip() {
        let mut display = mock();
        {
            let mut canvas = DisplayCanvas::new(&mut display);
            canvas.start_clipping(Rectangle::new(Point::new(0, 0), Size::new(2, 2)));
            canvas.fill_rect(Rectangle::new(Point::new(0, 0), Size::new(4, 4)), RED);
            canvas.end_clipping();
            assert!(canvas.clip().is_none());
        }
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(RED));
        assert_eq!(display.get_pixel(Point::new(3, 3)), None, "pixel outside the clip must stay untouched");
    }

    #[test]
    fn test_draw_image_transparent_off() {
        let mut display = mock();
        DisplayCanvas::new(&mut display).draw_image(Point::zero(), &Icon::new(&CHECKER, 2), RED, None);
        assert_eq!(display.get_pixel(Point::new(0, 0)), Some(RED));
        assert_eq!(display.get_pixel(Point::new(1, 0)), None);
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(RED));
    }

    #[test]
    fn test_draw_image_opaque_off() {
        let mut display = mock();
        DisplayCanvas::new(&mut display).draw_image(Point::zero(), &Icon::new(&CHECKER, 2), RED, Some(BLACK));
        assert_eq!(display.get_pixel(Point::new(1, 0)), Some(BLACK));
    }
}
