//! Three stacked temperature readings: daily high, current, daily low.

use alloc::boxed::Box;
use alloc::format;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;

use super::composite::{CompositeWidget, delegate_composite};
use super::text::{FloatWidget, TextInitArgs, TextPostArgs};
use crate::args_bag::ArgsBag;
use crate::colors::{BLUE, RED, TEAL};
use crate::config::ROW_PITCH;
use crate::widget::{InitArgs, PostArgs, ValueFormat, Widget};

/// Row name suffix and color, top to bottom.
const ROWS: [(&str, Rgb565); 3] = [("high", RED), ("current", TEAL), ("low", BLUE)];

/// Rows start one pixel below the anchor.
const Y_SHIFT: i32 = 1;

/// Characters per row, enough for "-12" or "104".
const ROW_CHARS: usize = 3;

/// Readings in row order. Missing trailing values leave their rows untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemperaturePostArgs {
    pub values: Vec<f32, 3>,
}

impl TemperaturePostArgs {
    /// Take up to three readings from `values`.
    pub fn new(values: &[f32]) -> Self {
        Self {
            values: values.iter().take(ROWS.len()).copied().collect(),
        }
    }
}

pub struct TemperaturesWidget {
    inner: CompositeWidget<3>,
}

impl TemperaturesWidget {
    pub const fn new() -> Self { Self { inner: CompositeWidget::new() } }

    pub fn row(
        &self,
        index: usize,
    ) -> Option<&dyn Widget> {
        self.inner.member(index)
    }
}

impl Default for TemperaturesWidget {
    fn default() -> Self { Self::new() }
}

impl Widget for TemperaturesWidget {
    delegate_composite!();

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.inner.initialize(args);
        if args.font.is_none() {
            log::error!("[widget={}] initialize(): Required font parameter missing", args.id);
            self.inner.base_mut().initialized = false;
            return;
        }

        for (i, (name, color)) in ROWS.iter().enumerate() {
            let mut row = InitArgs::new(
                format!("{}[{}]", args.id, name),
                Point::new(args.anchor.x, args.anchor.y + Y_SHIFT + ROW_PITCH * i as i32),
            );
            row.font = args.font;
            row.font_color = Some(*color);
            row.blank_color = args.blank_color;
            row.fmt = Some(ValueFormat::new(Some(ROW_CHARS), Some(0)));
            row.extras = ArgsBag::new().with(TextInitArgs::<f32> {
                right_align: Some(true),
                capacity: Some(ROW_CHARS),
                ..Default::default()
            });
            self.inner.install(i, Box::new(FloatWidget::new()), &row);
        }
    }

    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        let Some(post) = args.get::<TemperaturePostArgs>() else {
            return;
        };
        for (i, value) in post.values.iter().enumerate() {
            self.inner.post_to(i, &PostArgs::new(&TextPostArgs::new(*value)));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
