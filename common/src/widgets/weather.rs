//! Current weather condition as a day or night icon.

use alloc::rc::Rc;
use alloc::string::String;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::Canvas;
use crate::colors::{BLACK, WHITE};
use crate::config::WEATHER_ICON_SIZE;
use crate::icons::IconRegistry;
use crate::widget::{InitArgs, PostArgs, Widget, WidgetBase, wipe};

/// Icon source and size. Required.
#[derive(Clone, Debug)]
pub struct WeatherInitArgs {
    pub icons: Rc<IconRegistry>,
    /// Edge length of the square icon cell.
    pub icon_size: Option<u32>,
}

/// Condition key (e.g. `"partlycloudy"`) and local hour of day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherPostArgs {
    pub condition: String,
    pub hour: u8,
}

impl WeatherPostArgs {
    pub fn new(
        condition: &str,
        hour: u8,
    ) -> Self {
        Self {
            condition: String::from(condition),
            hour,
        }
    }
}

pub struct WeatherWidget {
    base: WidgetBase,
    icons: Option<Rc<IconRegistry>>,
    size: u32,
    on_color: Rgb565,
    blank_color: Rgb565,
    last: Option<WeatherPostArgs>,
    prev_box: Rectangle,
}

impl WeatherWidget {
    pub const fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            icons: None,
            size: WEATHER_ICON_SIZE,
            on_color: WHITE,
            blank_color: BLACK,
            last: None,
            prev_box: Rectangle::zero(),
        }
    }
}

impl Default for WeatherWidget {
    fn default() -> Self { Self::new() }
}

impl Widget for WeatherWidget {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.base.configure(args);
        let Some(weather) = args.extras.get::<WeatherInitArgs>() else {
            log::error!("[widget={}] initialize(): Required icon registry missing", self.base.id);
            return;
        };
        self.icons = Some(Rc::clone(&weather.icons));
        self.size = weather.icon_size.unwrap_or(WEATHER_ICON_SIZE);
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

    /// Unknown conditions draw nothing.
    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        let (Some(last), Some(icons)) = (&self.last, &self.icons) else {
            return;
        };
        let Some(pair) = icons.get(&last.condition) else {
            log::warn!("[widget={}] write(): no icon for condition '{}'", self.base.id, last.condition);
            return;
        };
        canvas.draw_image(self.base.anchor, pair.for_hour(last.hour), self.on_color, Some(self.blank_color));
        self.prev_box = Rectangle::new(self.base.anchor, Size::new_equal(self.size));
    }

    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        if !self.base.initialized {
            return;
        }
        let Some(post) = args.get::<WeatherPostArgs>() else {
            return;
        };
        if self.last.as_ref() == Some(post) {
            return;
        }
        self.last = Some(post.clone());
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
        if !self.base.visible {
            return 0;
        }
        self.size as i32
    }

    fn height(
        &self,
        _canvas: &dyn Canvas,
    ) -> i32 {
        self.size as i32
    }

    fn horizontal_shift(
        &mut self,
        dx: i32,
    ) {
        self.base.shift(dx);
        self.prev_box = crate::widget::shifted(self.prev_box, dx);
    }
}

// =============================================================================
// Tests
// =============================================================================
