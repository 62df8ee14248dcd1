//! Concrete widget kinds.
//!
//! Every kind implements [`Widget`](crate::widget::Widget) and draws only
//! through [`Canvas`](crate::canvas::Canvas).

mod chat;
mod composite;
mod icon_strip;
mod pixel_motion;
mod temperatures;
mod text;
mod weather;

pub use chat::{ChatInitArgs, ChatPostArgs, ChatWidget};
pub use composite::CompositeWidget;
pub use icon_strip::{IconStripInitArgs, IconStripPostArgs, IconStripWidget};
pub use pixel_motion::PixelMotionWidget;
pub use temperatures::{TemperaturePostArgs, TemperaturesWidget};
pub use text::{
    FloatWidget,
    IntWidget,
    StringWidget,
    TextInitArgs,
    TextPostArgs,
    TextWidget,
    UIntWidget,
    WidgetValue,
};
pub use weather::{WeatherInitArgs, WeatherPostArgs, WeatherWidget};
