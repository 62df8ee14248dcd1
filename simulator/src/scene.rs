//! The simulated status bar: which widgets exist, where they dock and which
//! resource feeds each one.
//!
//! ```text
//! |motion|weather|viewers|<------------ chat ------------>|subs|temps|
//!   LEFT    LEFT    LEFT              AUTO                 RIGHT RIGHT
//! ```

use std::rc::Rc;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::prelude::*;
use profont::PROFONT_7_POINT;
use status_bar_common::colors::{ORANGE, PINK};
use status_bar_common::icons::IconRegistry;
use status_bar_common::widgets::{IconStripInitArgs, TextInitArgs};
use status_bar_common::{ArgsBag, LayoutConfig, Magnet, WidgetConfig, WidgetKind};

pub const WEATHER: &str = "weather";
pub const VIEWERS: &str = "viewers";
pub const CHAT: &str = "chat";
pub const SUBS: &str = "subs";
pub const TEMPS: &str = "temps";

/// Pixels between docked widgets.
const GAP_X: i32 = 2;

fn docked(
    kind: WidgetKind,
    id: &str,
    magnet: Magnet,
    priority: u8,
) -> WidgetConfig {
    let mut cfg = WidgetConfig::new(kind, id, Point::zero());
    cfg.magnet = magnet;
    cfg.priority = priority;
    cfg.resource = Some(String::from(id));
    cfg
}

pub fn layout(
    width: u32,
    icons: Rc<IconRegistry>,
) -> LayoutConfig {
    let mut config = LayoutConfig::new();
    config.gap_x = GAP_X;
    config.left_edge_x = Some(0);
    config.right_edge_x = Some(width as i32);
    config.icons = Some(icons);

    let mut motion = docked(WidgetKind::PixelMotion, "motion", Magnet::Left, 0);
    motion.resource = None;
    config.add_widget_config(motion);

    config.add_widget_config(docked(WidgetKind::Weather, WEATHER, Magnet::Left, 1));

    let mut viewers = docked(WidgetKind::UIntText, VIEWERS, Magnet::Left, 2);
    viewers.anchor = Point::new(0, 11);
    viewers.font = Some(&FONT_6X10);
    viewers.font_color = Some(ORANGE);
    viewers.extras = ArgsBag::new().with(TextInitArgs::<u32> {
        hide_if_equal: Some(0),
        capacity: Some(3),
        ..Default::default()
    });
    config.add_widget_config(viewers);

    let mut chat = docked(WidgetKind::Chat, CHAT, Magnet::Auto, 0);
    chat.font = Some(&PROFONT_7_POINT);
    config.add_widget_config(chat);

    let mut subs = docked(WidgetKind::IconStrip, SUBS, Magnet::Right, 1);
    subs.anchor = Point::new(0, 12);
    subs.font_color = Some(PINK);
    subs.icon_geometry = Some(IconStripInitArgs {
        icon_width: 8,
        icon_height: 8,
        max_icons: 4,
    });
    config.add_widget_config(subs);

    let mut temps = docked(WidgetKind::Temperatures, TEMPS, Magnet::Right, 0);
    temps.font = Some(&PROFONT_7_POINT);
    config.add_widget_config(temps);

    config
}
