//! Declarative wiring from a widget list to a running display session.
//!
//! ```text
//! LayoutConfig ──build──► WidgetSet (owns widgets) ──borrow──► DisplaySession
//!   gap, edges               Box<dyn Widget> per config          registry + resource map
//!   Vec<WidgetConfig>        resource names, motion flags        render() once per frame
//! ```
//!
//! Data sources address widgets by resource name through
//! [`DisplaySession::post_to_resource`]. A reset drops the session and the
//! set and builds both again from the same config.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;

use crate::args_bag::ArgsBag;
use crate::canvas::{Canvas, Font};
use crate::config::{DEFAULT_GAP_X, DEFAULT_MAGNET, MAX_WIDGETS};
use crate::icons::IconRegistry;
use crate::registry::{Handle, WidgetRegistry};
use crate::widget::{InitArgs, Magnet, PostArgs, ValueFormat, Widget};
use crate::widgets::{
    ChatInitArgs,
    ChatWidget,
    FloatWidget,
    IconStripInitArgs,
    IconStripWidget,
    IntWidget,
    PixelMotionWidget,
    StringWidget,
    TemperaturesWidget,
    UIntWidget,
    WeatherInitArgs,
    WeatherWidget,
};

// =============================================================================
// Widget Kinds
// =============================================================================

/// Every widget kind the builder can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    IntText,
    UIntText,
    FloatText,
    StringText,
    Temperatures,
    Chat,
    IconStrip,
    Weather,
    PixelMotion,
}

impl WidgetKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::IntText => "int_text",
            Self::UIntText => "uint_text",
            Self::FloatText => "float_text",
            Self::StringText => "string_text",
            Self::Temperatures => "temperatures",
            Self::Chat => "chat",
            Self::IconStrip => "icon_strip",
            Self::Weather => "weather",
            Self::PixelMotion => "pixel_motion",
        }
    }

    /// Kinds that animate on their own and are ticked every frame.
    pub const fn is_motion(self) -> bool { matches!(self, Self::PixelMotion) }

    fn make(self) -> Box<dyn Widget> {
        match self {
            Self::IntText => Box::new(IntWidget::new()),
            Self::UIntText => Box::new(UIntWidget::new()),
            Self::FloatText => Box::new(FloatWidget::new()),
            Self::StringText => Box::new(StringWidget::new()),
            Self::Temperatures => Box::new(TemperaturesWidget::new()),
            Self::Chat => Box::new(ChatWidget::new()),
            Self::IconStrip => Box::new(IconStripWidget::new()),
            Self::Weather => Box::new(WeatherWidget::new()),
            Self::PixelMotion => Box::new(PixelMotionWidget::new()),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// One widget in the layout.
#[derive(Clone)]
pub struct WidgetConfig {
    pub kind: WidgetKind,
    pub id: String,
    /// Name data sources post to. `None` for widgets nobody feeds.
    pub resource: Option<String>,
    pub anchor: Point,
    pub priority: u8,
    pub magnet: Magnet,
    pub font: Option<Font>,
    pub font2: Option<Font>,
    pub font_color: Option<Rgb565>,
    pub blank_color: Option<Rgb565>,
    pub fmt: Option<ValueFormat>,
    /// Chat character pitch.
    pub pixels_per_character: Option<i32>,
    /// Icon strip geometry.
    pub icon_geometry: Option<IconStripInitArgs>,
    /// Any further kind-specific init args.
    pub extras: ArgsBag,
}

impl WidgetConfig {
    pub fn new(
        kind: WidgetKind,
        id: &str,
        anchor: Point,
    ) -> Self {
        Self {
            kind,
            id: String::from(id),
            resource: None,
            anchor,
            priority: 0,
            magnet: DEFAULT_MAGNET,
            font: None,
            font2: None,
            font_color: None,
            blank_color: None,
            fmt: None,
            pixels_per_character: None,
            icon_geometry: None,
            extras: ArgsBag::new(),
        }
    }

    /// Init args for this widget, with the shared icon registry if it needs one.
    fn init_args(
        &self,
        icons: Option<&Rc<IconRegistry>>,
    ) -> InitArgs {
        let mut args = InitArgs::new(self.id.clone(), self.anchor);
        args.priority = self.priority;
        args.magnet = Some(self.magnet);
        args.font = self.font;
        args.font2 = self.font2;
        args.font_color = self.font_color;
        args.blank_color = self.blank_color;
        args.fmt = self.fmt;
        args.extras = self.extras.clone();

        if let Some(pixels_per_character) = self.pixels_per_character {
            args.extras.set(ChatInitArgs {
                pixels_per_character: Some(pixels_per_character),
            });
        }
        if let (WidgetKind::IconStrip, Some(geometry)) = (self.kind, self.icon_geometry) {
            args.extras.set(geometry);
        }
        if let (WidgetKind::Weather, Some(icons)) = (self.kind, icons) {
            if !args.extras.has::<WeatherInitArgs>() {
                args.extras.set(WeatherInitArgs {
                    icons: Rc::clone(icons),
                    icon_size: None,
                });
            }
        }
        args
    }
}

/// Layout-wide settings plus the widget list, in registration order.
#[derive(Clone)]
pub struct LayoutConfig {
    pub gap_x: i32,
    pub left_edge_x: Option<i32>,
    pub right_edge_x: Option<i32>,
    /// Shared by every weather widget that does not bring its own.
    pub icons: Option<Rc<IconRegistry>>,
    widgets: Vec<WidgetConfig, MAX_WIDGETS>,
}

impl LayoutConfig {
    pub const fn new() -> Self {
        Self {
            gap_x: DEFAULT_GAP_X,
            left_edge_x: None,
            right_edge_x: None,
            icons: None,
            widgets: Vec::new(),
        }
    }

    /// Append a widget. Ignored with a warning once [`MAX_WIDGETS`] are configured.
    pub fn add_widget_config(
        &mut self,
        config: WidgetConfig,
    ) -> bool {
        match self.widgets.push(config) {
            Ok(()) => true,
            Err(rejected) => {
                log::warn!(
                    "[layout] add_widget_config(): max widgets ({}) reached, ignoring {}",
                    MAX_WIDGETS,
                    rejected.id
                );
                false
            }
        }
    }

    pub fn widgets(&self) -> &[WidgetConfig] { &self.widgets }

    /// Human-readable dump of the configuration, one line per item.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Display Layout").ok();
        writeln!(out, "  gap_x: {}", self.gap_x).ok();
        if let Some(x) = self.left_edge_x {
            writeln!(out, "  left_edge_x: {x}").ok();
        }
        if let Some(x) = self.right_edge_x {
            writeln!(out, "  right_edge_x: {x}").ok();
        }
        for w in &self.widgets {
            writeln!(
                out,
                "  widget id={} type={} anchor=({},{}) priority={} resource={} magnet={}",
                w.id,
                w.kind.name(),
                w.anchor.x,
                w.anchor.y,
                w.priority,
                w.resource.as_deref().unwrap_or("-"),
                w.magnet.label()
            )
            .ok();
        }
        out
    }

    /// Log [`LayoutConfig::describe`] at info level.
    pub fn log_config(&self) {
        for line in self.describe().lines() {
            log::info!("{}", line);
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Widget Set
// =============================================================================

struct Slot {
    widget: Box<dyn Widget>,
    resource: Option<String>,
    motion: bool,
}

/// Owns every widget built from a [`LayoutConfig`].
pub struct WidgetSet {
    slots: alloc::vec::Vec<Slot>,
}

impl WidgetSet {
    /// Construct and initialize one widget per config entry.
    ///
    /// Widgets that fail to initialize are kept; they stay inert.
    pub fn build(config: &LayoutConfig) -> Self {
        let mut slots = alloc::vec::Vec::with_capacity(config.widgets.len());
        for cfg in &config.widgets {
            let mut widget = cfg.kind.make();
            widget.initialize(&cfg.init_args(config.icons.as_ref()));
            if !widget.is_initialized() {
                log::warn!("[layout] build(): {} ({}) is not initialized", cfg.id, cfg.kind.name());
            }
            slots.push(Slot {
                widget,
                resource: cfg.resource.clone(),
                motion: cfg.kind.is_motion(),
            });
        }
        log::info!("[layout] build(): {} widgets", slots.len());
        Self { slots }
    }

    #[inline]
    pub fn len(&self) -> usize { self.slots.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Look a widget up by id.
    pub fn widget(
        &self,
        id: &str,
    ) -> Option<&dyn Widget> {
        self.slots.iter().map(|s| &*s.widget).find(|w| w.id() == id)
    }
}

// =============================================================================
// Display Session
// =============================================================================

/// Registry and resource routing over a borrowed [`WidgetSet`].
pub struct DisplaySession<'a, const MAX: usize = MAX_WIDGETS> {
    registry: WidgetRegistry<'a, MAX>,
    resources: BTreeMap<String, Handle>,
    motion: Vec<Handle, MAX>,
}

impl<'a, const MAX: usize> DisplaySession<'a, MAX> {
    pub fn new(
        set: &'a mut WidgetSet,
        config: &LayoutConfig,
    ) -> Self {
        let mut registry = WidgetRegistry::new();
        registry.set_gap_x(config.gap_x);
        if let Some(x) = config.left_edge_x {
            registry.set_left_edge_x(x);
        }
        if let Some(x) = config.right_edge_x {
            registry.set_right_edge_x(x);
        }

        let mut resources = BTreeMap::new();
        let mut motion = Vec::new();
        for slot in set.slots.iter_mut() {
            let handle = registry.add(&mut *slot.widget);
            if !handle.is_valid() {
                continue;
            }
            if let Some(resource) = &slot.resource {
                resources.insert(resource.clone(), handle);
            }
            if slot.motion {
                motion.push(handle).ok();
            }
        }

        Self {
            registry,
            resources,
            motion,
        }
    }

    /// Post to the widget bound to `resource`. Returns `false` if none is.
    pub fn post_to_resource(
        &mut self,
        resource: &str,
        args: &PostArgs<'_>,
    ) -> bool {
        let Some(widget) = self.resources.get(resource).and_then(|&h| self.registry.widget_mut(h)) else {
            log::warn!("[layout] post_to_resource(): no widget bound to resource '{}'", resource);
            return false;
        };
        widget.post(args);
        true
    }

    /// One frame: tick animations, redraw dirty widgets, re-dock.
    ///
    /// Returns whether docking triggered a full redraw.
    pub fn render(
        &mut self,
        canvas: &mut dyn Canvas,
    ) -> bool {
        for &handle in &self.motion {
            if let Some(widget) = self.registry.widget_mut(handle) {
                widget.post(&PostArgs::empty());
            }
        }
        self.registry.update_all(canvas);
        self.registry.relayout(canvas)
    }

    pub fn handle(
        &self,
        resource: &str,
    ) -> Option<Handle> {
        self.resources.get(resource).copied()
    }

    pub const fn registry(&self) -> &WidgetRegistry<'a, MAX> { &self.registry }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry<'a, MAX> { &mut self.registry }
}

// =============================================================================
// Tests
// =============================================================================
