//! Widget built from a fixed number of child widgets.
//!
//! Children are placed at fixed offsets when the composite is initialized and
//! afterwards move only together with it. Every slot is independently
//! nullable: a child that fails to initialize leaves its slot empty and the
//! rest of the composite keeps working.
//!
//! The footprint is the box enclosing the visible children, which may start
//! left of the composite's own anchor.

use alloc::boxed::Box;

use crate::canvas::Canvas;
use crate::widget::{InitArgs, PostArgs, Widget, WidgetBase};

pub struct CompositeWidget<const N: usize> {
    base: WidgetBase,
    members: [Option<Box<dyn Widget>>; N],
}

impl<const N: usize> CompositeWidget<N> {
    pub const fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            members: [const { None }; N],
        }
    }

    /// Initialize `child` with `args` and place it in `slot`.
    ///
    /// A child that stays uninitialized is dropped and the slot left empty.
    pub fn install(
        &mut self,
        slot: usize,
        mut child: Box<dyn Widget>,
        args: &InitArgs,
    ) -> bool {
        let Some(entry) = self.members.get_mut(slot) else {
            log::error!("[widget={}] install(): slot {} out of range", self.base.id, slot);
            return false;
        };
        child.initialize(args);
        if !child.is_initialized() {
            log::error!("[widget={}] install(): child '{}' failed to initialize", self.base.id, args.id);
            *entry = None;
            return false;
        }
        *entry = Some(child);
        true
    }

    pub fn member(
        &self,
        slot: usize,
    ) -> Option<&dyn Widget> {
        self.members.get(slot)?.as_deref()
    }

    pub fn member_mut(
        &mut self,
        slot: usize,
    ) -> Option<&mut (dyn Widget + 'static)> {
        self.members.get_mut(slot)?.as_deref_mut()
    }

    /// Present children, in slot order.
    pub fn members(&self) -> impl Iterator<Item = &(dyn Widget + 'static)> { self.members.iter().filter_map(Option::as_deref) }

    pub fn members_mut(&mut self) -> impl Iterator<Item = &mut (dyn Widget + 'static)> {
        self.members.iter_mut().filter_map(Option::as_deref_mut)
    }

    /// Deliver `args` to the child in `slot`, if present.
    pub fn post_to(
        &mut self,
        slot: usize,
        args: &PostArgs<'_>,
    ) {
        if let Some(child) = self.member_mut(slot) {
            child.post(args);
        }
    }

    pub const fn slots(&self) -> usize { N }
}

impl<const N: usize> Default for CompositeWidget<N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> Widget for CompositeWidget<N> {
    fn base(&self) -> &WidgetBase { &self.base }

    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn initialize(
        &mut self,
        args: &InitArgs,
    ) {
        self.base.configure(args);
        self.base.initialized = true;
    }

    fn blank(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        for child in self.members_mut().filter(|c| c.is_enabled()) {
            child.blank(canvas);
        }
    }

    fn write(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        for child in self.members_mut().filter(|c| c.is_enabled() && c.is_visible()) {
            child.write(canvas);
        }
    }

    /// Forwards the payload unchanged to every child.
    fn post(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        for child in self.members_mut() {
            child.post(args);
        }
    }

    fn update(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        for child in self.members_mut().filter(|c| c.is_enabled()) {
            child.update(canvas);
        }
    }

    fn width(
        &self,
        canvas: &dyn Canvas,
    ) -> i32 {
        if !self.base.visible {
            return 0;
        }
        let mut span: Option<(i32, i32)> = None;
        for child in self.members().filter(|c| c.is_visible()) {
            let left = child.anchor().x;
            let right = left + child.width(canvas);
            span = Some(match span {
                Some((min_x, max_right)) => (min_x.min(left), max_right.max(right)),
                None => (left, right),
            });
        }
        span.map_or(0, |(min_x, max_right)| (max_right - min_x).max(0))
    }

    fn height(
        &self,
        canvas: &dyn Canvas,
    ) -> i32 {
        let mut span: Option<(i32, i32)> = None;
        for child in self.members().filter(|c| c.is_visible()) {
            let top = child.anchor().y;
            let bottom = top + child.height(canvas);
            span = Some(match span {
                Some((min_y, max_bottom)) => (min_y.min(top), max_bottom.max(bottom)),
                None => (top, bottom),
            });
        }
        span.map_or(0, |(min_y, max_bottom)| (max_bottom - min_y).max(0))
    }

    fn horizontal_shift(
        &mut self,
        dx: i32,
    ) {
        self.base.shift(dx);
        for child in self.members_mut() {
            child.horizontal_shift(dx);
        }
    }
}

/// Implements the structural [`Widget`] methods of a wrapper type by
/// forwarding to its `inner: CompositeWidget<N>` field.
///
/// `delegate_composite!(custom_width)` leaves `width` to the wrapper.
macro_rules! delegate_composite {
    () => {
        delegate_composite!(custom_width);

        fn width(
            &self,
            canvas: &dyn $crate::canvas::Canvas,
        ) -> i32 {
            self.inner.width(canvas)
        }
    };
    (custom_width) => {
        fn base(&self) -> &$crate::widget::WidgetBase { self.inner.base() }

        fn base_mut(&mut self) -> &mut $crate::widget::WidgetBase { self.inner.base_mut() }

        fn blank(
            &mut self,
            canvas: &mut dyn $crate::canvas::Canvas,
        ) {
            self.inner.blank(canvas);
        }

        fn write(
            &mut self,
            canvas: &mut dyn $crate::canvas::Canvas,
        ) {
            self.inner.write(canvas);
        }

        fn update(
            &mut self,
            canvas: &mut dyn $crate::canvas::Canvas,
        ) {
            self.inner.update(canvas);
        }

        fn height(
            &self,
            canvas: &dyn $crate::canvas::Canvas,
        ) -> i32 {
            self.inner.height(canvas)
        }

        fn horizontal_shift(
            &mut self,
            dx: i32,
        ) {
            self.inner.horizontal_shift(dx);
        }
    };
}

pub(crate) use delegate_composite;

// =============================================================================
// Tests
// =============================================================================
