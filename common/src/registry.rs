//! Per-frame driver for the top-level widgets: update fan-out and docking.
//!
//! # Docking
//!
//! Enabled widgets are split by [`Magnet`] and each group is ordered by
//! ascending priority (ties keep registration order):
//!
//! ```text
//!  left edge                                                  right edge
//!  |[L0]gap[L1]gap|<--------------- AUTO --------------->|gap[R1]gap[R0]|
//! ```
//!
//! - LEFT widgets are packed left to right from the left edge.
//! - RIGHT widgets are packed right to left from the right edge.
//! - The first AUTO widget is placed right after the LEFT block and, if it
//!   implements [`CapacityNegotiation`], resized to fill the space up to the
//!   RIGHT block. Further AUTO widgets are left where they are.
//!
//! Zero-width widgets, hidden ones included, take no space and add no gap.
//!
//! An unset left edge is inferred as the leftmost anchor of the LEFT group,
//! an unset right edge as the rightmost right edge of the RIGHT group.
//!
//! Widgets that have to move are erased at their old position and shifted.
//! If anything moved or was resized, the whole registry is blanked and
//! redrawn once at the end of the pass, however many widgets moved.

use heapless::Vec;

use crate::canvas::Canvas;
use crate::config::DEFAULT_GAP_X;
use crate::widget::{Magnet, PostArgs, Widget};

// =============================================================================
// Handle
// =============================================================================

/// Reference to a registered widget. Invalid when registration was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Handle {
    index: Option<usize>,
}

impl Handle {
    /// A handle that refers to nothing.
    pub const fn invalid() -> Self { Self { index: None } }

    #[inline]
    pub const fn is_valid(&self) -> bool { self.index.is_some() }

    #[inline]
    pub const fn index(&self) -> Option<usize> { self.index }
}

// =============================================================================
// Registry
// =============================================================================

struct Entry<'a> {
    widget: &'a mut dyn Widget,
    /// Resolved once in `add`.
    negotiates_capacity: bool,
}

/// Non-owning registry of up to `MAX` top-level widgets.
pub struct WidgetRegistry<'a, const MAX: usize> {
    entries: Vec<Entry<'a>, MAX>,
    gap_x: i32,
    left_edge_x: Option<i32>,
    right_edge_x: Option<i32>,
}

impl<'a, const MAX: usize> WidgetRegistry<'a, MAX> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            gap_x: DEFAULT_GAP_X,
            left_edge_x: None,
            right_edge_x: None,
        }
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Pixels between neighbouring docked widgets. Applies from the next relayout.
    pub fn set_gap_x(
        &mut self,
        px: i32,
    ) {
        self.gap_x = px;
    }

    /// Fixed reference for the LEFT block. Applies from the next relayout.
    pub fn set_left_edge_x(
        &mut self,
        px: i32,
    ) {
        self.left_edge_x = Some(px);
    }

    /// Fixed reference for the RIGHT block. Applies from the next relayout.
    pub fn set_right_edge_x(
        &mut self,
        px: i32,
    ) {
        self.right_edge_x = Some(px);
    }

    pub const fn gap_x(&self) -> i32 { self.gap_x }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Register `widget`. Returns an invalid handle once `MAX` widgets are held.
    pub fn add(
        &mut self,
        widget: &'a mut dyn Widget,
    ) -> Handle {
        let negotiates_capacity = widget.capacity_mut().is_some();
        let index = self.entries.len();
        match self.entries.push(Entry {
            widget,
            negotiates_capacity,
        }) {
            Ok(()) => Handle { index: Some(index) },
            Err(rejected) => {
                log::warn!("[registry] add(): full ({} widgets), rejecting '{}'", MAX, rejected.widget.id());
                Handle::invalid()
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn widget(
        &self,
        handle: Handle,
    ) -> Option<&(dyn Widget + 'a)> {
        let entry = self.entries.get(handle.index?)?;
        Some(&*entry.widget)
    }

    pub fn widget_mut(
        &mut self,
        handle: Handle,
    ) -> Option<&mut (dyn Widget + 'a)> {
        let entry = self.entries.get_mut(handle.index?)?;
        Some(&mut *entry.widget)
    }

    /// Whether the widget behind `handle` was registered as elastic-capable.
    pub fn negotiates_capacity(
        &self,
        handle: Handle,
    ) -> bool {
        handle.index.and_then(|i| self.entries.get(i)).is_some_and(|e| e.negotiates_capacity)
    }

    // -------------------------------------------------------------------------
    // Fan-out
    // -------------------------------------------------------------------------

    fn enabled_mut(&mut self) -> impl Iterator<Item = &mut Entry<'a>> {
        self.entries.iter_mut().filter(|e| e.widget.is_enabled())
    }

    /// Redraw every enabled widget that is dirty, in registration order.
    pub fn update_all(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        for entry in self.enabled_mut() {
            entry.widget.update(canvas);
        }
    }

    /// Deliver the same payload to every enabled widget.
    pub fn post_all(
        &mut self,
        args: &PostArgs<'_>,
    ) {
        for entry in self.enabled_mut() {
            entry.widget.post(args);
        }
    }

    pub fn blank_all(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        for entry in self.enabled_mut() {
            entry.widget.blank(canvas);
        }
    }

    /// Draw every enabled, visible widget.
    pub fn write_all(
        &mut self,
        canvas: &mut dyn Canvas,
    ) {
        for entry in self.enabled_mut().filter(|e| e.widget.is_visible()) {
            entry.widget.write(canvas);
        }
    }

    // -------------------------------------------------------------------------
    // Relayout
    // -------------------------------------------------------------------------

    /// Recompute docking and redraw once if anything moved or was resized.
    ///
    /// Returns whether the batched redraw ran.
    pub fn relayout(
        &mut self,
        canvas: &mut dyn Canvas,
    ) -> bool {
        let mut moved = false;
        let left_end = self.relayout_left(canvas, &mut moved);
        let right_start = self.relayout_right(canvas, &mut moved);

        let left_boundary = match left_end {
            Some(x) => x + self.gap_x,
            None => self.left_edge_x.unwrap_or(0),
        };
        let right_boundary = match right_start {
            Some(x) => Some(x - self.gap_x),
            None => self.right_edge_x,
        };
        if let Some(right_boundary) = right_boundary {
            self.relayout_auto(canvas, left_boundary, right_boundary, &mut moved);
        }

        if moved {
            self.blank_all(canvas);
            self.write_all(canvas);
        }
        moved
    }

    /// Indices of enabled widgets docked to `magnet`, by priority then registration.
    fn group(
        &self,
        magnet: Magnet,
    ) -> Vec<usize, MAX> {
        let mut group: Vec<usize, MAX> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.widget.is_enabled() && e.widget.magnet() == magnet)
            .map(|(i, _)| i)
            .collect();
        group.sort_unstable_by_key(|&i| (self.entries[i].widget.priority(), i));
        group
    }

    /// Erase `index` at its current position and move it to `target_x`.
    fn move_to(
        &mut self,
        index: usize,
        target_x: i32,
        canvas: &mut dyn Canvas,
    ) -> bool {
        let widget = &mut self.entries[index].widget;
        let dx = target_x - widget.left_edge_x();
        if dx == 0 {
            return false;
        }
        widget.blank(canvas);
        widget.horizontal_shift(dx);
        true
    }

    /// Packs the LEFT group. Returns the right edge of the block.
    fn relayout_left(
        &mut self,
        canvas: &mut dyn Canvas,
        moved: &mut bool,
    ) -> Option<i32> {
        let group = self.group(Magnet::Left);
        let inferred = group.iter().map(|&i| self.entries[i].widget.left_edge_x()).min()?;
        let mut cursor = self.left_edge_x.unwrap_or(inferred);
        let mut placed = false;

        for &i in &group {
            let width = self.entries[i].widget.width(canvas);
            if placed && width > 0 {
                cursor += self.gap_x;
            }
            *moved |= self.move_to(i, cursor, canvas);
            if width > 0 {
                cursor += width;
                placed = true;
            }
        }
        Some(cursor)
    }

    /// Packs the RIGHT group. Returns the left edge of the block.
    fn relayout_right(
        &mut self,
        canvas: &mut dyn Canvas,
        moved: &mut bool,
    ) -> Option<i32> {
        let group = self.group(Magnet::Right);
        let inferred = group
            .iter()
            .map(|&i| self.entries[i].widget.right_edge_x(canvas))
            .max()?;
        let mut cursor = self.right_edge_x.unwrap_or(inferred);
        let mut placed = false;

        for &i in &group {
            let width = self.entries[i].widget.width(canvas);
            if placed && width > 0 {
                cursor -= self.gap_x;
            }
            let target = cursor - width;
            *moved |= self.move_to(i, target, canvas);
            if width > 0 {
                cursor = target;
                placed = true;
            }
        }
        Some(cursor)
    }

    /// Fits the first AUTO widget into `[left, right)`.
    fn relayout_auto(
        &mut self,
        canvas: &mut dyn Canvas,
        left: i32,
        right: i32,
        moved: &mut bool,
    ) {
        let group = self.group(Magnet::Auto);
        let Some(&index) = group.first() else {
            return;
        };
        if group.len() > 1 {
            log::debug!("[registry] relayout(): {} AUTO widgets, only the first is elastic", group.len());
        }

        let available = right - left;
        if available <= 0 {
            return;
        }

        let entry = &mut self.entries[index];
        if entry.negotiates_capacity {
            if let Some(elastic) = entry.widget.capacity_mut() {
                let unit = elastic.unit_width();
                let target = if unit > 0 { (available / unit) as usize } else { 0 };
                let current = elastic.capacity();
                if target > 0 && target != current {
                    log::debug!("[registry] relayout(): new elastic capacity {} (was {})", target, current);
                    elastic.set_capacity(target, true);
                    *moved = true;
                }
            }
        }

        *moved |= self.move_to(index, left, canvas);
    }
}

impl<const MAX: usize> Default for WidgetRegistry<'_, MAX> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
