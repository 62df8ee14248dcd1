//! Type-keyed bag of optional, widget-kind-specific init parameters.
//!
//! [`InitArgs`](crate::widget::InitArgs) carries the fields every widget
//! understands. Anything that only one kind cares about (chat pixel pitch,
//! icon strip geometry, text trims, ...) travels in an `ArgsBag` instead, so
//! the shared struct does not grow a field per widget kind.
//!
//! Each concrete type is stored at most once. Setting a value of a type that
//! is already present replaces it. Cloning the bag deep-clones every entry;
//! [`ArgsBag::take`] moves all entries out and leaves the source empty.
//!
//! ```ignore
//! let extras = ArgsBag::new()
//!     .with(ChatInitArgs { pixels_per_character: Some(6) })
//!     .with(TextInitArgs::<f32> { right_align: Some(true), ..Default::default() });
//!
//! if let Some(chat) = extras.get::<ChatInitArgs>() { /* ... */ }
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::any::{Any, TypeId};
use core::fmt;

/// A stored value that knows how to clone itself behind a trait object.
trait Slot: Any {
    fn clone_slot(&self) -> Box<dyn Slot>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> Slot for T
where
    T: Any + Clone,
{
    fn clone_slot(&self) -> Box<dyn Slot> { Box::new(self.clone()) }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

/// Heterogeneous store holding at most one value per type.
#[derive(Default)]
pub struct ArgsBag {
    items: BTreeMap<TypeId, Box<dyn Slot>>,
}

impl ArgsBag {
    /// Create an empty bag.
    pub const fn new() -> Self { Self { items: BTreeMap::new() } }

    /// Builder form of [`ArgsBag::set`].
    #[must_use]
    pub fn with<T>(
        mut self,
        value: T,
    ) -> Self
    where
        T: Any + Clone,
    {
        self.set(value);
        self
    }

    /// Store `value`, dropping any earlier value of the same type.
    pub fn set<T>(
        &mut self,
        value: T,
    ) where
        T: Any + Clone,
    {
        self.items.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Borrow the stored `T`, if any.
    pub fn get<T>(&self) -> Option<&T>
    where
        T: Any,
    {
        self.items.get(&TypeId::of::<T>()).and_then(|slot| (**slot).as_any().downcast_ref())
    }

    /// Mutably borrow the stored `T`, if any.
    pub fn get_mut<T>(&mut self) -> Option<&mut T>
    where
        T: Any,
    {
        self.items.get_mut(&TypeId::of::<T>()).and_then(|slot| (**slot).as_any_mut().downcast_mut())
    }

    /// Whether a `T` is stored.
    pub fn has<T>(&self) -> bool
    where
        T: Any,
    {
        self.items.contains_key(&TypeId::of::<T>())
    }

    /// Drop the stored `T`. Returns whether one was present.
    pub fn erase<T>(&mut self) -> bool
    where
        T: Any,
    {
        self.items.remove(&TypeId::of::<T>()).is_some()
    }

    /// Drop every stored value.
    pub fn clear(&mut self) { self.items.clear(); }

    /// Move every entry into a new bag, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self { core::mem::take(self) }

    #[inline]
    pub fn len(&self) -> usize { self.items.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl Clone for ArgsBag {
    fn clone(&self) -> Self {
        Self {
            items: self.items.iter().map(|(key, slot)| (*key, (**slot).clone_slot())).collect(),
        }
    }
}

impl fmt::Debug for ArgsBag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("ArgsBag").field("len", &self.items.len()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;

    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Pitch(i32);

    #[derive(Clone, Debug, PartialEq)]
    struct Label(String);

    #[test]
    fn test_set_get_has() {
        let mut bag = ArgsBag::new();
        assert!(bag.is_empty());
        assert!(!bag.has::<Pitch>());
        assert!(bag.get::<Pitch>().is_none());

        bag.set(Pitch(6));
        assert!(bag.has::<Pitch>());
        assert_eq!(bag.get::<Pitch>(), Some(&Pitch(6)));
        assert!(bag.get::<Label>().is_none(), "other types must stay absent");
    }

    #[test]
    fn test_set_replaces_same_type() {
        let mut bag = ArgsBag::new().with(Pitch(4));
        bag.set(Pitch(9));
        assert_eq!(bag.len(), 1, "one slot per type");
        assert_eq!(bag.get::<Pitch>(), Some(&Pitch(9)));
    }

    #[test]
    fn test_replaced_value_is_dropped() {
        let tracker = Rc::new(());
        let mut bag = ArgsBag::new().with(Rc::clone(&tracker));
        assert_eq!(Rc::strong_count(&tracker), 2);

        bag.set(Rc::new(()));
        assert_eq!(Rc::strong_count(&tracker), 1, "old value must be released on replace");
    }

    #[test]
    fn test_clone_is_deep() {
        let original = ArgsBag::new().with(Label(String::from("row")));
        let mut copy = original.clone();

        if let Some(label) = copy.get_mut::<Label>() {
            label.0.push_str("-edited");
        }

        assert_eq!(original.get::<Label>(), Some(&Label(String::from("row"))));
        assert_eq!(copy.get::<Label>(), Some(&Label(String::from("row-edited"))));
    }

    #[test]
    fn test_take_empties_source() {
        let mut source = ArgsBag::new().with(Pitch(1)).with(Label(String::from("x")));
        let moved = source.take();

        assert!(source.is_empty(), "moved-from bag must be empty");
        assert_eq!(moved.len(), 2);
        assert_eq!(moved.get::<Pitch>(), Some(&Pitch(1)));
    }

    #[test]
    fn test_erase_and_clear() {
        let mut bag = ArgsBag::new().with(Pitch(1)).with(Label(String::new()));
        assert!(bag.erase::<Pitch>());
        assert!(!bag.erase::<Pitch>(), "second erase finds nothing");
        assert_eq!(bag.len(), 1);

        bag.clear();
        assert!(bag.is_empty());
    }

    #[test]
    fn test_drop_releases_entries() {
        let tracker = Rc::new(());
        {
            let _bag = ArgsBag::new().with(Rc::clone(&tracker));
            assert_eq!(Rc::strong_count(&tracker), 2);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
