//! Comparator-ordered unique set backend.
//!
//! [`TreeSet`] keeps at most one element per equivalence class of its
//! comparator; inserting a duplicate is a no-op that hands back an
//! iterator to the element already stored. Iteration visits elements in
//! comparator order, O(log n) per step.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut set = TreeSet::new();
//! set.insert(3);
//! set.insert(1);
//! set.insert(3); // duplicate: size unchanged
//! assert_eq!(set.size(), 2);
//! assert_eq!(set.to_vec(), vec![1, 3]);
//!
//! // A custom comparator fixes the order policy per instance.
//! let mut reversed = TreeSet::with_comparator(Reversed(NaturalOrder));
//! reversed.insert(1);
//! reversed.insert(3);
//! assert_eq!(reversed.to_vec(), vec![3, 1]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collection::ordered::{TreeCursor, TreeStore};
use crate::collection::{Counted, Iterable, Ordered};
use crate::error::{CollectionError, CollectionResult};
use crate::iter::{CollectionIter, RawCursor};
use crate::order::{Comparator, NaturalOrder};

/// A comparator-ordered set of unique elements.
pub struct TreeSet<T> {
    store: Rc<RefCell<TreeStore<T>>>,
    comparator: Rc<dyn Comparator<T>>,
}

impl<T: Clone + Ord + 'static> TreeSet<T> {
    /// Creates an empty set ordered by `Ord`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Clone + 'static> TreeSet<T> {
    /// Creates an empty set ordered by the supplied comparator.
    #[must_use]
    pub fn with_comparator(comparator: impl Comparator<T> + 'static) -> Self {
        let comparator: Rc<dyn Comparator<T>> = Rc::new(comparator);
        let order = Rc::clone(&comparator);
        Self {
            store: TreeStore::new(Box::new(move |left, right| order.compare(left, right))),
            comparator,
        }
    }

    /// Copies the elements out in comparator order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.store.borrow().tree.to_vec()
    }

    fn make_iter(&self, position: Option<T>) -> CollectionIter<T> {
        CollectionIter::from_raw(RawCursor::Set(TreeCursor::positioned(
            &self.store,
            position,
        )))
    }
}

impl<T: Clone + 'static> Counted for TreeSet<T> {
    fn size(&self) -> usize {
        self.store.borrow().tree.len()
    }

    fn clear(&mut self) {
        self.store.borrow_mut().tree.clear();
    }
}

impl<T: Clone + 'static> Iterable<T> for TreeSet<T> {
    fn begin(&self) -> CollectionIter<T> {
        let minimum = self.store.borrow().tree.min();
        self.make_iter(minimum)
    }

    fn end(&self) -> CollectionIter<T> {
        self.make_iter(None)
    }

    fn rbegin(&self) -> CollectionIter<T> {
        let maximum = self.store.borrow().tree.max();
        self.make_iter(maximum)
    }

    fn rend(&self) -> CollectionIter<T> {
        self.make_iter(None)
    }

    fn owns(&self, iterator: &CollectionIter<T>) -> bool {
        match iterator.raw() {
            RawCursor::Set(cursor) => cursor.belongs_to(&self.store),
            _ => false,
        }
    }

    fn remove(&mut self, iterator: CollectionIter<T>) -> CollectionResult<CollectionIter<T>> {
        let mut cursor = match iterator.into_raw() {
            RawCursor::Set(cursor) if cursor.belongs_to(&self.store) => cursor,
            _ => {
                return Err(CollectionError::invalid_input(
                    "iterator does not belong to this collection",
                ));
            }
        };
        let item = cursor.current()?;
        let following = self.store.borrow_mut().remove_and_advance(&item)?;
        cursor.set_position(following);
        Ok(CollectionIter::from_raw(RawCursor::Set(cursor)))
    }
}

impl<T: Clone + 'static> Ordered<T> for TreeSet<T> {
    fn insert(&mut self, value: T) -> CollectionIter<T> {
        let stored = {
            let mut store = self.store.borrow_mut();
            store.insert_if_absent(value.clone());
            // For a rejected duplicate this resolves to the pre-existing
            // element, which may differ from `value` in fields the
            // comparator ignores.
            store.find_item(&value)
        };
        self.make_iter(stored)
    }

    fn contains(&self, value: &T) -> bool {
        self.store.borrow().find_item(value).is_some()
    }

    fn remove_all(&mut self, value: &T) -> usize {
        usize::from(self.store.borrow_mut().remove_item(value).is_some())
    }

    fn first(&self) -> CollectionResult<T> {
        self.store
            .borrow()
            .tree
            .min()
            .ok_or_else(|| CollectionError::not_found("minimum of an empty set"))
    }

    fn last(&self) -> CollectionResult<T> {
        self.store
            .borrow()
            .tree
            .max()
            .ok_or_else(|| CollectionError::not_found("maximum of an empty set"))
    }

    fn poll_first(&mut self) -> CollectionResult<T> {
        let minimum = self.first()?;
        self.store.borrow_mut().remove_item(&minimum);
        Ok(minimum)
    }

    fn poll_last(&mut self) -> CollectionResult<T> {
        let maximum = self.last()?;
        self.store.borrow_mut().remove_item(&maximum);
        Ok(maximum)
    }
}

impl<T: Clone + Ord + 'static> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord + 'static> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for TreeSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.to_vec()).finish()
    }
}

impl<T> TreeSet<T> {
    /// The comparator this set orders by.
    #[must_use]
    pub fn comparator(&self) -> &Rc<dyn Comparator<T>> {
        &self.comparator
    }
}
