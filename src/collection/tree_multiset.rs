//! Comparator-ordered multiset backend.
//!
//! [`TreeMultiset`] admits duplicates: every inserted element receives a
//! monotonically increasing stamp, and the backing tree orders items by
//! (comparator, stamp), so equal-comparing elements occupy distinct
//! slots. A cursor addresses one stamped occurrence exactly, which is
//! what lets `remove` through an iterator delete a single duplicate.
//!
//! The stamp order among equal elements is a backend detail; see
//! [`PriorityQueue`](crate::collection::PriorityQueue) for the consequence
//! at the adaptor level.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut bag = TreeMultiset::new();
//! bag.insert(5);
//! bag.insert(5);
//! bag.insert(2);
//! assert_eq!(bag.size(), 3);
//! assert_eq!(bag.count(&5), 2);
//!
//! assert_eq!(bag.remove_all(&5), 2);
//! assert_eq!(bag.size(), 1);
//! assert_eq!(bag.remove_all(&5), 0); // absent: no-op
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::collection::ordered::{Stamped, TreeCursor, TreeStore};
use crate::collection::{Counted, Iterable, Ordered};
use crate::error::{CollectionError, CollectionResult};
use crate::iter::{CollectionIter, RawCursor};
use crate::order::{Comparator, NaturalOrder};

/// A comparator-ordered collection admitting duplicates.
pub struct TreeMultiset<T> {
    store: Rc<RefCell<TreeStore<Stamped<T>>>>,
    comparator: Rc<dyn Comparator<T>>,
    next_stamp: u64,
}

impl<T: Clone + Ord + 'static> TreeMultiset<T> {
    /// Creates an empty multiset ordered by `Ord`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Clone + 'static> TreeMultiset<T> {
    /// Creates an empty multiset ordered by the supplied comparator.
    #[must_use]
    pub fn with_comparator(comparator: impl Comparator<T> + 'static) -> Self {
        let comparator: Rc<dyn Comparator<T>> = Rc::new(comparator);
        let order = Rc::clone(&comparator);
        Self {
            store: TreeStore::new(Box::new(move |left: &Stamped<T>, right: &Stamped<T>| {
                order
                    .compare(&left.value, &right.value)
                    .then_with(|| left.stamp.cmp(&right.stamp))
            })),
            comparator,
            next_stamp: 0,
        }
    }

    /// Copies the elements out in comparator order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.store
            .borrow()
            .tree
            .to_vec()
            .into_iter()
            .map(|stamped| stamped.value)
            .collect()
    }

    /// Counts the occurrences comparing equal to `value`.
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        let store = self.store.borrow();
        let mut occurrences = 0;
        store.tree.for_each(|item| {
            if self.comparator.compare(value, &item.value) == Ordering::Equal {
                occurrences += 1;
            }
        });
        occurrences
    }

    fn make_iter(&self, position: Option<Stamped<T>>) -> CollectionIter<T> {
        CollectionIter::from_raw(RawCursor::Multi(TreeCursor::positioned(
            &self.store,
            position,
        )))
    }

    /// Finds any stored occurrence comparing equal to `value`, ignoring
    /// stamps.
    fn find_any(&self, value: &T) -> Option<Stamped<T>> {
        self.store
            .borrow()
            .tree
            .find(|item| self.comparator.compare(value, &item.value))
    }
}

impl<T: Clone + 'static> Counted for TreeMultiset<T> {
    fn size(&self) -> usize {
        self.store.borrow().tree.len()
    }

    fn clear(&mut self) {
        self.store.borrow_mut().tree.clear();
    }
}

impl<T: Clone + 'static> Iterable<T> for TreeMultiset<T> {
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
            RawCursor::Multi(cursor) => cursor.belongs_to(&self.store),
            _ => false,
        }
    }

    fn remove(&mut self, iterator: CollectionIter<T>) -> CollectionResult<CollectionIter<T>> {
        let mut cursor = match iterator.into_raw() {
            RawCursor::Multi(cursor) if cursor.belongs_to(&self.store) => cursor,
            _ => {
                return Err(CollectionError::invalid_input(
                    "iterator does not belong to this collection",
                ));
            }
        };
        let item = cursor.current()?;
        let following = self.store.borrow_mut().remove_and_advance(&item)?;
        cursor.set_position(following);
        Ok(CollectionIter::from_raw(RawCursor::Multi(cursor)))
    }
}

impl<T: Clone + 'static> Ordered<T> for TreeMultiset<T> {
    fn insert(&mut self, value: T) -> CollectionIter<T> {
        let stamped = Stamped::new(value, self.next_stamp);
        self.next_stamp += 1;
        self.store.borrow_mut().insert_if_absent(stamped.clone());
        self.make_iter(Some(stamped))
    }

    fn contains(&self, value: &T) -> bool {
        self.find_any(value).is_some()
    }

    fn remove_all(&mut self, value: &T) -> usize {
        let mut removed = 0;
        while let Some(occurrence) = self.find_any(value) {
            if self
                .store
                .borrow_mut()
                .remove_item(&occurrence)
                .is_none()
            {
                break;
            }
            removed += 1;
        }
        removed
    }

    fn first(&self) -> CollectionResult<T> {
        self.store
            .borrow()
            .tree
            .min()
            .map(|stamped| stamped.value)
            .ok_or_else(|| CollectionError::not_found("minimum of an empty multiset"))
    }

    fn last(&self) -> CollectionResult<T> {
        self.store
            .borrow()
            .tree
            .max()
            .map(|stamped| stamped.value)
            .ok_or_else(|| CollectionError::not_found("maximum of an empty multiset"))
    }

    fn poll_first(&mut self) -> CollectionResult<T> {
        let minimum = {
            let store = self.store.borrow();
            store
                .tree
                .min()
                .ok_or_else(|| CollectionError::not_found("minimum of an empty multiset"))?
        };
        self.store.borrow_mut().remove_item(&minimum);
        Ok(minimum.value)
    }

    fn poll_last(&mut self) -> CollectionResult<T> {
        let maximum = {
            let store = self.store.borrow();
            store
                .tree
                .max()
                .ok_or_else(|| CollectionError::not_found("maximum of an empty multiset"))?
        };
        self.store.borrow_mut().remove_item(&maximum);
        Ok(maximum.value)
    }
}

impl<T: Clone + Ord + 'static> Default for TreeMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord + 'static> FromIterator<T> for TreeMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = Self::new();
        for value in iter {
            multiset.insert(value);
        }
        multiset
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for TreeMultiset<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.to_vec()).finish()
    }
}
