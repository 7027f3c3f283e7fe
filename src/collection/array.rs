//! Resizable array backend.
//!
//! [`ArrayCollection`] stores its elements contiguously with positional
//! O(1) access, insertion-ordered iteration, and duplicates allowed.
//! Small arrays live inline (up to 8 elements) before spilling to the
//! heap.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut array: ArrayCollection<i32> = [10, 11, 12, 13].into_iter().collect();
//!
//! assert_eq!(array.get(1).unwrap(), 11);
//! array.set(99, 1).unwrap();
//! assert_eq!(array.get(1).unwrap(), 99);
//!
//! // Remove through an iterator positioned on the second element.
//! let mut cursor = array.begin();
//! cursor.next().unwrap();
//! let cursor = array.remove(cursor).unwrap();
//! assert_eq!(array.size(), 3);
//! assert_eq!(cursor.get().unwrap(), 12); // advanced to the next element
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::collection::{Counted, Indexed, Iterable};
use crate::error::{CollectionError, CollectionResult};
use crate::iter::{CollectionIter, RawCursor};

/// Elements held inline before the array spills to the heap.
const INLINE_CAPACITY: usize = 8;

/// Backing store shared between an array and its cursors.
pub(crate) struct ArrayStore<T> {
    items: SmallVec<[T; INLINE_CAPACITY]>,
}

/// A position inside one array.
pub(crate) struct ArrayCursor<T> {
    store: Weak<RefCell<ArrayStore<T>>>,
    index: Option<usize>,
}

impl<T: Clone> ArrayCursor<T> {
    fn positioned(store: &Rc<RefCell<ArrayStore<T>>>, index: Option<usize>) -> Self {
        Self {
            store: Rc::downgrade(store),
            index,
        }
    }

    pub(crate) const fn is_null(&self) -> bool {
        self.index.is_none()
    }

    fn belongs_to(&self, store: &Rc<RefCell<ArrayStore<T>>>) -> bool {
        Weak::ptr_eq(&self.store, &Rc::downgrade(store))
    }

    fn upgrade(&self) -> CollectionResult<Rc<RefCell<ArrayStore<T>>>> {
        self.store.upgrade().ok_or_else(|| {
            CollectionError::invalid_state("the owning collection no longer exists")
        })
    }

    fn live_index(&self, store: &ArrayStore<T>) -> CollectionResult<usize> {
        let index = self
            .index
            .ok_or_else(|| CollectionError::null_iterator("access through a null iterator"))?;
        if index < store.items.len() {
            Ok(index)
        } else {
            Err(CollectionError::invalid_state(
                "iterator no longer references a live element",
            ))
        }
    }

    pub(crate) fn current(&self) -> CollectionResult<T> {
        let store = self.upgrade()?;
        let store = store.borrow();
        let index = self.live_index(&store)?;
        Ok(store.items[index].clone())
    }

    pub(crate) fn write(&mut self, value: T) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let mut store = store.borrow_mut();
        let index = self.live_index(&store)?;
        store.items[index] = value;
        Ok(())
    }

    pub(crate) fn step_forward(&mut self) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let store = store.borrow();
        let index = self
            .index
            .take()
            .ok_or_else(|| CollectionError::null_iterator("next on a null iterator"))?;
        let following = index + 1;
        self.index = (following < store.items.len()).then_some(following);
        Ok(())
    }

    pub(crate) fn step_backward(&mut self) -> CollectionResult<()> {
        let _ = self.upgrade()?;
        let index = self
            .index
            .take()
            .ok_or_else(|| CollectionError::null_iterator("prev on a null iterator"))?;
        self.index = index.checked_sub(1);
        Ok(())
    }
}

impl<T> Clone for ArrayCursor<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            index: self.index,
        }
    }
}

// =============================================================================
// ArrayCollection
// =============================================================================

/// A resizable array: positional order, duplicates allowed, O(1) access
/// by index.
///
/// # Complexity
///
/// | Operation  | Cost  |
/// |------------|-------|
/// | `get`/`set`| O(1)  |
/// | `append`   | amortized O(1) |
/// | `remove`   | O(n)  |
/// | `resize`   | O(n)  |
pub struct ArrayCollection<T> {
    store: Rc<RefCell<ArrayStore<T>>>,
}

impl<T: Clone> ArrayCollection<T> {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(ArrayStore {
                items: SmallVec::new(),
            })),
        }
    }

    /// Copies the elements out in positional order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.store.borrow().items.to_vec()
    }

    fn make_iter(&self, index: Option<usize>) -> CollectionIter<T> {
        CollectionIter::from_raw(RawCursor::Array(ArrayCursor::positioned(
            &self.store,
            index,
        )))
    }

    fn own_cursor(&self, iterator: CollectionIter<T>) -> CollectionResult<ArrayCursor<T>> {
        match iterator.into_raw() {
            RawCursor::Array(cursor) if cursor.belongs_to(&self.store) => Ok(cursor),
            _ => Err(CollectionError::invalid_input(
                "iterator does not belong to this collection",
            )),
        }
    }
}

impl<T: Clone> Counted for ArrayCollection<T> {
    fn size(&self) -> usize {
        self.store.borrow().items.len()
    }

    fn clear(&mut self) {
        self.store.borrow_mut().items.clear();
    }
}

impl<T: Clone> Iterable<T> for ArrayCollection<T> {
    fn begin(&self) -> CollectionIter<T> {
        let index = (!self.is_empty()).then_some(0);
        self.make_iter(index)
    }

    fn end(&self) -> CollectionIter<T> {
        self.make_iter(None)
    }

    fn rbegin(&self) -> CollectionIter<T> {
        let index = self.size().checked_sub(1);
        self.make_iter(index)
    }

    fn rend(&self) -> CollectionIter<T> {
        self.make_iter(None)
    }

    fn owns(&self, iterator: &CollectionIter<T>) -> bool {
        match iterator.raw() {
            RawCursor::Array(cursor) => cursor.belongs_to(&self.store),
            _ => false,
        }
    }

    fn remove(&mut self, iterator: CollectionIter<T>) -> CollectionResult<CollectionIter<T>> {
        let mut cursor = self.own_cursor(iterator)?;
        let index = {
            let store = self.store.borrow();
            cursor.live_index(&store)?
        };

        let mut store = self.store.borrow_mut();
        store.items.remove(index);
        cursor.index = (index < store.items.len()).then_some(index);
        drop(store);

        Ok(CollectionIter::from_raw(RawCursor::Array(cursor)))
    }
}

impl<T: Clone> Indexed<T> for ArrayCollection<T> {
    fn get(&self, position: usize) -> CollectionResult<T> {
        let store = self.store.borrow();
        store
            .items
            .get(position)
            .cloned()
            .ok_or_else(|| CollectionError::out_of_bounds(position, store.items.len()))
    }

    fn set(&mut self, value: T, position: usize) -> CollectionResult<()> {
        let mut store = self.store.borrow_mut();
        let size = store.items.len();
        let slot = store
            .items
            .get_mut(position)
            .ok_or_else(|| CollectionError::out_of_bounds(position, size))?;
        *slot = value;
        Ok(())
    }

    fn append(&mut self, value: T) {
        self.store.borrow_mut().items.push(value);
    }

    fn resize(&mut self, new_size: usize)
    where
        T: Default,
    {
        let mut store = self.store.borrow_mut();
        if new_size <= store.items.len() {
            store.items.truncate(new_size);
        } else {
            let additional = new_size - store.items.len();
            store.items.reserve(additional);
            while store.items.len() < new_size {
                store.items.push(T::default());
            }
        }
    }
}

impl<T: Clone> Default for ArrayCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for ArrayCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let array = Self::new();
        array.store.borrow_mut().items.extend(iter);
        array
    }
}

impl<T: Clone + PartialEq> PartialEq for ArrayCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.store.borrow().items == other.store.borrow().items
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ArrayCollection<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.store.borrow().items.iter())
            .finish()
    }
}
