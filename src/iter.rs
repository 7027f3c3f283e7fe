//! Type-erased bidirectional iterator protocol.
//!
//! Every collection in this crate hands out the same iterator type,
//! [`CollectionIter`], regardless of its backing structure. Internally the
//! iterator is a tagged cursor — one variant per backend — matched
//! explicitly wherever a collection needs its native position back (for
//! `remove`, `insert_before`, `insert_after`). The back-reference to the
//! owning collection is a non-owning `Weak`: an iterator never keeps its
//! collection alive, and an iterator that outlives its collection reports
//! [`InvalidState`](crate::error::CollectionError::InvalidState) instead
//! of dangling.
//!
//! # States
//!
//! An iterator is either *positioned* (dereferenceable) or *null* (run
//! off either end). `next`/`prev` move a positioned iterator and may land
//! it in the null state; calling them on an already-null iterator fails
//! with [`NullIterator`](crate::error::CollectionError::NullIterator).
//! There is no transition out of null except obtaining a fresh iterator
//! from the collection.
//!
//! ```text
//! Positioned ──next/prev──► Positioned | Null
//! Null       ──next/prev──► error (NullIterator)
//! ```
//!
//! # Capabilities
//!
//! [`ReadableIterator`] covers traversal and read access; reads return a
//! clone of the element, so a detached iterator never borrows out of its
//! collection. [`WritableIterator`] adds [`set`](WritableIterator::set),
//! available on the positional backends (array, list). Tree-backed
//! cursors reject `set`: rewriting an element in place could violate the
//! order the tree was built under.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let array: ArrayCollection<i32> = [1, 2, 3].into_iter().collect();
//!
//! let mut forward = Vec::new();
//! let mut cursor = array.begin();
//! while !cursor.is_null() {
//!     forward.push(cursor.get().unwrap());
//!     cursor.next().unwrap();
//! }
//! assert_eq!(forward, vec![1, 2, 3]);
//!
//! let mut backward = Vec::new();
//! let mut cursor = array.rbegin();
//! while !cursor.is_null() {
//!     backward.push(cursor.get().unwrap());
//!     cursor.prev().unwrap();
//! }
//! assert_eq!(backward, vec![3, 2, 1]);
//! ```

use static_assertions::assert_not_impl_any;

use crate::collection::Iterable;
use crate::collection::array::ArrayCursor;
use crate::collection::linked_list::ListCursor;
use crate::collection::ordered::{Stamped, TreeCursor};
use crate::error::{CollectionError, CollectionResult};

/// Read capability: traversal plus cloning reads.
pub trait ReadableIterator<T: Clone> {
    /// Checks whether the iterator has run off either end.
    fn is_null(&self) -> bool;

    /// Advances one position toward the back.
    ///
    /// # Errors
    ///
    /// [`NullIterator`](CollectionError::NullIterator) when already null;
    /// [`InvalidState`](CollectionError::InvalidState) when the owning
    /// collection no longer exists.
    fn next(&mut self) -> CollectionResult<()>;

    /// Moves one position toward the front.
    ///
    /// # Errors
    ///
    /// Same conditions as [`next`](Self::next).
    fn prev(&mut self) -> CollectionResult<()>;

    /// Clones the element under the iterator.
    ///
    /// # Errors
    ///
    /// [`NullIterator`](CollectionError::NullIterator) when null;
    /// [`InvalidState`](CollectionError::InvalidState) when the owning
    /// collection no longer exists or the position is no longer live.
    fn get(&self) -> CollectionResult<T>;
}

/// Write capability: in-place replacement of the element under the
/// iterator.
pub trait WritableIterator<T: Clone>: ReadableIterator<T> {
    /// Replaces the element under the iterator.
    ///
    /// # Errors
    ///
    /// The conditions of [`get`](ReadableIterator::get), plus
    /// [`InvalidInput`](CollectionError::InvalidInput) when the backend
    /// only supports read access (the tree-backed collections).
    fn set(&mut self, value: T) -> CollectionResult<()>;
}

/// The concrete cursor, tagged by backend.
pub(crate) enum RawCursor<T> {
    /// Index cursor into an array store.
    Array(ArrayCursor<T>),
    /// Slot-key cursor into a list arena.
    List(ListCursor<T>),
    /// Item cursor into a unique ordered tree (set, map entries).
    Set(TreeCursor<T>),
    /// Stamped-item cursor into a multiset tree.
    Multi(TreeCursor<Stamped<T>>),
}

impl<T: Clone> Clone for RawCursor<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Array(cursor) => Self::Array(cursor.clone()),
            Self::List(cursor) => Self::List(cursor.clone()),
            Self::Set(cursor) => Self::Set(cursor.clone()),
            Self::Multi(cursor) => Self::Multi(cursor.clone()),
        }
    }
}

/// A position inside exactly one collection.
///
/// Produced by a collection's `begin`/`end`/`rbegin`/`rend`; moved with
/// [`next`](ReadableIterator::next)/[`prev`](ReadableIterator::prev);
/// consumed by the owning collection's `remove` and `insert_before`/
/// `insert_after`. See the [module documentation](self) for the state
/// machine and capability split.
pub struct CollectionIter<T> {
    raw: RawCursor<T>,
}

assert_not_impl_any!(CollectionIter<i32>: Send, Sync);

impl<T: Clone> CollectionIter<T> {
    pub(crate) const fn from_raw(raw: RawCursor<T>) -> Self {
        Self { raw }
    }

    pub(crate) const fn raw(&self) -> &RawCursor<T> {
        &self.raw
    }

    pub(crate) fn into_raw(self) -> RawCursor<T> {
        self.raw
    }

    /// Checks whether this iterator was produced by the given collection.
    ///
    /// Identity, not value: the check compares the iterator's
    /// back-reference against the collection's store. Every mutating
    /// operation that accepts an iterator performs this check and rejects
    /// foreign iterators with
    /// [`InvalidInput`](CollectionError::InvalidInput).
    pub fn belongs_to<C>(&self, collection: &C) -> bool
    where
        C: Iterable<T> + ?Sized,
    {
        collection.owns(self)
    }
}

impl<T: Clone> ReadableIterator<T> for CollectionIter<T> {
    fn is_null(&self) -> bool {
        match &self.raw {
            RawCursor::Array(cursor) => cursor.is_null(),
            RawCursor::List(cursor) => cursor.is_null(),
            RawCursor::Set(cursor) => cursor.is_null(),
            RawCursor::Multi(cursor) => cursor.is_null(),
        }
    }

    fn next(&mut self) -> CollectionResult<()> {
        match &mut self.raw {
            RawCursor::Array(cursor) => cursor.step_forward(),
            RawCursor::List(cursor) => cursor.step_forward(),
            RawCursor::Set(cursor) => cursor.step_forward(),
            RawCursor::Multi(cursor) => cursor.step_forward(),
        }
    }

    fn prev(&mut self) -> CollectionResult<()> {
        match &mut self.raw {
            RawCursor::Array(cursor) => cursor.step_backward(),
            RawCursor::List(cursor) => cursor.step_backward(),
            RawCursor::Set(cursor) => cursor.step_backward(),
            RawCursor::Multi(cursor) => cursor.step_backward(),
        }
    }

    fn get(&self) -> CollectionResult<T> {
        match &self.raw {
            RawCursor::Array(cursor) => cursor.current(),
            RawCursor::List(cursor) => cursor.current(),
            RawCursor::Set(cursor) => cursor.current(),
            RawCursor::Multi(cursor) => cursor.current().map(|stamped| stamped.value),
        }
    }
}

impl<T: Clone> WritableIterator<T> for CollectionIter<T> {
    fn set(&mut self, value: T) -> CollectionResult<()> {
        match &mut self.raw {
            RawCursor::Array(cursor) => cursor.write(value),
            RawCursor::List(cursor) => cursor.write(value),
            RawCursor::Set(_) | RawCursor::Multi(_) => Err(CollectionError::invalid_input(
                "ordered collections expose read-only iteration",
            )),
        }
    }
}

impl<T: Clone> Clone for CollectionIter<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}
