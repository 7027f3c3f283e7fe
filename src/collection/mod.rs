//! Collection shapes behind one iteration contract.
//!
//! This module provides the concrete backends:
//!
//! - [`ArrayCollection`]: resizable array, positional order, O(1) index
//! - [`LinkedList`]: doubly linked list, O(1) at the ends and cursors
//! - [`TreeSet`]: comparator-ordered unique set
//! - [`TreeMultiset`]: comparator-ordered set with duplicates
//! - [`TreeMap`]: comparator-ordered key-value map
//! - [`Queue`]: FIFO adaptor over a linked list
//! - [`PriorityQueue`]: max-first adaptor over a multiset
//!
//! and the capability traits they compose. Instead of one deep interface
//! chain, each backend implements the small orthogonal capabilities that
//! fit its shape:
//!
//! | Backend          | [`Counted`] | [`Iterable`] | [`Indexed`] | [`Sequential`] | [`Ordered`] | [`Keyed`] |
//! |------------------|-------------|--------------|-------------|----------------|-------------|-----------|
//! | `ArrayCollection`| yes         | yes          | yes         |                |             |           |
//! | `LinkedList`     | yes         | yes          |             | yes            |             |           |
//! | `TreeSet`        | yes         | yes          |             |                | yes         |           |
//! | `TreeMultiset`   | yes         | yes          |             |                | yes         |           |
//! | `TreeMap`        | yes         | yes          |             |                |             | yes       |
//! | `Queue`          | yes         |              |             |                |             |           |
//! | `PriorityQueue`  | yes         |              |             |                |             |           |
//!
//! The two queue shapes are adaptors: each owns a backend collection and
//! restricts its surface to `head`/`put`/`poll`.
//!
//! Every collection is exclusively owned by the scope holding it; the
//! iterators it produces are non-owning observers (see
//! [`iter`](crate::iter)). All operations are synchronous and
//! single-threaded.

use crate::error::CollectionResult;
use crate::iter::{CollectionIter, ReadableIterator};

pub(crate) mod array;
pub(crate) mod linked_list;
pub(crate) mod ordered;
mod priority_queue;
mod queue;
mod rb_tree;
mod tree_map;
mod tree_multiset;
mod tree_set;

pub use array::ArrayCollection;
pub use linked_list::LinkedList;
pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use tree_map::{MapEntry, TreeMap};
pub use tree_multiset::TreeMultiset;
pub use tree_set::TreeSet;

/// Has a size.
pub trait Counted {
    /// Returns the number of elements.
    fn size(&self) -> usize;

    /// Checks whether the collection holds no elements.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Removes every element.
    fn clear(&mut self);
}

/// Can be traversed with the crate's bidirectional iterator protocol.
pub trait Iterable<T: Clone>: Counted {
    /// Returns an iterator positioned on the first element, or a null
    /// iterator for an empty collection.
    fn begin(&self) -> CollectionIter<T>;

    /// Returns the null iterator one past the last element.
    fn end(&self) -> CollectionIter<T>;

    /// Returns an iterator positioned on the last element, or a null
    /// iterator for an empty collection.
    fn rbegin(&self) -> CollectionIter<T>;

    /// Returns the null iterator one before the first element.
    fn rend(&self) -> CollectionIter<T>;

    /// Checks whether this collection produced the given iterator.
    fn owns(&self, iterator: &CollectionIter<T>) -> bool;

    /// Scans for an element under a caller-supplied equality.
    ///
    /// Linear in the collection size regardless of backend.
    fn has_element_by<E>(&self, element: &T, eq: E) -> bool
    where
        E: Fn(&T, &T) -> bool,
    {
        let mut cursor = self.begin();
        while !cursor.is_null() {
            match cursor.get() {
                Ok(current) if eq(&current, element) => return true,
                Ok(_) => {}
                Err(_) => break,
            }
            if cursor.next().is_err() {
                break;
            }
        }
        false
    }

    /// Scans for an element by `==`.
    ///
    /// Convenience over [`Iterable::has_element_by`].
    fn has_element(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.has_element_by(element, |left, right| left == right)
    }

    /// Removes the element the iterator references.
    ///
    /// On success the consumed iterator comes back advanced to the next
    /// live position (null when the removed element was last).
    ///
    /// # Errors
    ///
    /// - [`CollectionError::InvalidInput`](crate::error::CollectionError::InvalidInput) when the iterator does not
    ///   belong to this collection.
    /// - [`CollectionError::NullIterator`](crate::error::CollectionError::NullIterator) when the iterator is null.
    /// - [`CollectionError::InvalidState`](crate::error::CollectionError::InvalidState) when the referenced position is
    ///   no longer live.
    fn remove(&mut self, iterator: CollectionIter<T>) -> CollectionResult<CollectionIter<T>>;
}

/// Random access by position.
pub trait Indexed<T: Clone>: Iterable<T> {
    /// Clones the element at a position.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfBounds`](crate::error::CollectionError::OutOfBounds) when `position >= size()`.
    fn get(&self, position: usize) -> CollectionResult<T>;

    /// Replaces the element at a position.
    ///
    /// # Errors
    ///
    /// [`CollectionError::OutOfBounds`](crate::error::CollectionError::OutOfBounds) when `position >= size()`.
    fn set(&mut self, value: T, position: usize) -> CollectionResult<()>;

    /// Appends an element, growing the collection by one.
    fn append(&mut self, value: T);

    /// Grows or truncates to `new_size`, default-filling on growth.
    fn resize(&mut self, new_size: usize)
    where
        T: Default;
}

/// End access and cursor-relative insertion.
pub trait Sequential<T: Clone>: Iterable<T> {
    /// Clones the first element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn first(&self) -> CollectionResult<T>;

    /// Clones the last element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn last(&self) -> CollectionResult<T>;

    /// Inserts at the front in O(1).
    fn insert_front(&mut self, value: T);

    /// Inserts at the back in O(1).
    fn insert_back(&mut self, value: T);

    /// Inserts immediately before the iterator's element, returning an
    /// iterator to the inserted element.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::InvalidInput`](crate::error::CollectionError::InvalidInput) for a foreign iterator.
    /// - [`CollectionError::NullIterator`](crate::error::CollectionError::NullIterator) for a null iterator; the end
    ///   positions are served by [`insert_front`](Self::insert_front) and
    ///   [`insert_back`](Self::insert_back).
    fn insert_before(
        &mut self,
        value: T,
        iterator: &CollectionIter<T>,
    ) -> CollectionResult<CollectionIter<T>>;

    /// Inserts immediately after the iterator's element, returning an
    /// iterator to the inserted element.
    ///
    /// # Errors
    ///
    /// Same conditions as [`insert_before`](Self::insert_before).
    fn insert_after(
        &mut self,
        value: T,
        iterator: &CollectionIter<T>,
    ) -> CollectionResult<CollectionIter<T>>;

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn remove_first(&mut self) -> CollectionResult<T>;

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn remove_last(&mut self) -> CollectionResult<T>;
}

/// Comparator-ordered element storage.
pub trait Ordered<T: Clone>: Iterable<T> {
    /// Inserts a value, returning an iterator to the stored element.
    ///
    /// For a unique set inserting a duplicate, the returned iterator
    /// references the pre-existing element and the size is unchanged.
    fn insert(&mut self, value: T) -> CollectionIter<T>;

    /// Checks for an element equal to `value` under the comparator.
    fn contains(&self, value: &T) -> bool;

    /// Removes every occurrence comparing equal to `value`, returning how
    /// many were removed. A no-op when absent.
    fn remove_all(&mut self, value: &T) -> usize;

    /// Clones the minimal element under the comparator.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn first(&self) -> CollectionResult<T>;

    /// Clones the maximal element under the comparator.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn last(&self) -> CollectionResult<T>;

    /// Removes and returns the minimal element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn poll_first(&mut self) -> CollectionResult<T>;

    /// Removes and returns the maximal element.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when empty.
    fn poll_last(&mut self) -> CollectionResult<T>;
}

/// Key-value access with explicit key-miss behaviors.
///
/// The legacy map surface mixed two key-miss policies behind one
/// operation; here they are split into
/// [`get_or_fail`](Self::get_or_fail) (the read path, which fails) and
/// [`get_or_insert_default`](Self::get_or_insert_default) (the write
/// path, which auto-creates).
pub trait Keyed<K, V: Clone> {
    /// Inserts a value under a key, overwriting any existing value. The
    /// size grows only when the key was absent.
    fn put(&mut self, key: K, value: V);

    /// Clones the value under a key.
    ///
    /// # Errors
    ///
    /// [`CollectionError::NotFound`](crate::error::CollectionError::NotFound) when the key is absent.
    fn get_or_fail(&self, key: &K) -> CollectionResult<V>;

    /// Clones the value under a key, first inserting `V::default()` when
    /// the key is absent.
    fn get_or_insert_default(&mut self, key: K) -> V
    where
        V: Default;

    /// Checks whether a key is present. A pure query.
    fn has_key(&self, key: &K) -> bool;

    /// Removes a key, returning its value. A no-op returning `None` when
    /// the key is absent.
    fn remove_key(&mut self, key: &K) -> Option<V>;
}
