//! FIFO queue adapter over the linked-list backend.
//!
//! [`Queue`] restricts [`LinkedList`](crate::collection::LinkedList) to
//! the classic first-in first-out triad: [`put`](Queue::put) appends at
//! the tail, [`head`](Queue::head) peeks at the oldest element and
//! [`poll`](Queue::poll) removes it.
//!
//! # Complexity
//!
//! | Operation | Cost   |
//! |-----------|--------|
//! | `put`     | `O(1)` |
//! | `head`    | `O(1)` |
//! | `poll`    | `O(1)` |
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut queue = Queue::new();
//! queue.put(10);
//! queue.put(20);
//! queue.put(30);
//!
//! assert_eq!(queue.head().unwrap(), 10);
//! assert_eq!(queue.poll().unwrap(), 10);
//! assert_eq!(queue.poll().unwrap(), 20);
//! assert_eq!(queue.size(), 1);
//! ```

use std::fmt;

use crate::collection::{Counted, LinkedList, Sequential};
use crate::error::CollectionResult;

/// A first-in first-out queue.
pub struct Queue<T> {
    elements: LinkedList<T>,
}

impl<T: Clone + 'static> Queue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: LinkedList::new(),
        }
    }

    /// Appends an element at the tail of the queue.
    pub fn put(&mut self, element: T) {
        self.elements.insert_back(element);
    }

    /// Returns a copy of the oldest element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`](crate::error::CollectionError::NotFound)
    /// when the queue is empty.
    pub fn head(&self) -> CollectionResult<T> {
        self.elements.first()
    }

    /// Removes and returns the oldest element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`](crate::error::CollectionError::NotFound)
    /// when the queue is empty.
    pub fn poll(&mut self) -> CollectionResult<T> {
        self.elements.remove_first()
    }

    /// Copies the elements out in arrival order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.to_vec()
    }
}

impl<T: Clone + 'static> Counted for Queue<T> {
    fn size(&self) -> usize {
        self.elements.size()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<T: Clone + 'static> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for element in iter {
            queue.put(element);
        }
        queue
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Queue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.to_vec()).finish()
    }
}
