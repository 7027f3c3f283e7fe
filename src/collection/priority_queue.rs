//! Priority queue adapter over the ordered multiset backend.
//!
//! [`PriorityQueue`] serves elements highest-priority first, where
//! priority is defined by a [`Comparator`]: [`put`](PriorityQueue::put)
//! files an element under its priority, [`head`](PriorityQueue::head)
//! peeks at the maximal element and [`poll`](PriorityQueue::poll)
//! removes it. Duplicate priorities are allowed; among equal-priority
//! elements the serving order follows the backend's internal tie stamps
//! (most recently inserted first), not arrival order.
//!
//! # Complexity
//!
//! | Operation | Cost       |
//! |-----------|------------|
//! | `put`     | `O(log n)` |
//! | `head`    | `O(log n)` |
//! | `poll`    | `O(log n)` |
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Task {
//!     priority: u32,
//!     name: &'static str,
//! }
//!
//! let mut queue = PriorityQueue::with_comparator(|left: &Task, right: &Task| {
//!     left.priority.cmp(&right.priority)
//! });
//!
//! queue.put(Task { priority: 10, name: "Jack" });
//! queue.put(Task { priority: 15, name: "John" });
//! queue.put(Task { priority: 12, name: "Mary" });
//!
//! assert_eq!(queue.poll().unwrap().name, "John");
//! assert_eq!(queue.poll().unwrap().name, "Mary");
//! assert_eq!(queue.poll().unwrap().name, "Jack");
//! ```

use std::fmt;

use crate::collection::{Counted, Ordered, TreeMultiset};
use crate::error::CollectionResult;
use crate::order::Comparator;

/// A highest-priority-first queue that admits duplicate priorities.
pub struct PriorityQueue<T> {
    elements: TreeMultiset<T>,
}

impl<T: Clone + Ord + 'static> PriorityQueue<T> {
    /// Creates an empty queue prioritized by `Ord`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: TreeMultiset::new(),
        }
    }
}

impl<T: Clone + 'static> PriorityQueue<T> {
    /// Creates an empty queue prioritized by the supplied comparator.
    #[must_use]
    pub fn with_comparator(comparator: impl Comparator<T> + 'static) -> Self {
        Self {
            elements: TreeMultiset::with_comparator(comparator),
        }
    }

    /// Files an element under its priority.
    pub fn put(&mut self, element: T) {
        let _ = self.elements.insert(element);
    }

    /// Returns a copy of the highest-priority element without removing
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`](crate::error::CollectionError::NotFound)
    /// when the queue is empty.
    pub fn head(&self) -> CollectionResult<T> {
        self.elements.last()
    }

    /// Removes and returns the highest-priority element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`](crate::error::CollectionError::NotFound)
    /// when the queue is empty.
    pub fn poll(&mut self) -> CollectionResult<T> {
        self.elements.poll_last()
    }

    /// Copies the elements out in ascending priority order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.to_vec()
    }
}

impl<T: Clone + 'static> Counted for PriorityQueue<T> {
    fn size(&self) -> usize {
        self.elements.size()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}

impl<T: Clone + Ord + 'static> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord + 'static> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        for element in iter {
            queue.put(element);
        }
        queue
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.to_vec()).finish()
    }
}
