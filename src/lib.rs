//! # holdfast
//!
//! Shared-ownership handles and capability-based collections for Rust.
//!
//! ## Overview
//!
//! This library provides a small foundation for building object graphs
//! with shared ownership and uniform, iterator-driven collection access:
//!
//! - **Handles**: [`Handle`] and [`AnyHandle`] wrap reference-counted
//!   cells with an explicit null state and checked downcasts
//! - **Iterators**: [`CollectionIter`] is a bidirectional cursor that
//!   works across every backend and knows which collection it belongs to
//! - **Capabilities**: [`Counted`], [`Iterable`], [`Indexed`],
//!   [`Sequential`], [`Ordered`] and [`Keyed`] compose independently
//!   instead of forming a hierarchy
//! - **Backends**: resizable array, doubly linked list, ordered set,
//!   ordered multiset, ordered map, FIFO queue and priority queue
//! - **Errors**: one [`CollectionError`] taxonomy shared by every
//!   fallible operation
//!
//! ## Example
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut names = TreeSet::new();
//! names.insert("Mary".to_string());
//! names.insert("John".to_string());
//! names.insert("Mary".to_string()); // duplicate, ignored
//!
//! assert_eq!(names.size(), 2);
//! assert_eq!(names.first().unwrap(), "John");
//!
//! let mut iterator = names.begin();
//! assert!(iterator.belongs_to(&names));
//! assert_eq!(iterator.get().unwrap(), "John");
//! iterator.next().unwrap();
//! assert_eq!(iterator.get().unwrap(), "Mary");
//! ```
//!
//! [`Handle`]: crate::handle::Handle
//! [`AnyHandle`]: crate::handle::AnyHandle
//! [`CollectionIter`]: crate::iter::CollectionIter
//! [`Counted`]: crate::collection::Counted
//! [`Iterable`]: crate::collection::Iterable
//! [`Indexed`]: crate::collection::Indexed
//! [`Sequential`]: crate::collection::Sequential
//! [`Ordered`]: crate::collection::Ordered
//! [`Keyed`]: crate::collection::Keyed
//! [`CollectionError`]: crate::error::CollectionError

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use holdfast::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{
        ArrayCollection, Counted, Indexed, Iterable, Keyed, LinkedList, MapEntry, Ordered,
        PriorityQueue, Queue, Sequential, TreeMap, TreeMultiset, TreeSet,
    };
    pub use crate::error::{CollectionError, CollectionResult};
    pub use crate::handle::{AnyHandle, Handle};
    pub use crate::iter::{CollectionIter, ReadableIterator, WritableIterator};
    pub use crate::order::{Comparator, NaturalOrder, Reversed};
}

pub mod collection;
pub mod error;
pub mod handle;
pub mod iter;
pub mod order;
