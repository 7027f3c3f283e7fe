//! Comparator policy for the ordered backends.
//!
//! The tree-backed collections ([`TreeSet`](crate::collection::TreeSet),
//! [`TreeMultiset`](crate::collection::TreeMultiset),
//! [`TreeMap`](crate::collection::TreeMap)) and the
//! [`PriorityQueue`](crate::collection::PriorityQueue) order their elements
//! by a user-supplied total order rather than a hard `Ord` bound. The
//! default policy, [`NaturalOrder`], delegates to `Ord` and recovers the
//! usual behavior.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::order::{Comparator, NaturalOrder, Reversed};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reversed(NaturalOrder).compare(&1, &2), Ordering::Greater);
//!
//! // Closures are comparators too.
//! let by_length = |left: &String, right: &String| left.len().cmp(&right.len());
//! assert_eq!(
//!     by_length.compare(&"ab".to_string(), &"c".to_string()),
//!     Ordering::Greater
//! );
//! ```

use std::cmp::Ordering;

/// A user-supplied total order over `T`.
///
/// Implementations must be consistent: `compare(a, b)` and `compare(b, a)`
/// must be inverses, and the relation must be transitive. The ordered
/// backends rely on this to keep their trees well-formed.
pub trait Comparator<T> {
    /// Compares two elements, returning the ordering of `left` relative to
    /// `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// The natural order of a type, delegating to its `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Inverts another comparator.
///
/// Useful for min-first priority queues over types whose natural maximum
/// should come last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T, C: Comparator<T>> Comparator<T> for Reversed<C> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(left, right).reverse()
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}
