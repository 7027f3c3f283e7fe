//! Error taxonomy for the ownership and collection layer.
//!
//! Every violated precondition in this crate fails immediately with a
//! [`CollectionError`] and performs no partial mutation. Nothing in the
//! crate catches and recovers from its own errors; these are invariant
//! violations surfaced to the immediate caller, not transient failures
//! with a retry policy.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::error::CollectionError;
//!
//! let error = CollectionError::OutOfBounds { index: 4, size: 3 };
//! assert_eq!(
//!     format!("{}", error),
//!     "index 4 out of bounds for collection of size 3"
//! );
//! ```

use std::fmt;

/// Result alias used by every fallible operation in the crate.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Represents a violated precondition in the ownership or collection layer.
///
/// Each variant corresponds to one class of caller misuse or absence:
///
/// - [`NotFound`](Self::NotFound): a required element or key is absent
///   (empty list head/tail, missing map key, empty queue).
/// - [`OutOfBounds`](Self::OutOfBounds): an index is outside `[0, size)`.
/// - [`InvalidInput`](Self::InvalidInput): caller misuse, chiefly an
///   iterator passed to a collection it does not belong to.
/// - [`NullPointer`](Self::NullPointer): dereference of a null
///   [`Handle`](crate::handle::Handle).
/// - [`NullIterator`](Self::NullIterator): move or dereference of a null
///   iterator.
/// - [`InvalidState`](Self::InvalidState): the owning object is in an
///   incompatible state (backing store dropped, conflicting borrow).
/// - [`Chained`](Self::Chained): wraps a lower-level error with context;
///   the cause is exposed through [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// A required element or key is absent.
    NotFound {
        /// Description of what was looked up and missed.
        message: String,
    },
    /// An index is outside the valid range `[0, size)`.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The collection size at the time of the access.
        size: usize,
    },
    /// Caller misuse, such as passing a foreign iterator.
    InvalidInput {
        /// Description of the misuse.
        message: String,
    },
    /// Dereference of a null ownership handle.
    NullPointer {
        /// Description of the attempted access.
        message: String,
    },
    /// Move or dereference of a null iterator.
    NullIterator {
        /// Description of the attempted operation.
        message: String,
    },
    /// The owning object is in an incompatible state.
    InvalidState {
        /// Description of the state conflict.
        message: String,
    },
    /// A lower-level error wrapped with additional context.
    Chained {
        /// Context describing where the cause was encountered.
        context: String,
        /// The underlying error.
        cause: Box<CollectionError>,
    },
}

impl CollectionError {
    /// Creates a [`NotFound`](Self::NotFound) error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates an [`OutOfBounds`](Self::OutOfBounds) error.
    #[must_use]
    pub const fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Creates an [`InvalidInput`](Self::InvalidInput) error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a [`NullPointer`](Self::NullPointer) error.
    pub fn null_pointer(message: impl Into<String>) -> Self {
        Self::NullPointer {
            message: message.into(),
        }
    }

    /// Creates a [`NullIterator`](Self::NullIterator) error.
    pub fn null_iterator(message: impl Into<String>) -> Self {
        Self::NullIterator {
            message: message.into(),
        }
    }

    /// Creates an [`InvalidState`](Self::InvalidState) error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Wraps this error with additional context.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use holdfast::error::CollectionError;
    ///
    /// let inner = CollectionError::not_found("key \"Mark\"");
    /// let outer = inner.chain("loading subscriber table");
    /// assert_eq!(
    ///     format!("{}", outer),
    ///     "loading subscriber table: key \"Mark\" not found"
    /// );
    /// ```
    #[must_use]
    pub fn chain(self, context: impl Into<String>) -> Self {
        Self::Chained {
            context: context.into(),
            cause: Box::new(self),
        }
    }
}

impl fmt::Display for CollectionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { message } => write!(formatter, "{message} not found"),
            Self::OutOfBounds { index, size } => write!(
                formatter,
                "index {index} out of bounds for collection of size {size}"
            ),
            Self::InvalidInput { message } => write!(formatter, "invalid input: {message}"),
            Self::NullPointer { message } => {
                write!(formatter, "null handle dereference: {message}")
            }
            Self::NullIterator { message } => write!(formatter, "null iterator: {message}"),
            Self::InvalidState { message } => write!(formatter, "invalid state: {message}"),
            Self::Chained { context, cause } => write!(formatter, "{context}: {cause}"),
        }
    }
}

impl std::error::Error for CollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Chained { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_display() {
        let error = CollectionError::not_found("key \"Mark\"");
        assert_eq!(format!("{error}"), "key \"Mark\" not found");
    }

    #[test]
    fn test_out_of_bounds_display() {
        let error = CollectionError::out_of_bounds(7, 3);
        assert_eq!(
            format!("{error}"),
            "index 7 out of bounds for collection of size 3"
        );
    }

    #[test]
    fn test_invalid_input_display() {
        let error = CollectionError::invalid_input("iterator belongs to another collection");
        assert_eq!(
            format!("{error}"),
            "invalid input: iterator belongs to another collection"
        );
    }

    #[test]
    fn test_chained_exposes_source() {
        let error = CollectionError::not_found("head of empty queue").chain("polling");
        assert_eq!(format!("{error}"), "polling: head of empty queue not found");

        let source = error.source().expect("chained error must expose a source");
        assert_eq!(format!("{source}"), "head of empty queue not found");
    }

    #[test]
    fn test_unchained_has_no_source() {
        let error = CollectionError::null_iterator("next past the end");
        assert!(error.source().is_none());
    }
}
