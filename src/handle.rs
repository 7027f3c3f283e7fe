//! Shared-ownership handle over a heap-resident value.
//!
//! This module provides [`Handle`], a reference-counted ownership wrapper
//! with an explicit null state, and [`AnyHandle`], its type-erased form
//! supporting checked downcasts.
//!
//! # Overview
//!
//! A `Handle<T>` either owns a share of one heap allocation or is null.
//! Cloning a handle shares the allocation (the reference count goes up by
//! one); dropping a handle gives the share back (the count goes down by
//! one); the value is dropped exactly once, when the last handle goes.
//! The count is a plain non-atomic counter: handles are deliberately
//! single-threaded and neither `Send` nor `Sync`.
//!
//! Two handles compare equal when they share the same allocation, never by
//! comparing the pointed-to values.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::handle::Handle;
//!
//! let first = Handle::new(41);
//! let second = first.clone();
//! assert_eq!(first.strong_count(), 2);
//! assert_eq!(first, second);
//!
//! second.set(42).unwrap();
//! assert_eq!(first.get().unwrap(), 42);
//!
//! let mut moved_from = first.clone();
//! let moved_to = moved_from.take();
//! assert!(moved_from.is_null());
//! assert_eq!(moved_to.get().unwrap(), 42);
//! ```
//!
//! # Downcasting
//!
//! ```rust
//! use holdfast::handle::Handle;
//!
//! let handle = Handle::new("shared".to_string());
//! let erased = handle.erase();
//!
//! let recovered = erased.downcast::<String>();
//! assert!(!recovered.is_null());
//! assert_eq!(handle.strong_count(), 3); // handle + erased + recovered
//!
//! let wrong = erased.downcast::<i64>();
//! assert!(wrong.is_null());
//! ```

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use static_assertions::assert_not_impl_any;

use crate::error::{CollectionError, CollectionResult};

/// A shared-ownership handle with an explicit null state.
///
/// See the [module documentation](self) for the ownership contract.
pub struct Handle<T> {
    inner: Option<Rc<RefCell<T>>>,
}

assert_not_impl_any!(Handle<i32>: Send, Sync);

impl<T> Handle<T> {
    /// Wraps a value, starting its reference count at one.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Some(Rc::new(RefCell::new(value))),
        }
    }

    /// Creates a null handle referencing nothing.
    #[must_use]
    pub const fn null() -> Self {
        Self { inner: None }
    }

    /// Checks whether this handle is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns the number of live handles sharing this allocation.
    ///
    /// A null handle reports zero.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        self.inner.as_ref().map_or(0, Rc::strong_count)
    }

    /// Transfers ownership out of this handle, leaving it null.
    ///
    /// The reference count is untouched: the returned handle holds the
    /// share this handle held.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    /// Gives up this handle's share early, leaving it null.
    ///
    /// If this was the last handle, the value is dropped here. Releasing a
    /// null handle is a no-op.
    pub fn release(&mut self) {
        self.inner = None;
    }

    /// Borrows the value immutably.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NullPointer`] if the handle is null.
    /// - [`CollectionError::InvalidState`] if the value is already borrowed
    ///   mutably.
    pub fn borrow(&self) -> CollectionResult<Ref<'_, T>> {
        let cell = self
            .inner
            .as_deref()
            .ok_or_else(|| CollectionError::null_pointer("borrow of a null handle"))?;
        cell.try_borrow()
            .map_err(|_| CollectionError::invalid_state("value is already mutably borrowed"))
    }

    /// Borrows the value mutably.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::NullPointer`] if the handle is null.
    /// - [`CollectionError::InvalidState`] if the value is already borrowed.
    pub fn borrow_mut(&self) -> CollectionResult<RefMut<'_, T>> {
        let cell = self
            .inner
            .as_deref()
            .ok_or_else(|| CollectionError::null_pointer("mutable borrow of a null handle"))?;
        cell.try_borrow_mut()
            .map_err(|_| CollectionError::invalid_state("value is already borrowed"))
    }

    /// Clones the current value out of the handle.
    ///
    /// # Errors
    ///
    /// Same conditions as [`borrow`](Self::borrow).
    pub fn get(&self) -> CollectionResult<T>
    where
        T: Clone,
    {
        self.borrow().map(|value| value.clone())
    }

    /// Replaces the current value.
    ///
    /// # Errors
    ///
    /// Same conditions as [`borrow_mut`](Self::borrow_mut).
    pub fn set(&self, value: T) -> CollectionResult<()> {
        *self.borrow_mut()? = value;
        Ok(())
    }
}

impl<T: Any> Handle<T> {
    /// Erases the handle's type, sharing the same allocation.
    ///
    /// The erased handle participates in the reference count like any
    /// other clone; recover the type with [`AnyHandle::downcast`].
    #[must_use]
    pub fn erase(&self) -> AnyHandle {
        AnyHandle {
            inner: self
                .inner
                .clone()
                .map(|reference| reference as Rc<dyn Any>),
        }
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Handle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for Handle<T> {
    /// Identity comparison: true iff both handles share one allocation, or
    /// both are null.
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some(left), Some(right)) => Rc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Eq for Handle<T> {}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(cell) => match cell.try_borrow() {
                Ok(value) => formatter.debug_tuple("Handle").field(&*value).finish(),
                Err(_) => formatter.write_str("Handle(<borrowed>)"),
            },
            None => formatter.write_str("Handle(null)"),
        }
    }
}

// =============================================================================
// Type-Erased Handle
// =============================================================================

/// A type-erased [`Handle`], supporting checked downcasts.
///
/// Obtained from [`Handle::erase`]. Downcasting to the correct type yields
/// a typed handle sharing the same allocation; downcasting to a wrong type
/// yields a null handle. Neither path duplicates the underlying value.
pub struct AnyHandle {
    inner: Option<Rc<dyn Any>>,
}

assert_not_impl_any!(AnyHandle: Send, Sync);

impl AnyHandle {
    /// Creates a null erased handle.
    #[must_use]
    pub const fn null() -> Self {
        Self { inner: None }
    }

    /// Checks whether this handle is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns the number of live handles sharing this allocation.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        self.inner.as_ref().map_or(0, Rc::strong_count)
    }

    /// Attempts to recover a typed handle.
    ///
    /// On success the returned handle shares the erased handle's
    /// allocation. On a type mismatch, or when this handle is null, the
    /// result is a null handle.
    #[must_use]
    pub fn downcast<U: Any>(&self) -> Handle<U> {
        let recovered = self
            .inner
            .clone()
            .and_then(|reference| reference.downcast::<RefCell<U>>().ok());
        Handle { inner: recovered }
    }
}

impl Clone for AnyHandle {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Default for AnyHandle {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialEq for AnyHandle {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some(left), Some(right)) => Rc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for AnyHandle {}

impl fmt::Debug for AnyHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            formatter.write_str("AnyHandle(null)")
        } else {
            formatter.write_str("AnyHandle(<erased>)")
        }
    }
}
