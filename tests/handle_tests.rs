//! Unit tests for the shared-ownership handles.
//!
//! These tests exercise the null state, clone and release semantics,
//! destruction timing and type-erased downcasts of `Handle` and
//! `AnyHandle`.

use std::cell::RefCell;
use std::rc::Rc;

use holdfast::error::CollectionError;
use holdfast::handle::{AnyHandle, Handle};
use rstest::rstest;

#[rstest]
fn test_null_handle_reports_null() {
    let handle: Handle<i32> = Handle::null();
    assert!(handle.is_null());
    assert_eq!(handle.strong_count(), 0);
    assert!(handle.get().is_err());
}

#[rstest]
fn test_default_handle_is_null() {
    let handle: Handle<String> = Handle::default();
    assert!(handle.is_null());
}

#[rstest]
fn test_null_handle_access_is_a_null_pointer_error() {
    let handle: Handle<i32> = Handle::null();
    assert!(matches!(
        handle.get(),
        Err(CollectionError::NullPointer { .. })
    ));
    assert!(matches!(
        handle.set(1),
        Err(CollectionError::NullPointer { .. })
    ));
}

#[rstest]
fn test_new_handle_owns_its_value() {
    let handle = Handle::new(42);
    assert!(!handle.is_null());
    assert_eq!(handle.strong_count(), 1);
    assert_eq!(handle.get().unwrap(), 42);
}

#[rstest]
fn test_clone_shares_the_pointee() {
    let original = Handle::new(7);
    let copy = original.clone();

    assert_eq!(original.strong_count(), 2);
    assert_eq!(copy.strong_count(), 2);
    assert_eq!(original, copy);

    copy.set(9).unwrap();
    assert_eq!(original.get().unwrap(), 9);
}

#[rstest]
fn test_release_detaches_one_owner() {
    let mut first = Handle::new(1);
    let second = first.clone();

    first.release();

    assert!(first.is_null());
    assert!(!second.is_null());
    assert_eq!(second.strong_count(), 1);
}

#[rstest]
fn test_take_leaves_null_behind() {
    let mut handle = Handle::new(5);
    let taken = handle.take();

    assert!(handle.is_null());
    assert_eq!(taken.get().unwrap(), 5);
    assert_eq!(taken.strong_count(), 1);
}

#[rstest]
fn test_handles_to_distinct_values_are_not_equal() {
    let left = Handle::new(3);
    let right = Handle::new(3);
    assert_ne!(left, right);
}

#[rstest]
fn test_null_handles_compare_equal() {
    let left: Handle<i32> = Handle::null();
    let right: Handle<i32> = Handle::null();
    assert_eq!(left, right);
}

/// Drop probe that records into a shared counter when its value dies.
struct DropProbe {
    counter: Rc<RefCell<usize>>,
}

impl Drop for DropProbe {
    fn drop(&mut self) {
        *self.counter.borrow_mut() += 1;
    }
}

#[rstest]
fn test_value_dropped_exactly_once_after_last_owner() {
    let counter = Rc::new(RefCell::new(0));
    let handle = Handle::new(DropProbe {
        counter: Rc::clone(&counter),
    });

    let second = handle.clone();
    let third = handle.clone();
    assert_eq!(handle.strong_count(), 3);

    drop(second);
    assert_eq!(*counter.borrow(), 0);

    drop(third);
    assert_eq!(*counter.borrow(), 0);

    drop(handle);
    assert_eq!(*counter.borrow(), 1);
}

#[rstest]
fn test_borrow_mut_mutates_in_place() {
    let handle = Handle::new(vec![1, 2]);
    handle.borrow_mut().unwrap().push(3);
    assert_eq!(*handle.borrow().unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn test_overlapping_mutable_borrow_is_an_invalid_state_error() {
    let handle = Handle::new(0);
    let guard = handle.borrow_mut().unwrap();
    assert!(matches!(
        handle.borrow(),
        Err(CollectionError::InvalidState { .. })
    ));
    drop(guard);
    assert!(handle.borrow().is_ok());
}

#[rstest]
fn test_erase_then_downcast_round_trip() {
    let handle = Handle::new(String::from("payload"));
    let erased = handle.erase();

    assert!(!erased.is_null());
    assert_eq!(erased.strong_count(), 2);

    let recovered: Handle<String> = erased.downcast();
    assert!(!recovered.is_null());
    assert_eq!(recovered.get().unwrap(), "payload");

    recovered.set(String::from("changed")).unwrap();
    assert_eq!(handle.get().unwrap(), "changed");
}

#[rstest]
fn test_downcast_to_wrong_type_yields_null() {
    let handle = Handle::new(42_i32);
    let erased = handle.erase();

    let wrong: Handle<String> = erased.downcast();
    assert!(wrong.is_null());

    let right: Handle<i32> = erased.downcast();
    assert!(!right.is_null());
}

#[rstest]
fn test_null_any_handle_downcasts_to_null() {
    let erased = AnyHandle::null();
    assert!(erased.is_null());
    assert_eq!(erased.strong_count(), 0);

    let handle: Handle<i32> = erased.downcast();
    assert!(handle.is_null());
}

#[rstest]
fn test_erased_clone_keeps_value_alive() {
    let counter = Rc::new(RefCell::new(0));
    let erased = Handle::new(DropProbe {
        counter: Rc::clone(&counter),
    })
    .erase();

    let copy = erased.clone();
    drop(erased);
    assert_eq!(*counter.borrow(), 0);

    drop(copy);
    assert_eq!(*counter.borrow(), 1);
}
