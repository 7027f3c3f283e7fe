//! Cross-backend tests for the iterator protocol.
//!
//! Every backend hands out the same `CollectionIter`; these tests pin
//! down the shared contract: null-state errors, ownership checks,
//! survival across collection drops and clone independence.

use holdfast::error::CollectionError;
use holdfast::prelude::*;
use rstest::rstest;

#[rstest]
fn test_end_iterators_are_null_everywhere() {
    let array: ArrayCollection<i32> = [1].into_iter().collect();
    let list: LinkedList<i32> = [1].into_iter().collect();
    let set: TreeSet<i32> = [1].into_iter().collect();
    let multiset: TreeMultiset<i32> = [1].into_iter().collect();

    assert!(array.end().is_null());
    assert!(list.end().is_null());
    assert!(set.end().is_null());
    assert!(multiset.end().is_null());

    assert!(array.rend().is_null());
    assert!(list.rend().is_null());
    assert!(set.rend().is_null());
    assert!(multiset.rend().is_null());
}

#[rstest]
fn test_null_iterator_access_is_a_null_iterator_error() {
    let array: ArrayCollection<i32> = [1].into_iter().collect();
    let mut iterator = array.end();

    assert!(matches!(
        iterator.get(),
        Err(CollectionError::NullIterator { .. })
    ));
    assert!(matches!(
        iterator.next(),
        Err(CollectionError::NullIterator { .. })
    ));
    assert!(matches!(
        iterator.prev(),
        Err(CollectionError::NullIterator { .. })
    ));
    assert!(matches!(
        iterator.set(0),
        Err(CollectionError::NullIterator { .. })
    ));
}

#[rstest]
fn test_stepping_past_either_end_goes_null() {
    let list: LinkedList<i32> = [1, 2].into_iter().collect();

    let mut iterator = list.begin();
    iterator.next().unwrap();
    iterator.next().unwrap();
    assert!(iterator.is_null());

    let mut iterator = list.begin();
    iterator.prev().unwrap();
    assert!(iterator.is_null());
}

#[rstest]
fn test_remove_with_foreign_iterator_is_invalid_input() {
    let mut array: ArrayCollection<i32> = [1].into_iter().collect();
    let other: ArrayCollection<i32> = [1].into_iter().collect();

    assert!(matches!(
        array.remove(other.begin()),
        Err(CollectionError::InvalidInput { .. })
    ));
    assert_eq!(array.size(), 1);
}

#[rstest]
fn test_belongs_to_distinguishes_backends_of_the_same_element_type() {
    let array: ArrayCollection<i32> = [1].into_iter().collect();
    let list: LinkedList<i32> = [1].into_iter().collect();

    let from_array = array.begin();
    assert!(from_array.belongs_to(&array));
    assert!(!from_array.belongs_to(&list));

    let from_list = list.begin();
    assert!(from_list.belongs_to(&list));
    assert!(!from_list.belongs_to(&array));
}

#[rstest]
fn test_iterator_outliving_its_collection_is_an_invalid_state_error() {
    let mut iterator = {
        let array: ArrayCollection<i32> = [1, 2].into_iter().collect();
        array.begin()
    };

    assert!(matches!(
        iterator.get(),
        Err(CollectionError::InvalidState { .. })
    ));
    assert!(matches!(
        iterator.next(),
        Err(CollectionError::InvalidState { .. })
    ));
}

#[rstest]
fn test_tree_iterator_outliving_its_collection_is_an_invalid_state_error() {
    let iterator = {
        let set: TreeSet<i32> = [1].into_iter().collect();
        set.begin()
    };

    assert!(matches!(
        iterator.get(),
        Err(CollectionError::InvalidState { .. })
    ));
}

#[rstest]
fn test_cloned_iterators_step_independently() {
    let array: ArrayCollection<i32> = [1, 2, 3].into_iter().collect();

    let mut first = array.begin();
    let second = first.clone();

    first.next().unwrap();
    assert_eq!(first.get().unwrap(), 2);
    assert_eq!(second.get().unwrap(), 1);
}

#[rstest]
fn test_forward_then_backward_returns_to_start() {
    let set: TreeSet<i32> = [10, 20, 30].into_iter().collect();

    let mut iterator = set.begin();
    iterator.next().unwrap();
    iterator.next().unwrap();
    assert_eq!(iterator.get().unwrap(), 30);

    iterator.prev().unwrap();
    iterator.prev().unwrap();
    assert_eq!(iterator.get().unwrap(), 10);
}

#[rstest]
fn test_tree_iterator_survives_unrelated_mutation() {
    let mut set: TreeSet<i32> = [10, 30].into_iter().collect();
    let mut iterator = set.begin(); // positioned on 10

    // Rebalancing inserts elsewhere must not disturb the cursor.
    set.insert(20);
    set.insert(5);

    assert_eq!(iterator.get().unwrap(), 10);
    iterator.next().unwrap();
    assert_eq!(iterator.get().unwrap(), 20);
}

#[rstest]
fn test_has_element_by_uses_the_supplied_equality() {
    let list: LinkedList<String> = ["Alpha".to_string(), "Beta".to_string()]
        .into_iter()
        .collect();
    let case_insensitive = |left: &String, right: &String| left.eq_ignore_ascii_case(right);

    assert!(list.has_element_by(&"beta".to_string(), case_insensitive));
    assert!(!list.has_element_by(&"gamma".to_string(), case_insensitive));
    // `==` would not have matched across case.
    assert!(!list.has_element(&"beta".to_string()));
}

#[rstest]
fn test_has_element_works_through_the_protocol() {
    let list: LinkedList<i32> = [7, 8].into_iter().collect();
    let set: TreeSet<i32> = [7, 8].into_iter().collect();

    assert!(list.has_element(&8));
    assert!(set.has_element(&8));
    assert!(!list.has_element(&9));
    assert!(!set.has_element(&9));
}
