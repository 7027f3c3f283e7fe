//! Unit tests for the ordered unique set backend.

use holdfast::error::CollectionError;
use holdfast::prelude::*;
use rstest::rstest;

#[rstest]
fn test_new_creates_empty_set() {
    let set: TreeSet<i32> = TreeSet::new();
    assert!(set.is_empty());
    assert!(set.first().is_err());
    assert!(set.begin().is_null());
}

#[rstest]
fn test_insert_keeps_elements_sorted_and_unique() {
    let mut set = TreeSet::new();
    set.insert("Mary".to_string());
    set.insert("John".to_string());
    set.insert("Mary".to_string());
    set.insert("Alice".to_string());

    assert_eq!(set.size(), 3);
    assert_eq!(
        set.to_vec(),
        vec!["Alice".to_string(), "John".to_string(), "Mary".to_string()]
    );
}

#[rstest]
fn test_insert_returns_iterator_to_stored_element() {
    let mut set = TreeSet::new();
    let iterator = set.insert(5);
    assert_eq!(iterator.get().unwrap(), 5);
    assert!(iterator.belongs_to(&set));

    // Inserting a duplicate points at the already stored element.
    let duplicate = set.insert(5);
    assert_eq!(duplicate.get().unwrap(), 5);
    assert_eq!(set.size(), 1);
}

#[rstest]
fn test_contains_and_remove_all() {
    let mut set: TreeSet<i32> = [3, 1, 2].into_iter().collect();

    assert!(set.contains(&2));
    assert_eq!(set.remove_all(&2), 1);
    assert!(!set.contains(&2));
    assert_eq!(set.remove_all(&2), 0);
    assert_eq!(set.size(), 2);
}

#[rstest]
fn test_first_and_last_follow_the_comparator() {
    let set: TreeSet<i32> = [5, 1, 9, 3].into_iter().collect();
    assert_eq!(set.first().unwrap(), 1);
    assert_eq!(set.last().unwrap(), 9);
}

#[rstest]
fn test_poll_drains_in_order() {
    let mut set: TreeSet<i32> = [2, 1, 3].into_iter().collect();

    assert_eq!(set.poll_first().unwrap(), 1);
    assert_eq!(set.poll_last().unwrap(), 3);
    assert_eq!(set.poll_first().unwrap(), 2);
    assert!(matches!(
        set.poll_first(),
        Err(CollectionError::NotFound { .. })
    ));
}

#[rstest]
fn test_custom_comparator_reverses_the_order() {
    let mut set = TreeSet::with_comparator(Reversed(NaturalOrder));
    for value in [1, 3, 2] {
        set.insert(value);
    }

    assert_eq!(set.to_vec(), vec![3, 2, 1]);
    assert_eq!(set.first().unwrap(), 3);
    assert_eq!(set.last().unwrap(), 1);
}

#[rstest]
fn test_forward_iteration_is_sorted() {
    let set: TreeSet<i32> = [4, 2, 8, 6].into_iter().collect();

    let mut visited = Vec::new();
    let mut iterator = set.begin();
    while !iterator.is_null() {
        visited.push(iterator.get().unwrap());
        iterator.next().unwrap();
    }

    assert_eq!(visited, vec![2, 4, 6, 8]);
}

#[rstest]
fn test_reverse_iteration_is_reverse_sorted() {
    let set: TreeSet<i32> = [4, 2, 8, 6].into_iter().collect();

    let mut visited = Vec::new();
    let mut iterator = set.rbegin();
    while !iterator.is_null() {
        visited.push(iterator.get().unwrap());
        iterator.prev().unwrap();
    }

    assert_eq!(visited, vec![8, 6, 4, 2]);
}

#[rstest]
fn test_iterator_set_is_rejected_on_ordered_collections() {
    let mut set: TreeSet<i32> = [1, 2].into_iter().collect();
    let mut iterator = set.insert(3);

    assert!(matches!(
        iterator.set(99),
        Err(CollectionError::InvalidInput { .. })
    ));
    assert_eq!(set.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_remove_through_iterator_advances_in_order() {
    let mut set: TreeSet<i32> = [1, 2, 3].into_iter().collect();

    let mut iterator = set.begin();
    iterator.next().unwrap(); // positioned on 2

    let iterator = set.remove(iterator).unwrap();
    assert_eq!(set.to_vec(), vec![1, 3]);
    assert_eq!(iterator.get().unwrap(), 3);
}

#[rstest]
fn test_remove_largest_through_iterator_leaves_null_iterator() {
    let mut set: TreeSet<i32> = [1, 2].into_iter().collect();
    let iterator = set.remove(set.rbegin()).unwrap();

    assert_eq!(set.to_vec(), vec![1]);
    assert!(iterator.is_null());
}

#[rstest]
fn test_clear_empties_the_set() {
    let mut set: TreeSet<i32> = [1, 2, 3].into_iter().collect();
    set.clear();
    assert!(set.is_empty());
    assert!(!set.contains(&1));
}

#[rstest]
fn test_large_insertion_stays_sorted() {
    let mut set = TreeSet::new();
    for value in (0..200).rev() {
        set.insert(value);
    }

    assert_eq!(set.size(), 200);
    assert_eq!(set.to_vec(), (0..200).collect::<Vec<_>>());
}
