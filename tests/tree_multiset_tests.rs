//! Unit tests for the ordered multiset backend.

use holdfast::error::CollectionError;
use holdfast::prelude::*;
use rstest::rstest;

#[rstest]
fn test_new_creates_empty_multiset() {
    let multiset: TreeMultiset<i32> = TreeMultiset::new();
    assert!(multiset.is_empty());
    assert_eq!(multiset.count(&1), 0);
}

#[rstest]
fn test_duplicates_are_kept_as_distinct_occurrences() {
    let mut multiset = TreeMultiset::new();
    multiset.insert(2);
    multiset.insert(1);
    multiset.insert(2);
    multiset.insert(2);

    assert_eq!(multiset.size(), 4);
    assert_eq!(multiset.count(&2), 3);
    assert_eq!(multiset.count(&1), 1);
    assert_eq!(multiset.to_vec(), vec![1, 2, 2, 2]);
}

#[rstest]
fn test_insert_returns_iterator_to_the_new_occurrence() {
    let mut multiset = TreeMultiset::new();
    multiset.insert(5);
    let iterator = multiset.insert(5);

    assert!(iterator.belongs_to(&multiset));
    assert_eq!(iterator.get().unwrap(), 5);
    assert_eq!(multiset.size(), 2);
}

#[rstest]
fn test_remove_all_erases_every_occurrence() {
    let mut multiset: TreeMultiset<i32> = [1, 2, 2, 3, 2].into_iter().collect();

    assert_eq!(multiset.remove_all(&2), 3);
    assert_eq!(multiset.to_vec(), vec![1, 3]);
    assert_eq!(multiset.remove_all(&2), 0);
}

#[rstest]
fn test_contains_checks_any_occurrence() {
    let multiset: TreeMultiset<i32> = [1, 1, 3].into_iter().collect();
    assert!(multiset.contains(&1));
    assert!(!multiset.contains(&2));
}

#[rstest]
fn test_first_and_last_span_the_value_range() {
    let multiset: TreeMultiset<i32> = [5, 1, 5, 3].into_iter().collect();
    assert_eq!(multiset.first().unwrap(), 1);
    assert_eq!(multiset.last().unwrap(), 5);
}

#[rstest]
fn test_poll_drains_duplicates_one_at_a_time() {
    let mut multiset: TreeMultiset<i32> = [2, 1, 2].into_iter().collect();

    assert_eq!(multiset.poll_first().unwrap(), 1);
    assert_eq!(multiset.poll_last().unwrap(), 2);
    assert_eq!(multiset.poll_last().unwrap(), 2);
    assert!(matches!(
        multiset.poll_last(),
        Err(CollectionError::NotFound { .. })
    ));
}

#[rstest]
fn test_forward_iteration_visits_duplicates() {
    let multiset: TreeMultiset<i32> = [3, 1, 3, 2].into_iter().collect();

    let mut visited = Vec::new();
    let mut iterator = multiset.begin();
    while !iterator.is_null() {
        visited.push(iterator.get().unwrap());
        iterator.next().unwrap();
    }

    assert_eq!(visited, vec![1, 2, 3, 3]);
}

#[rstest]
fn test_reverse_iteration_visits_duplicates_backwards() {
    let multiset: TreeMultiset<i32> = [3, 1, 3, 2].into_iter().collect();

    let mut visited = Vec::new();
    let mut iterator = multiset.rbegin();
    while !iterator.is_null() {
        visited.push(iterator.get().unwrap());
        iterator.prev().unwrap();
    }

    assert_eq!(visited, vec![3, 3, 2, 1]);
}

#[rstest]
fn test_remove_through_iterator_removes_one_occurrence() {
    let mut multiset: TreeMultiset<i32> = [2, 2, 2].into_iter().collect();

    let iterator = multiset.begin();
    let _ = multiset.remove(iterator).unwrap();

    assert_eq!(multiset.count(&2), 2);
    assert_eq!(multiset.size(), 2);
}

#[rstest]
fn test_iterator_set_is_rejected_on_ordered_collections() {
    let mut multiset: TreeMultiset<i32> = [1, 2].into_iter().collect();
    let mut iterator = multiset.begin();

    assert!(matches!(
        iterator.set(99),
        Err(CollectionError::InvalidInput { .. })
    ));
}

#[rstest]
fn test_custom_comparator_orders_occurrences() {
    let mut multiset = TreeMultiset::with_comparator(Reversed(NaturalOrder));
    for value in [1, 2, 1, 3] {
        multiset.insert(value);
    }

    assert_eq!(multiset.to_vec(), vec![3, 2, 1, 1]);
    assert_eq!(multiset.first().unwrap(), 3);
}

#[rstest]
fn test_clear_empties_the_multiset() {
    let mut multiset: TreeMultiset<i32> = [1, 1].into_iter().collect();
    multiset.clear();
    assert!(multiset.is_empty());
    assert_eq!(multiset.count(&1), 0);
}
