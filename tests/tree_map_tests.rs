//! Unit tests for the ordered map backend.

use holdfast::error::CollectionError;
use holdfast::prelude::*;
use rstest::rstest;

#[rstest]
fn test_new_creates_empty_map() {
    let map: TreeMap<String, i32> = TreeMap::new();
    assert!(map.is_empty());
    assert!(!map.has_key(&"Mark".to_string()));
}

#[rstest]
fn test_put_then_get_round_trips() {
    let mut map = TreeMap::new();
    map.put("Mark".to_string(), 45);

    assert_eq!(map.size(), 1);
    assert!(map.has_key(&"Mark".to_string()));
    assert_eq!(map.get_or_fail(&"Mark".to_string()).unwrap(), 45);
}

#[rstest]
fn test_put_overwrites_without_growing() {
    let mut map = TreeMap::new();
    map.put("Mark".to_string(), 45);
    map.put("Mark".to_string(), 40);

    assert_eq!(map.size(), 1);
    assert_eq!(map.get_or_fail(&"Mark".to_string()).unwrap(), 40);
}

#[rstest]
fn test_get_or_fail_on_missing_key_is_not_found() {
    let map: TreeMap<String, i32> = TreeMap::new();
    assert!(matches!(
        map.get_or_fail(&"John".to_string()),
        Err(CollectionError::NotFound { .. })
    ));
}

#[rstest]
fn test_get_or_insert_default_creates_the_entry() {
    let mut map: TreeMap<String, i32> = TreeMap::new();

    assert_eq!(map.get_or_insert_default("John".to_string()), 0);
    assert!(map.has_key(&"John".to_string()));
    assert_eq!(map.size(), 1);

    // An existing entry is returned untouched.
    map.put("John".to_string(), 7);
    assert_eq!(map.get_or_insert_default("John".to_string()), 7);
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_remove_key_returns_the_stored_value() {
    let mut map = TreeMap::new();
    map.put(1, "one".to_string());
    map.put(2, "two".to_string());

    assert_eq!(map.remove_key(&1), Some("one".to_string()));
    assert_eq!(map.remove_key(&1), None);
    assert_eq!(map.size(), 1);
}

#[rstest]
fn test_entries_iterate_in_key_order() {
    let mut map = TreeMap::new();
    map.put(3, "c");
    map.put(1, "a");
    map.put(2, "b");

    assert_eq!(map.keys(), vec![1, 2, 3]);
    assert_eq!(map.values(), vec!["a", "b", "c"]);
}

#[rstest]
fn test_iterator_yields_entries_in_key_order() {
    let mut map = TreeMap::new();
    map.put(2, 20);
    map.put(1, 10);
    map.put(3, 30);

    let mut visited = Vec::new();
    let mut iterator = map.begin();
    while !iterator.is_null() {
        let entry = iterator.get().unwrap();
        visited.push((entry.key, entry.value));
        iterator.next().unwrap();
    }

    assert_eq!(visited, vec![(1, 10), (2, 20), (3, 30)]);
}

#[rstest]
fn test_remove_through_iterator_advances_in_key_order() {
    let mut map: TreeMap<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();

    let mut iterator = map.begin();
    iterator.next().unwrap(); // positioned on key 2

    let iterator = map.remove(iterator).unwrap();
    assert_eq!(map.keys(), vec![1, 3]);
    assert_eq!(iterator.get().unwrap().key, 3);
}

#[rstest]
fn test_custom_key_comparator_reverses_iteration() {
    let mut map = TreeMap::with_comparator(Reversed(NaturalOrder));
    map.put(1, "a");
    map.put(3, "c");
    map.put(2, "b");

    assert_eq!(map.keys(), vec![3, 2, 1]);
}

#[rstest]
fn test_clear_empties_the_map() {
    let mut map: TreeMap<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
    map.clear();
    assert!(map.is_empty());
    assert!(!map.has_key(&1));
}

#[rstest]
fn test_entries_compare_by_key_only() {
    let left = MapEntry::new(1, "a");
    let right = MapEntry::new(1, "b");
    // The struct itself compares both fields; the map's ordering ignores
    // the value, which is what makes `put` an overwrite.
    assert_ne!(left, right);

    let mut map = TreeMap::new();
    map.put(1, "a");
    map.put(1, "b");
    assert_eq!(map.entries(), vec![MapEntry::new(1, "b")]);
}
