//! Unit tests for the FIFO queue.

use holdfast::error::CollectionError;
use holdfast::prelude::*;
use rstest::rstest;

#[rstest]
fn test_new_creates_empty_queue() {
    let queue: Queue<i32> = Queue::new();
    assert!(queue.is_empty());
    assert!(queue.head().is_err());
}

#[rstest]
fn test_put_and_poll_are_first_in_first_out() {
    let mut queue = Queue::new();
    queue.put(10);
    queue.put(20);
    queue.put(30);

    assert_eq!(queue.poll().unwrap(), 10);
    assert_eq!(queue.poll().unwrap(), 20);
    assert_eq!(queue.poll().unwrap(), 30);
    assert!(queue.is_empty());
}

#[rstest]
fn test_head_peeks_without_removing() {
    let mut queue = Queue::new();
    queue.put("first".to_string());
    queue.put("second".to_string());

    assert_eq!(queue.head().unwrap(), "first");
    assert_eq!(queue.size(), 2);
    assert_eq!(queue.head().unwrap(), "first");
}

#[rstest]
fn test_poll_on_empty_queue_is_not_found() {
    let mut queue: Queue<i32> = Queue::new();
    assert!(matches!(
        queue.poll(),
        Err(CollectionError::NotFound { .. })
    ));
    assert!(matches!(
        queue.head(),
        Err(CollectionError::NotFound { .. })
    ));
}

#[rstest]
fn test_interleaved_put_and_poll_keep_arrival_order() {
    let mut queue = Queue::new();
    queue.put(1);
    queue.put(2);
    assert_eq!(queue.poll().unwrap(), 1);

    queue.put(3);
    assert_eq!(queue.poll().unwrap(), 2);
    assert_eq!(queue.poll().unwrap(), 3);
}

#[rstest]
fn test_clear_empties_the_queue() {
    let mut queue: Queue<i32> = [1, 2, 3].into_iter().collect();
    queue.clear();
    assert!(queue.is_empty());
    assert!(queue.poll().is_err());
}

#[rstest]
fn test_to_vec_reflects_arrival_order() {
    let queue: Queue<i32> = [4, 5, 6].into_iter().collect();
    assert_eq!(queue.to_vec(), vec![4, 5, 6]);
}
