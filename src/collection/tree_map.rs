//! Comparator-ordered key-value map backend.
//!
//! [`TreeMap`] is an ordered set of [`MapEntry`] pairs compared by key
//! only: keys are unique, values overwritable, iteration yields entries
//! in key order.
//!
//! The legacy surface this map descends from mixed two key-miss policies
//! behind one indexing operator. They are split here:
//! [`get_or_fail`](crate::collection::Keyed::get_or_fail) is the read
//! path and fails on a missing key;
//! [`get_or_insert_default`](crate::collection::Keyed::get_or_insert_default)
//! is the write path and auto-creates a default value.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut ages = TreeMap::new();
//! ages.put("Mark".to_string(), 45);
//! assert_eq!(ages.get_or_fail(&"Mark".to_string()).unwrap(), 45);
//!
//! ages.put("Mark".to_string(), 40); // overwrite in place
//! assert_eq!(ages.size(), 1);
//! assert_eq!(ages.get_or_fail(&"Mark".to_string()).unwrap(), 40);
//!
//! assert!(ages.get_or_fail(&"John".to_string()).is_err());
//! assert_eq!(ages.get_or_insert_default("John".to_string()), 0);
//! assert!(ages.has_key(&"John".to_string()));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collection::ordered::{TreeCursor, TreeStore};
use crate::collection::{Counted, Iterable, Keyed};
use crate::error::{CollectionError, CollectionResult};
use crate::iter::{CollectionIter, RawCursor};
use crate::order::{Comparator, NaturalOrder};

/// One key-value pair of a [`TreeMap`].
///
/// Entries compare by key only, so two entries with equal keys and
/// different values occupy the same map slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEntry<K, V> {
    /// The key the map orders by.
    pub key: K,
    /// The stored value.
    pub value: V,
}

impl<K, V> MapEntry<K, V> {
    /// Pairs a key with a value.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// A comparator-ordered map with unique keys and overwritable values.
pub struct TreeMap<K, V> {
    store: Rc<RefCell<TreeStore<MapEntry<K, V>>>>,
    key_comparator: Rc<dyn Comparator<K>>,
}

impl<K: Clone + Ord + 'static, V: Clone + 'static> TreeMap<K, V> {
    /// Creates an empty map with keys ordered by `Ord`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K: Clone + 'static, V: Clone + 'static> TreeMap<K, V> {
    /// Creates an empty map with keys ordered by the supplied comparator.
    #[must_use]
    pub fn with_comparator(comparator: impl Comparator<K> + 'static) -> Self {
        let key_comparator: Rc<dyn Comparator<K>> = Rc::new(comparator);
        let order = Rc::clone(&key_comparator);
        Self {
            store: TreeStore::new(Box::new(
                move |left: &MapEntry<K, V>, right: &MapEntry<K, V>| {
                    order.compare(&left.key, &right.key)
                },
            )),
            key_comparator,
        }
    }

    /// Copies the entries out in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<MapEntry<K, V>> {
        self.store.borrow().tree.to_vec()
    }

    /// Copies the keys out in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.entries().into_iter().map(|entry| entry.key).collect()
    }

    /// Copies the values out in key order.
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.entries()
            .into_iter()
            .map(|entry| entry.value)
            .collect()
    }

    fn make_iter(&self, position: Option<MapEntry<K, V>>) -> CollectionIter<MapEntry<K, V>> {
        CollectionIter::from_raw(RawCursor::Set(TreeCursor::positioned(
            &self.store,
            position,
        )))
    }

    fn find_entry(&self, key: &K) -> Option<MapEntry<K, V>> {
        self.store
            .borrow()
            .tree
            .find(|entry| self.key_comparator.compare(key, &entry.key))
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Counted for TreeMap<K, V> {
    fn size(&self) -> usize {
        self.store.borrow().tree.len()
    }

    fn clear(&mut self) {
        self.store.borrow_mut().tree.clear();
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Iterable<MapEntry<K, V>> for TreeMap<K, V> {
    fn begin(&self) -> CollectionIter<MapEntry<K, V>> {
        let minimum = self.store.borrow().tree.min();
        self.make_iter(minimum)
    }

    fn end(&self) -> CollectionIter<MapEntry<K, V>> {
        self.make_iter(None)
    }

    fn rbegin(&self) -> CollectionIter<MapEntry<K, V>> {
        let maximum = self.store.borrow().tree.max();
        self.make_iter(maximum)
    }

    fn rend(&self) -> CollectionIter<MapEntry<K, V>> {
        self.make_iter(None)
    }

    fn owns(&self, iterator: &CollectionIter<MapEntry<K, V>>) -> bool {
        match iterator.raw() {
            RawCursor::Set(cursor) => cursor.belongs_to(&self.store),
            _ => false,
        }
    }

    fn remove(
        &mut self,
        iterator: CollectionIter<MapEntry<K, V>>,
    ) -> CollectionResult<CollectionIter<MapEntry<K, V>>> {
        let mut cursor = match iterator.into_raw() {
            RawCursor::Set(cursor) if cursor.belongs_to(&self.store) => cursor,
            _ => {
                return Err(CollectionError::invalid_input(
                    "iterator does not belong to this collection",
                ));
            }
        };
        let entry = cursor.current()?;
        let following = self.store.borrow_mut().remove_and_advance(&entry)?;
        cursor.set_position(following);
        Ok(CollectionIter::from_raw(RawCursor::Set(cursor)))
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Keyed<K, V> for TreeMap<K, V> {
    fn put(&mut self, key: K, value: V) {
        self.store
            .borrow_mut()
            .insert_or_replace(MapEntry::new(key, value));
    }

    fn get_or_fail(&self, key: &K) -> CollectionResult<V> {
        self.find_entry(key)
            .map(|entry| entry.value)
            .ok_or_else(|| CollectionError::not_found("requested key"))
    }

    fn get_or_insert_default(&mut self, key: K) -> V
    where
        V: Default,
    {
        if let Some(entry) = self.find_entry(&key) {
            return entry.value;
        }
        let value = V::default();
        self.put(key, value.clone());
        value
    }

    fn has_key(&self, key: &K) -> bool {
        self.find_entry(key).is_some()
    }

    fn remove_key(&mut self, key: &K) -> Option<V> {
        let entry = self.find_entry(key)?;
        self.store
            .borrow_mut()
            .remove_item(&entry)
            .map(|removed| removed.value)
    }
}

impl<K: Clone + Ord + 'static, V: Clone + 'static> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord + 'static, V: Clone + 'static> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

impl<K, V> fmt::Debug for TreeMap<K, V>
where
    K: Clone + fmt::Debug + 'static,
    V: Clone + fmt::Debug + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(
                self.entries()
                    .into_iter()
                    .map(|entry| (entry.key, entry.value)),
            )
            .finish()
    }
}
