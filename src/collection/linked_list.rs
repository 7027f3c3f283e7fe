//! Doubly linked list backend.
//!
//! [`LinkedList`] keeps its nodes in a slab-style arena: a vector of
//! slots with an internal free list, with the list managing prev/next
//! links by slot index. Cursors carry a slot key stamped with the
//! slot's generation, so a cursor left behind by a removal reports
//! [`CollectionError::InvalidState`] instead of silently reading
//! whatever element later reuses the slot. End insertion, end removal,
//! and unlinking at a cursor are all O(1) without any pointer juggling.
//!
//! # Examples
//!
//! ```rust
//! use holdfast::prelude::*;
//!
//! let mut list = LinkedList::new();
//! for value in 10..=19 {
//!     list.insert_back(value);
//! }
//!
//! list.remove_first().unwrap();
//! list.remove_last().unwrap();
//! assert_eq!(list.size(), 8);
//! assert_eq!(list.first().unwrap(), 11);
//! assert_eq!(list.last().unwrap(), 18);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::collection::{Counted, Iterable, Sequential};
use crate::error::{CollectionError, CollectionResult};
use crate::iter::{CollectionIter, RawCursor};

/// One arena slot: a generation counter plus the linked node occupying
/// it, if any. The generation increments each time the slot is vacated,
/// so a key stamped with an older generation is known stale.
struct Slot<T> {
    generation: u64,
    node: Option<ListNode<T>>,
}

struct ListNode<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// A cursor's address for one node: the slot index plus the generation
/// the slot had when the key was handed out.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct SlotKey {
    index: usize,
    generation: u64,
}

/// Backing store shared between a list and its cursors.
pub(crate) struct ListStore<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    length: usize,
}

impl<T> ListStore<T> {
    const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            length: 0,
        }
    }

    fn key_of(&self, index: usize) -> SlotKey {
        SlotKey {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn node(&self, key: SlotKey) -> CollectionResult<&ListNode<T>> {
        match self.slots.get(key.index) {
            Some(slot) if slot.generation == key.generation => slot.node.as_ref().ok_or_else(
                || CollectionError::invalid_state("iterator no longer references a live element"),
            ),
            _ => Err(CollectionError::invalid_state(
                "iterator no longer references a live element",
            )),
        }
    }

    fn node_mut(&mut self, key: SlotKey) -> CollectionResult<&mut ListNode<T>> {
        match self.slots.get_mut(key.index) {
            Some(slot) if slot.generation == key.generation => slot.node.as_mut().ok_or_else(
                || CollectionError::invalid_state("iterator no longer references a live element"),
            ),
            _ => Err(CollectionError::invalid_state(
                "iterator no longer references a live element",
            )),
        }
    }

    fn allocate(&mut self, value: T) -> usize {
        let node = ListNode {
            value,
            prev: None,
            next: None,
        };
        if let Some(index) = self.free.pop() {
            self.slots[index].node = Some(node);
            index
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            self.slots.len() - 1
        }
    }

    /// Detaches a node from the chain and vacates its slot, returning the
    /// value and the index of the node that followed it. Vacating bumps
    /// the slot generation, invalidating every outstanding key to it.
    fn unlink(&mut self, index: usize) -> (T, Option<usize>) {
        let (prev, next) = {
            let node = self.occupied(index);
            (node.prev, node.next)
        };

        match prev {
            Some(previous_index) => self.occupied_mut(previous_index).next = next,
            None => self.head = next,
        }
        match next {
            Some(next_index) => self.occupied_mut(next_index).prev = prev,
            None => self.tail = prev,
        }

        let slot = &mut self.slots[index];
        let node = match slot.node.take() {
            Some(node) => node,
            None => unreachable!("linked index must reference an occupied slot"),
        };
        slot.generation += 1;
        self.free.push(index);
        self.length -= 1;

        (node.value, next)
    }

    fn link_back(&mut self, value: T) -> usize {
        let index = self.allocate(value);
        match self.tail {
            Some(tail_index) => {
                self.occupied_mut(tail_index).next = Some(index);
                self.occupied_mut(index).prev = Some(tail_index);
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.length += 1;
        index
    }

    fn link_front(&mut self, value: T) -> usize {
        let index = self.allocate(value);
        match self.head {
            Some(head_index) => {
                self.occupied_mut(head_index).prev = Some(index);
                self.occupied_mut(index).next = Some(head_index);
            }
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.length += 1;
        index
    }

    /// Links a fresh node immediately before an existing one.
    fn link_before(&mut self, value: T, before: usize) -> usize {
        let previous = self.occupied(before).prev;
        match previous {
            None => self.link_front(value),
            Some(previous_index) => {
                let index = self.allocate(value);
                self.occupied_mut(index).prev = Some(previous_index);
                self.occupied_mut(index).next = Some(before);
                self.occupied_mut(previous_index).next = Some(index);
                self.occupied_mut(before).prev = Some(index);
                self.length += 1;
                index
            }
        }
    }

    /// Links a fresh node immediately after an existing one.
    fn link_after(&mut self, value: T, after: usize) -> usize {
        let following = self.occupied(after).next;
        match following {
            None => self.link_back(value),
            Some(next_index) => {
                let index = self.allocate(value);
                self.occupied_mut(index).prev = Some(after);
                self.occupied_mut(index).next = Some(next_index);
                self.occupied_mut(after).next = Some(index);
                self.occupied_mut(next_index).prev = Some(index);
                self.length += 1;
                index
            }
        }
    }

    /// Accesses a slot known to be occupied; only called with indices the
    /// store just allocated or that the chain links reference.
    fn occupied(&self, index: usize) -> &ListNode<T> {
        match &self.slots[index].node {
            Some(node) => node,
            None => unreachable!("linked index must reference an occupied slot"),
        }
    }

    fn occupied_mut(&mut self, index: usize) -> &mut ListNode<T> {
        match &mut self.slots[index].node {
            Some(node) => node,
            None => unreachable!("linked index must reference an occupied slot"),
        }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A position inside one linked list.
pub(crate) struct ListCursor<T> {
    store: Weak<RefCell<ListStore<T>>>,
    key: Option<SlotKey>,
}

impl<T: Clone> ListCursor<T> {
    fn positioned(store: &Rc<RefCell<ListStore<T>>>, key: Option<SlotKey>) -> Self {
        Self {
            store: Rc::downgrade(store),
            key,
        }
    }

    pub(crate) const fn is_null(&self) -> bool {
        self.key.is_none()
    }

    fn belongs_to(&self, store: &Rc<RefCell<ListStore<T>>>) -> bool {
        Weak::ptr_eq(&self.store, &Rc::downgrade(store))
    }

    fn upgrade(&self) -> CollectionResult<Rc<RefCell<ListStore<T>>>> {
        self.store.upgrade().ok_or_else(|| {
            CollectionError::invalid_state("the owning collection no longer exists")
        })
    }

    fn live_key(&self) -> CollectionResult<SlotKey> {
        self.key
            .ok_or_else(|| CollectionError::null_iterator("access through a null iterator"))
    }

    pub(crate) fn current(&self) -> CollectionResult<T> {
        let store = self.upgrade()?;
        let store = store.borrow();
        Ok(store.node(self.live_key()?)?.value.clone())
    }

    pub(crate) fn write(&mut self, value: T) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let mut store = store.borrow_mut();
        store.node_mut(self.live_key()?)?.value = value;
        Ok(())
    }

    pub(crate) fn step_forward(&mut self) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let store = store.borrow();
        let key = self
            .key
            .ok_or_else(|| CollectionError::null_iterator("next on a null iterator"))?;
        self.key = store.node(key)?.next.map(|index| store.key_of(index));
        Ok(())
    }

    pub(crate) fn step_backward(&mut self) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let store = store.borrow();
        let key = self
            .key
            .ok_or_else(|| CollectionError::null_iterator("prev on a null iterator"))?;
        self.key = store.node(key)?.prev.map(|index| store.key_of(index));
        Ok(())
    }
}

impl<T> Clone for ListCursor<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
        }
    }
}

// =============================================================================
// LinkedList
// =============================================================================

/// A doubly linked list: positional order, duplicates allowed, O(1)
/// insertion and removal at both ends and at any cursor.
pub struct LinkedList<T> {
    store: Rc<RefCell<ListStore<T>>>,
}

impl<T: Clone> LinkedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(ListStore::new())),
        }
    }

    /// Copies the elements out in list order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        let store = self.store.borrow();
        let mut values = Vec::with_capacity(store.length);
        let mut current = store.head;
        while let Some(index) = current {
            let node = store.occupied(index);
            values.push(node.value.clone());
            current = node.next;
        }
        values
    }

    fn make_iter(&self, key: Option<SlotKey>) -> CollectionIter<T> {
        CollectionIter::from_raw(RawCursor::List(ListCursor::positioned(&self.store, key)))
    }

    fn own_cursor_ref<'a>(
        &self,
        iterator: &'a CollectionIter<T>,
    ) -> CollectionResult<&'a ListCursor<T>> {
        match iterator.raw() {
            RawCursor::List(cursor) if cursor.belongs_to(&self.store) => Ok(cursor),
            _ => Err(CollectionError::invalid_input(
                "iterator does not belong to this collection",
            )),
        }
    }
}

impl<T: Clone> Counted for LinkedList<T> {
    fn size(&self) -> usize {
        self.store.borrow().length
    }

    fn clear(&mut self) {
        let mut store = self.store.borrow_mut();
        store.slots.clear();
        store.free.clear();
        store.head = None;
        store.tail = None;
        store.length = 0;
    }
}

impl<T: Clone> Iterable<T> for LinkedList<T> {
    fn begin(&self) -> CollectionIter<T> {
        let key = {
            let store = self.store.borrow();
            store.head.map(|index| store.key_of(index))
        };
        self.make_iter(key)
    }

    fn end(&self) -> CollectionIter<T> {
        self.make_iter(None)
    }

    fn rbegin(&self) -> CollectionIter<T> {
        let key = {
            let store = self.store.borrow();
            store.tail.map(|index| store.key_of(index))
        };
        self.make_iter(key)
    }

    fn rend(&self) -> CollectionIter<T> {
        self.make_iter(None)
    }

    fn owns(&self, iterator: &CollectionIter<T>) -> bool {
        match iterator.raw() {
            RawCursor::List(cursor) => cursor.belongs_to(&self.store),
            _ => false,
        }
    }

    fn remove(&mut self, iterator: CollectionIter<T>) -> CollectionResult<CollectionIter<T>> {
        let mut cursor = match iterator.into_raw() {
            RawCursor::List(cursor) if cursor.belongs_to(&self.store) => cursor,
            _ => {
                return Err(CollectionError::invalid_input(
                    "iterator does not belong to this collection",
                ));
            }
        };
        let key = cursor.live_key()?;
        let following = {
            let mut store = self.store.borrow_mut();
            store.node(key)?;
            let (_, next) = store.unlink(key.index);
            next.map(|index| store.key_of(index))
        };
        cursor.key = following;
        Ok(CollectionIter::from_raw(RawCursor::List(cursor)))
    }
}

impl<T: Clone> Sequential<T> for LinkedList<T> {
    fn first(&self) -> CollectionResult<T> {
        let store = self.store.borrow();
        let head = store
            .head
            .ok_or_else(|| CollectionError::not_found("first element of an empty list"))?;
        Ok(store.occupied(head).value.clone())
    }

    fn last(&self) -> CollectionResult<T> {
        let store = self.store.borrow();
        let tail = store
            .tail
            .ok_or_else(|| CollectionError::not_found("last element of an empty list"))?;
        Ok(store.occupied(tail).value.clone())
    }

    fn insert_front(&mut self, value: T) {
        self.store.borrow_mut().link_front(value);
    }

    fn insert_back(&mut self, value: T) {
        self.store.borrow_mut().link_back(value);
    }

    fn insert_before(
        &mut self,
        value: T,
        iterator: &CollectionIter<T>,
    ) -> CollectionResult<CollectionIter<T>> {
        let cursor = self.own_cursor_ref(iterator)?;
        let key = cursor.live_key()?;
        let inserted = {
            let mut store = self.store.borrow_mut();
            store.node(key)?;
            let index = store.link_before(value, key.index);
            store.key_of(index)
        };
        Ok(self.make_iter(Some(inserted)))
    }

    fn insert_after(
        &mut self,
        value: T,
        iterator: &CollectionIter<T>,
    ) -> CollectionResult<CollectionIter<T>> {
        let cursor = self.own_cursor_ref(iterator)?;
        let key = cursor.live_key()?;
        let inserted = {
            let mut store = self.store.borrow_mut();
            store.node(key)?;
            let index = store.link_after(value, key.index);
            store.key_of(index)
        };
        Ok(self.make_iter(Some(inserted)))
    }

    fn remove_first(&mut self) -> CollectionResult<T> {
        let mut store = self.store.borrow_mut();
        let head = store
            .head
            .ok_or_else(|| CollectionError::not_found("first element of an empty list"))?;
        let (value, _) = store.unlink(head);
        Ok(value)
    }

    fn remove_last(&mut self) -> CollectionResult<T> {
        let mut store = self.store.borrow_mut();
        let tail = store
            .tail
            .ok_or_else(|| CollectionError::not_found("last element of an empty list"))?;
        let (value, _) = store.unlink(tail);
        Ok(value)
    }
}

impl<T: Clone> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.insert_back(value);
        }
        list
    }
}

impl<T: Clone + PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.to_vec() == other.to_vec()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.to_vec()).finish()
    }
}
