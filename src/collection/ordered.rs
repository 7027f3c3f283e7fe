//! Shared store and cursor plumbing for the tree-backed collections.
//!
//! [`TreeSet`](crate::collection::TreeSet),
//! [`TreeMultiset`](crate::collection::TreeMultiset), and
//! [`TreeMap`](crate::collection::TreeMap) all keep their items in a
//! [`TreeStore`]: a red-black tree paired with the boxed total order the
//! tree was built under. The store lives in an `Rc<RefCell<..>>` owned by
//! the collection; cursors hold only a `Weak` back-reference, so an
//! iterator never keeps its collection alive.
//!
//! A [`TreeCursor`] does not point into the node structure. It remembers
//! the item it is positioned on and steps by successor/predecessor
//! descent, which survives the root swaps that path-copying mutation
//! performs.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use crate::collection::rb_tree::RbTree;
use crate::error::{CollectionError, CollectionResult};

/// The ordering function a tree store was built under.
pub(crate) type ItemOrder<I> = Box<dyn Fn(&I, &I) -> Ordering>;

/// A red-black tree plus the order its items obey.
pub(crate) struct TreeStore<I> {
    pub(crate) tree: RbTree<I>,
    pub(crate) order: ItemOrder<I>,
}

impl<I: Clone> TreeStore<I> {
    pub(crate) fn new(order: ItemOrder<I>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            tree: RbTree::new(),
            order,
        }))
    }

    /// Inserts unless an equal item exists; `true` when added.
    pub(crate) fn insert_if_absent(&mut self, item: I) -> bool {
        let Self { tree, order } = self;
        tree.insert_if_absent(item, &**order)
    }

    /// Inserts, overwriting an equal item in place; `true` when the
    /// length grew.
    pub(crate) fn insert_or_replace(&mut self, item: I) -> bool {
        let Self { tree, order } = self;
        tree.insert_or_replace(item, &**order)
    }

    /// Finds the stored item comparing equal to `item`.
    pub(crate) fn find_item(&self, item: &I) -> Option<I> {
        self.tree.find(|other| (self.order)(item, other))
    }

    /// Removes the stored item comparing equal to `item`, returning it.
    pub(crate) fn remove_item(&mut self, item: &I) -> Option<I> {
        let Self { tree, order } = self;
        tree.remove(|other| order(item, other))
    }

    /// Removes `item` and reports the item that followed it, which becomes
    /// the advanced cursor position.
    pub(crate) fn remove_and_advance(&mut self, item: &I) -> CollectionResult<Option<I>> {
        let following = self.tree.successor(|other| (self.order)(item, other));
        if self.remove_item(item).is_none() {
            return Err(CollectionError::invalid_state(
                "iterator no longer references a live element",
            ));
        }
        Ok(following)
    }
}

/// A position inside one tree-backed collection.
pub(crate) struct TreeCursor<I> {
    store: Weak<RefCell<TreeStore<I>>>,
    position: Option<I>,
}

impl<I: Clone> TreeCursor<I> {
    pub(crate) fn positioned(store: &Rc<RefCell<TreeStore<I>>>, position: Option<I>) -> Self {
        Self {
            store: Rc::downgrade(store),
            position,
        }
    }

    pub(crate) const fn is_null(&self) -> bool {
        self.position.is_none()
    }

    pub(crate) fn belongs_to(&self, store: &Rc<RefCell<TreeStore<I>>>) -> bool {
        Weak::ptr_eq(&self.store, &Rc::downgrade(store))
    }

    /// Clones the item under the cursor.
    pub(crate) fn current(&self) -> CollectionResult<I> {
        let _ = self.upgrade()?;
        self.position
            .clone()
            .ok_or_else(|| CollectionError::null_iterator("get on a null iterator"))
    }

    pub(crate) fn set_position(&mut self, position: Option<I>) {
        self.position = position;
    }

    fn upgrade(&self) -> CollectionResult<Rc<RefCell<TreeStore<I>>>> {
        self.store.upgrade().ok_or_else(|| {
            CollectionError::invalid_state("the owning collection no longer exists")
        })
    }

    /// Moves to the in-order successor, or to the null state off the end.
    pub(crate) fn step_forward(&mut self) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let store = store.borrow();
        let current = self
            .position
            .take()
            .ok_or_else(|| CollectionError::null_iterator("next on a null iterator"))?;
        self.position = store.tree.successor(|item| (store.order)(&current, item));
        Ok(())
    }

    /// Moves to the in-order predecessor, or to the null state off the
    /// front.
    pub(crate) fn step_backward(&mut self) -> CollectionResult<()> {
        let store = self.upgrade()?;
        let store = store.borrow();
        let current = self
            .position
            .take()
            .ok_or_else(|| CollectionError::null_iterator("prev on a null iterator"))?;
        self.position = store.tree.predecessor(|item| (store.order)(&current, item));
        Ok(())
    }
}

impl<I: Clone> Clone for TreeCursor<I> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            position: self.position.clone(),
        }
    }
}

// =============================================================================
// Stamped Items
// =============================================================================

/// A multiset item: the element plus a monotonically increasing stamp.
///
/// Equal-comparing elements receive distinct stamps, so every item
/// occupies its own slot in the unique tree and a cursor can address one
/// occurrence exactly. The stamp is the backend-defined tie-break order
/// surfaced by [`PriorityQueue`](crate::collection::PriorityQueue).
#[derive(Clone, Debug)]
pub(crate) struct Stamped<T> {
    pub(crate) value: T,
    pub(crate) stamp: u64,
}

impl<T> Stamped<T> {
    pub(crate) const fn new(value: T, stamp: u64) -> Self {
        Self { value, stamp }
    }
}
