//! Internal red-black tree shared by the ordered backends.
//!
//! The tree stores single items and takes its ordering as a closure on
//! every operation, so one node structure serves the unique set, the
//! stamped multiset, and the key-compared map entries. Nodes are linked
//! with [`ReferenceCounter`] and mutated by path copying: an operation
//! rebuilds the spine it touched and swaps the root, leaving untouched
//! subtrees shared.
//!
//! # Invariants
//!
//! 1. Every node is either red or black
//! 2. The root is black
//! 3. All leaves (NIL) are black
//! 4. Red nodes have only black children
//! 5. Every path from root to leaf has the same number of black nodes
//!    (maintained on insertion; deletion may drift, see below)
//!
//! Insertion restores all five with the four-case red-red rebalance;
//! deletion uses the min-of-right-subtree replacement with a simplified
//! post-delete pass, so equal black heights can drift under heavy
//! deletion while the tree stays a valid search tree.
//!
//! Callers pass two closure shapes:
//!
//! - `order(&left, &right)` — a total order between two items.
//! - `locate(&item)` — the ordering of an implicit probe relative to
//!   `item`; `Less` means the probe sorts before `item` (descend left).

use std::cmp::Ordering;

pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// The color of a red-black tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

/// Internal node structure.
#[derive(Clone)]
struct Node<I> {
    item: I,
    color: Color,
    left: Option<ReferenceCounter<Self>>,
    right: Option<ReferenceCounter<Self>>,
}

impl<I> Node<I> {
    /// Creates a new red node with no children.
    const fn new_red(item: I) -> Self {
        Self {
            item,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    /// Creates a copy of this node with a new color.
    fn with_color(&self, color: Color) -> Self
    where
        I: Clone,
    {
        Self {
            item: self.item.clone(),
            color,
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }

    /// Creates a copy of this node with new children.
    fn with_children(
        &self,
        left: Option<ReferenceCounter<Self>>,
        right: Option<ReferenceCounter<Self>>,
    ) -> Self
    where
        I: Clone,
    {
        Self {
            item: self.item.clone(),
            color: self.color,
            left,
            right,
        }
    }

    /// Checks if this node is red.
    fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Helper function to check if an optional node is red.
fn is_red<I>(node: Option<&ReferenceCounter<Node<I>>>) -> bool {
    node.is_some_and(|node| node.is_red())
}

/// A mutable ordered container over path-copied red-black nodes.
pub(crate) struct RbTree<I> {
    root: Option<ReferenceCounter<Node<I>>>,
    length: usize,
}

impl<I: Clone> RbTree<I> {
    pub(crate) const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.length
    }

    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }

    /// Finds the item the probe locates, if any.
    pub(crate) fn find<L>(&self, locate: L) -> Option<I>
    where
        L: Fn(&I) -> Ordering,
    {
        let mut current = self.root.as_ref();
        while let Some(node) = current {
            match locate(&node.item) {
                Ordering::Less => current = node.left.as_ref(),
                Ordering::Greater => current = node.right.as_ref(),
                Ordering::Equal => return Some(node.item.clone()),
            }
        }
        None
    }

    /// Inserts an item, replacing an existing equal item.
    ///
    /// Returns `true` when the length grew, `false` when an equal item was
    /// overwritten in place.
    pub(crate) fn insert_or_replace<F>(&mut self, item: I, order: &F) -> bool
    where
        F: Fn(&I, &I) -> Ordering + ?Sized,
    {
        self.insert_with_policy(item, order, true)
    }

    /// Inserts an item unless an equal item is already present.
    ///
    /// Returns `true` when the item was added; a duplicate insert is a
    /// no-op returning `false`.
    pub(crate) fn insert_if_absent<F>(&mut self, item: I, order: &F) -> bool
    where
        F: Fn(&I, &I) -> Ordering + ?Sized,
    {
        self.insert_with_policy(item, order, false)
    }

    fn insert_with_policy<F>(&mut self, item: I, order: &F, replace: bool) -> bool
    where
        F: Fn(&I, &I) -> Ordering + ?Sized,
    {
        let (new_root, added) = Self::insert_into_node(self.root.as_ref(), item, order, replace);

        // Make root black
        self.root = new_root.map(|node| {
            if node.is_red() {
                ReferenceCounter::new(node.with_color(Color::Black))
            } else {
                node
            }
        });
        if added {
            self.length += 1;
        }
        added
    }

    /// Recursive helper for insert.
    /// Returns (`new_node`, `was_added`) where `was_added` is true if a new
    /// item was added rather than an equal one replaced or kept.
    fn insert_into_node<F>(
        node: Option<&ReferenceCounter<Node<I>>>,
        item: I,
        order: &F,
        replace: bool,
    ) -> (Option<ReferenceCounter<Node<I>>>, bool)
    where
        F: Fn(&I, &I) -> Ordering + ?Sized,
    {
        match node {
            None => (Some(ReferenceCounter::new(Node::new_red(item))), true),
            Some(node_ref) => match order(&item, &node_ref.item) {
                Ordering::Less => {
                    let (new_left, added) =
                        Self::insert_into_node(node_ref.left.as_ref(), item, order, replace);
                    let new_node = node_ref.with_children(new_left, node_ref.right.clone());
                    (Some(ReferenceCounter::new(Self::balance(new_node))), added)
                }
                Ordering::Greater => {
                    let (new_right, added) =
                        Self::insert_into_node(node_ref.right.as_ref(), item, order, replace);
                    let new_node = node_ref.with_children(node_ref.left.clone(), new_right);
                    (Some(ReferenceCounter::new(Self::balance(new_node))), added)
                }
                Ordering::Equal => {
                    if replace {
                        let new_node = Node {
                            item,
                            color: node_ref.color,
                            left: node_ref.left.clone(),
                            right: node_ref.right.clone(),
                        };
                        (Some(ReferenceCounter::new(new_node)), false)
                    } else {
                        (Some(node_ref.clone()), false)
                    }
                }
            },
        }
    }

    /// Balances the tree after insertion.
    /// Handles the four cases of red-red violation.
    fn balance(node: Node<I>) -> Node<I> {
        // Case 1: Left-Left (left child is red, left-left grandchild is red)
        if is_red(node.left.as_ref())
            && let Some(left) = &node.left
            && is_red(left.left.as_ref())
        {
            return Self::rotate_right_and_recolor(node);
        }

        // Case 2: Left-Right (left child is red, left-right grandchild is red)
        if is_red(node.left.as_ref())
            && let Some(left) = &node.left
            && is_red(left.right.as_ref())
        {
            // First rotate left on the left child, then rotate right on node
            let new_left = Self::rotate_left((**left).clone());
            let new_node =
                node.with_children(Some(ReferenceCounter::new(new_left)), node.right.clone());
            return Self::rotate_right_and_recolor(new_node);
        }

        // Case 3: Right-Right (right child is red, right-right grandchild is red)
        if is_red(node.right.as_ref())
            && let Some(right) = &node.right
            && is_red(right.right.as_ref())
        {
            return Self::rotate_left_and_recolor(node);
        }

        // Case 4: Right-Left (right child is red, right-left grandchild is red)
        if is_red(node.right.as_ref())
            && let Some(right) = &node.right
            && is_red(right.left.as_ref())
        {
            // First rotate right on the right child, then rotate left on node
            let new_right = Self::rotate_right((**right).clone());
            let new_node =
                node.with_children(node.left.clone(), Some(ReferenceCounter::new(new_right)));
            return Self::rotate_left_and_recolor(new_node);
        }

        node
    }

    /// Rotates the tree to the right around the given node.
    fn rotate_right(node: Node<I>) -> Node<I> {
        if let Some(left) = node.left {
            let new_node = Node {
                item: node.item,
                color: node.color,
                left: left.right.clone(),
                right: node.right,
            };
            Node {
                item: left.item.clone(),
                color: left.color,
                left: left.left.clone(),
                right: Some(ReferenceCounter::new(new_node)),
            }
        } else {
            node
        }
    }

    /// Rotates the tree to the left around the given node.
    fn rotate_left(node: Node<I>) -> Node<I> {
        if let Some(right) = node.right {
            let new_node = Node {
                item: node.item,
                color: node.color,
                left: node.left,
                right: right.left.clone(),
            };
            Node {
                item: right.item.clone(),
                color: right.color,
                left: Some(ReferenceCounter::new(new_node)),
                right: right.right.clone(),
            }
        } else {
            node
        }
    }

    /// Rotates right and recolors for balancing.
    fn rotate_right_and_recolor(node: Node<I>) -> Node<I> {
        if let Some(left) = &node.left {
            // New root (the old left child)
            let new_right = Node {
                item: node.item.clone(),
                color: Color::Red,
                left: left.right.clone(),
                right: node.right.clone(),
            };

            // If left has a left child, make it black
            let new_left = left
                .left
                .as_ref()
                .map(|left_left| ReferenceCounter::new(left_left.with_color(Color::Black)));

            Node {
                item: left.item.clone(),
                color: Color::Black,
                left: new_left,
                right: Some(ReferenceCounter::new(new_right)),
            }
        } else {
            node
        }
    }

    /// Rotates left and recolors for balancing.
    fn rotate_left_and_recolor(node: Node<I>) -> Node<I> {
        if let Some(right) = &node.right {
            // New root (the old right child)
            let new_left = Node {
                item: node.item.clone(),
                color: Color::Red,
                left: node.left.clone(),
                right: right.left.clone(),
            };

            // If right has a right child, make it black
            let new_right = right
                .right
                .as_ref()
                .map(|right_right| ReferenceCounter::new(right_right.with_color(Color::Black)));

            Node {
                item: right.item.clone(),
                color: Color::Black,
                left: Some(ReferenceCounter::new(new_left)),
                right: new_right,
            }
        } else {
            node
        }
    }

    /// Removes the item the probe locates, returning it.
    ///
    /// A miss leaves the tree untouched and returns `None`.
    pub(crate) fn remove<L>(&mut self, locate: L) -> Option<I>
    where
        L: Fn(&I) -> Ordering,
    {
        let (new_root, removed) = Self::remove_from_node(self.root.as_ref(), &locate);
        if removed.is_some() {
            // Make root black if it exists
            self.root = new_root.map(|node| {
                if node.is_red() {
                    ReferenceCounter::new(node.with_color(Color::Black))
                } else {
                    node
                }
            });
            self.length -= 1;
        }
        removed
    }

    /// Recursive helper for remove.
    fn remove_from_node<L>(
        node: Option<&ReferenceCounter<Node<I>>>,
        locate: &L,
    ) -> (Option<ReferenceCounter<Node<I>>>, Option<I>)
    where
        L: Fn(&I) -> Ordering,
    {
        let Some(node_ref) = node else {
            return (None, None);
        };
        match locate(&node_ref.item) {
            Ordering::Less => {
                let (new_left, removed) = Self::remove_from_node(node_ref.left.as_ref(), locate);
                if removed.is_none() {
                    return (Some(node_ref.clone()), None);
                }
                let new_node = node_ref.with_children(new_left, node_ref.right.clone());
                (
                    Some(ReferenceCounter::new(Self::balance_after_delete(new_node))),
                    removed,
                )
            }
            Ordering::Greater => {
                let (new_right, removed) = Self::remove_from_node(node_ref.right.as_ref(), locate);
                if removed.is_none() {
                    return (Some(node_ref.clone()), None);
                }
                let new_node = node_ref.with_children(node_ref.left.clone(), new_right);
                (
                    Some(ReferenceCounter::new(Self::balance_after_delete(new_node))),
                    removed,
                )
            }
            Ordering::Equal => {
                // Found the node to remove
                let removed = Some(node_ref.item.clone());
                match (&node_ref.left, &node_ref.right) {
                    (None, None) => (None, removed),
                    (Some(left), None) => (Some(left.clone()), removed),
                    (None, Some(right)) => (Some(right.clone()), removed),
                    (Some(_), Some(right)) => {
                        // Replace with the minimum of the right subtree
                        let (new_right, successor) = Self::remove_min_node(right);
                        let new_node = Node {
                            item: successor,
                            color: node_ref.color,
                            left: node_ref.left.clone(),
                            right: new_right,
                        };
                        (
                            Some(ReferenceCounter::new(Self::balance_after_delete(new_node))),
                            removed,
                        )
                    }
                }
            }
        }
    }

    /// Detaches the minimum item of a subtree, returning the rebuilt
    /// subtree and the detached item.
    fn remove_min_node(
        node: &ReferenceCounter<Node<I>>,
    ) -> (Option<ReferenceCounter<Node<I>>>, I) {
        match &node.left {
            None => (node.right.clone(), node.item.clone()),
            Some(left) => {
                let (new_left, detached) = Self::remove_min_node(left);
                let new_node = node.with_children(new_left, node.right.clone());
                (
                    Some(ReferenceCounter::new(Self::balance_after_delete(new_node))),
                    detached,
                )
            }
        }
    }

    /// Balances the tree after deletion (simplified version).
    const fn balance_after_delete(node: Node<I>) -> Node<I> {
        // A full implementation would resolve double-black cases here; this
        // version keeps the search-tree property and accepts the drift.
        node
    }

    /// Returns the minimum item.
    pub(crate) fn min(&self) -> Option<I> {
        let mut current = self.root.as_ref()?;
        while let Some(left) = current.left.as_ref() {
            current = left;
        }
        Some(current.item.clone())
    }

    /// Returns the maximum item.
    pub(crate) fn max(&self) -> Option<I> {
        let mut current = self.root.as_ref()?;
        while let Some(right) = current.right.as_ref() {
            current = right;
        }
        Some(current.item.clone())
    }

    /// Returns the smallest item the probe sorts before.
    ///
    /// This is the in-order successor of the probe position; the probe
    /// itself need not be present.
    pub(crate) fn successor<L>(&self, locate: L) -> Option<I>
    where
        L: Fn(&I) -> Ordering,
    {
        let mut best: Option<&Node<I>> = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if locate(&node.item) == Ordering::Less {
                best = Some(node);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        best.map(|node| node.item.clone())
    }

    /// Returns the largest item the probe sorts after.
    pub(crate) fn predecessor<L>(&self, locate: L) -> Option<I>
    where
        L: Fn(&I) -> Ordering,
    {
        let mut best: Option<&Node<I>> = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if locate(&node.item) == Ordering::Greater {
                best = Some(node);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }
        best.map(|node| node.item.clone())
    }

    /// Visits every item in order.
    pub(crate) fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&I),
    {
        Self::visit_in_order(self.root.as_deref(), &mut visit);
    }

    fn visit_in_order<F>(node: Option<&Node<I>>, visit: &mut F)
    where
        F: FnMut(&I),
    {
        if let Some(node_ref) = node {
            Self::visit_in_order(node_ref.left.as_deref(), visit);
            visit(&node_ref.item);
            Self::visit_in_order(node_ref.right.as_deref(), visit);
        }
    }

    /// Collects every item in order.
    pub(crate) fn to_vec(&self) -> Vec<I> {
        let mut items = Vec::with_capacity(self.length);
        self.for_each(|item| items.push(item.clone()));
        items
    }
}

impl<I: Clone> Default for RbTree<I> {
    fn default() -> Self {
        Self::new()
    }
}
