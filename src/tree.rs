//! The ordered index itself. [`Tree`] owns the nodes and exposes insertion,
//! exact-key lookup, balanced construction from pre-sorted data, and the
//! traversal producers from the [`iter`][crate::iter] module.
//!
//! # Examples
//!
//! ```
//! use ordtree::tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(2, "two");
//! tree.insert(1, "one");
//! tree.insert(3, "three");
//!
//! assert_eq!(tree.find(&2), Some((&2, &"two")));
//!
//! // Keys come back sorted regardless of insertion order.
//! let keys: Vec<i32> = tree.in_order().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 2, 3]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::iter::{InOrder, PostOrder, PreOrder};

/// A Binary Search Tree mapping orderable keys to associated records. This
/// can be used for inserting key/value pairs, finding them again, and walking
/// all of them in sorted or structural order.
///
/// Keys that compare equal to an existing key are accepted and routed into
/// the right subtree without touching the existing node, so the tree may hold
/// duplicates. [`find`][Tree::find] stops at the first match on the descent
/// path, which is always the earliest insertion; later duplicates are only
/// reachable through the traversals.
pub struct Tree<K, V> {
    root: Option<Box<Node<K, V>>>,

    /// How many nodes the tree holds. Every insert allocates exactly one node
    /// so this is also the number of inserts.
    len: usize,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K, V> Drop for Tree<K, V> {
    // Unlink the children iteratively. Dropping a `Box` chain node by node
    // would recurse once per level and a degenerate tree is as deep as it is
    // long.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        pending.extend(self.root.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a tree of minimal height from items already sorted ascending by
    /// key. The middle item becomes the root, the items before it the left
    /// subtree and the items after it the right subtree, all the way down.
    ///
    /// The input must be sorted and free of duplicate keys. Neither is
    /// checked; handing over anything else produces a tree whose lookups are
    /// unreliable.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let tree = Tree::from_sorted((1..=7).map(|k| (k, k * 10)));
    ///
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.find(&6), Some((&6, &60)));
    /// ```
    pub fn from_sorted<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let items: Vec<_> = items.into_iter().collect();
        let len = items.len();
        Self {
            root: Node::from_sorted(items),
            len,
        }
    }

    /// How many nodes are in the tree. Inserting the same key twice counts
    /// twice.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and
    /// a lone root has a height of 1.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// The root node, if the tree has one. Together with
    /// [`Node::left`]/[`Node::right`] this is enough for external consumers
    /// to walk the structure themselves, the way
    /// [`layout`][crate::layout::layout] does.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Inserts the given value into the tree stored at the given key. This
    /// always allocates exactly one new leaf node; inserting a new value for
    /// an existing key does *not* overwrite it. The new node goes into the
    /// right subtree of wherever the descent first runs out of tree, and
    /// [`find`][Tree::find] keeps returning the earlier mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.find(&1), Some((&1, &2)));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.find(&1), Some((&1, &2)));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        match &mut self.root {
            Some(root) => root.insert(key, value),
            None => self.root = Some(Node::new_boxed(key, value)),
        }
        self.len += 1;
    }

    /// Potentially finds the key and value stored under the given key. If no
    /// node on the descent path has the corresponding key, `None` is
    /// returned. Searching an empty tree is simply a miss, never an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Some((&1, &2)));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<(&K, &V)>
    where
        K: Ord,
    {
        self.root().and_then(|n| n.find(key))
    }

    /// Walks the tree left subtree first, then the node, then the right
    /// subtree. For a valid tree this yields entries in non-decreasing key
    /// order.
    ///
    /// The returned iterator is lazy and borrows the tree; calling this again
    /// on an unmodified tree restarts the walk and yields the same sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, 'b');
    /// tree.insert(1, 'a');
    /// tree.insert(3, 'c');
    ///
    /// let keys: Vec<i32> = tree.in_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn in_order(&self) -> InOrder<'_, K, V> {
        InOrder::new(self.root())
    }

    /// Walks the tree node first, then its left subtree, then its right
    /// subtree. The first entry is always the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, 'b');
    /// tree.insert(1, 'a');
    /// tree.insert(3, 'c');
    ///
    /// let keys: Vec<i32> = tree.pre_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [2, 1, 3]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder::new(self.root())
    }

    /// Walks the tree left subtree first, then the right subtree, then the
    /// node. The last entry is always the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, 'b');
    /// tree.insert(1, 'a');
    /// tree.insert(3, 'c');
    ///
    /// let keys: Vec<i32> = tree.post_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 3, 2]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder::new(self.root())
    }
}

/// A `Node` has a key that is used for searching/sorting and a value that is
/// associated with that key. Each of its two child links may be absent.
///
/// Nodes are handed out by reference through [`Tree::root`] and the child
/// accessors so that consumers can walk the structure without being able to
/// change it.
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Box<Node<K, V>>>,
    right: Option<Box<Node<K, V>>>,
}

impl<K, V> Clone for Node<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: None,
            right: None,
        })
    }

    /// Recursive half of [`Tree::from_sorted`]. Splitting at `len / 2` keeps
    /// every split within one element of an even halving, which is what makes
    /// the resulting height minimal.
    fn from_sorted(mut items: Vec<(K, V)>) -> Option<Box<Self>> {
        if items.is_empty() {
            return None;
        }

        let mid = items.len() / 2;
        let right = items.split_off(mid + 1);
        let (key, value) = items.pop()?;

        Some(Box::new(Self {
            key,
            value,
            left: Self::from_sorted(items),
            right: Self::from_sorted(right),
        }))
    }

    /// The key this node was inserted under.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The record stored at this node. The tree never interprets it.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The root of the left subtree, holding strictly smaller keys.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, holding greater-or-equal keys.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// How many levels are in the subtree rooted at this node. A node with no
    /// children has a height of 1.
    pub fn height(&self) -> usize {
        let left_height = self.left().map_or(0, Self::height);
        let right_height = self.right().map_or(0, Self::height);
        left_height.max(right_height) + 1
    }

    fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => match &mut self.left {
                Some(left) => left.insert(key, value),
                None => self.left = Some(Self::new_boxed(key, value)),
            },
            // Equal keys route right. The existing mapping stays in place and
            // keeps winning lookups.
            Ordering::Equal | Ordering::Greater => match &mut self.right {
                Some(right) => right.insert(key, value),
                None => self.right = Some(Self::new_boxed(key, value)),
            },
        }

        if cfg!(debug_assertions) {
            if let Some(left) = self.left() {
                assert!(left.key < self.key);
            }
            if let Some(right) = self.right() {
                assert!(right.key >= self.key);
            }
        }
    }

    fn find(&self, key: &K) -> Option<(&K, &V)>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().and_then(|n| n.find(key)),
            Ordering::Equal => Some((&self.key, &self.value)),
            Ordering::Greater => self.right().and_then(|n| n.find(key)),
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::{BTreeSet, HashMap};

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a hashmap. First insert wins
    /// in both (the tree never overwrites and `find` stops at the first match
    /// on the descent path) so lookups must agree afterwards.
    fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut HashMap<K, V>)
    where
        K: std::hash::Hash + Eq + Clone + Ord,
        V: std::fmt::Debug + PartialEq + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    bst.insert(k.clone(), v.clone());
                    map.entry(k.clone()).or_insert_with(|| v.clone());
                }
                Op::Find(k) => {
                    assert_eq!(bst.find(k).map(|(_, v)| v), map.get(k));
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new();
            let mut map = HashMap::new();

            do_ops(&ops, &mut tree, &mut map);
            map.keys().all(|key| tree.find(key).map(|(_, v)| v) == map.get(key))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, *x);
            }

            xs.iter().all(|x| tree.find(x).map(|(_, v)| v) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn in_order_is_sorted(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, ());
            }

            let keys: Vec<i8> = tree.in_order().map(|(k, _)| *k).collect();
            keys.len() == xs.len() && keys.windows(2).all(|pair| pair[0] <= pair[1])
        }
    }

    quickcheck::quickcheck! {
        fn traversals_agree_on_the_key_multiset(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, ());
            }

            let in_order: Vec<i8> = tree.in_order().map(|(k, _)| *k).collect();
            let mut pre_order: Vec<i8> = tree.pre_order().map(|(k, _)| *k).collect();
            let mut post_order: Vec<i8> = tree.post_order().map(|(k, _)| *k).collect();
            pre_order.sort_unstable();
            post_order.sort_unstable();

            in_order.len() == xs.len() && in_order == pre_order && in_order == post_order
        }
    }

    quickcheck::quickcheck! {
        fn balanced_height_is_minimal(xs: Vec<i8>) -> bool {
            let items: BTreeSet<i8> = xs.into_iter().collect();
            let n = items.len();
            let tree = Tree::from_sorted(items.into_iter().map(|k| (k, ())));

            // Minimal height for n nodes is the bit length of n.
            tree.height() == (usize::BITS - n.leading_zeros()) as usize
        }
    }

    quickcheck::quickcheck! {
        fn from_sorted_walks_back_out_in_input_order(xs: Vec<i8>) -> bool {
            let items: Vec<(i8, i8)> = xs
                .into_iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|k| (k, k.wrapping_mul(2)))
                .collect();
            let tree = Tree::from_sorted(items.clone());
            let walked: Vec<(i8, i8)> = tree.in_order().map(|(k, v)| (*k, *v)).collect();

            walked == items
        }
    }
}
