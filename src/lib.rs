//! An in-memory ordered index implemented as a Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert
//! records under orderable keys, look them up again, and walk the whole
//! collection in a few canonical orders. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the value
//! associated with that key, and will sometimes have child `Node`s. The most
//! important invariants of this BST are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have
//!    a key less than its own key.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have
//!    a key greater than or equal to its own key. Equal keys always route
//!    right, so inserting under an existing key never overwrites the old
//!    record.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree.
//!
//! Nothing here rebalances after an insert, so the height depends on the
//! insertion order. Feeding keys in ascending order degenerates into a
//! linked list, while [`Tree::from_sorted`][tree::Tree::from_sorted] builds a
//! tree of minimal height out of data that is already sorted by key.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod iter;
pub mod layout;
pub mod tree;

#[cfg(test)]
mod test;
