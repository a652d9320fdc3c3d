//! Plane coordinates for drawing a tree.
//!
//! Rendering itself lives outside this crate. What a drawing surface needs is
//! a position for every node and the segments connecting parents to children;
//! [`layout`] computes both by walking the tree through its public structural
//! view. The root sits at the origin and children sit one level further down,
//! offset horizontally by an amount that shrinks on every level, left
//! children to the negative side and right children to the positive side.

use crate::tree::{Node, Tree};

/// Horizontal offset between the root and its children.
const ROOT_SPREAD: f64 = 2.0;

/// Vertical distance between a parent and its children.
const LEVEL_DROP: f64 = 2.0;

/// Factor by which the horizontal offset shrinks on each level down.
const SPREAD_DECAY: f64 = 1.5;

/// Where a single node should be drawn, along with the key and value to label
/// it with.
#[derive(Debug)]
pub struct Placement<'a, K, V> {
    /// The node's key.
    pub key: &'a K,
    /// The node's value.
    pub value: &'a V,
    /// Horizontal position. Negative is left of the root.
    pub x: f64,
    /// Vertical position. The root is at 0.0 and deeper levels are more
    /// negative.
    pub y: f64,
    /// Distance from the root in edges.
    pub depth: usize,
}

/// A straight segment connecting a parent's position to a child's.
#[derive(Debug, PartialEq)]
pub struct Edge {
    /// The parent's (x, y) position.
    pub from: (f64, f64),
    /// The child's (x, y) position.
    pub to: (f64, f64),
}

/// Positions for every node and every parent/child link of a tree.
#[derive(Debug)]
pub struct Layout<'a, K, V> {
    /// One entry per node, in the order the walk visits them (each node
    /// before either of its subtrees).
    pub placements: Vec<Placement<'a, K, V>>,
    /// One entry per parent/child link.
    pub edges: Vec<Edge>,
}

/// Computes drawing coordinates for every node of `tree`.
///
/// This is a pure function of the tree's shape. It never inspects keys or
/// values beyond handing out references to them.
///
/// # Examples
///
/// ```
/// use ordtree::layout::layout;
/// use ordtree::tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert(2, "b");
/// tree.insert(1, "a");
/// tree.insert(3, "c");
///
/// let layout = layout(&tree);
/// assert_eq!(layout.placements.len(), 3);
/// assert_eq!(layout.edges.len(), 2);
///
/// // The root is drawn at the origin, its children two units down and to
/// // either side.
/// assert_eq!((layout.placements[0].x, layout.placements[0].y), (0.0, 0.0));
/// assert_eq!((layout.placements[1].x, layout.placements[1].y), (-2.0, -2.0));
/// assert_eq!((layout.placements[2].x, layout.placements[2].y), (2.0, -2.0));
/// ```
pub fn layout<K, V>(tree: &Tree<K, V>) -> Layout<'_, K, V> {
    let mut out = Layout {
        placements: Vec::with_capacity(tree.len()),
        edges: Vec::new(),
    };
    if let Some(root) = tree.root() {
        place(root, 0.0, 0.0, ROOT_SPREAD, 0, &mut out);
    }
    out
}

fn place<'a, K, V>(
    node: &'a Node<K, V>,
    x: f64,
    y: f64,
    spread: f64,
    depth: usize,
    out: &mut Layout<'a, K, V>,
) {
    out.placements.push(Placement {
        key: node.key(),
        value: node.value(),
        x,
        y,
        depth,
    });

    if let Some(left) = node.left() {
        let child = (x - spread, y - LEVEL_DROP);
        out.edges.push(Edge {
            from: (x, y),
            to: child,
        });
        place(left, child.0, child.1, spread / SPREAD_DECAY, depth + 1, out);
    }
    if let Some(right) = node.right() {
        let child = (x + spread, y - LEVEL_DROP);
        out.edges.push(Edge {
            from: (x, y),
            to: child,
        });
        place(right, child.0, child.1, spread / SPREAD_DECAY, depth + 1, out);
    }
}
