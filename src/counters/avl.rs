use super::{CounterCore, Shape};
use crate::data_count::DataCount;
use std::cmp::Ordering;

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    count: u64,
    // Edges to the deepest leaf below; a leaf is 0 and an absent child is -1.
    height: i32,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            count: 1,
            height: 0,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height<K>(link: &Link<K>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

// Restores |balance| <= 1 at `node`, assuming both subtrees already satisfy it.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        rotate_right(node)
    } else if balance < -1 {
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        rotate_left(node)
    } else {
        node
    }
}

/// Height-balanced binary search tree (AVL).
///
/// After every insertion each node's subtrees differ in height by at most
/// one, so the tree stays within ~1.44 log2(n) levels no matter the input
/// order.
pub struct AvlTree<K> {
    root: Link<K>,
    size: usize,
    total: u64,
}

impl<K: Ord> AvlTree<K> {
    // Returns the new subtree root and whether a node was created.
    fn insert(link: Link<K>, key: K) -> (Box<Node<K>>, bool) {
        let Some(mut node) = link else {
            return (Node::leaf(key), true);
        };

        let created = match key.cmp(&node.key) {
            Ordering::Equal => {
                node.count += 1;
                return (node, false);
            }
            Ordering::Less => {
                let (child, created) = Self::insert(node.left.take(), key);
                node.left = Some(child);
                created
            }
            Ordering::Greater => {
                let (child, created) = Self::insert(node.right.take(), key);
                node.right = Some(child);
                created
            }
        };

        (rebalance(node), created)
    }
}

impl<K> AvlTree<K> {
    /// Edges on the longest root-to-leaf path; -1 for an empty tree.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }
}

impl<K: Ord + Clone> CounterCore<K> for AvlTree<K> {
    fn new() -> Self {
        AvlTree {
            root: None,
            size: 0,
            total: 0,
        }
    }

    fn inc_count(&mut self, key: K) {
        self.total += 1;
        let (root, created) = Self::insert(self.root.take(), key);
        self.root = Some(root);
        if created {
            self.size += 1;
        }
    }

    fn get_counts(&self) -> Vec<DataCount<K>> {
        fn walk<K: Clone>(link: &Link<K>, counts: &mut Vec<DataCount<K>>) {
            if let Some(node) = link {
                walk(&node.left, counts);
                counts.push(DataCount::new(node.key.clone(), node.count));
                walk(&node.right, counts);
            }
        }

        let mut counts = Vec::with_capacity(self.size);
        walk(&self.root, &mut counts);
        counts
    }

    fn unique_count(&self) -> usize {
        self.size
    }

    fn total_count(&self) -> u64 {
        self.total
    }

    fn shape(&self) -> Shape {
        Shape::Tree { height: i64::from(self.height()) }
    }
}
