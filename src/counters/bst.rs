use super::{CounterCore, Shape};
use crate::data_count::DataCount;
use std::cmp::Ordering;

struct Node<K> {
    key: K,
    count: u64,
    left: Option<Box<Node<K>>>,
    right: Option<Box<Node<K>>>,
}

// Unbalanced binary search tree; sorted input degenerates it into a list
pub struct BinarySearchTree<K> {
    root: Option<Box<Node<K>>>,
    size: usize,
    total: u64,
}

impl<K: Ord + Clone> CounterCore<K> for BinarySearchTree<K> {
    fn new() -> Self {
        BinarySearchTree {
            root: None,
            size: 0,
            total: 0,
        }
    }

    fn inc_count(&mut self, key: K) {
        self.total += 1;

        let mut link = &mut self.root;
        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => {
                    node.count += 1;
                    return;
                }
            }
        }

        *link = Some(Box::new(Node {
            key,
            count: 1,
            left: None,
            right: None,
        }));
        self.size += 1;
    }

    fn get_counts(&self) -> Vec<DataCount<K>> {
        // Explicit stack: a degenerate tree is as deep as it is large.
        let mut counts = Vec::with_capacity(self.size);
        let mut stack: Vec<&Node<K>> = Vec::new();
        let mut current = self.root.as_deref();

        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                counts.push(DataCount::new(node.key.clone(), node.count));
                current = node.right.as_deref();
            }
        }

        counts
    }

    fn unique_count(&self) -> usize {
        self.size
    }

    fn total_count(&self) -> u64 {
        self.total
    }

    fn shape(&self) -> Shape {
        Shape::Tree { height: self.height() }
    }
}

impl<K> BinarySearchTree<K> {
    /// Edges on the longest root-to-leaf path; -1 for an empty tree.
    pub fn height(&self) -> i64 {
        let mut height = -1;
        let mut level: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
                .collect();
        }
        height
    }
}

impl<K> Drop for BinarySearchTree<K> {
    fn drop(&mut self) {
        // Unlink iteratively so a list-shaped tree does not overflow the stack.
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}
