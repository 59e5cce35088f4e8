//! Arena binary search tree
//!
//! Nodes live in a `Vec` arena and refer to children by index, so snapshots
//! of the tree are plain clones with no aliased pointers. Keys are unique;
//! the input layer rejects duplicates before they reach the tree.

/// One tree node. `left`/`right` are arena indices.
#[derive(Debug, Clone, PartialEq)]
pub struct BstNode {
    pub key: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bst {
    nodes: Vec<BstNode>,
    root: Option<usize>,
    len: usize,
}

impl Bst {
    pub fn new() -> Self {
        Bst::default()
    }

    /// Build a tree by inserting keys one at a time. Returns the first
    /// duplicate key on failure.
    pub fn from_keys(keys: &[i64]) -> Result<Self, i64> {
        let mut tree = Bst::new();
        for &key in keys {
            if !tree.insert(key) {
                return Err(key);
            }
        }
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, idx: usize) -> &BstNode {
        &self.nodes[idx]
    }

    pub fn contains(&self, key: i64) -> bool {
        let mut cur = self.root;
        while let Some(idx) = cur {
            let node = &self.nodes[idx];
            if key == node.key {
                return true;
            }
            cur = if key < node.key { node.left } else { node.right };
        }
        false
    }

    /// Insert a key, returning false if it already exists.
    pub fn insert(&mut self, key: i64) -> bool {
        let new_idx = self.nodes.len();
        match self.root {
            None => {
                self.nodes.push(BstNode { key, left: None, right: None });
                self.root = Some(new_idx);
            }
            Some(mut idx) => loop {
                let node_key = self.nodes[idx].key;
                if key == node_key {
                    return false;
                }
                let child = if key < node_key {
                    &mut self.nodes[idx].left
                } else {
                    &mut self.nodes[idx].right
                };
                match *child {
                    Some(next) => idx = next,
                    None => {
                        *child = Some(new_idx);
                        self.nodes.push(BstNode { key, left: None, right: None });
                        break;
                    }
                }
            },
        }
        self.len += 1;
        true
    }

    /// Index of the minimum node in the subtree rooted at `idx`.
    pub fn min_index(&self, mut idx: usize) -> usize {
        while let Some(left) = self.nodes[idx].left {
            idx = left;
        }
        idx
    }

    /// Index of the maximum node in the subtree rooted at `idx`.
    pub fn max_index(&self, mut idx: usize) -> usize {
        while let Some(right) = self.nodes[idx].right {
            idx = right;
        }
        idx
    }

    /// Remove a key, returning false if it was not present. The two-child
    /// case promotes the in-order successor (minimum of the right subtree).
    /// Vacated arena slots are left unreferenced.
    pub fn remove(&mut self, key: i64) -> bool {
        if !self.contains(key) {
            return false;
        }
        self.root = self.remove_at(self.root, key);
        self.len -= 1;
        true
    }

    fn remove_at(&mut self, root: Option<usize>, key: i64) -> Option<usize> {
        let idx = root?;
        let node_key = self.nodes[idx].key;
        if key < node_key {
            let new_left = self.remove_at(self.nodes[idx].left, key);
            self.nodes[idx].left = new_left;
            Some(idx)
        } else if key > node_key {
            let new_right = self.remove_at(self.nodes[idx].right, key);
            self.nodes[idx].right = new_right;
            Some(idx)
        } else {
            match (self.nodes[idx].left, self.nodes[idx].right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(_), Some(right)) => {
                    let successor = self.min_index(right);
                    let successor_key = self.nodes[successor].key;
                    let new_right = self.remove_at(Some(right), successor_key);
                    self.nodes[idx].key = successor_key;
                    self.nodes[idx].right = new_right;
                    Some(idx)
                }
            }
        }
    }

    /// Keys in sorted order, by in-order walk.
    pub fn keys_inorder(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        self.walk_inorder(self.root, &mut out);
        out
    }

    fn walk_inorder(&self, idx: Option<usize>, out: &mut Vec<i64>) {
        if let Some(i) = idx {
            self.walk_inorder(self.nodes[i].left, out);
            out.push(self.nodes[i].key);
            self.walk_inorder(self.nodes[i].right, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicates() {
        let mut tree = Bst::new();
        assert!(tree.insert(5));
        assert!(!tree.insert(5));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn inorder_is_sorted() {
        let tree = Bst::from_keys(&[8, 3, 10, 1, 6, 14, 4, 7]).unwrap();
        assert_eq!(tree.keys_inorder(), vec![1, 3, 4, 6, 7, 8, 10, 14]);
    }

    #[test]
    fn remove_leaf_and_single_child() {
        let mut tree = Bst::from_keys(&[8, 3, 10, 1]).unwrap();
        assert!(tree.remove(1)); // leaf
        assert_eq!(tree.keys_inorder(), vec![3, 8, 10]);
        assert!(tree.remove(3)); // had one child before, now leaf
        assert_eq!(tree.keys_inorder(), vec![8, 10]);
        assert!(!tree.remove(99));
    }

    #[test]
    fn remove_two_children_promotes_successor() {
        let mut tree = Bst::from_keys(&[8, 3, 10, 1, 6, 4, 7]).unwrap();
        assert!(tree.remove(3));
        assert_eq!(tree.keys_inorder(), vec![1, 4, 6, 7, 8, 10]);
        // the promoted key sits where 3 was: left child of the root
        let root = tree.node(tree.root().unwrap());
        let left = tree.node(root.left.unwrap());
        assert_eq!(left.key, 4);
    }
}
