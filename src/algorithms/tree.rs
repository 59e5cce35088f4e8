//! Binary-search-tree trace generators
//!
//! Structural edits (insert, delete) do not mutate the caller's tree;
//! the corresponding events carry enough for the snapshot layer to
//! replay the edit on its own copy.

use crate::bst::Bst;
use crate::trace::{Algorithm, Event, Outcome, Side, Step, Trace, TreeEvent};

pub const MIN_CODE: &[&str] = &[
    "let mut node = root;",
    "while let Some(left) = node.left {",
    "    node = left;",
    "}",
    "node.key",
];

pub const MAX_CODE: &[&str] = &[
    "let mut node = root;",
    "while let Some(right) = node.right {",
    "    node = right;",
    "}",
    "node.key",
];

pub const INSERT_CODE: &[&str] = &[
    "let mut cur = root;",
    "loop {",
    "    if key == cur.key { return; } // already present",
    "    let next = if key < cur.key { cur.left } else { cur.right };",
    "    match next {",
    "        Some(child) => cur = child,",
    "        None => { attach(cur, key); return; }",
    "    }",
    "}",
];

pub const DELETE_CODE: &[&str] = &[
    "let node = find(root, key);",
    "match node.children() {",
    "    Zero => detach(node),",
    "    One(child) => splice(child, node.parent),",
    "    Two => {",
    "        let s = min(node.right);",
    "        node.key = s.key;",
    "        delete(node.right, s.key);",
    "    }",
    "}",
];

pub const INORDER_CODE: &[&str] = &[
    "fn inorder(node) {",
    "    if let Some(left) = node.left {",
    "        inorder(left);",
    "    }",
    "    output(node.key);",
    "    if let Some(right) = node.right {",
    "        inorder(right);",
    "    }",
    "}",
];

pub const PREORDER_CODE: &[&str] = &[
    "fn preorder(node) {",
    "    output(node.key);",
    "    if let Some(left) = node.left {",
    "        preorder(left);",
    "    }",
    "    if let Some(right) = node.right {",
    "        preorder(right);",
    "    }",
    "}",
];

pub const POSTORDER_CODE: &[&str] = &[
    "fn postorder(node) {",
    "    if let Some(left) = node.left {",
    "        postorder(left);",
    "    }",
    "    if let Some(right) = node.right {",
    "        postorder(right);",
    "    }",
    "    output(node.key);",
    "}",
];

fn extreme(tree: &Bst, side: Side) -> (Vec<Step>, Option<i64>) {
    let mut steps = Vec::new();
    let mut cur = match tree.root() {
        Some(root) => root,
        None => return (steps, None),
    };
    steps.push(Step::new(
        format!("Starting at the root ({})", tree.node(cur).key),
        Event::Tree(TreeEvent::Start { key: tree.node(cur).key }),
        Some(0),
    ));
    loop {
        let node = tree.node(cur);
        let next = match side {
            Side::Left => node.left,
            Side::Right => node.right,
        };
        match next {
            Some(child) => {
                let child_key = tree.node(child).key;
                steps.push(Step::new(
                    format!("Moving to {} child {}", side_name(side), child_key),
                    Event::Tree(TreeEvent::Descend { from: node.key, to: child_key, side }),
                    Some(2),
                ));
                cur = child;
            }
            None => return (steps, Some(node.key)),
        }
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}

/// Walk to the leftmost node.
pub fn find_min(tree: &Bst) -> Trace {
    let (mut steps, key) = extreme(tree, Side::Left);
    if let Some(key) = key {
        steps.push(Step::new(
            format!("No left child: {} is the minimum", key),
            Event::Tree(TreeEvent::Found { key }),
            Some(4),
        ));
    }
    steps.push(Step::new("Search completed!", Event::Done(Outcome::Finished), None));
    Trace { algorithm: Algorithm::TreeMin, steps, code: MIN_CODE }
}

/// Walk to the rightmost node.
pub fn find_max(tree: &Bst) -> Trace {
    let (mut steps, key) = extreme(tree, Side::Right);
    if let Some(key) = key {
        steps.push(Step::new(
            format!("No right child: {} is the maximum", key),
            Event::Tree(TreeEvent::Found { key }),
            Some(4),
        ));
    }
    steps.push(Step::new("Search completed!", Event::Done(Outcome::Finished), None));
    Trace { algorithm: Algorithm::TreeMax, steps, code: MAX_CODE }
}

/// Descend to the insertion point and attach `key`. A key already in the
/// tree ends the run without changing anything.
pub fn insert_key(tree: &Bst, key: i64) -> Trace {
    let mut steps = Vec::new();
    let mut cur = match tree.root() {
        Some(root) => root,
        None => {
            steps.push(Step::new(
                format!("Tree is empty: {} becomes the root", key),
                Event::Tree(TreeEvent::Insert { key }),
                Some(6),
            ));
            steps.push(Step::new("Insert completed!", Event::Done(Outcome::Finished), None));
            return Trace { algorithm: Algorithm::TreeInsert, steps, code: INSERT_CODE };
        }
    };
    steps.push(Step::new(
        format!("Starting at the root ({})", tree.node(cur).key),
        Event::Tree(TreeEvent::Start { key: tree.node(cur).key }),
        Some(0),
    ));
    loop {
        let node = tree.node(cur);
        if key == node.key {
            steps.push(Step::new(
                format!("Key {} already exists", key),
                Event::Done(Outcome::Finished),
                Some(2),
            ));
            return Trace { algorithm: Algorithm::TreeInsert, steps, code: INSERT_CODE };
        }
        let side = if key < node.key { Side::Left } else { Side::Right };
        let next = match side {
            Side::Left => node.left,
            Side::Right => node.right,
        };
        match next {
            Some(child) => {
                let child_key = tree.node(child).key;
                steps.push(Step::new(
                    format!(
                        "{} {} {}: moving to {} child {}",
                        key,
                        if side == Side::Left { "<" } else { ">" },
                        node.key,
                        side_name(side),
                        child_key
                    ),
                    Event::Tree(TreeEvent::Descend { from: node.key, to: child_key, side }),
                    Some(5),
                ));
                cur = child;
            }
            None => {
                steps.push(Step::new(
                    format!("Attaching {} as the {} child of {}", key, side_name(side), node.key),
                    Event::Tree(TreeEvent::Insert { key }),
                    Some(6),
                ));
                steps.push(Step::new("Insert completed!", Event::Done(Outcome::Finished), None));
                return Trace { algorithm: Algorithm::TreeInsert, steps, code: INSERT_CODE };
            }
        }
    }
}

/// Descend to `key` and delete it. A two-child node has its in-order
/// successor promoted into its place.
pub fn delete_key(tree: &Bst, key: i64) -> Trace {
    let mut steps = Vec::new();
    let mut cur = tree.root();
    if let Some(root) = cur {
        steps.push(Step::new(
            format!("Starting at the root ({})", tree.node(root).key),
            Event::Tree(TreeEvent::Start { key: tree.node(root).key }),
            Some(0),
        ));
    }
    while let Some(idx) = cur {
        let node = tree.node(idx);
        if key == node.key {
            match (node.left, node.right) {
                (None, None) => {
                    steps.push(Step::new(
                        format!("{} is a leaf: detaching it", key),
                        Event::Tree(TreeEvent::Delete { key }),
                        Some(2),
                    ));
                }
                (Some(_), Some(right)) => {
                    let successor = tree.node(tree.min_index(right)).key;
                    steps.push(Step::new(
                        format!("{} has two children: promoting successor {}", key, successor),
                        Event::Tree(TreeEvent::Promote { key: successor }),
                        Some(5),
                    ));
                    steps.push(Step::new(
                        format!("Replacing {} with {}", key, successor),
                        Event::Tree(TreeEvent::Delete { key }),
                        Some(6),
                    ));
                }
                _ => {
                    steps.push(Step::new(
                        format!("{} has one child: splicing it up", key),
                        Event::Tree(TreeEvent::Delete { key }),
                        Some(3),
                    ));
                }
            }
            steps.push(Step::new("Delete completed!", Event::Done(Outcome::Finished), None));
            return Trace { algorithm: Algorithm::TreeDelete, steps, code: DELETE_CODE };
        }
        let side = if key < node.key { Side::Left } else { Side::Right };
        let next = match side {
            Side::Left => node.left,
            Side::Right => node.right,
        };
        if let Some(child) = next {
            steps.push(Step::new(
                format!("Moving to {} child {}", side_name(side), tree.node(child).key),
                Event::Tree(TreeEvent::Descend {
                    from: node.key,
                    to: tree.node(child).key,
                    side,
                }),
                Some(0),
            ));
        }
        cur = next;
    }
    steps.push(Step::new(
        format!("Key {} not found", key),
        Event::Done(Outcome::NotFound),
        None,
    ));
    Trace { algorithm: Algorithm::TreeDelete, steps, code: DELETE_CODE }
}

struct TraversalWalk<'a> {
    tree: &'a Bst,
    steps: Vec<Step>,
    order: Vec<i64>,
}

impl<'a> TraversalWalk<'a> {
    fn new(tree: &'a Bst) -> Self {
        TraversalWalk { tree, steps: Vec::new(), order: Vec::new() }
    }

    fn output(&mut self, key: i64, line: usize) {
        self.order.push(key);
        self.steps.push(Step::new(
            format!("Visiting {}", key),
            Event::Tree(TreeEvent::Output { key }),
            Some(line),
        ));
    }

    fn descend(&mut self, from: i64, to: i64, side: Side, line: usize) {
        self.steps.push(Step::new(
            format!("Traversing {} subtree of {}", side_name(side), from),
            Event::Tree(TreeEvent::Descend { from, to, side }),
            Some(line),
        ));
    }

    fn backtrack(&mut self, key: i64, side: Side, line: usize) {
        self.steps.push(Step::new(
            format!("Back at {} from its {} subtree", key, side_name(side)),
            Event::Tree(TreeEvent::Backtrack { key, side }),
            Some(line),
        ));
    }

    fn finish(mut self, algorithm: Algorithm, code: &'static [&'static str]) -> Trace {
        let names: Vec<String> = self.order.iter().map(|k| k.to_string()).collect();
        self.steps.push(Step::new(
            format!("Traversal order: {}", names.join(", ")),
            Event::Done(Outcome::Traversal { order: self.order }),
            None,
        ));
        Trace { algorithm, steps: self.steps, code }
    }

    fn inorder(&mut self, idx: usize) {
        let node = self.tree.node(idx).clone();
        if let Some(left) = node.left {
            self.descend(node.key, self.tree.node(left).key, Side::Left, 2);
            self.inorder(left);
            self.backtrack(node.key, Side::Left, 3);
        }
        self.output(node.key, 4);
        if let Some(right) = node.right {
            self.descend(node.key, self.tree.node(right).key, Side::Right, 6);
            self.inorder(right);
            self.backtrack(node.key, Side::Right, 7);
        }
    }

    fn preorder(&mut self, idx: usize) {
        let node = self.tree.node(idx).clone();
        self.output(node.key, 1);
        if let Some(left) = node.left {
            self.descend(node.key, self.tree.node(left).key, Side::Left, 3);
            self.preorder(left);
            self.backtrack(node.key, Side::Left, 4);
        }
        if let Some(right) = node.right {
            self.descend(node.key, self.tree.node(right).key, Side::Right, 6);
            self.preorder(right);
            self.backtrack(node.key, Side::Right, 7);
        }
    }

    fn postorder(&mut self, idx: usize) {
        let node = self.tree.node(idx).clone();
        if let Some(left) = node.left {
            self.descend(node.key, self.tree.node(left).key, Side::Left, 2);
            self.postorder(left);
            self.backtrack(node.key, Side::Left, 3);
        }
        if let Some(right) = node.right {
            self.descend(node.key, self.tree.node(right).key, Side::Right, 5);
            self.postorder(right);
            self.backtrack(node.key, Side::Right, 6);
        }
        self.output(node.key, 7);
    }
}

pub fn inorder(tree: &Bst) -> Trace {
    let mut walk = TraversalWalk::new(tree);
    if let Some(root) = tree.root() {
        walk.inorder(root);
    }
    walk.finish(Algorithm::Inorder, INORDER_CODE)
}

pub fn preorder(tree: &Bst) -> Trace {
    let mut walk = TraversalWalk::new(tree);
    if let Some(root) = tree.root() {
        walk.preorder(root);
    }
    walk.finish(Algorithm::Preorder, PREORDER_CODE)
}

pub fn postorder(tree: &Bst) -> Trace {
    let mut walk = TraversalWalk::new(tree);
    if let Some(root) = tree.root() {
        walk.postorder(root);
    }
    walk.finish(Algorithm::Postorder, POSTORDER_CODE)
}
