//! Arena singly linked list
//!
//! Nodes live in a `Vec` arena and refer to the next node by index, the
//! same no-aliased-pointers layout as [`crate::bst`]. Everything the
//! generators and snapshots need works on 0-based positions from the
//! head, so the arena indices never leak into traces.

/// One list node. `next` is an arena index.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub value: i64,
    pub next: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkedList {
    nodes: Vec<ListNode>,
    head: Option<usize>,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        LinkedList::default()
    }

    /// Build a list by appending values in order.
    pub fn from_values(values: &[i64]) -> Self {
        let mut list = LinkedList::new();
        for &value in values {
            list.push_back(value);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn node(&self, idx: usize) -> &ListNode {
        &self.nodes[idx]
    }

    /// Arena index of the node `pos` hops from the head.
    pub fn index_at(&self, pos: usize) -> Option<usize> {
        let mut cur = self.head?;
        for _ in 0..pos {
            cur = self.nodes[cur].next?;
        }
        Some(cur)
    }

    pub fn value_at(&self, pos: usize) -> Option<i64> {
        self.index_at(pos).map(|idx| self.nodes[idx].value)
    }

    pub fn push_back(&mut self, value: i64) {
        let new_idx = self.nodes.len();
        self.nodes.push(ListNode { value, next: None });
        match self.tail_index() {
            Some(tail) => self.nodes[tail].next = Some(new_idx),
            None => self.head = Some(new_idx),
        }
        self.len += 1;
    }

    fn tail_index(&self) -> Option<usize> {
        let mut cur = self.head?;
        while let Some(next) = self.nodes[cur].next {
            cur = next;
        }
        Some(cur)
    }

    /// Splice `value` in directly after the node at position `after`.
    /// Returns false when the position is past the end.
    pub fn insert_after(&mut self, after: usize, value: i64) -> bool {
        let prev = match self.index_at(after) {
            Some(idx) => idx,
            None => return false,
        };
        let new_idx = self.nodes.len();
        let next = self.nodes[prev].next;
        self.nodes.push(ListNode { value, next });
        self.nodes[prev].next = Some(new_idx);
        self.len += 1;
        true
    }

    /// Swap the values at two positions, leaving the links untouched.
    pub fn swap_values(&mut self, i: usize, j: usize) -> bool {
        match (self.index_at(i), self.index_at(j)) {
            (Some(a), Some(b)) => {
                let tmp = self.nodes[a].value;
                self.nodes[a].value = self.nodes[b].value;
                self.nodes[b].value = tmp;
                true
            }
            _ => false,
        }
    }

    /// Values from head to tail.
    pub fn values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(idx) = cur {
            out.push(self.nodes[idx].value);
            cur = self.nodes[idx].next;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_links_in_order() {
        let list = LinkedList::from_values(&[3, 1, 2]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.values(), vec![3, 1, 2]);
        assert_eq!(list.value_at(2), Some(2));
    }

    #[test]
    fn insert_after_splices_between_nodes() {
        let mut list = LinkedList::from_values(&[1, 2, 4]);
        assert!(list.insert_after(1, 3));
        assert_eq!(list.values(), vec![1, 2, 3, 4]);
        // inserting after the tail appends
        assert!(list.insert_after(3, 5));
        assert_eq!(list.values(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn swap_values_keeps_the_links() {
        let mut list = LinkedList::from_values(&[3, 1, 2]);
        assert!(list.swap_values(0, 1));
        assert_eq!(list.values(), vec![1, 3, 2]);
    }

    #[test]
    fn out_of_range_positions_are_refused() {
        let mut list = LinkedList::from_values(&[1, 2]);
        assert_eq!(list.index_at(2), None);
        assert!(!list.insert_after(2, 9));
        assert!(!list.swap_values(0, 5));
        assert_eq!(list.values(), vec![1, 2]);
    }
}
