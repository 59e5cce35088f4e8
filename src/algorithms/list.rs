//! Linked-list trace generators
//!
//! Append and insert do not mutate the caller's list; the events carry
//! enough for the snapshot layer to replay the edit on its own copy.

use crate::list::LinkedList;
use crate::trace::{Algorithm, Event, ListEvent, Outcome, Step, Trace};

pub const APPEND_CODE: &[&str] = &[
    "let mut cur = head;",
    "while let Some(next) = cur.next {",
    "    cur = next;",
    "}",
    "cur.next = Some(node(value));",
];

pub const INSERT_CODE: &[&str] = &[
    "let mut cur = head;",
    "for _ in 0..pos {",
    "    cur = cur.next;",
    "}",
    "let node = node(value);",
    "node.next = cur.next;",
    "cur.next = Some(node);",
];

pub const SEARCH_CODE: &[&str] = &[
    "let mut cur = head;",
    "let mut pos = 0;",
    "while let Some(node) = cur {",
    "    if node.value == target {",
    "        return Some(pos);",
    "    }",
    "    cur = node.next;",
    "    pos += 1;",
    "}",
    "None",
];

pub const SORT_CODE: &[&str] = &[
    "for i in 0..len {",
    "    let mut cur = head;",
    "    for j in 0..len - i - 1 {",
    "        if cur.value > cur.next.value {",
    "            swap(cur.value, cur.next.value);",
    "        }",
    "        cur = cur.next;",
    "    }",
    "    // the last unsorted node is now in place",
    "}",
];

/// Walk to the tail and attach `value` there.
pub fn append(list: &LinkedList, value: i64) -> Trace {
    let values = list.values();
    let mut steps = Vec::new();
    if values.is_empty() {
        steps.push(Step::new(
            format!("List is empty: {} becomes the head", value),
            Event::List(ListEvent::Append { index: 0, value }),
            Some(4),
        ));
    } else {
        steps.push(Step::new(
            format!("Starting at the head ({})", values[0]),
            Event::List(ListEvent::Traverse { index: 0 }),
            Some(0),
        ));
        for (pos, &v) in values.iter().enumerate().skip(1) {
            steps.push(Step::new(
                format!("Moving to the next node ({})", v),
                Event::List(ListEvent::Traverse { index: pos }),
                Some(2),
            ));
        }
        steps.push(Step::new(
            format!("Reached the tail: attaching {}", value),
            Event::List(ListEvent::Append { index: values.len(), value }),
            Some(4),
        ));
    }
    steps.push(Step::new("Append completed!", Event::Done(Outcome::Finished), None));
    Trace { algorithm: Algorithm::ListAppend, steps, code: APPEND_CODE }
}

/// Walk to position `after` and splice `value` in behind it. Positions
/// are validated against the list length before generation.
pub fn insert_after(list: &LinkedList, after: usize, value: i64) -> Trace {
    let values = list.values();
    let mut steps = Vec::new();
    steps.push(Step::new(
        format!("Starting at the head ({})", values[0]),
        Event::List(ListEvent::Traverse { index: 0 }),
        Some(0),
    ));
    for pos in 1..=after {
        steps.push(Step::new(
            format!("Moving to position {} ({})", pos, values[pos]),
            Event::List(ListEvent::Traverse { index: pos }),
            Some(2),
        ));
    }
    steps.push(Step::new(
        format!("Inserting {} after position {}", value, after),
        Event::List(ListEvent::Insert { after, value }),
        Some(6),
    ));
    steps.push(Step::new("Insert completed!", Event::Done(Outcome::Finished), None));
    Trace { algorithm: Algorithm::ListInsert, steps, code: INSERT_CODE }
}

/// Walk the list from the head, comparing each node against `target`.
pub fn search(list: &LinkedList, target: i64) -> Trace {
    let mut steps = Vec::new();
    for (pos, value) in list.values().into_iter().enumerate() {
        steps.push(Step::new(
            format!("Checking position {}: {}", pos, value),
            Event::List(ListEvent::Traverse { index: pos }),
            Some(3),
        ));
        if value == target {
            steps.push(Step::new(
                format!("Found {} at position {}", target, pos),
                Event::Done(Outcome::FoundAt { index: pos }),
                Some(4),
            ));
            return Trace { algorithm: Algorithm::ListSearch, steps, code: SEARCH_CODE };
        }
    }
    steps.push(Step::new(
        format!("Value {} not found", target),
        Event::Done(Outcome::NotFound),
        Some(8),
    ));
    Trace { algorithm: Algorithm::ListSearch, steps, code: SEARCH_CODE }
}

/// Bubble sort over the node values. Values are swapped in place; the
/// links never change.
pub fn sort(list: &LinkedList) -> Trace {
    let mut values = list.values();
    let n = values.len();
    let mut steps = Vec::new();
    for i in 0..n {
        for j in 0..n - i - 1 {
            steps.push(Step::new(
                format!("Comparing {} and {}", values[j], values[j + 1]),
                Event::List(ListEvent::Compare { i: j, j: j + 1 }),
                Some(3),
            ));
            if values[j] > values[j + 1] {
                steps.push(Step::new(
                    format!("Swapping {} and {}", values[j], values[j + 1]),
                    Event::List(ListEvent::SwapValues { i: j, j: j + 1 }),
                    Some(4),
                ));
                values.swap(j, j + 1);
            }
        }
        steps.push(Step::new(
            format!("Position {} is sorted", n - i - 1),
            Event::List(ListEvent::Sorted { index: n - i - 1 }),
            Some(8),
        ));
    }
    steps.push(Step::new("Sorting completed!", Event::Done(Outcome::Finished), None));
    Trace { algorithm: Algorithm::ListSort, steps, code: SORT_CODE }
}
