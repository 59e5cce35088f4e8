//! Search trace generators

use super::sorting::bubble_sort;
use crate::trace::{Algorithm, ArrayEvent, Event, Outcome, Step, Trace};

pub const LINEAR_CODE: &[&str] = &[
    "for i in 0..arr.len() {",
    "    if arr[i] == target {",
    "        return Some(i);",
    "    }",
    "}",
    "None",
];

pub const BINARY_CODE: &[&str] = &[
    "bubble_sort(arr);",
    "let (mut low, mut high) = (0, arr.len() - 1);",
    "while low <= high {",
    "    let mid = (low + high) / 2;",
    "    if arr[mid] == target {",
    "        return Some(mid);",
    "    } else if arr[mid] < target {",
    "        low = mid + 1;",
    "    } else {",
    "        high = mid - 1;",
    "    }",
    "}",
    "None",
];

/// Linear search, probing left to right.
pub fn linear_search(values: &[i64], target: i64) -> Trace {
    let mut steps = Vec::new();
    for (i, &value) in values.iter().enumerate() {
        steps.push(Step::new(
            format!("Checking position {}: {}", i, value),
            Event::Array(ArrayEvent::Probe { index: i }),
            Some(1),
        ));
        if value == target {
            steps.push(Step::new(
                format!("Found {} at position {}", target, i),
                Event::Done(Outcome::FoundAt { index: i }),
                Some(2),
            ));
            return Trace { algorithm: Algorithm::LinearSearch, steps, code: LINEAR_CODE };
        }
    }
    steps.push(Step::new(
        format!("Value {} not found", target),
        Event::Done(Outcome::NotFound),
        Some(5),
    ));
    Trace { algorithm: Algorithm::LinearSearch, steps, code: LINEAR_CODE }
}

/// Binary search. The input is sorted first with bubble sort and the
/// sorting steps are part of the trace; the reported index refers to
/// the sorted array.
pub fn binary_search(values: &[i64], target: i64) -> Trace {
    let mut steps = Vec::new();
    let sort = bubble_sort(values);
    let mut arr = values.to_vec();
    for step in sort.steps {
        if step.is_done() {
            continue;
        }
        if let Event::Array(ArrayEvent::Swap { i, j }) = step.event {
            arr.swap(i, j);
        }
        // the whole sort prefix maps to the one sort line in this listing
        steps.push(Step::new(step.text, step.event, Some(0)));
    }

    let mut low: i64 = 0;
    let mut high: i64 = arr.len() as i64 - 1;
    while low <= high {
        let mid = (low + high) / 2;
        steps.push(Step::new(
            format!("Searching in [{}, {}], middle is {}", low, high, mid),
            Event::Array(ArrayEvent::Window {
                low: low as usize,
                high: high as usize,
                mid: mid as usize,
            }),
            Some(3),
        ));
        let value = arr[mid as usize];
        if value == target {
            steps.push(Step::new(
                format!("Found {} at position {}", target, mid),
                Event::Done(Outcome::FoundAt { index: mid as usize }),
                Some(5),
            ));
            return Trace { algorithm: Algorithm::BinarySearch, steps, code: BINARY_CODE };
        } else if value < target {
            low = mid + 1;
            steps.push(Step::new(
                format!("{} < {}, moving low to {}", value, target, low),
                Event::Array(ArrayEvent::MoveLow { to: low as usize }),
                Some(7),
            ));
        } else {
            high = mid - 1;
            steps.push(Step::new(
                format!("{} > {}, moving high to {}", value, target, high.max(0)),
                Event::Array(ArrayEvent::MoveHigh { to: high.max(0) as usize }),
                Some(9),
            ));
        }
    }
    steps.push(Step::new(
        format!("Value {} not found", target),
        Event::Done(Outcome::NotFound),
        Some(12),
    ));
    Trace { algorithm: Algorithm::BinarySearch, steps, code: BINARY_CODE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_finds_first_occurrence() {
        let trace = linear_search(&[4, 7, 7, 2], 7);
        assert_eq!(trace.outcome(), Some(&Outcome::FoundAt { index: 1 }));
    }

    #[test]
    fn linear_probes_everything_when_absent() {
        let trace = linear_search(&[4, 7, 2], 9);
        let probes = trace
            .steps
            .iter()
            .filter(|s| matches!(s.event, Event::Array(ArrayEvent::Probe { .. })))
            .count();
        assert_eq!(probes, 3);
        assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
    }

    #[test]
    fn binary_sorts_then_finds() {
        // sorted form is [1, 2, 2, 3, 5, 7]; 5 sits at index 4
        let trace = binary_search(&[1, 5, 7, 2, 2, 3], 5);
        assert_eq!(trace.outcome(), Some(&Outcome::FoundAt { index: 4 }));
    }

    #[test]
    fn binary_reports_missing_target() {
        let trace = binary_search(&[3, 1, 2], 9);
        assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
        let trace = binary_search(&[3, 1, 2], 0);
        assert_eq!(trace.outcome(), Some(&Outcome::NotFound));
    }
}
