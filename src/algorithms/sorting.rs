//! Sorting trace generators

use crate::trace::{Algorithm, ArrayEvent, Event, Outcome, Step, Trace};

pub const BUBBLE_CODE: &[&str] = &[
    "for i in 0..n {",
    "    for j in 0..n - i - 1 {",
    "        if arr[j] > arr[j + 1] {",
    "            arr.swap(j, j + 1);",
    "        }",
    "    }",
    "    // arr[n - i - 1] is now in place",
    "}",
];

pub const QUICK_CODE: &[&str] = &[
    "fn quick_sort(arr, low, high) {",
    "    if low < high {",
    "        let p = partition(arr, low, high);",
    "        quick_sort(arr, low, p - 1);",
    "        quick_sort(arr, p + 1, high);",
    "    }",
    "}",
    "fn partition(arr, low, high) {",
    "    let pivot = arr[high];",
    "    let mut i = low;",
    "    for j in low..high {",
    "        if arr[j] <= pivot {",
    "            arr.swap(i, j);",
    "            i += 1;",
    "        }",
    "    }",
    "    arr.swap(i, high);",
    "    i",
    "}",
];

pub const HEAP_CODE: &[&str] = &[
    "fn heap_sort(arr) {",
    "    let n = arr.len();",
    "    for i in (0..n / 2).rev() { heapify(arr, n, i); }",
    "    for end in (1..n).rev() {",
    "        arr.swap(0, end);",
    "        heapify(arr, end, 0);",
    "    }",
    "}",
    "fn heapify(arr, n, root) {",
    "    let mut largest = root;",
    "    if left < n && arr[left] > arr[largest] { largest = left; }",
    "    if right < n && arr[right] > arr[largest] { largest = right; }",
    "    if largest != root {",
    "        arr.swap(root, largest);",
    "        heapify(arr, n, largest);",
    "    }",
    "}",
];

/// Bubble sort. Emits exactly n(n-1)/2 comparison steps; swap steps
/// appear only for comparisons that found an inversion.
pub fn bubble_sort(values: &[i64]) -> Trace {
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut steps = Vec::new();
    for i in 0..n {
        for j in 0..n - i - 1 {
            steps.push(Step::new(
                format!("Comparing {} and {}", arr[j], arr[j + 1]),
                Event::Array(ArrayEvent::Compare { i: j, j: j + 1 }),
                Some(2),
            ));
            if arr[j] > arr[j + 1] {
                steps.push(Step::new(
                    format!("Swapping {} and {}", arr[j], arr[j + 1]),
                    Event::Array(ArrayEvent::Swap { i: j, j: j + 1 }),
                    Some(3),
                ));
                arr.swap(j, j + 1);
            }
        }
        steps.push(Step::new(
            format!("Position {} is sorted", n - i - 1),
            Event::Array(ArrayEvent::Sorted { index: n - i - 1 }),
            Some(6),
        ));
    }
    steps.push(Step::new(
        "Sorting completed!",
        Event::Done(Outcome::Finished),
        None,
    ));
    Trace { algorithm: Algorithm::BubbleSort, steps, code: BUBBLE_CODE }
}

/// Quick sort with Lomuto partitioning, pivot at the high end.
/// Degenerate self-swaps are not emitted.
pub fn quick_sort(values: &[i64]) -> Trace {
    let mut arr = values.to_vec();
    let mut steps = Vec::new();
    if !arr.is_empty() {
        let high = arr.len() - 1;
        quick(&mut arr, 0, high, &mut steps);
    }
    for index in 0..arr.len() {
        steps.push(Step::new(
            format!("Position {} is sorted", index),
            Event::Array(ArrayEvent::Sorted { index }),
            None,
        ));
    }
    steps.push(Step::new(
        "Sorting completed!",
        Event::Done(Outcome::Finished),
        None,
    ));
    Trace { algorithm: Algorithm::QuickSort, steps, code: QUICK_CODE }
}

fn quick(arr: &mut [i64], low: usize, high: usize, steps: &mut Vec<Step>) {
    if low >= high {
        return;
    }
    steps.push(Step::new(
        format!("Partitioning arr[{}..={}]", low, high),
        Event::Array(ArrayEvent::Partition { low, high }),
        Some(0),
    ));
    steps.push(Step::new(
        format!("Choosing pivot {}", arr[high]),
        Event::Array(ArrayEvent::Pivot { index: high }),
        Some(8),
    ));
    let mut i = low;
    for j in low..high {
        steps.push(Step::new(
            format!("Comparing {} with pivot {}", arr[j], arr[high]),
            Event::Array(ArrayEvent::Compare { i: j, j: high }),
            Some(11),
        ));
        if arr[j] <= arr[high] {
            if i != j {
                steps.push(Step::new(
                    format!("Swapping {} and {}", arr[i], arr[j]),
                    Event::Array(ArrayEvent::Swap { i, j }),
                    Some(12),
                ));
                arr.swap(i, j);
            }
            i += 1;
        }
    }
    if i != high {
        steps.push(Step::new(
            format!("Moving pivot {} into place", arr[high]),
            Event::Array(ArrayEvent::Swap { i, j: high }),
            Some(16),
        ));
        arr.swap(i, high);
    }
    steps.push(Step::new(
        format!("Pivot placed at position {}", i),
        Event::Array(ArrayEvent::PivotPlaced { index: i }),
        Some(2),
    ));
    if i > low {
        quick(arr, low, i - 1, steps);
    }
    if i < high {
        quick(arr, i + 1, high, steps);
    }
}

/// Heap sort over a max-heap built in place.
pub fn heap_sort(values: &[i64]) -> Trace {
    let mut arr = values.to_vec();
    let n = arr.len();
    let mut steps = Vec::new();
    for i in (0..n / 2).rev() {
        steps.push(Step::new(
            format!("Building heap: heapify at {}", i),
            Event::Array(ArrayEvent::Heapify { root: i }),
            Some(2),
        ));
        heapify(&mut arr, n, i, &mut steps);
    }
    for end in (1..n).rev() {
        steps.push(Step::new(
            format!("Moving max {} to position {}", arr[0], end),
            Event::Array(ArrayEvent::Swap { i: 0, j: end }),
            Some(4),
        ));
        arr.swap(0, end);
        steps.push(Step::new(
            format!("Position {} is sorted", end),
            Event::Array(ArrayEvent::Sorted { index: end }),
            Some(3),
        ));
        heapify(&mut arr, end, 0, &mut steps);
    }
    if n > 0 {
        steps.push(Step::new(
            "Position 0 is sorted",
            Event::Array(ArrayEvent::Sorted { index: 0 }),
            Some(3),
        ));
    }
    steps.push(Step::new(
        "Sorting completed!",
        Event::Done(Outcome::Finished),
        None,
    ));
    Trace { algorithm: Algorithm::HeapSort, steps, code: HEAP_CODE }
}

fn heapify(arr: &mut [i64], n: usize, root: usize, steps: &mut Vec<Step>) {
    steps.push(Step::new(
        format!("Heapifying subtree at {}", root),
        Event::Array(ArrayEvent::Heapify { root }),
        Some(9),
    ));
    let mut largest = root;
    let left = 2 * root + 1;
    let right = 2 * root + 2;
    if left < n {
        steps.push(Step::new(
            format!("Comparing left child {} with {}", arr[left], arr[largest]),
            Event::Array(ArrayEvent::Compare { i: left, j: largest }),
            Some(10),
        ));
        if arr[left] > arr[largest] {
            largest = left;
        }
    }
    if right < n {
        steps.push(Step::new(
            format!("Comparing right child {} with {}", arr[right], arr[largest]),
            Event::Array(ArrayEvent::Compare { i: right, j: largest }),
            Some(11),
        ));
        if arr[right] > arr[largest] {
            largest = right;
        }
    }
    if largest != root {
        steps.push(Step::new(
            format!("Swapping {} and {}", arr[root], arr[largest]),
            Event::Array(ArrayEvent::Swap { i: root, j: largest }),
            Some(13),
        ));
        arr.swap(root, largest);
        heapify(arr, n, largest, steps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::snapshot::ArraySnapshot;

    fn final_array(trace: &Trace, values: &[i64]) -> Vec<i64> {
        let mut snap = ArraySnapshot::new(values.to_vec());
        for step in &trace.steps {
            if let Event::Array(event) = &step.event {
                snap.apply(event);
            }
        }
        snap.values
    }

    fn count_compares(trace: &Trace) -> usize {
        trace
            .steps
            .iter()
            .filter(|s| matches!(s.event, Event::Array(ArrayEvent::Compare { .. })))
            .count()
    }

    #[test]
    fn bubble_emits_quadratic_compares() {
        let values = vec![9, 1, 8, 2, 7, 3];
        let trace = bubble_sort(&values);
        let n = values.len();
        assert_eq!(count_compares(&trace), n * (n - 1) / 2);
    }

    #[test]
    fn bubble_swaps_only_on_inversions() {
        let trace = bubble_sort(&[1, 2, 3]);
        assert!(!trace
            .steps
            .iter()
            .any(|s| matches!(s.event, Event::Array(ArrayEvent::Swap { .. }))));
    }

    #[test]
    fn all_sorters_agree() {
        let values = vec![1, 5, 7, 2, 2, 3];
        let expected = vec![1, 2, 2, 3, 5, 7];
        assert_eq!(final_array(&bubble_sort(&values), &values), expected);
        assert_eq!(final_array(&quick_sort(&values), &values), expected);
        assert_eq!(final_array(&heap_sort(&values), &values), expected);
    }

    #[test]
    fn quick_never_swaps_an_index_with_itself() {
        let trace = quick_sort(&[3, 3, 3, 1, 2]);
        for step in &trace.steps {
            if let Event::Array(ArrayEvent::Swap { i, j }) = step.event {
                assert_ne!(i, j);
            }
        }
    }

    #[test]
    fn empty_input_yields_only_the_done_step() {
        for trace in [bubble_sort(&[]), quick_sort(&[]), heap_sort(&[])] {
            assert_eq!(trace.steps.len(), 1);
            assert!(trace.steps[0].is_done());
        }
    }

    #[test]
    fn traces_end_with_done() {
        for trace in [bubble_sort(&[2, 1]), quick_sort(&[2, 1]), heap_sort(&[2, 1])] {
            assert!(trace.steps.last().is_some_and(|s| s.is_done()));
        }
    }
}
