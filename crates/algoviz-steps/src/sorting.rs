//! Comparison sorts, recorded one comparison or swap at a time.

use crate::step::{degenerate, Frame, HighlightRole, Recorder, Step, Value};

/// Runs with fewer than two elements have nothing to animate.
fn trivial(values: &[Value]) -> Option<Vec<Step>> {
    match values.len() {
        0 => Some(degenerate(Vec::new(), "empty array, nothing to sort")),
        1 => Some(degenerate(values.to_vec(), "a single element is already sorted")),
        _ => None,
    }
}

fn sorted(range: std::ops::Range<usize>) -> Frame {
    Frame::new().mark_all(range, HighlightRole::Sorted)
}

fn finish_sorted(rec: Recorder, a: &[Value]) -> Vec<Step> {
    rec.finish(a, sorted(0..a.len()).note("array sorted"))
}

/// Bubble sort with early exit when a pass makes no swap.
///
/// Each pass compares neighbours `(j, j + 1)` left to right and bubbles the
/// largest remaining value to the end of the unsorted region.
pub fn bubble_sort(values: &[Value]) -> Vec<Step> {
    if let Some(steps) = trivial(values) {
        return steps;
    }

    let mut a = values.to_vec();
    let n = a.len();
    let mut rec = Recorder::new();
    // indices in sorted_from..n are final
    let mut sorted_from = n;

    rec.record(&a, Frame::new().note("initial array"));

    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            let (left, right) = (a[j], a[j + 1]);
            rec.record(
                &a,
                sorted(sorted_from..n)
                    .mark(j, HighlightRole::Comparing)
                    .mark(j + 1, HighlightRole::Comparing)
                    .cursor(j)
                    .note(format!("comparing {left} and {right}")),
            );
            if left > right {
                a.swap(j, j + 1);
                swapped = true;
                rec.record(
                    &a,
                    sorted(sorted_from..n)
                        .mark(j, HighlightRole::Swapping)
                        .mark(j + 1, HighlightRole::Swapping)
                        .cursor(j)
                        .note(format!("{left} > {right}, swapping")),
                );
            }
        }
        sorted_from = n - 1 - pass;
        if !swapped {
            break;
        }
    }

    finish_sorted(rec, &a)
}

/// Selection sort: scan for the minimum of the unsorted suffix and swap it
/// into place.
pub fn selection_sort(values: &[Value]) -> Vec<Step> {
    if let Some(steps) = trivial(values) {
        return steps;
    }

    let mut a = values.to_vec();
    let n = a.len();
    let mut rec = Recorder::new();

    rec.record(&a, Frame::new().note("initial array"));

    for i in 0..n - 1 {
        let mut min = i;
        rec.record(
            &a,
            sorted(0..i)
                .mark(i, HighlightRole::Selected)
                .cursor(i)
                .note(format!("assume {} at index {i} is the minimum", a[i])),
        );

        for j in i + 1..n {
            rec.record(
                &a,
                sorted(0..i)
                    .mark(min, HighlightRole::Selected)
                    .mark(j, HighlightRole::Comparing)
                    .cursor(j)
                    .note(format!("comparing {} with minimum {}", a[j], a[min])),
            );
            if a[j] < a[min] {
                min = j;
                rec.record(
                    &a,
                    sorted(0..i)
                        .mark(min, HighlightRole::Selected)
                        .cursor(j)
                        .note(format!("new minimum {}", a[min])),
                );
            }
        }

        if min != i {
            let (first, smallest) = (a[i], a[min]);
            a.swap(i, min);
            rec.record(
                &a,
                sorted(0..i)
                    .mark(i, HighlightRole::Swapping)
                    .mark(min, HighlightRole::Swapping)
                    .note(format!("swapping {first} and {smallest}")),
            );
        }
    }

    finish_sorted(rec, &a)
}

/// Insertion sort, shown as adjacent swaps walking each new element left.
pub fn insertion_sort(values: &[Value]) -> Vec<Step> {
    if let Some(steps) = trivial(values) {
        return steps;
    }

    let mut a = values.to_vec();
    let n = a.len();
    let mut rec = Recorder::new();

    rec.record(&a, Frame::new().note("initial array"));

    for i in 1..n {
        rec.record(
            &a,
            Frame::new()
                .mark(i, HighlightRole::Selected)
                .cursor(i)
                .note(format!("inserting {}", a[i])),
        );

        let mut j = i;
        while j > 0 {
            let (left, right) = (a[j - 1], a[j]);
            rec.record(
                &a,
                Frame::new()
                    .mark(j - 1, HighlightRole::Comparing)
                    .mark(j, HighlightRole::Comparing)
                    .cursor(j)
                    .note(format!("comparing {left} and {right}")),
            );
            if left <= right {
                break;
            }
            a.swap(j - 1, j);
            rec.record(
                &a,
                Frame::new()
                    .mark(j - 1, HighlightRole::Swapping)
                    .mark(j, HighlightRole::Swapping)
                    .cursor(j - 1)
                    .note(format!("{left} > {right}, shifting {right} left")),
            );
            j -= 1;
        }
    }

    finish_sorted(rec, &a)
}
