//! Pointer-driven searches. Every probe is one step.

use crate::step::{degenerate, Frame, HighlightRole, Recorder, Step, Value};

/// Scan left to right; the matching probe (or the last miss) ends the run.
pub fn linear_search(values: &[Value], target: Value) -> Vec<Step> {
    if values.is_empty() {
        return degenerate(Vec::new(), format!("empty array, {target} not found"));
    }

    let last = values.len() - 1;
    let mut rec = Recorder::new();

    for (i, &value) in values.iter().enumerate() {
        let checked = Frame::new()
            .mark_all(0..i, HighlightRole::Rejected)
            .cursor(i);

        if value == target {
            rec.record(
                values,
                checked
                    .mark(i, HighlightRole::Selected)
                    .note(format!("found {target} at index {i}")),
            );
            return rec.conclude();
        }

        let frame = if i == last {
            checked
                .mark(i, HighlightRole::Rejected)
                .note(format!("{value} is not {target}; {target} not found"))
        } else {
            checked
                .mark(i, HighlightRole::Visiting)
                .note(format!("{value} is not {target}, moving on"))
        };
        rec.record(values, frame);
    }

    rec.conclude()
}

/// Classic inclusive-bounds binary search over ascending input.
pub fn binary_search(values: &[Value], target: Value) -> Vec<Step> {
    if values.is_empty() {
        return degenerate(Vec::new(), format!("empty array, {target} not found"));
    }
    if values.windows(2).any(|w| w[0] > w[1]) {
        return degenerate(values.to_vec(), "binary search needs input sorted in ascending order");
    }

    let n = values.len();
    let mut rec = Recorder::new();
    let (mut low, mut high) = (0usize, n - 1);
    rec.record(
        values,
        Frame::new().note(format!("searching {n} sorted values for {target}")),
    );

    loop {
        let mid = low + (high - low) / 2;
        let value = values[mid];
        let window = Frame::new()
            .mark_all((0..low).chain(high + 1..n), HighlightRole::Rejected)
            .cursor(mid);

        if value == target {
            rec.record(
                values,
                window
                    .mark(mid, HighlightRole::Selected)
                    .note(format!("found {target} at index {mid}")),
            );
            return rec.conclude();
        }

        let frame = window
            .mark_all(low..=high, HighlightRole::Visiting)
            .mark(mid, HighlightRole::Comparing);

        if value < target {
            rec.record(
                values,
                frame.note(format!("middle {value} < {target}, searching right half")),
            );
            if mid == high {
                break;
            }
            low = mid + 1;
        } else {
            rec.record(
                values,
                frame.note(format!("middle {value} > {target}, searching left half")),
            );
            if mid == low {
                break;
            }
            high = mid - 1;
        }
    }

    rec.finish(
        values,
        Frame::new()
            .mark_all(0..n, HighlightRole::Rejected)
            .note(format!("{target} not found")),
    )
}
