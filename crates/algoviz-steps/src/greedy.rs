//! Greedy choice demonstrations: activity selection and coin change.

use crate::algorithm::Activity;
use crate::step::{degenerate, Frame, HighlightRole, Recorder, Step, Value};

fn with_choices(frame: Frame, chosen: &[bool], considered: usize) -> Frame {
    let (picked, skipped): (Vec<usize>, Vec<usize>) =
        (0..considered).partition(|&i| chosen[i]);
    frame
        .mark_all(skipped, HighlightRole::Rejected)
        .mark_all(picked, HighlightRole::Selected)
}

/// Earliest-finish-first activity selection.
///
/// The sequence holds finish times in processing order (stable sort by
/// finish time); an activity is accepted when it starts no earlier than the
/// finish of the last accepted one.
pub fn activity_selection(activities: &[Activity]) -> Vec<Step> {
    if activities.is_empty() {
        return degenerate(Vec::new(), "no activities to schedule");
    }
    if let Some((i, bad)) = activities
        .iter()
        .enumerate()
        .find(|(_, a)| a.start > a.finish)
    {
        return degenerate(
            activities.iter().map(|a| a.finish).collect(),
            format!(
                "activity {} starts at {} after it finishes at {}",
                i + 1,
                bad.start,
                bad.finish
            ),
        );
    }

    let mut order: Vec<Activity> = activities.to_vec();
    order.sort_by_key(|a| a.finish);
    let finishes: Vec<Value> = order.iter().map(|a| a.finish).collect();
    let n = order.len();

    let mut rec = Recorder::new();
    let mut chosen = vec![false; n];

    rec.record(
        &finishes,
        Frame::new().note(format!("sorted {n} activities by finish time")),
    );

    chosen[0] = true;
    let mut last_finish = order[0].finish;
    rec.record(
        &finishes,
        with_choices(Frame::new(), &chosen, 1).cursor(0).note(format!(
            "select ({}, {}), it finishes first",
            order[0].start, order[0].finish
        )),
    );

    for k in 1..n {
        let Activity { start, finish } = order[k];
        let note = if start >= last_finish {
            chosen[k] = true;
            let note = format!("({start}, {finish}) starts at or after {last_finish}, select it");
            last_finish = finish;
            note
        } else {
            format!("({start}, {finish}) starts before {last_finish}, overlaps")
        };
        rec.record(
            &finishes,
            with_choices(Frame::new(), &chosen, k + 1).cursor(k).note(note),
        );
    }

    let picked: Vec<String> = order
        .iter()
        .zip(&chosen)
        .filter(|(_, picked)| **picked)
        .map(|(a, _)| format!("({}, {})", a.start, a.finish))
        .collect();
    rec.finish(
        &finishes,
        with_choices(Frame::new(), &chosen, n).note(format!(
            "selected {} activities: {}",
            picked.len(),
            picked.join(", ")
        )),
    )
}

/// Largest-coin-first change making.
///
/// The sequence holds the distinct denominations, largest first. The
/// greedy choice may leave a remainder for non-canonical coin systems;
/// the final annotation reports it.
pub fn coin_change(coins: &[Value], amount: Value) -> Vec<Step> {
    if coins.is_empty() {
        return degenerate(Vec::new(), "no coin denominations");
    }
    if coins.iter().any(|&c| c <= 0) {
        return degenerate(coins.to_vec(), "coin denominations must be positive");
    }

    let mut denominations = coins.to_vec();
    denominations.sort_unstable_by(|a, b| b.cmp(a));
    denominations.dedup();

    if amount < 0 {
        return degenerate(denominations, format!("cannot make change for {amount}"));
    }
    if amount == 0 {
        return degenerate(denominations, "nothing to change for 0");
    }

    let n = denominations.len();
    let mut rec = Recorder::new();
    let mut used = vec![false; n];
    let mut taken: Vec<Value> = Vec::new();
    let mut remaining = amount;
    let mut considered = 0;

    rec.record(
        &denominations,
        Frame::new().note(format!("making change for {amount}, largest coin first")),
    );

    for (i, &coin) in denominations.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        considered = i + 1;

        let note = if coin > remaining {
            format!("{coin} is larger than {remaining}, skipping")
        } else {
            format!("considering {coin} with {remaining} remaining")
        };
        rec.record(
            &denominations,
            with_choices(Frame::new(), &used, i)
                .mark(i, HighlightRole::Visiting)
                .cursor(i)
                .note(note),
        );

        while coin <= remaining {
            remaining -= coin;
            used[i] = true;
            taken.push(coin);
            rec.record(
                &denominations,
                with_choices(Frame::new(), &used, i + 1)
                    .cursor(i)
                    .note(format!("take {coin}, {remaining} remaining")),
            );
        }
    }

    let summary = if remaining == 0 {
        let parts: Vec<String> = taken.iter().map(Value::to_string).collect();
        format!("{amount} = {} ({} coins)", parts.join(" + "), taken.len())
    } else {
        format!("greedy choice leaves {remaining} of {amount} unpaid")
    };
    rec.finish(
        &denominations,
        with_choices(Frame::new(), &used, considered).note(summary),
    )
}
