//! Step snapshots recorded while an algorithm runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Primitive value held in a step's sequence.
pub type Value = i64;

/// Why an index is emphasized in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRole {
    /// Two elements are being compared
    Comparing,
    /// Two elements were just exchanged
    Swapping,
    /// Element chosen (search hit, current minimum, accepted activity, coin taken)
    Selected,
    /// Element is in its final sorted position
    Sorted,
    /// Pointer is currently on this element
    Visiting,
    /// Element was examined and ruled out
    Rejected,
}

impl HighlightRole {
    /// Every role, in declaration order.
    pub const ALL: [HighlightRole; 6] = [
        HighlightRole::Comparing,
        HighlightRole::Swapping,
        HighlightRole::Selected,
        HighlightRole::Sorted,
        HighlightRole::Visiting,
        HighlightRole::Rejected,
    ];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightRole::Comparing => "comparing",
            HighlightRole::Swapping => "swapping",
            HighlightRole::Selected => "selected",
            HighlightRole::Sorted => "sorted",
            HighlightRole::Visiting => "visiting",
            HighlightRole::Rejected => "rejected",
        }
    }
}

/// An index tagged with a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub index: usize,
    pub role: HighlightRole,
}

/// Immutable snapshot of algorithm state at one point in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    sequence: Vec<Value>,
    highlights: Vec<Highlight>,
    cursor: Option<usize>,
    annotation: Option<String>,
    terminal: bool,
}

impl Step {
    /// Array content at this instant.
    pub fn sequence(&self) -> &[Value] {
        &self.sequence
    }

    /// Highlights ordered by index, at most one per index.
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// True only for the last step of a run.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Role assigned to `index`, if highlighted.
    pub fn role_at(&self, index: usize) -> Option<HighlightRole> {
        self.highlights
            .binary_search_by_key(&index, |h| h.index)
            .ok()
            .map(|pos| self.highlights[pos].role)
    }

    /// Indices carrying `role`, ascending.
    pub fn indices_with(&self, role: HighlightRole) -> impl Iterator<Item = usize> + '_ {
        self.highlights
            .iter()
            .filter(move |h| h.role == role)
            .map(|h| h.index)
    }
}

/// Build the single-step run used for empty, trivial or malformed input.
pub fn degenerate(sequence: Vec<Value>, annotation: impl Into<String>) -> Vec<Step> {
    vec![Step {
        sequence,
        highlights: Vec::new(),
        cursor: None,
        annotation: Some(annotation.into()),
        terminal: true,
    }]
}

/// Highlights, cursor and label for the next recorded step.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    marks: BTreeMap<usize, HighlightRole>,
    cursor: Option<usize>,
    annotation: Option<String>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `index` with `role`. A later mark on the same index wins.
    pub fn mark(mut self, index: usize, role: HighlightRole) -> Self {
        self.marks.insert(index, role);
        self
    }

    /// Mark every index yielded by `indices` with `role`.
    pub fn mark_all(mut self, indices: impl IntoIterator<Item = usize>, role: HighlightRole) -> Self {
        for index in indices {
            self.marks.insert(index, role);
        }
        self
    }

    pub fn cursor(mut self, index: usize) -> Self {
        self.cursor = Some(index);
        self
    }

    pub fn note(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    fn into_step(self, sequence: &[Value], terminal: bool) -> Step {
        Step {
            sequence: sequence.to_vec(),
            highlights: self
                .marks
                .into_iter()
                .map(|(index, role)| Highlight { index, role })
                .collect(),
            cursor: self.cursor,
            annotation: self.annotation,
            terminal,
        }
    }
}

/// Accumulates the steps of one run.
///
/// The first recorded sequence fixes the run length; every later step must
/// keep it, and every highlight or cursor must index into it.
#[derive(Debug, Default)]
pub struct Recorder {
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Record an intermediate step.
    pub fn record(&mut self, sequence: &[Value], frame: Frame) {
        self.push(sequence, frame, false);
    }

    /// Record the final, fully resolved step and return the run.
    pub fn finish(mut self, sequence: &[Value], frame: Frame) -> Vec<Step> {
        self.push(sequence, frame, true);
        self.steps
    }

    /// Close the run by marking the most recent step terminal.
    pub fn conclude(mut self) -> Vec<Step> {
        debug_assert!(!self.steps.is_empty(), "concluding an empty run");
        if let Some(last) = self.steps.last_mut() {
            last.terminal = true;
        }
        self.steps
    }

    fn push(&mut self, sequence: &[Value], frame: Frame, terminal: bool) {
        debug_assert!(
            self.steps
                .first()
                .map_or(true, |first| first.sequence.len() == sequence.len()),
            "sequence length changed mid-run"
        );
        debug_assert!(
            frame.marks.keys().all(|&i| i < sequence.len()),
            "highlight index out of range"
        );
        debug_assert!(
            frame.cursor.map_or(true, |c| c < sequence.len()),
            "cursor out of range"
        );
        self.steps.push(frame.into_step(sequence, terminal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_mark_overrides_earlier() {
        let mut rec = Recorder::new();
        rec.record(
            &[1, 2, 3],
            Frame::new()
                .mark(1, HighlightRole::Comparing)
                .mark(1, HighlightRole::Swapping),
        );
        let steps = rec.conclude();
        assert_eq!(steps[0].role_at(1), Some(HighlightRole::Swapping));
        assert_eq!(steps[0].highlights().len(), 1);
    }

    #[test]
    fn highlights_are_ordered_by_index() {
        let steps = Recorder::new().finish(
            &[5, 6, 7, 8],
            Frame::new()
                .mark(3, HighlightRole::Sorted)
                .mark(0, HighlightRole::Visiting)
                .mark(2, HighlightRole::Sorted),
        );
        let indices: Vec<_> = steps[0].highlights().iter().map(|h| h.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
        assert_eq!(steps[0].indices_with(HighlightRole::Sorted).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(steps[0].role_at(1), None);
    }

    #[test]
    fn only_final_step_is_terminal() {
        let mut rec = Recorder::new();
        rec.record(&[2, 1], Frame::new());
        rec.record(&[1, 2], Frame::new());
        let steps = rec.finish(&[1, 2], Frame::new().note("done"));

        assert_eq!(steps.len(), 3);
        assert!(!steps[0].is_terminal());
        assert!(!steps[1].is_terminal());
        assert!(steps[2].is_terminal());
        assert_eq!(steps[2].annotation(), Some("done"));
    }

    #[test]
    fn conclude_marks_last_recorded_step() {
        let mut rec = Recorder::new();
        rec.record(&[1], Frame::new().cursor(0));
        let steps = rec.conclude();
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_terminal());
        assert_eq!(steps[0].cursor(), Some(0));
    }

    #[test]
    fn degenerate_is_single_terminal_step() {
        let steps = degenerate(Vec::new(), "nothing to sort");
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_terminal());
        assert!(steps[0].highlights().is_empty());
        assert_eq!(steps[0].annotation(), Some("nothing to sort"));
    }

    #[test]
    fn roles_serialize_snake_case() {
        for role in HighlightRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
