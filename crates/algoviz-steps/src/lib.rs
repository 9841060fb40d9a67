//! Algorithm Step Generators
//!
//! Turns the input of a textbook algorithm into the complete, finite list of
//! [`Step`] snapshots a visualization plays back.
//!
//! # Contract
//!
//! - Generation is pure: same input, same steps. No clock, no randomness.
//! - A run is never empty; its first step is the state before any work and
//!   only its last step is terminal.
//! - `sequence` length is fixed for a run and every highlight indexes into it.
//! - Empty or malformed input becomes a single explanatory step. The only
//!   error is [`Error::InvalidConfiguration`]: an algorithm wired to an
//!   input of the wrong shape.
//!
//! # Example
//!
//! ```
//! use algoviz_steps::{generate, Algorithm, AlgorithmInput, HighlightRole};
//!
//! let steps = generate(
//!     Algorithm::LinearSearch,
//!     &AlgorithmInput::search(vec![3, 7, 1, 9, 5, 2, 8], 5),
//! )?;
//!
//! assert_eq!(steps.len(), 5);
//! assert_eq!(steps[4].role_at(4), Some(HighlightRole::Selected));
//! # Ok::<(), algoviz_steps::Error>(())
//! ```

mod algorithm;
mod error;
mod greedy;
mod input;
mod searching;
mod sorting;
mod step;

pub use algorithm::{generate, Activity, Algorithm, AlgorithmInput, InputShape, UnknownAlgorithm};
pub use error::{Error, Result};
pub use input::{generate_from_raw, parse_activities, parse_values, MalformedInput, RawInput};
pub use step::{degenerate, Frame, Highlight, HighlightRole, Recorder, Step, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_input() -> impl Strategy<Value = (Algorithm, AlgorithmInput)> {
        let values = prop::collection::vec(-20i64..20, 0..10);
        prop_oneof![
            values.clone().prop_map(|v| (Algorithm::BubbleSort, AlgorithmInput::sequence(v))),
            values.clone().prop_map(|v| (Algorithm::SelectionSort, AlgorithmInput::sequence(v))),
            values.clone().prop_map(|v| (Algorithm::InsertionSort, AlgorithmInput::sequence(v))),
            (values.clone(), -20i64..20)
                .prop_map(|(v, t)| (Algorithm::LinearSearch, AlgorithmInput::search(v, t))),
            (values.clone(), -20i64..20).prop_map(|(mut v, t)| {
                v.sort();
                (Algorithm::BinarySearch, AlgorithmInput::search(v, t))
            }),
            prop::collection::vec((0i64..20, 0i64..10), 0..8).prop_map(|pairs| {
                let acts = pairs.into_iter().map(|(s, d)| Activity::new(s, s + d)).collect::<Vec<_>>();
                (Algorithm::ActivitySelection, AlgorithmInput::activities(acts))
            }),
            (prop::collection::vec(1i64..30, 1..5), 0i64..100)
                .prop_map(|(c, a)| (Algorithm::CoinChange, AlgorithmInput::change(c, a))),
        ]
    }

    proptest! {
        #[test]
        fn prop_every_run_is_well_formed((algorithm, input) in arb_input()) {
            let steps = generate(algorithm, &input).unwrap();
            prop_assert!(!steps.is_empty());

            let len = steps[0].sequence().len();
            for (i, step) in steps.iter().enumerate() {
                prop_assert_eq!(step.sequence().len(), len);
                prop_assert_eq!(step.is_terminal(), i + 1 == steps.len());
                prop_assert!(step.highlights().iter().all(|h| h.index < len));
                prop_assert!(step.highlights().windows(2).all(|w| w[0].index < w[1].index));
                prop_assert!(step.cursor().map_or(true, |c| c < len));
            }
        }

        #[test]
        fn prop_generation_is_deterministic((algorithm, input) in arb_input()) {
            prop_assert_eq!(generate(algorithm, &input), generate(algorithm, &input));
        }

        #[test]
        fn prop_linear_search_hit_length_is_first_match((values, target) in
            (prop::collection::vec(0i64..5, 1..10), 0i64..5))
        {
            let steps = generate(Algorithm::LinearSearch, &AlgorithmInput::search(values.clone(), target)).unwrap();
            let expected = values.iter().position(|&v| v == target).map_or(values.len(), |i| i + 1);
            prop_assert_eq!(steps.len(), expected);
        }
    }
}
