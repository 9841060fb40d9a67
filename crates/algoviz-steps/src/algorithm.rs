//! The closed set of demonstrable algorithms and their inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Error, Result};
use crate::step::{degenerate, Step, Value};
use crate::{greedy, searching, sorting};

/// Textbook procedure being demonstrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    LinearSearch,
    BinarySearch,
    ActivitySelection,
    CoinChange,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::LinearSearch,
        Algorithm::BinarySearch,
        Algorithm::ActivitySelection,
        Algorithm::CoinChange,
    ];

    /// Input shape this algorithm accepts.
    pub fn shape(&self) -> InputShape {
        match self {
            Algorithm::BubbleSort | Algorithm::SelectionSort | Algorithm::InsertionSort => {
                InputShape::Sequence
            }
            Algorithm::LinearSearch | Algorithm::BinarySearch => InputShape::Search,
            Algorithm::ActivitySelection => InputShape::Activities,
            Algorithm::CoinChange => InputShape::Change,
        }
    }

    /// Identifier used in config and on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "bubble_sort",
            Algorithm::SelectionSort => "selection_sort",
            Algorithm::InsertionSort => "insertion_sort",
            Algorithm::LinearSearch => "linear_search",
            Algorithm::BinarySearch => "binary_search",
            Algorithm::ActivitySelection => "activity_selection",
            Algorithm::CoinChange => "coin_change",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "Bubble sort",
            Algorithm::SelectionSort => "Selection sort",
            Algorithm::InsertionSort => "Insertion sort",
            Algorithm::LinearSearch => "Linear search",
            Algorithm::BinarySearch => "Binary search",
            Algorithm::ActivitySelection => "Activity selection",
            Algorithm::CoinChange => "Greedy coin change",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised algorithm identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Shape of the parameters an algorithm consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    /// A single array
    Sequence,
    /// An array plus a target value
    Search,
    /// A list of start/finish intervals
    Activities,
    /// Coin denominations plus an amount
    Change,
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputShape::Sequence => "sequence",
            InputShape::Search => "search",
            InputShape::Activities => "activities",
            InputShape::Change => "change",
        })
    }
}

/// One interval for activity selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub start: Value,
    pub finish: Value,
}

impl Activity {
    pub fn new(start: Value, finish: Value) -> Self {
        Self { start, finish }
    }
}

/// Algorithm-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum AlgorithmInput {
    Sequence { values: Vec<Value> },
    Search { values: Vec<Value>, target: Value },
    Activities { activities: Vec<Activity> },
    Change { coins: Vec<Value>, amount: Value },
}

impl AlgorithmInput {
    pub fn sequence(values: impl Into<Vec<Value>>) -> Self {
        AlgorithmInput::Sequence { values: values.into() }
    }

    pub fn search(values: impl Into<Vec<Value>>, target: Value) -> Self {
        AlgorithmInput::Search { values: values.into(), target }
    }

    pub fn activities(activities: impl Into<Vec<Activity>>) -> Self {
        AlgorithmInput::Activities { activities: activities.into() }
    }

    pub fn change(coins: impl Into<Vec<Value>>, amount: Value) -> Self {
        AlgorithmInput::Change { coins: coins.into(), amount }
    }

    /// Most array elements or activities a run may animate.
    pub const MAX_ITEMS: usize = 100;

    /// Most coins greedy change may hand out, bounded by `amount / smallest coin`.
    pub const MAX_COINS: Value = 1_000;

    pub fn shape(&self) -> InputShape {
        match self {
            AlgorithmInput::Sequence { .. } => InputShape::Sequence,
            AlgorithmInput::Search { .. } => InputShape::Search,
            AlgorithmInput::Activities { .. } => InputShape::Activities,
            AlgorithmInput::Change { .. } => InputShape::Change,
        }
    }

    /// Describe why this input would produce too many steps, if it would.
    pub fn oversize(&self) -> Option<String> {
        let items = match self {
            AlgorithmInput::Sequence { values } | AlgorithmInput::Search { values, .. } => {
                values.len()
            }
            AlgorithmInput::Activities { activities } => activities.len(),
            AlgorithmInput::Change { coins, amount } => {
                // non-positive coins are rejected by the generator itself
                let smallest = coins.iter().copied().filter(|&c| c > 0).min()?;
                let most = amount / smallest;
                if most > Self::MAX_COINS {
                    return Some(format!(
                        "{amount} would need up to {most} coins of {smallest}, limit is {}",
                        Self::MAX_COINS
                    ));
                }
                coins.len()
            }
        };
        (items > Self::MAX_ITEMS)
            .then(|| format!("{items} items, limit is {}", Self::MAX_ITEMS))
    }
}

/// Simulate `algorithm` over `input` and return every step of the run.
///
/// The run is never empty and its last step is terminal. Empty, malformed
/// or oversized input yields a single explanatory step; only a shape
/// mismatch between `algorithm` and `input` is an error.
pub fn generate(algorithm: Algorithm, input: &AlgorithmInput) -> Result<Vec<Step>> {
    if algorithm.shape() == input.shape() {
        if let Some(reason) = input.oversize() {
            return Ok(degenerate(Vec::new(), format!("input too large to animate: {reason}")));
        }
    }

    let steps = match (algorithm, input) {
        (Algorithm::BubbleSort, AlgorithmInput::Sequence { values }) => sorting::bubble_sort(values),
        (Algorithm::SelectionSort, AlgorithmInput::Sequence { values }) => {
            sorting::selection_sort(values)
        }
        (Algorithm::InsertionSort, AlgorithmInput::Sequence { values }) => {
            sorting::insertion_sort(values)
        }
        (Algorithm::LinearSearch, AlgorithmInput::Search { values, target }) => {
            searching::linear_search(values, *target)
        }
        (Algorithm::BinarySearch, AlgorithmInput::Search { values, target }) => {
            searching::binary_search(values, *target)
        }
        (Algorithm::ActivitySelection, AlgorithmInput::Activities { activities }) => {
            greedy::activity_selection(activities)
        }
        (Algorithm::CoinChange, AlgorithmInput::Change { coins, amount }) => {
            greedy::coin_change(coins, *amount)
        }
        (algorithm, input) => {
            return Err(Error::InvalidConfiguration {
                algorithm,
                expected: algorithm.shape(),
                actual: input.shape(),
            })
        }
    };
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_algorithm_accepts_its_own_shape() {
        for algorithm in Algorithm::ALL {
            let input = match algorithm.shape() {
                InputShape::Sequence => AlgorithmInput::sequence(vec![3, 1, 2]),
                InputShape::Search => AlgorithmInput::search(vec![1, 2, 3], 2),
                InputShape::Activities => {
                    AlgorithmInput::activities(vec![Activity::new(1, 2), Activity::new(2, 3)])
                }
                InputShape::Change => AlgorithmInput::change(vec![5, 1], 7),
            };
            let steps = generate(algorithm, &input).unwrap();
            assert!(!steps.is_empty(), "{algorithm} produced no steps");
            assert!(steps.last().unwrap().is_terminal());
        }
    }

    #[test]
    fn wrong_shape_is_invalid_configuration() {
        let err = generate(
            Algorithm::BubbleSort,
            &AlgorithmInput::search(vec![1, 2, 3], 2),
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::InvalidConfiguration {
                algorithm: Algorithm::BubbleSort,
                expected: InputShape::Sequence,
                actual: InputShape::Search,
            }
        );
        assert!(err.to_string().contains("expects sequence input, got search"));
    }

    fn descending(len: usize) -> Vec<Value> {
        (0..len as Value).rev().collect()
    }

    fn is_too_large(steps: &[Step]) -> bool {
        steps.len() == 1
            && steps[0].is_terminal()
            && steps[0]
                .annotation()
                .is_some_and(|a| a.starts_with("input too large to animate"))
    }

    #[test]
    fn arrays_up_to_the_limit_are_animated() {
        let max = AlgorithmInput::MAX_ITEMS;

        let steps = generate(Algorithm::BubbleSort, &AlgorithmInput::sequence(descending(max))).unwrap();
        assert!(steps.len() > 1);
        let mut sorted = descending(max);
        sorted.sort();
        assert_eq!(steps.last().unwrap().sequence(), sorted.as_slice());

        let steps = generate(
            Algorithm::LinearSearch,
            &AlgorithmInput::search(descending(max), -1),
        )
        .unwrap();
        assert_eq!(steps.len(), max);
    }

    #[test]
    fn arrays_past_the_limit_become_one_step() {
        let len = AlgorithmInput::MAX_ITEMS + 1;
        for algorithm in [
            Algorithm::BubbleSort,
            Algorithm::SelectionSort,
            Algorithm::InsertionSort,
        ] {
            let steps = generate(algorithm, &AlgorithmInput::sequence(descending(len))).unwrap();
            assert!(is_too_large(&steps), "{algorithm}");
        }

        let steps = generate(Algorithm::BinarySearch, &AlgorithmInput::search(vec![0; len], 0)).unwrap();
        assert!(is_too_large(&steps));

        let activities: Vec<_> = (0..len as Value).map(|s| Activity::new(s, s + 1)).collect();
        let steps = generate(Algorithm::ActivitySelection, &AlgorithmInput::activities(activities)).unwrap();
        assert!(is_too_large(&steps));
    }

    #[test]
    fn coin_count_is_bounded() {
        let max = AlgorithmInput::MAX_COINS;

        let steps = generate(Algorithm::CoinChange, &AlgorithmInput::change(vec![1], max)).unwrap();
        assert!(!is_too_large(&steps));
        assert!(steps.last().unwrap().annotation().unwrap().contains("(1000 coins)"));

        let steps = generate(Algorithm::CoinChange, &AlgorithmInput::change(vec![1], max + 1)).unwrap();
        assert!(is_too_large(&steps));
        assert!(steps[0].annotation().unwrap().contains("1001 coins of 1"));

        // big coins keep a big amount cheap
        let steps =
            generate(Algorithm::CoinChange, &AlgorithmInput::change(vec![1_000, 1], 999_999)).unwrap();
        assert!(is_too_large(&steps));
        let steps =
            generate(Algorithm::CoinChange, &AlgorithmInput::change(vec![1_000], 1_000_000)).unwrap();
        assert!(!is_too_large(&steps));
    }

    #[test]
    fn oversize_does_not_hide_a_shape_mismatch() {
        let input = AlgorithmInput::search(descending(AlgorithmInput::MAX_ITEMS + 1), 3);
        assert!(generate(Algorithm::BubbleSort, &input).is_err());
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("Bubble-Sort".parse::<Algorithm>(), Ok(Algorithm::BubbleSort));
        assert!("quantum_sort".parse::<Algorithm>().is_err());
    }

    #[test]
    fn serde_ids_match_id() {
        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm.id()));
        }
    }
}
