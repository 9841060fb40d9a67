//! Text input as typed into a visualization's form fields.
//!
//! Parsing failures are not errors for the caller: they become a single
//! step explaining what was wrong with the input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::{generate, Activity, Algorithm, AlgorithmInput, InputShape};
use crate::error::Result;
use crate::step::{degenerate, Step, Value};

/// Why a piece of text input could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedInput {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("'{0}' is not a start-finish pair")]
    NotAnInterval(String),

    #[error("missing {0}")]
    Missing(&'static str),
}

/// Unparsed form fields. Which fields matter depends on the algorithm's
/// input shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    /// Array (or coin denominations), e.g. `"64, 34, 25"`
    pub values: String,
    /// Search target
    pub target: Option<String>,
    /// Amount to change
    pub amount: Option<String>,
    /// Intervals, e.g. `"1-4, 3-5, 0-6"`
    pub activities: Option<String>,
}

impl RawInput {
    pub fn values(values: impl Into<String>) -> Self {
        Self {
            values: values.into(),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn with_activities(mut self, activities: impl Into<String>) -> Self {
        self.activities = Some(activities.into());
        self
    }

    /// Parse the fields required by `shape`.
    pub fn parse(&self, shape: InputShape) -> std::result::Result<AlgorithmInput, MalformedInput> {
        Ok(match shape {
            InputShape::Sequence => AlgorithmInput::sequence(parse_values(&self.values)?),
            InputShape::Search => AlgorithmInput::search(
                parse_values(&self.values)?,
                parse_scalar(self.target.as_deref(), "search target")?,
            ),
            InputShape::Activities => AlgorithmInput::activities(parse_activities(
                self.activities.as_deref().unwrap_or_default(),
            )?),
            InputShape::Change => AlgorithmInput::change(
                parse_values(&self.values)?,
                parse_scalar(self.amount.as_deref(), "amount")?,
            ),
        })
    }
}

/// Split on commas and whitespace; an empty string is an empty array.
pub fn parse_values(text: &str) -> std::result::Result<Vec<Value>, MalformedInput> {
    tokens(text)
        .map(|token| {
            token
                .parse::<Value>()
                .map_err(|_| MalformedInput::NotANumber(token.to_string()))
        })
        .collect()
}

/// Parse `start-finish` pairs separated by commas or whitespace.
pub fn parse_activities(text: &str) -> std::result::Result<Vec<Activity>, MalformedInput> {
    tokens(text)
        .map(|token| {
            // skip the first char so a leading minus stays with the start
            let split = token
                .char_indices()
                .skip(1)
                .find(|&(_, c)| c == '-')
                .map(|(i, _)| i);
            let (start, finish) = split
                .map(|i| (&token[..i], &token[i + 1..]))
                .ok_or_else(|| MalformedInput::NotAnInterval(token.to_string()))?;
            match (start.trim().parse(), finish.trim().parse()) {
                (Ok(start), Ok(finish)) => Ok(Activity::new(start, finish)),
                _ => Err(MalformedInput::NotAnInterval(token.to_string())),
            }
        })
        .collect()
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_scalar(text: Option<&str>, what: &'static str) -> std::result::Result<Value, MalformedInput> {
    let text = text.map(str::trim).filter(|t| !t.is_empty());
    let text = text.ok_or(MalformedInput::Missing(what))?;
    text.parse()
        .map_err(|_| MalformedInput::NotANumber(text.to_string()))
}

/// Generate steps from form input.
///
/// Malformed or oversized input yields one terminal step naming the problem.
pub fn generate_from_raw(algorithm: Algorithm, raw: &RawInput) -> Result<Vec<Step>> {
    match raw.parse(algorithm.shape()) {
        Ok(input) => generate(algorithm, &input),
        Err(err) => Ok(degenerate(Vec::new(), format!("invalid input: {err}"))),
    }
}
