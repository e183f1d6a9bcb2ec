//! Data types produced by the aggregation engine.

use std::fmt;

use serde::Serialize;

/// Value computed by a single metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(usize),
    Integer(i64),
    Text(String),
    /// The metric has no value for this survey (empty group, zero denominator).
    Undefined { undefined: String },
}

impl MetricValue {
    pub fn undefined(reason: impl Into<String>) -> Self {
        MetricValue::Undefined {
            undefined: reason.into(),
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            MetricValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetricValue::Integer(n) => Some(*n),
            MetricValue::Count(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, MetricValue::Undefined { .. })
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Integer(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
            MetricValue::Undefined { undefined } => write!(f, "undefined ({undefined})"),
        }
    }
}

/// One `(label, value)` entry of an [`OutcomeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub label: String,
    pub value: MetricValue,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Ordered metric results for one survey, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutcomeSet {
    outcomes: Vec<Outcome>,
}

impl OutcomeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: MetricValue) {
        self.outcomes.push(Outcome {
            label: label.into(),
            value,
        });
    }

    /// Looks up the value recorded under `label`.
    pub fn get(&self, label: &str) -> Option<&MetricValue> {
        self.outcomes
            .iter()
            .find(|o| o.label == label)
            .map(|o| &o.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Renders every outcome as a `label: value` line.
    pub fn lines(&self) -> Vec<String> {
        self.outcomes.iter().map(Outcome::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a OutcomeSet {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
