//! Row filters producing [`RowIndexSet`]s over a [`Dataset`].

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Result, SurveyError};

/// Ascending row positions matching a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndexSet {
    indices: Vec<usize>,
    skipped: usize,
}

impl RowIndexSet {
    /// Every row of the dataset.
    pub fn all(dataset: &Dataset) -> Self {
        RowIndexSet {
            indices: (0..dataset.len()).collect(),
            skipped: 0,
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Rows excluded because a numeric field could not be parsed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

/// Read access to one row of a dataset, handed to row predicates.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    dataset: &'a Dataset,
    row: usize,
}

impl<'a> RowView<'a> {
    pub fn new(dataset: &'a Dataset, row: usize) -> Self {
        RowView { dataset, row }
    }

    pub fn index(&self) -> usize {
        self.row
    }

    /// Raw text of `column` in this row.
    pub fn get(&self, column: &str) -> Result<&'a str> {
        self.dataset.cell(column, self.row)
    }

    /// Parses `column` in this row as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::TypeMismatch`] if the cell is not an integer.
    pub fn int(&self, column: &str) -> Result<i64> {
        let value = self.get(column)?;
        value.parse().map_err(|_| SurveyError::TypeMismatch {
            row: self.row,
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

/// Returns the rows whose `column` holds one of `allowed`.
///
/// # Errors
///
/// Returns [`SurveyError::UnknownColumn`] if `column` does not exist.
pub fn filter_by_column_value(
    dataset: &Dataset,
    column: &str,
    allowed: &[&str],
) -> Result<RowIndexSet> {
    let cells = dataset.column(column)?;
    let indices = cells
        .iter()
        .enumerate()
        .filter(|(_, value)| allowed.contains(&value.as_str()))
        .map(|(idx, _)| idx)
        .collect();

    Ok(RowIndexSet {
        indices,
        skipped: 0,
    })
}

/// Returns the rows for which `predicate` holds.
///
/// A [`SurveyError::TypeMismatch`] from the predicate disqualifies only that
/// row. Any other error aborts the filter.
pub fn filter_by_predicate<F>(dataset: &Dataset, predicate: F) -> Result<RowIndexSet>
where
    F: Fn(&RowView<'_>) -> Result<bool>,
{
    let mut indices = Vec::new();
    let mut skipped = 0;

    for row in 0..dataset.len() {
        match predicate(&RowView::new(dataset, row)) {
            Ok(true) => indices.push(row),
            Ok(false) => {}
            Err(e @ SurveyError::TypeMismatch { .. }) => {
                debug!(row, error = %e, "Row skipped by predicate");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(RowIndexSet { indices, skipped })
}
