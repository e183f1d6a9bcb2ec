//! Evaluation of a [`MetricRegistry`] against a [`Dataset`], plus the
//! counting building blocks the standard metrics are made of.

use tracing::{debug, info, warn};

use crate::analyzers::peak::{PeakDescription, PeakPolicy, resolve_peak_with};
use crate::analyzers::registry::MetricRegistry;
use crate::analyzers::types::{MetricValue, OutcomeSet};
use crate::analyzers::utility::percentage;
use crate::dataset::{Dataset, columns};
use crate::error::{Result, SurveyError};
use crate::filter::{RowIndexSet, filter_by_column_value, filter_by_predicate};
use crate::hours::bucket_by_hour;

/// Runs every metric of `registry` against `dataset`, in registry order.
///
/// Metrics failing with a per-metric error (zero denominator, no rows to
/// find a peak in) are recorded as [`MetricValue::Undefined`]. Structural
/// errors such as an unknown column or a corrupt `timeOfDay` abort the run.
#[tracing::instrument(skip_all, fields(rows = dataset.len(), metrics = registry.len()))]
pub fn evaluate(dataset: &Dataset, registry: &MetricRegistry) -> Result<OutcomeSet> {
    let mut outcomes = OutcomeSet::new();

    for definition in registry {
        let value = match definition.compute(dataset) {
            Ok(value) => value,
            Err(e) if e.is_metric_local() => {
                warn!(metric = definition.label(), error = %e, "Metric undefined for this survey");
                MetricValue::undefined(e.undefined_reason())
            }
            Err(e) => return Err(e),
        };
        debug!(metric = definition.label(), value = %value, "Metric evaluated");
        outcomes.push(definition.label(), value);
    }

    info!(outcomes = outcomes.len(), "Survey metrics evaluated");
    Ok(outcomes)
}

/// Number of rows whose `column` holds one of `values`.
pub fn count_matching(dataset: &Dataset, column: &str, values: &[&str]) -> Result<usize> {
    Ok(filter_by_column_value(dataset, column, values)?.len())
}

/// Cars recorded faster than the posted limit of their junction.
///
/// Rows with a non-numeric speed or limit do not count.
pub fn count_over_speed_limit(dataset: &Dataset) -> Result<usize> {
    let rows = filter_by_predicate(dataset, |row| {
        Ok(row.get(columns::VEHICLE_TYPE)? == "Car"
            && row.int(columns::VEHICLE_SPEED)? > row.int(columns::SPEED_LIMIT)?)
    })?;
    if rows.skipped() > 0 {
        warn!(skipped = rows.skipped(), "Cars with non-numeric speed data ignored");
    }
    Ok(rows.len())
}

/// Vehicles leaving in the direction they arrived from, across all junctions.
pub fn count_same_direction(dataset: &Dataset) -> Result<usize> {
    let inbound = dataset.column(columns::DIRECTION_IN)?;
    let outbound = dataset.column(columns::DIRECTION_OUT)?;
    Ok(inbound
        .iter()
        .zip(outbound)
        .filter(|(dir_in, dir_out)| dir_in == dir_out)
        .count())
}

/// Vehicles of `vehicle_type` leaving `junction` towards `direction`.
pub fn count_leaving(
    dataset: &Dataset,
    vehicle_type: &str,
    junction: &str,
    direction: &str,
) -> Result<usize> {
    let rows = filter_by_predicate(dataset, |row| {
        Ok(row.get(columns::VEHICLE_TYPE)? == vehicle_type
            && row.get(columns::DIRECTION_OUT)? == direction
            && row.get(columns::JUNCTION_NAME)? == junction)
    })?;
    Ok(rows.len())
}

/// Share of the vehicles at `junction` that are `vehicle_type`, as a
/// rounded percentage.
///
/// # Errors
///
/// Returns [`SurveyError::DivisionByZero`] when no vehicle passed `junction`.
pub fn junction_share(dataset: &Dataset, junction: &str, vehicle_type: &str) -> Result<i64> {
    let at_junction = filter_by_column_value(dataset, columns::JUNCTION_NAME, &[junction])?;
    let types = dataset.column(columns::VEHICLE_TYPE)?;
    let matching = at_junction
        .iter()
        .filter(|&row| types[row] == vehicle_type)
        .count();
    percentage(matching, at_junction.len())
}

/// Records in the busiest hour of `rows`.
///
/// # Errors
///
/// Returns [`SurveyError::EmptyHourCount`] when `rows` is empty.
pub fn busiest_hour_count(dataset: &Dataset, rows: &RowIndexSet) -> Result<usize> {
    bucket_by_hour(dataset, rows)?
        .into_values()
        .max()
        .ok_or(SurveyError::EmptyHourCount)
}

/// Number of distinct hours with at least one row whose `column` holds one
/// of `values`.
pub fn hours_with(dataset: &Dataset, column: &str, values: &[&str]) -> Result<usize> {
    let rows = filter_by_column_value(dataset, column, values)?;
    Ok(bucket_by_hour(dataset, &rows)?.len())
}

/// Busiest hour(s) of the whole survey.
pub fn peak_hour(dataset: &Dataset, policy: PeakPolicy) -> Result<PeakDescription> {
    let counts = bucket_by_hour(dataset, &RowIndexSet::all(dataset))?;
    resolve_peak_with(&counts, policy)
}
