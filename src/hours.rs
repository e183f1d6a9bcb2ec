//! Per-hour bucketing of filtered survey rows.

use std::collections::BTreeMap;

use crate::dataset::{Dataset, columns};
use crate::error::{Result, SurveyError};
use crate::filter::RowIndexSet;

/// Sparse hour-of-day → record count. Only hours with at least one record
/// are present.
pub type HourCount = BTreeMap<u8, usize>;

/// Parses the hour from the first two characters of a `timeOfDay` value.
pub fn parse_hour(time_of_day: &str) -> Option<u8> {
    let prefix = time_of_day.get(..2)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<u8>().ok().filter(|hour| *hour < 24)
}

/// Counts the rows of `rows` per hour of day.
///
/// # Errors
///
/// Returns [`SurveyError::TimeFormat`] as soon as one row has an unusable
/// `timeOfDay`; a corrupt time column invalidates the whole run.
pub fn bucket_by_hour(dataset: &Dataset, rows: &RowIndexSet) -> Result<HourCount> {
    let times = dataset.column(columns::TIME_OF_DAY)?;
    let mut counts = HourCount::new();

    for row in rows.iter() {
        let value = &times[row];
        let hour = parse_hour(value).ok_or_else(|| SurveyError::TimeFormat {
            row,
            value: value.clone(),
        })?;
        *counts.entry(hour).or_insert(0) += 1;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_by_column_value;

    fn sample() -> Dataset {
        Dataset::parse(
            "timeOfDay,JunctionName\n\
             00:10,A\n\
             00:59,B\n\
             13:00,A\n\
             23:45,A\n",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_hour() {
        assert_eq!(parse_hour("00:00"), Some(0));
        assert_eq!(parse_hour("09:30"), Some(9));
        assert_eq!(parse_hour("23:59"), Some(23));
        assert_eq!(parse_hour("24:00"), None);
        assert_eq!(parse_hour("9:30"), None);
        assert_eq!(parse_hour("+1:00"), None);
        assert_eq!(parse_hour("7"), None);
        assert_eq!(parse_hour(""), None);
    }

    #[test]
    fn test_bucket_all_rows() {
        let dataset = sample();
        let counts = bucket_by_hour(&dataset, &RowIndexSet::all(&dataset)).unwrap();
        assert_eq!(counts, HourCount::from([(0, 2), (13, 1), (23, 1)]));
    }

    #[test]
    fn test_bucket_subset() {
        let dataset = sample();
        let rows = filter_by_column_value(&dataset, columns::JUNCTION_NAME, &["A"]).unwrap();
        let counts = bucket_by_hour(&dataset, &rows).unwrap();
        assert_eq!(counts.values().sum::<usize>(), rows.len());
        assert_eq!(counts.get(&0), Some(&1));
    }

    #[test]
    fn test_bucket_empty_rows() {
        let dataset = sample();
        let counts = bucket_by_hour(&dataset, &RowIndexSet::default()).unwrap();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_bad_time_aborts() {
        let dataset = Dataset::parse("timeOfDay\n10:00\nab:00\n").unwrap();
        let err = bucket_by_hour(&dataset, &RowIndexSet::all(&dataset)).unwrap_err();
        assert!(matches!(err, SurveyError::TimeFormat { row: 1, .. }));
    }
}
