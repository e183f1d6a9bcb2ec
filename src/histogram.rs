//! Hour × junction vehicle counts handed to the chart renderer.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{Dataset, columns};
use crate::error::Result;
use crate::filter::filter_by_column_value;
use crate::hours::bucket_by_hour;

/// `hour → {junction → count}` for the junctions it was built for.
///
/// Every hour with at least one record at any of the junctions is present,
/// and each such hour lists every junction, zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HourJunctionMatrix {
    hours: BTreeMap<u8, BTreeMap<String, usize>>,
}

impl HourJunctionMatrix {
    /// Buckets each junction's rows by hour.
    pub fn build(dataset: &Dataset, junctions: &[&str]) -> Result<Self> {
        let mut hours: BTreeMap<u8, BTreeMap<String, usize>> = BTreeMap::new();

        for junction in junctions {
            let rows = filter_by_column_value(dataset, columns::JUNCTION_NAME, &[*junction])?;
            for (hour, count) in bucket_by_hour(dataset, &rows)? {
                hours
                    .entry(hour)
                    .or_default()
                    .insert(junction.to_string(), count);
            }
        }

        for per_junction in hours.values_mut() {
            for junction in junctions {
                per_junction.entry(junction.to_string()).or_insert(0);
            }
        }

        Ok(HourJunctionMatrix { hours })
    }

    pub fn get(&self, hour: u8, junction: &str) -> usize {
        self.hours
            .get(&hour)
            .and_then(|per_junction| per_junction.get(junction))
            .copied()
            .unwrap_or(0)
    }

    pub fn hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.hours.keys().copied()
    }

    /// Total records across all hours and junctions.
    pub fn total(&self) -> usize {
        self.hours.values().flat_map(|m| m.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::parse(
            "timeOfDay,JunctionName\n\
             00:10,A\n\
             00:20,A\n\
             00:30,B\n\
             05:00,B\n\
             06:00,C\n",
        )
        .unwrap()
    }

    #[test]
    fn test_build_zero_fills_junctions() {
        let matrix = HourJunctionMatrix::build(&sample(), &["A", "B"]).unwrap();

        assert_eq!(matrix.hours().collect::<Vec<_>>(), vec![0, 5]);
        assert_eq!(matrix.get(0, "A"), 2);
        assert_eq!(matrix.get(0, "B"), 1);
        assert_eq!(matrix.get(5, "A"), 0);
        assert_eq!(matrix.get(5, "B"), 1);
        assert_eq!(matrix.total(), 4);
    }

    #[test]
    fn test_json_shape() {
        let matrix = HourJunctionMatrix::build(&sample(), &["A", "B"]).unwrap();
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, r#"{"0":{"A":2,"B":1},"5":{"A":0,"B":1}}"#);
    }

    #[test]
    fn test_no_matching_junctions() {
        let matrix = HourJunctionMatrix::build(&sample(), &["Z"]).unwrap();
        assert!(matrix.is_empty());
    }
}
