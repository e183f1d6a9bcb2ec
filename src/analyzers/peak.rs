//! Busiest-hour resolution over an [`HourCount`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SurveyError};
use crate::hours::HourCount;

/// How several hours tied for the maximum count are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakPolicy {
    /// One range from the first tied hour to one past the last, even when
    /// the tied hours are not adjacent.
    #[default]
    Span,
    /// One range per contiguous run of tied hours.
    Enumerate,
}

/// Half-open hour interval `[start:00, end:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Between {}:00 and {}:00", self.start, self.end)
    }
}

/// The busiest hour(s) of a survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakDescription {
    /// Records counted in each peak hour.
    pub count: usize,
    /// Every hour that reached `count`, ascending.
    pub hours: Vec<u8>,
    /// Ranges to report, according to the [`PeakPolicy`] used.
    pub ranges: Vec<HourRange>,
}

impl PeakDescription {
    /// Whether the tied peak hours form one uninterrupted run.
    pub fn is_contiguous(&self) -> bool {
        self.hours.windows(2).all(|w| w[1] == w[0] + 1)
    }
}

impl fmt::Display for PeakDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, range) in self.ranges.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

/// Finds the busiest hour(s) with the default [`PeakPolicy::Span`].
pub fn resolve_peak(hour_count: &HourCount) -> Result<PeakDescription> {
    resolve_peak_with(hour_count, PeakPolicy::Span)
}

/// Finds the busiest hour(s) and describes them according to `policy`.
///
/// # Errors
///
/// Returns [`SurveyError::EmptyHourCount`] when `hour_count` is empty.
pub fn resolve_peak_with(hour_count: &HourCount, policy: PeakPolicy) -> Result<PeakDescription> {
    let count = *hour_count.values().max().ok_or(SurveyError::EmptyHourCount)?;

    // BTreeMap iteration is ascending by hour
    let hours: Vec<u8> = hour_count
        .iter()
        .filter(|&(_, &c)| c == count)
        .map(|(&hour, _)| hour)
        .collect();

    let ranges = match policy {
        PeakPolicy::Span => vec![HourRange {
            start: hours[0],
            end: hours[hours.len() - 1] + 1,
        }],
        PeakPolicy::Enumerate => contiguous_runs(&hours),
    };

    let peak = PeakDescription {
        count,
        hours,
        ranges,
    };

    if policy == PeakPolicy::Span && !peak.is_contiguous() {
        warn!(
            hours = ?peak.hours,
            count,
            "Tied peak hours are not adjacent; reported range includes quieter hours"
        );
    }

    Ok(peak)
}

fn contiguous_runs(hours: &[u8]) -> Vec<HourRange> {
    let mut runs: Vec<HourRange> = Vec::new();
    for &hour in hours {
        match runs.last_mut() {
            Some(run) if run.end == hour => run.end = hour + 1,
            _ => runs.push(HourRange {
                start: hour,
                end: hour + 1,
            }),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_peak() {
        let counts = HourCount::from([(5, 10), (6, 3)]);
        let peak = resolve_peak(&counts).unwrap();
        assert_eq!(peak.to_string(), "Between 5:00 and 6:00");
        assert_eq!(peak.count, 10);
        assert_eq!(peak.hours, vec![5]);
    }

    #[test]
    fn test_adjacent_tie() {
        let counts = HourCount::from([(5, 10), (6, 10), (7, 2)]);
        let peak = resolve_peak(&counts).unwrap();
        assert_eq!(peak.to_string(), "Between 5:00 and 7:00");
        assert!(peak.is_contiguous());
    }

    #[test]
    fn test_empty_counts() {
        assert!(matches!(
            resolve_peak(&HourCount::new()),
            Err(SurveyError::EmptyHourCount)
        ));
    }

    #[test]
    fn test_last_hour_of_day() {
        let counts = HourCount::from([(23, 4), (0, 1)]);
        assert_eq!(
            resolve_peak(&counts).unwrap().to_string(),
            "Between 23:00 and 24:00"
        );
    }

    #[test]
    fn test_span_keeps_non_adjacent_range() {
        let counts = HourCount::from([(2, 7), (10, 1), (20, 7)]);
        let peak = resolve_peak(&counts).unwrap();
        assert_eq!(peak.to_string(), "Between 2:00 and 21:00");
        assert!(!peak.is_contiguous());
    }

    #[test]
    fn test_enumerate_lists_runs() {
        let counts = HourCount::from([(2, 7), (3, 7), (10, 1), (20, 7)]);
        let peak = resolve_peak_with(&counts, PeakPolicy::Enumerate).unwrap();
        assert_eq!(
            peak.to_string(),
            "Between 2:00 and 4:00; Between 20:00 and 21:00"
        );
    }

    #[test]
    fn test_enumerate_matches_span_when_contiguous() {
        let counts = HourCount::from([(5, 10), (6, 10), (7, 2)]);
        assert_eq!(
            resolve_peak_with(&counts, PeakPolicy::Enumerate).unwrap(),
            resolve_peak_with(&counts, PeakPolicy::Span).unwrap()
        );
    }
}
