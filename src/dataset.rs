//! Columnar in-memory representation of one day's survey CSV.
//!
//! Every cell is kept as text. Numeric interpretation is left to the
//! filters and metrics that need it.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Result, SurveyError};

/// Column names of the survey CSV header.
pub mod columns {
    pub const TIME_OF_DAY: &str = "timeOfDay";
    pub const VEHICLE_TYPE: &str = "VehicleType";
    pub const JUNCTION_NAME: &str = "JunctionName";
    pub const DIRECTION_IN: &str = "travel_Direction_in";
    pub const DIRECTION_OUT: &str = "travel_Direction_out";
    pub const VEHICLE_SPEED: &str = "VehicleSpeed";
    pub const SPEED_LIMIT: &str = "JunctionSpeedLimit";
    pub const WEATHER: &str = "Weather_Conditions";
    pub const ELECTRIC_HYBRID: &str = "electricHybrid";
}

/// Survey records stored column by column.
///
/// All columns have the same length; row `i` is the tuple of the `i`-th
/// cell of every column.
#[derive(Debug, Clone)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<String>>,
    positions: HashMap<String, usize>,
    rows: usize,
}

impl Dataset {
    /// Loads a dataset from a CSV file on disk.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Parses a dataset from raw CSV text.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes())
    }

    /// Parses a header line followed by data lines from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::MalformedRecord`] if a data line has a
    /// different number of fields than the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(reader);

        let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if names.iter().all(String::is_empty) {
            return Err(SurveyError::MalformedHeader("header line is empty".into()));
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), idx).is_some() {
                return Err(SurveyError::MalformedHeader(format!(
                    "duplicate column {name:?}"
                )));
            }
        }

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        let mut rows = 0;

        for result in rdr.records() {
            let record = result?;
            if record.len() != names.len() {
                return Err(SurveyError::MalformedRecord {
                    line: record.position().map_or(0, |p| p.line()),
                    expected: names.len(),
                    found: record.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(record.iter()) {
                column.push(value.to_string());
            }
            rows += 1;
        }

        debug!(rows, columns = names.len(), "Survey dataset loaded");

        Ok(Dataset {
            names,
            columns,
            positions,
            rows,
        })
    }

    /// Number of survey records.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Returns every cell of the named column.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::UnknownColumn`] if the header has no such column.
    pub fn column(&self, name: &str) -> Result<&[String]> {
        self.positions
            .get(name)
            .map(|&idx| self.columns[idx].as_slice())
            .ok_or_else(|| SurveyError::UnknownColumn(name.to_string()))
    }

    /// Returns the cell at `row` in the named column.
    ///
    /// Panics if `row` is out of bounds, like slice indexing.
    pub fn cell(&self, name: &str, row: usize) -> Result<&str> {
        Ok(self.column(name)?[row].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "timeOfDay,VehicleType,JunctionName,travel_Direction_in,travel_Direction_out,VehicleSpeed,JunctionSpeedLimit,Weather_Conditions,electricHybrid";

    #[test]
    fn test_parse_keeps_header_order() {
        let text = format!("{HEADER}\n00:00,Car,Elm Avenue/Rabbit Road,N,S,30,30,Fog,False\n");
        let dataset = Dataset::parse(&text).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.column_names().len(), 9);
        assert_eq!(dataset.column_names()[0], "timeOfDay");
        assert_eq!(dataset.column_names()[8], "electricHybrid");
        assert_eq!(
            dataset.cell(columns::JUNCTION_NAME, 0).unwrap(),
            "Elm Avenue/Rabbit Road"
        );
    }

    #[test]
    fn test_parse_keeps_values_as_text() {
        let text = format!("{HEADER}\n07:15,Car,J,N,S,031,30,Fog,True\n");
        let dataset = Dataset::parse(&text).unwrap();
        assert_eq!(dataset.cell(columns::VEHICLE_SPEED, 0).unwrap(), "031");
    }

    #[test]
    fn test_short_line_is_malformed() {
        let text = format!("{HEADER}\n00:00,Car,J,N,S,30,30,Fog,False\n00:01,Car,J,N,S,30,30,Fog\n");
        let err = Dataset::parse(&text).unwrap_err();
        match err {
            SurveyError::MalformedRecord {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 9);
                assert_eq!(found, 8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_long_line_is_malformed() {
        let text = "a,b\n1,2,3\n";
        assert!(matches!(
            Dataset::parse(text),
            Err(SurveyError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let dataset = Dataset::parse(&format!("{HEADER}\n")).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.column(columns::VEHICLE_TYPE).unwrap().len(), 0);
    }

    #[test]
    fn test_trailing_whitespace_is_trimmed() {
        let dataset = Dataset::parse("a,b\r\n1 ,2\r\n").unwrap();
        assert_eq!(dataset.cell("a", 0).unwrap(), "1");
        assert_eq!(dataset.cell("b", 0).unwrap(), "2");
    }

    #[test]
    fn test_unknown_column() {
        let dataset = Dataset::parse("a,b\n1,2\n").unwrap();
        assert!(matches!(
            dataset.column("c"),
            Err(SurveyError::UnknownColumn(name)) if name == "c"
        ));
    }

    #[test]
    fn test_quotes_are_kept_as_text() {
        let dataset = Dataset::parse("a,b\n\"Fog\",2\n").unwrap();
        assert_eq!(dataset.cell("a", 0).unwrap(), "\"Fog\"");
    }

    #[test]
    fn test_stray_quote_does_not_merge_fields() {
        let dataset = Dataset::parse("a,b,c\n1,\"x,2\n3,4,5\n").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.cell("b", 0).unwrap(), "\"x");
        assert_eq!(dataset.cell("c", 0).unwrap(), "2");
        assert_eq!(dataset.cell("a", 1).unwrap(), "3");
    }

    #[test]
    fn test_duplicate_header_rejected() {
        assert!(matches!(
            Dataset::parse("a,a\n1,2\n"),
            Err(SurveyError::MalformedHeader(_))
        ));
    }
}
