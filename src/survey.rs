//! Daily survey file naming and lookup.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

/// File name of the survey recorded on `date`: `traffic_dataDDMMYYYY.csv`.
pub fn survey_file_name(date: NaiveDate) -> String {
    format!(
        "traffic_data{:02}{:02}{}.csv",
        date.day(),
        date.month(),
        date.year()
    )
}

/// Path of the survey for `date` inside `dir`, if that file exists.
pub fn locate_survey(dir: impl AsRef<Path>, date: NaiveDate) -> Option<PathBuf> {
    let path = dir.as_ref().join(survey_file_name(date));
    path.is_file().then_some(path)
}
