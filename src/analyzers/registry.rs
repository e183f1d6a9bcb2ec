//! Ordered, named metric definitions.

use std::fmt;

use crate::analyzers::engine::{
    busiest_hour_count, count_leaving, count_matching, count_over_speed_limit,
    count_same_direction, hours_with, junction_share, peak_hour,
};
use crate::analyzers::types::MetricValue;
use crate::analyzers::utility::{average_per_hour, percentage};
use crate::config::MetricConfig;
use crate::dataset::{Dataset, columns};
use crate::error::Result;
use crate::filter::filter_by_column_value;

type MetricFn = Box<dyn Fn(&Dataset) -> Result<MetricValue>>;

/// A report label paired with the computation producing its value.
pub struct MetricDefinition {
    label: String,
    compute: MetricFn,
}

impl MetricDefinition {
    pub fn new<F>(label: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&Dataset) -> Result<MetricValue> + 'static,
    {
        MetricDefinition {
            label: label.into(),
            compute: Box::new(compute),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn compute(&self, dataset: &Dataset) -> Result<MetricValue> {
        (self.compute)(dataset)
    }
}

impl fmt::Debug for MetricDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDefinition")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Metric definitions in report order.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    definitions: Vec<MetricDefinition>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a metric and returns the registry, for chaining.
    pub fn with<F>(mut self, label: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&Dataset) -> Result<MetricValue> + 'static,
    {
        self.push(MetricDefinition::new(label, compute));
        self
    }

    pub fn push(&mut self, definition: MetricDefinition) {
        self.definitions.push(definition);
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricDefinition> {
        self.definitions.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(MetricDefinition::label)
    }

    /// The daily survey report: every metric of the traffic survey, in the
    /// order it is printed and saved.
    pub fn standard(config: &MetricConfig) -> Self {
        let primary = config.primary_junction.clone();
        let secondary = config.secondary_junction.clone();
        let electric_column = config.electric_column.clone();
        let two_wheeled = config.two_wheeled_types.clone();
        let rain = config.rain_conditions.clone();
        let policy = config.peak_policy;

        MetricRegistry::new()
            .with(labels::TOTAL_VEHICLES, |ds| Ok(MetricValue::Count(ds.len())))
            .with(labels::TOTAL_TRUCKS, |ds| {
                count_matching(ds, columns::VEHICLE_TYPE, &["Truck"]).map(MetricValue::Count)
            })
            .with(labels::ELECTRIC_VEHICLES, move |ds| {
                count_matching(ds, &electric_column, &["True"]).map(MetricValue::Count)
            })
            .with(labels::TWO_WHEELED, move |ds| {
                let types: Vec<&str> = two_wheeled.iter().map(String::as_str).collect();
                count_matching(ds, columns::VEHICLE_TYPE, &types).map(MetricValue::Count)
            })
            .with(labels::buses_heading_north(&primary), {
                let primary = primary.clone();
                move |ds| count_leaving(ds, "Bus", &primary, "North").map(MetricValue::Count)
            })
            .with(labels::SAME_DIRECTION, |ds| {
                count_same_direction(ds).map(MetricValue::Count)
            })
            .with(labels::TRUCK_PERCENTAGE, |ds| {
                let trucks = count_matching(ds, columns::VEHICLE_TYPE, &["Truck"])?;
                percentage(trucks, ds.len()).map(MetricValue::Integer)
            })
            .with(labels::BICYCLES_PER_HOUR, |ds| {
                let bicycles = count_matching(ds, columns::VEHICLE_TYPE, &["Bicycle"])?;
                Ok(MetricValue::Integer(average_per_hour(bicycles)))
            })
            .with(labels::OVER_SPEED_LIMIT, |ds| {
                count_over_speed_limit(ds).map(MetricValue::Count)
            })
            .with(labels::junction_total(&primary), {
                let primary = primary.clone();
                move |ds| {
                    count_matching(ds, columns::JUNCTION_NAME, &[primary.as_str()])
                        .map(MetricValue::Count)
                }
            })
            .with(labels::junction_total(&secondary), {
                let secondary = secondary.clone();
                move |ds| {
                    count_matching(ds, columns::JUNCTION_NAME, &[secondary.as_str()])
                        .map(MetricValue::Count)
                }
            })
            .with(labels::scooter_percentage(&primary), {
                let primary = primary.clone();
                move |ds| junction_share(ds, &primary, "Scooter").map(MetricValue::Integer)
            })
            .with(labels::junction_peak_count(&secondary), {
                let secondary = secondary.clone();
                move |ds| {
                    let rows =
                        filter_by_column_value(ds, columns::JUNCTION_NAME, &[secondary.as_str()])?;
                    busiest_hour_count(ds, &rows).map(MetricValue::Count)
                }
            })
            .with(labels::RAIN_HOURS, move |ds| {
                let conditions: Vec<&str> = rain.iter().map(String::as_str).collect();
                hours_with(ds, columns::WEATHER, &conditions).map(MetricValue::Count)
            })
            .with(labels::PEAK_HOUR, move |ds| {
                peak_hour(ds, policy).map(|peak| MetricValue::Text(peak.to_string()))
            })
    }
}

impl<'a> IntoIterator for &'a MetricRegistry {
    type Item = &'a MetricDefinition;
    type IntoIter = std::slice::Iter<'a, MetricDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Report labels of the standard metrics.
pub mod labels {
    pub const TOTAL_VEHICLES: &str =
        "The total number of vehicles passing through all junctions for the selected date";
    pub const TOTAL_TRUCKS: &str =
        "The total number of trucks passing through all junctions for the selected date";
    pub const ELECTRIC_VEHICLES: &str =
        "The total number of electric vehicles passing through all junctions for the selected date";
    pub const TWO_WHEELED: &str = "The number of \u{201c}two wheeled\u{201d} vehicles through all junctions for the date (bikes, motorbike, scooters)";
    pub const SAME_DIRECTION: &str = "The total number of vehicles passing through both junctions without turning left or right";
    pub const TRUCK_PERCENTAGE: &str = "The percentage of all vehicles recorded that are Trucks for the selected date (rounded to an integer)";
    pub const BICYCLES_PER_HOUR: &str =
        "The average number of Bicycles per hour for the selected date (rounded to an integer)";
    pub const OVER_SPEED_LIMIT: &str =
        "The total number of vehicles recorded as over the speed limit for the selected date";
    pub const RAIN_HOURS: &str = "The total number of hours of rain on the selected date";
    pub const PEAK_HOUR: &str = "The peak hour for traffic during the selected date";

    pub fn buses_heading_north(junction: &str) -> String {
        format!("The total number of busses leaving {junction} junction heading north")
    }

    pub fn junction_total(junction: &str) -> String {
        format!(
            "The total number of vehicles recorded through only {junction} junction for the selected date"
        )
    }

    pub fn scooter_percentage(junction: &str) -> String {
        format!(
            "The percentage of vehicles through {junction} that are Scooters (rounded to integer)"
        )
    }

    pub fn junction_peak_count(junction: &str) -> String {
        format!("The number of vehicles recorded in the peak (busiest) hour on {junction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurveyError;

    #[test]
    fn test_standard_registry_order() {
        let registry = MetricRegistry::standard(&MetricConfig::default());
        let labels: Vec<&str> = registry.labels().collect();

        assert_eq!(labels.len(), 15);
        assert_eq!(labels[0], labels::TOTAL_VEHICLES);
        assert_eq!(
            labels[4],
            "The total number of busses leaving Elm Avenue/Rabbit Road junction heading north"
        );
        assert_eq!(labels[14], labels::PEAK_HOUR);
    }

    #[test]
    fn test_custom_definition() {
        let registry = MetricRegistry::new().with("rows", |ds| Ok(MetricValue::Count(ds.len())));
        let dataset = Dataset::parse("a\n1\n2\n").unwrap();

        let definition = registry.iter().next().unwrap();
        assert_eq!(definition.label(), "rows");
        assert_eq!(definition.compute(&dataset).unwrap(), MetricValue::Count(2));
    }

    #[test]
    fn test_electric_column_follows_config() {
        let config = MetricConfig {
            electric_column: "elctricHybrid".to_string(),
            ..MetricConfig::default()
        };
        let registry = MetricRegistry::standard(&config);
        let electric = registry
            .iter()
            .find(|d| d.label() == labels::ELECTRIC_VEHICLES)
            .unwrap();

        let dataset = Dataset::parse("elctricHybrid\nTrue\nFalse\nTrue\ntrue\n").unwrap();
        assert_eq!(electric.compute(&dataset).unwrap(), MetricValue::Count(2));

        let other = Dataset::parse("electricHybrid\nTrue\n").unwrap();
        assert!(matches!(
            electric.compute(&other),
            Err(SurveyError::UnknownColumn(_))
        ));
    }
}
