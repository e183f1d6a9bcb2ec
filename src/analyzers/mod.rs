//! Survey metric aggregation.
//!
//! A [`registry::MetricRegistry`] lists the named metrics of the daily
//! report; [`engine::evaluate`] runs them against a loaded dataset and
//! collects an ordered [`types::OutcomeSet`]. Busiest-hour reporting lives
//! in [`peak`].

pub mod engine;
pub mod peak;
pub mod registry;
pub mod types;
pub mod utility;
