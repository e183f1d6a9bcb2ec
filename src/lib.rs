pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod hours;
pub mod output;
pub mod prompt;
pub mod survey;
