//! Ports for the series cleaner.

pub mod inbound;

pub use inbound::SeriesCleanApi;
pub use metrics_source::MetricsSource;
