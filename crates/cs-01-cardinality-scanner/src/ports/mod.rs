//! Ports for the cardinality scanner.

pub mod inbound;

pub use inbound::CardinalityScanApi;
pub use metrics_source::MetricsSource;
