//! Ports for the config rewriter.

pub mod inbound;

pub use inbound::LabelDropApi;
pub use metrics_source::{ConfigReloader, MetricsSource};
