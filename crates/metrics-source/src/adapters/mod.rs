//! Adapters for the metrics source ports.

pub mod prometheus;
mod wire;
