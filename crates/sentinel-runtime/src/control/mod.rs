//! Remediation control loop.
//!
//! One pass is scan → rewrite → record → clean. Passes run on a fixed
//! interval, never overlap, and the first one starts immediately.

mod remediation;
mod report;

pub use remediation::{LoopSettings, RemediationLoop};
pub use report::{PassReport, PassState};
