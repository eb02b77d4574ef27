//! # Sentinel Runtime
//!
//! Wires the cardinality scanner, config rewriter and series cleaner into a
//! periodic remediation loop.
//!
//! ## Modular Structure
//!
//! - `config` - Command-line flags and validated runtime configuration
//! - `control` - The remediation loop and its per-pass report
//! - `summary` - Cumulative job → dropped labels record
//! - `status` - Read-only HTTP surface (`/ping`, `/summary`, `/metrics`)
//!
//! ## Pass Flow
//!
//! ```text
//! Idle ──tick──→ Scanning ──empty / error──→ Idle
//!                    │
//!                    └──offending──→ Remediating ──error──→ Idle
//!                                         │
//!                                         └──ok, summary updated──→ Cleaning ──→ Idle
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Parse flags, initialize telemetry
//! 2. Probe Prometheus readiness
//! 3. Bind the status listener
//! 4. Start the remediation loop (one pass immediately) and the status server
//! 5. Wait for Ctrl+C, then cancel both

pub mod config;
pub mod control;
pub mod status;
pub mod summary;

pub use config::{CliArgs, ConfigError, RuntimeConfig};
pub use control::{LoopSettings, PassReport, PassState, RemediationLoop};
pub use summary::SummaryStore;
