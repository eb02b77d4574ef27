//! # CS-01 Cardinality Scanner
//!
//! Detects labels whose value sets have exploded and works out which scrape
//! jobs are responsible for them.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `ScannerConfig`: validated label-count limit
//!   - `jobs_for_label_query`: the attribution query
//!   - `ScanError`: scan failures
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `CardinalityScanApi`: Driving port used by the control loop
//!   - `MetricsSource`: Driven port (re-exported from `metrics-source`)
//!
//! - **Service Layer** (`service`): Orchestration
//!   - `CardinalityScanner`: Implements `CardinalityScanApi`
//!
//! ## Algorithm
//!
//! ```text
//! statistics ──filter value > limit──→ flagged labels
//!                                          │
//!                 sum({<label>=~".+"}) by (job), one query per label
//!                                          │
//!                                          ▼
//!                             job → [label, label, ...]
//! ```
//!
//! A label whose count equals the limit is not flagged. Samples without a
//! `job` label are skipped. Any failed query aborts the whole scan.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{jobs_for_label_query, ScanError, ScannerConfig, DEFAULT_LABEL_LIMIT};
pub use ports::CardinalityScanApi;
pub use service::CardinalityScanner;
