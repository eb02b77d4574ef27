//! # CS-02 Config Rewriter
//!
//! Stops offending labels at ingestion time by rewriting the scrape
//! configuration.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `ScrapeConfigDocument`: the parsed configuration file
//!   - `RelabelRule`: one `metric_relabel_configs` entry
//!   - `RewriteError`: rewrite failures
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `LabelDropApi`: Driving port used by the control loop
//!   - `MetricsSource`, `ConfigReloader`: Driven ports from `metrics-source`
//!
//! - **Service Layer** (`service`): Orchestration
//!   - `ConfigRewriter`: Implements `LabelDropApi`
//!
//! ## Flow
//!
//! ```text
//! live config (from Prometheus, not the local file)
//!     │ parse
//!     ▼
//! append `{regex: a|b, action: labeldrop}` to each affected job
//!     │ serialize, overwrite config file
//!     ▼
//! POST /-/reload ──200──→ done
//! ```
//!
//! The whole document is rewritten on every pass. Existing relabel rules
//! are never removed or reordered, and sections this crate does not model
//! are written back unchanged.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    LabelDropOutcome, RelabelAction, RelabelRule, RewriteError, ScrapeConfigDocument, ScrapeJob,
};
pub use ports::LabelDropApi;
pub use service::ConfigRewriter;
