//! # Shared Types Crate
//!
//! This crate contains the domain entities exchanged between the
//! cardinality scanner, the config rewriter, the series cleaner and the
//! runtime control loop.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **No I/O**: Nothing in this crate talks to the network or the disk.
//! - **Deterministic ordering**: `OffendingLabels` iterates jobs in lexical
//!   order and labels in discovery order, so generated drop rules and log
//!   output are stable between runs.

pub mod entities;
pub mod errors;
pub mod labels;

pub use entities::*;
pub use errors::*;
pub use labels::*;
