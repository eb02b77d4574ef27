//! Rewriter domain: the configuration document model and errors.

pub mod document;
pub mod errors;
pub mod relabel;

pub use document::{LabelDropOutcome, ScrapeConfigDocument, ScrapeJob};
pub use errors::RewriteError;
pub use relabel::{RelabelAction, RelabelRule};
