//! ss-post: result extraction.
//!
//! Maps the declared measurements onto engine queries and writes the returned
//! series into the per-phase result tables:
//! - spec (typed measurement spec, resolved once per batch)
//! - naming (deterministic column names)
//! - line / vessel / modal (per target kind)
//! - monitor (one scalar per monitor, the batch aggregate row)

pub mod error;
pub mod extractor;
pub mod line;
pub mod modal;
pub mod monitor;
pub mod naming;
pub mod spec;
pub mod vessel;

pub use error::{PostError, PostResult};
pub use extractor::ResultExtractor;
pub use monitor::Monitor;
pub use spec::*;
