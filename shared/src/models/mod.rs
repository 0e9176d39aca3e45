//! Data models
//!
//! Server shapes ([`PropertyRecord`], [`OptionItem`]) are read leniently and
//! never trusted to have a fixed schema. The form works on [`EditModel`] only,
//! and writes back through [`SubmissionPayload`].
//! All IDs are `i64`.

pub mod edit;
pub mod option;
pub mod payload;
pub mod record;

// Re-exports
pub use edit::*;
pub use option::*;
pub use payload::*;
pub use record::*;
