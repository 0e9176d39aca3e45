//! Shared types for the real-estate back office
//!
//! Wire shapes returned by the property API, the canonical edit model
//! the property form works on, and the request payload sent back on save.
//! Nothing in this crate performs I/O.

pub mod locale;
pub mod models;
pub mod response;
pub mod types;

// Re-exports
pub use locale::Locale;
pub use models::{
    AreaItem, Distance, DistanceUnit, Distances, EditModel, Field, FieldError, FieldValue,
    MediaRef, MoneyType, OptionCatalog, OptionCategory, OptionItem, PropertyRecord,
    SubmissionPayload, UnitMaxima, UnitSpec, Units, UnknownVariant,
};
pub use response::SubmitResponse;
pub use types::{FormMode, PropertyId};
pub use serde::{Deserialize, Serialize};
