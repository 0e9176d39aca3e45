//! Estate Client - property form core for the listing back office
//!
//! Loads reference data, normalizes server records into an edit model,
//! validates it and saves it through the property API.

pub mod api;
pub mod areas;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod normalize;
pub mod payload;
pub mod schema;
pub mod session;
pub mod submit;

pub use api::PropertyApi;
pub use areas::{AreaRequest, AreaResolver, AreaState};
pub use cache::PropertyCache;
pub use catalog::{CatalogStatus, OptionCatalogLoader};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, SubmissionError};
pub use guard::{GuardDecision, GuardedAction, UnsavedChangesGuard};
pub use http::{BearerToken, HttpClient};
pub use normalize::{Normalized, normalize, normalize_with_report};
pub use payload::build_payload;
pub use schema::{Rule, Schema, UnitMode, ValidationReport, validate};
pub use session::{Banner, PropertyFormSession};
pub use submit::{Redirect, SubmissionPipeline, SubmitOutcome};

// Re-export shared types for convenience
pub use shared::{
    EditModel, Field, FieldError, FieldValue, FormMode, Locale, OptionCatalog, OptionCategory,
    PropertyId, PropertyRecord, SubmissionPayload, SubmitResponse,
};
