//! Submission pipeline
//!
//! ```text
//! EditModel ──validate──► ValidationReport (abort, nothing sent)
//!     │ valid
//!     ▼
//! build_payload ──► POST dashboard/create/{locale}
//!                   PATCH dashboard/update/{id}/{locale}
//!     │ success: true
//!     ▼
//! invalidate cached views ──► SubmitOutcome { redirect }
//! ```
//!
//! The cache is only touched after the server confirmed the save.

use crate::cache::PropertyCache;
use crate::config::{ClientConfig, DEFAULT_LIST_ROUTE};
use crate::error::SubmissionError;
use crate::http::BearerToken;
use crate::payload::build_payload;
use crate::schema::Schema;
use crate::PropertyApi;
use shared::{EditModel, FormMode, Locale, PropertyId, SubmissionPayload};
use std::sync::Arc;
use std::time::Duration;

/// Where the form goes after a successful save, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: String,
    pub after: Duration,
}

impl Redirect {
    /// Sleep out the delay, then hand back the route
    pub async fn wait(&self) -> &str {
        tokio::time::sleep(self.after).await;
        &self.route
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// Id of the saved property; a create response may omit it
    pub id: Option<PropertyId>,
    pub message: Option<String>,
    pub redirect: Redirect,
}

pub struct SubmissionPipeline {
    api: Arc<dyn PropertyApi>,
    cache: PropertyCache,
    schema: Schema,
    list_route: String,
    redirect_delay: Duration,
}

impl SubmissionPipeline {
    pub fn new(api: Arc<dyn PropertyApi>, cache: PropertyCache) -> Self {
        Self {
            api,
            cache,
            schema: Schema::default(),
            list_route: DEFAULT_LIST_ROUTE.to_string(),
            redirect_delay: Duration::from_millis(1500),
        }
    }

    pub fn from_config(api: Arc<dyn PropertyApi>, cache: PropertyCache, config: &ClientConfig) -> Self {
        Self {
            list_route: config.list_route.clone(),
            redirect_delay: config.redirect_delay,
            ..Self::new(api, cache)
        }
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_redirect(mut self, route: impl Into<String>, after: Duration) -> Self {
        self.list_route = route.into();
        self.redirect_delay = after;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn cache(&self) -> &PropertyCache {
        &self.cache
    }

    /// Validate and build the request body without touching the network
    pub fn prepare(&self, model: &EditModel, mode: FormMode) -> Result<SubmissionPayload, SubmissionError> {
        let report = self.schema.validate(model);
        if !report.is_valid() {
            tracing::debug!(%mode, fields = report.len(), "Submission blocked by validation");
            return Err(SubmissionError::Invalid(report));
        }
        Ok(build_payload(model, mode))
    }

    /// Send a prepared payload
    pub async fn send(
        &self,
        payload: &SubmissionPayload,
        mode: FormMode,
        locale: Locale,
        token: &BearerToken,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let response = match mode {
            FormMode::Create => self.api.create_property(locale, payload, token).await,
            FormMode::Edit(id) => self.api.update_property(id, locale, payload, token).await,
        }
        .inspect_err(|e| tracing::warn!(%mode, %locale, error = %e, "Property save failed"))?;

        if !response.success {
            let message = response.message.unwrap_or_default();
            tracing::warn!(%mode, %locale, %message, "Property save rejected");
            return Err(SubmissionError::Rejected { message });
        }

        self.cache.invalidate_after_save(mode, locale);

        let id = response.id.or(mode.property_id());
        tracing::info!(%mode, %locale, id = ?id, "Property saved");
        Ok(SubmitOutcome {
            id,
            message: response.message,
            redirect: Redirect {
                route: self.list_route.clone(),
                after: self.redirect_delay,
            },
        })
    }

    pub async fn submit(
        &self,
        model: &EditModel,
        mode: FormMode,
        locale: Locale,
        token: &BearerToken,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let payload = self.prepare(model, mode)?;
        self.send(&payload, mode, locale, token).await
    }
}
