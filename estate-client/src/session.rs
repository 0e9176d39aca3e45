//! Property form session
//!
//! One create or edit form: the edit model, its last-normalized baseline,
//! the dependent area field, the unsaved-changes guard and the status
//! banner. Network calls happen outside the session; it hands out
//! [`AreaRequest`]s and payloads and applies the results.

use crate::areas::{AreaRequest, AreaResolver};
use crate::cache::PropertyCache;
use crate::error::SubmissionError;
use crate::guard::{GuardDecision, GuardedAction, UnsavedChangesGuard};
use crate::http::BearerToken;
use crate::normalize::normalize;
use crate::schema::ValidationReport;
use crate::submit::{Redirect, SubmissionPipeline, SubmitOutcome};
use crate::{ClientResult, PropertyApi};
use shared::{AreaItem, EditModel, Field, FieldError, FieldValue, FormMode, Locale, PropertyId, PropertyRecord, SubmissionPayload};

const SAVED_MESSAGE: &str = "Property saved successfully";

/// Dismissible status message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct PropertyFormSession {
    mode: FormMode,
    locale: Locale,
    model: EditModel,
    baseline: EditModel,
    areas: AreaResolver,
    pending_area: Option<AreaRequest>,
    guard: UnsavedChangesGuard,
    banner: Option<Banner>,
    field_errors: ValidationReport,
    submitting: bool,
    redirect: Option<Redirect>,
}

impl PropertyFormSession {
    fn with_model(mode: FormMode, locale: Locale, mut model: EditModel) -> Self {
        // no area without a location
        if model.location.trim().is_empty() {
            model.area.clear();
        }
        let mut areas = AreaResolver::new();
        let pending_area = areas.initialize(&model.location);
        Self {
            mode,
            locale,
            baseline: model.clone(),
            model,
            areas,
            pending_area,
            guard: UnsavedChangesGuard::new(),
            banner: None,
            field_errors: ValidationReport::default(),
            submitting: false,
            redirect: None,
        }
    }

    /// Blank create form
    pub fn create(locale: Locale) -> Self {
        Self::with_model(FormMode::Create, locale, normalize(None, locale))
    }

    /// Edit form over an already fetched record.
    ///
    /// The stored area is kept while the area list for its location loads.
    pub fn edit(id: PropertyId, record: &PropertyRecord, locale: Locale) -> Self {
        Self::with_model(FormMode::Edit(id), locale, normalize(Some(record), locale))
    }

    /// Edit form, fetching the record unless it is cached
    pub async fn open_edit(
        api: &dyn PropertyApi,
        cache: &PropertyCache,
        id: PropertyId,
        locale: Locale,
    ) -> ClientResult<Self> {
        let record = match cache.detail(id, locale) {
            Some(record) => record,
            None => {
                let record = api.fetch_property(id, locale).await?;
                cache.put_detail(id, locale, record)
            }
        };
        tracing::debug!(id, %locale, "Opening edit form");
        Ok(Self::edit(id, &record, locale))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn model(&self) -> &EditModel {
        &self.model
    }

    pub fn baseline(&self) -> &EditModel {
        &self.baseline
    }

    pub fn areas(&self) -> &AreaResolver {
        &self.areas
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn field_errors(&self) -> &ValidationReport {
        &self.field_errors
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Any field differs from the last-saved values
    pub fn is_dirty(&self) -> bool {
        self.model != self.baseline
    }

    /// The submit button is enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    pub fn should_prevent_unload(&self) -> bool {
        self.guard.should_prevent_unload(self.is_dirty())
    }

    // ========================================================================
    // Field changes
    // ========================================================================

    /// Apply a field change event.
    ///
    /// A location change clears the area and queues its area list. The area
    /// only takes a value once a location is selected.
    pub fn set_field(&mut self, field: Field, value: FieldValue) -> Result<(), FieldError> {
        if field == Field::Area && self.model.location.trim().is_empty() && !is_blank(&value) {
            return Err(FieldError::new(Field::Area, "Select a location first"));
        }
        self.model.set(field, value)?;
        self.touched();
        if field == Field::Location {
            let location = self.model.location.clone();
            if let Some(request) = self.areas.change_location(&location, &mut self.model.area) {
                self.pending_area = Some(request);
            } else if location.is_empty() {
                self.pending_area = None;
            }
        }
        Ok(())
    }

    /// Switch between single unit and project; create mode only
    pub fn set_multi(&mut self, multi: bool) -> Result<(), FieldError> {
        if self.mode.is_edit() {
            return Err(FieldError::new(
                Field::IsMulti,
                "Unit mode cannot change after the property was created",
            ));
        }
        self.model.set_multi(multi);
        self.touched();
        Ok(())
    }

    /// Edits after a save arm the guard again
    fn touched(&mut self) {
        if self.is_dirty() {
            self.guard.rearm();
        }
    }

    /// Area fetch the caller should run next, if any
    pub fn take_area_request(&mut self) -> Option<AreaRequest> {
        self.pending_area.take()
    }

    /// Apply a finished area fetch; stale results are dropped
    pub fn apply_areas(&mut self, request: &AreaRequest, result: ClientResult<Vec<AreaItem>>) -> bool {
        if self.pending_area.as_ref() == Some(request) {
            self.pending_area = None;
        }
        self.areas.complete(request, result)
    }

    /// Run any outstanding area fetch to completion
    pub async fn load_areas(&mut self, api: &dyn PropertyApi) -> bool {
        let Some(request) = self.pending_area.take() else {
            return false;
        };
        let result = request.fetch(api, self.locale).await;
        self.areas.complete(&request, result)
    }

    /// Pick a location and load its areas
    pub async fn select_location(&mut self, api: &dyn PropertyApi, location: &str) -> Result<(), FieldError> {
        self.set_field(Field::Location, FieldValue::text(location))?;
        self.load_areas(api).await;
        Ok(())
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Validate and lock the form for one save
    pub fn begin_submit(&mut self, pipeline: &SubmissionPipeline) -> Result<SubmissionPayload, SubmissionError> {
        if self.submitting {
            return Err(SubmissionError::InFlight);
        }
        match pipeline.prepare(&self.model, self.mode) {
            Ok(payload) => {
                self.submitting = true;
                self.banner = None;
                self.field_errors = ValidationReport::default();
                Ok(payload)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Apply the result of the save started by [`Self::begin_submit`]
    pub fn finish_submit(
        &mut self,
        result: Result<SubmitOutcome, SubmissionError>,
    ) -> Result<SubmitOutcome, SubmissionError> {
        self.submitting = false;
        match result {
            Ok(outcome) => {
                self.baseline = self.model.clone();
                self.guard.mark_saved();
                let message = outcome
                    .message
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| SAVED_MESSAGE.to_string());
                self.banner = Some(Banner::Success(message));
                self.redirect = Some(outcome.redirect.clone());
                Ok(outcome)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    pub async fn submit(
        &mut self,
        pipeline: &SubmissionPipeline,
        token: &BearerToken,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let payload = self.begin_submit(pipeline)?;
        let result = pipeline.send(&payload, self.mode, self.locale, token).await;
        self.finish_submit(result)
    }

    fn fail(&mut self, err: &SubmissionError) {
        if let Some(report) = err.report() {
            self.field_errors = report.clone();
        }
        self.banner = Some(Banner::Error(err.user_message()));
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    // ========================================================================
    // Guarded actions
    // ========================================================================

    pub fn request_navigation(&mut self, route: impl Into<String>) -> GuardDecision {
        self.request(GuardedAction::Navigate(route.into()))
    }

    pub fn request_reset(&mut self) -> GuardDecision {
        self.request(GuardedAction::Reset)
    }

    pub fn request_close(&mut self) -> GuardDecision {
        self.request(GuardedAction::Close)
    }

    fn request(&mut self, action: GuardedAction) -> GuardDecision {
        let decision = self.guard.request(action, self.is_dirty());
        if decision == GuardDecision::Proceed(GuardedAction::Reset) {
            self.reset();
        }
        decision
    }

    /// Confirm the held action; a reset is performed here, other actions
    /// are returned for the caller to carry out.
    pub fn confirm(&mut self) -> Option<GuardedAction> {
        let action = self.guard.confirm()?;
        if action == GuardedAction::Reset {
            self.reset();
        }
        Some(action)
    }

    pub fn cancel(&mut self) {
        self.guard.cancel();
    }

    fn reset(&mut self) {
        self.model = self.baseline.clone();
        self.banner = None;
        self.field_errors = ValidationReport::default();
        if self.areas.location() != self.model.location {
            self.pending_area = self.areas.initialize(&self.model.location);
        }
        tracing::debug!(mode = %self.mode, "Form reset to last saved values");
    }
}

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::Empty => true,
        FieldValue::Text(s) => s.trim().is_empty(),
        _ => false,
    }
}
