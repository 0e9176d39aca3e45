// estate-client/tests/common/mod.rs
// In-memory PropertyApi for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use estate_client::http::BearerToken;
use estate_client::{
    ClientError, ClientResult, EditModel, Field, FieldValue, FormMode, Locale, OptionCategory,
    PropertyApi, PropertyId, PropertyRecord, SubmissionPayload, SubmitResponse,
};
use parking_lot::Mutex;
use shared::{AreaItem, OptionItem};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;

/// A save the fake received
#[derive(Debug, Clone)]
pub struct Sent {
    pub mode: FormMode,
    pub locale: Locale,
    pub payload: SubmissionPayload,
    pub token: String,
}

pub struct FakeApi {
    option_calls: AtomicUsize,
    area_calls: AtomicUsize,
    property_calls: AtomicUsize,
    /// Option fetches for a gated locale wait until the gate opens
    gates: Mutex<HashMap<Locale, watch::Sender<bool>>>,
    failing_category: Mutex<Option<OptionCategory>>,
    records: Mutex<HashMap<PropertyId, PropertyRecord>>,
    sent: Mutex<Vec<Sent>>,
    response: Mutex<Result<SubmitResponse, String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            option_calls: AtomicUsize::new(0),
            area_calls: AtomicUsize::new(0),
            property_calls: AtomicUsize::new(0),
            gates: Mutex::new(HashMap::new()),
            failing_category: Mutex::new(None),
            records: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            response: Mutex::new(Ok(SubmitResponse::ok(101))),
        }
    }

    pub fn close_gate(&self, locale: Locale) {
        let (tx, _) = watch::channel(false);
        self.gates.lock().insert(locale, tx);
    }

    pub fn open_gate(&self, locale: Locale) {
        if let Some(tx) = self.gates.lock().get(&locale) {
            tx.send_replace(true);
        }
    }

    pub fn fail_category(&self, category: OptionCategory) {
        *self.failing_category.lock() = Some(category);
    }

    pub fn add_record(&self, id: PropertyId, value: serde_json::Value) {
        self.records.lock().insert(id, PropertyRecord::from_value(value));
    }

    pub fn respond_with(&self, response: SubmitResponse) {
        *self.response.lock() = Ok(response);
    }

    pub fn fail_with(&self, message: &str) {
        *self.response.lock() = Err(message.to_string());
    }

    pub fn option_calls(&self) -> usize {
        self.option_calls.load(Ordering::SeqCst)
    }

    pub fn area_calls(&self) -> usize {
        self.area_calls.load(Ordering::SeqCst)
    }

    pub fn property_calls(&self) -> usize {
        self.property_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    fn record_save(&self, mode: FormMode, locale: Locale, payload: &SubmissionPayload, token: &BearerToken) -> ClientResult<SubmitResponse> {
        self.sent.lock().push(Sent {
            mode,
            locale,
            payload: payload.clone(),
            token: token.as_str().to_string(),
        });
        self.response
            .lock()
            .clone()
            .map_err(ClientError::Internal)
    }
}

#[async_trait]
impl PropertyApi for FakeApi {
    async fn fetch_options(&self, category: OptionCategory, locale: Locale) -> ClientResult<Vec<OptionItem>> {
        self.option_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.gates.lock().get(&locale).map(|tx| tx.subscribe());
        if let Some(mut gate) = gate {
            let _ = gate.wait_for(|open| *open).await;
        }

        if *self.failing_category.lock() == Some(category) {
            return Err(ClientError::Internal(format!("{} unavailable", category.as_str())));
        }
        let name = format!("{}-{}", category.as_str(), locale);
        Ok(vec![OptionItem::new(1, name, Some("first"))])
    }

    async fn fetch_areas(&self, location: &str, _locale: Locale) -> ClientResult<Vec<AreaItem>> {
        self.area_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            AreaItem::new(1, format!("{location} center"), Some("center")),
            AreaItem::new(2, "Moda", Some("moda")),
        ])
    }

    async fn fetch_property(&self, id: PropertyId, _locale: Locale) -> ClientResult<PropertyRecord> {
        self.property_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("property {id}")))
    }

    async fn create_property(&self, locale: Locale, payload: &SubmissionPayload, token: &BearerToken) -> ClientResult<SubmitResponse> {
        self.record_save(FormMode::Create, locale, payload, token)
    }

    async fn update_property(
        &self,
        id: PropertyId,
        locale: Locale,
        payload: &SubmissionPayload,
        token: &BearerToken,
    ) -> ClientResult<SubmitResponse> {
        self.record_save(FormMode::Edit(id), locale, payload, token)
    }
}

/// Let spawned tasks run up to their next suspension point
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("estate_client=debug")
        .with_test_writer()
        .try_init();
}

/// Fill every field the default schema requires
pub fn fill_valid(model: &mut EditModel) {
    let changes = [
        (Field::Title, FieldValue::text("Sunny Flat")),
        (Field::Location, FieldValue::text("kadikoy")),
        (Field::Area, FieldValue::text("moda")),
        (Field::MapLink, FieldValue::text("https://maps.example.com/?q=moda")),
        (Field::Beds, FieldValue::text("2")),
        (Field::Sqt, FieldValue::Number(75.0)),
        (Field::MinPrice, FieldValue::Number(120000.0)),
        (Field::Types, FieldValue::Ids(vec![1])),
        (Field::UnitTypes, FieldValue::Ids(vec![3])),
    ];
    for (field, value) in changes {
        model.set(field, value).unwrap();
    }
}
