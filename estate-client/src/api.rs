//! Property API surface
//!
//! [`PropertyApi`] is the seam between the form core and the network.
//! [`HttpClient`] implements it against the REST server; tests substitute
//! in-memory fakes.

use crate::http::BearerToken;
use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::models::option::parse_items;
use shared::{
    AreaItem, Locale, OptionCategory, OptionItem, PropertyId, PropertyRecord, SubmissionPayload,
    SubmitResponse,
};

/// Endpoint paths, relative to the API base URL
pub mod endpoints {
    use shared::{Locale, OptionCategory, PropertyId};

    pub fn options(category: OptionCategory, locale: Locale) -> String {
        match category {
            OptionCategory::Features => format!("dashboard/properties/features/{locale}"),
            OptionCategory::Locations => format!("real-estates/locations/{locale}"),
            OptionCategory::Types => format!("dashboard/properties/types/{locale}"),
            OptionCategory::Tags => format!("dashboard/properties/tags/{locale}"),
            OptionCategory::Landscapes => format!("dashboard/properties/landscapes/{locale}"),
            OptionCategory::HeatingTypes => format!("dashboard/properties/heating-types/{locale}"),
            // house types are not translated server-side
            OptionCategory::UnitTypes => "dashboard/properties/house-types".to_string(),
        }
    }

    pub fn areas(location: &str, locale: Locale) -> String {
        format!("real-estates/areas/{location}/{locale}")
    }

    pub fn property(id: PropertyId, locale: Locale) -> String {
        format!("dashboard/properties/{id}/{locale}")
    }

    pub fn create(locale: Locale) -> String {
        format!("dashboard/create/{locale}")
    }

    pub fn update(id: PropertyId, locale: Locale) -> String {
        format!("dashboard/update/{id}/{locale}")
    }
}

/// Property back-office API
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Reference items of one catalog category
    async fn fetch_options(
        &self,
        category: OptionCategory,
        locale: Locale,
    ) -> ClientResult<Vec<OptionItem>>;

    /// Areas belonging to a location
    async fn fetch_areas(&self, location: &str, locale: Locale) -> ClientResult<Vec<AreaItem>>;

    /// One property in whatever shape the server currently returns
    async fn fetch_property(&self, id: PropertyId, locale: Locale) -> ClientResult<PropertyRecord>;

    async fn create_property(
        &self,
        locale: Locale,
        payload: &SubmissionPayload,
        token: &BearerToken,
    ) -> ClientResult<SubmitResponse>;

    async fn update_property(
        &self,
        id: PropertyId,
        locale: Locale,
        payload: &SubmissionPayload,
        token: &BearerToken,
    ) -> ClientResult<SubmitResponse>;
}

#[async_trait]
impl PropertyApi for HttpClient {
    async fn fetch_options(
        &self,
        category: OptionCategory,
        locale: Locale,
    ) -> ClientResult<Vec<OptionItem>> {
        let value: serde_json::Value = self.get(&endpoints::options(category, locale)).await?;
        Ok(parse_items(&value, locale))
    }

    async fn fetch_areas(&self, location: &str, locale: Locale) -> ClientResult<Vec<AreaItem>> {
        let value: serde_json::Value = self.get(&endpoints::areas(location, locale)).await?;
        Ok(parse_items(&value, locale))
    }

    async fn fetch_property(&self, id: PropertyId, locale: Locale) -> ClientResult<PropertyRecord> {
        let value: serde_json::Value = self.get(&endpoints::property(id, locale)).await?;
        Ok(PropertyRecord::from_value(value))
    }

    async fn create_property(
        &self,
        locale: Locale,
        payload: &SubmissionPayload,
        token: &BearerToken,
    ) -> ClientResult<SubmitResponse> {
        self.post(&endpoints::create(locale), payload, Some(token))
            .await
    }

    async fn update_property(
        &self,
        id: PropertyId,
        locale: Locale,
        payload: &SubmissionPayload,
        token: &BearerToken,
    ) -> ClientResult<SubmitResponse> {
        self.patch(&endpoints::update(id, locale), payload, Some(token))
            .await
    }
}
