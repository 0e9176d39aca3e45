//! Create / update request body

use super::edit::{DistanceUnit, MediaRef, MoneyType};
use super::record::PropertyRecord;
use crate::types::PropertyId;
use serde::{Deserialize, Serialize};

/// Request body of `POST dashboard/create/{locale}` and
/// `PATCH dashboard/update/{id}/{locale}`, in the server's field names.
///
/// Range bounds (`max_*`, `price_max`) are omitted for single units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Present in edit mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PropertyId>,
    pub title: String,
    pub details: String,
    pub location: String,
    pub area: String,
    pub location_map: String,
    pub money_type: MoneyType,
    pub price_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    pub bathroom: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bath: Option<f64>,
    pub bed_room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bed: Option<f64>,
    pub metrage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sqt: Option<f64>,
    pub building_floor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_floor: Option<f64>,
    pub age_of_the_building: f64,
    /// 0 / 1
    pub furnished_sale: u8,
    /// 0 / 1
    pub is_multi: u8,
    pub dist_shopping: f64,
    pub dist_shopping_type: DistanceUnit,
    pub dist_airport: f64,
    pub dist_airport_type: DistanceUnit,
    pub dist_hospital: f64,
    pub dist_hospital_type: DistanceUnit,
    pub dist_sea: f64,
    pub dist_sea_type: DistanceUnit,
    pub buy_media: String,
    pub available_media: String,
    pub types: Vec<i64>,
    pub house_types: Vec<i64>,
    pub tags: Vec<i64>,
    pub features: Vec<i64>,
    pub heating_types: Vec<i64>,
    pub landscapes: Vec<i64>,
    pub images: Vec<MediaRef>,
    pub downloads: Vec<MediaRef>,
}

impl SubmissionPayload {
    /// The payload read back as a server record
    pub fn to_record(&self) -> PropertyRecord {
        serde_json::to_value(self)
            .map(PropertyRecord::from_value)
            .unwrap_or_default()
    }
}
