//! Edit-model normalizer
//!
//! Maps a server record (any known shape) or nothing (create mode) onto an
//! [`EditModel`]. Every canonical field has an entry in [`FIELD_KEYS`]: the
//! canonical name first, then legacy names, each also tried with a locale
//! suffix where the server stores translated columns. Anything missing or
//! unreadable keeps its default; normalization never fails.

use shared::{EditModel, Field, FieldValue, Locale, PropertyRecord};

/// How a field is read from the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Number,
    Flag,
    Ids,
    Media,
}

struct FieldKeys {
    field: Field,
    kind: Kind,
    /// Candidate record keys in preference order
    keys: &'static [&'static str],
    /// Also try `{key}_{locale}` for each key
    localized: bool,
}

const fn entry(
    field: Field,
    kind: Kind,
    keys: &'static [&'static str],
    localized: bool,
) -> FieldKeys {
    FieldKeys {
        field,
        kind,
        keys,
        localized,
    }
}

/// Server key mapping for every canonical field except `isMulti`
const FIELD_KEYS: &[FieldKeys] = &[
    entry(Field::Title, Kind::Text, &["title", "titleValue"], true),
    entry(Field::Description, Kind::Text, &["description", "details", "details_des"], true),
    entry(Field::Location, Kind::Text, &["location", "locationValue", "location_key"], true),
    entry(Field::Area, Kind::Text, &["area", "areaValue", "area_key"], true),
    entry(Field::MapLink, Kind::Text, &["mapLink", "location_map"], false),
    entry(Field::MoneyType, Kind::Text, &["moneyType", "money_type"], false),
    entry(Field::Furnished, Kind::Flag, &["furnished", "furnished_sale"], false),
    entry(Field::BuyPropertyLink, Kind::Text, &["buyPropertyLink", "buy_media"], true),
    entry(Field::AvailablePropertyLink, Kind::Text, &["availablePropertyLink", "available_media"], true),
    entry(Field::Images, Kind::Media, &["images", "imgs"], false),
    entry(Field::Downloads, Kind::Media, &["downloads", "dowloads", "pdfs"], false),
    entry(Field::Types, Kind::Ids, &["types", "typeValue", "typesArr", "type"], false),
    entry(Field::UnitTypes, Kind::Ids, &["unitTypes", "typeUnit", "house_types", "houseTypes"], false),
    entry(Field::Tags, Kind::Ids, &["tags", "tag"], false),
    entry(Field::Features, Kind::Ids, &["features"], false),
    entry(Field::Heating, Kind::Ids, &["heating", "heating_types", "heatingTypes"], false),
    entry(Field::Landscapes, Kind::Ids, &["landscapes", "landscapesData"], false),
    entry(Field::DistShop, Kind::Number, &["distShop", "dist_shopping"], false),
    entry(Field::ShopType, Kind::Text, &["shopType", "dist_shopping_type"], false),
    entry(Field::DistAirport, Kind::Number, &["distAirport", "dist_airport"], false),
    entry(Field::AirportType, Kind::Text, &["airportType", "dist_airport_type"], false),
    entry(Field::DistHospital, Kind::Number, &["distHospital", "dist_hospital"], false),
    entry(Field::HospitalType, Kind::Text, &["hospitalType", "dist_hospital_type"], false),
    entry(Field::DistSea, Kind::Number, &["distSea", "dist_sea"], false),
    entry(Field::SeaType, Kind::Text, &["seaType", "dist_sea_type"], false),
    entry(Field::Baths, Kind::Number, &["baths", "bathroom"], false),
    entry(Field::MaxBaths, Kind::Number, &["maxBaths", "max_bath"], false),
    entry(Field::Beds, Kind::Text, &["beds", "bed_room"], false),
    entry(Field::MaxBeds, Kind::Number, &["maxBeds", "max_bed"], false),
    entry(Field::Sqt, Kind::Number, &["sqt", "metrage"], false),
    entry(Field::MaxSqt, Kind::Number, &["maxSqt", "max_sqt"], false),
    entry(Field::Floor, Kind::Number, &["floor", "building_floor"], false),
    entry(Field::MaxFloor, Kind::Number, &["maxFloor", "max_floor"], false),
    entry(Field::AgeOfBuilding, Kind::Number, &["ageOfBuilding", "age_of_the_building"], false),
    entry(Field::MinPrice, Kind::Number, &["minPrice", "priceMin", "price_min", "price"], false),
    entry(Field::MaxPrice, Kind::Number, &["maxPrice", "priceMax", "price_max"], false),
];

const IS_MULTI_KEYS: &[&str] = &["isMulti", "is_multi"];

/// Normalized model plus the fields that fell back to defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub model: EditModel,
    /// Fields present in the record but unreadable or out of range
    pub degraded: Vec<Field>,
}

/// Build the edit model for a form session.
///
/// `None` yields create-mode defaults.
pub fn normalize(record: Option<&PropertyRecord>, locale: Locale) -> EditModel {
    normalize_with_report(record, locale).model
}

pub fn normalize_with_report(record: Option<&PropertyRecord>, locale: Locale) -> Normalized {
    let Some(record) = record else {
        return Normalized {
            model: EditModel::new(false),
            degraded: Vec::new(),
        };
    };

    let multi = record.flag(IS_MULTI_KEYS).unwrap_or(false);
    let mut model = EditModel::new(multi);
    let mut degraded = Vec::new();

    for spec in FIELD_KEYS {
        if spec.field.is_multi_only() && !multi {
            continue;
        }
        let keys = candidate_keys(spec, locale);
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();

        let value = match spec.kind {
            Kind::Text => record.text(&keys).map(FieldValue::Text),
            Kind::Number => record.number(&keys).map(FieldValue::Number),
            Kind::Flag => record.flag(&keys).map(FieldValue::Flag),
            Kind::Ids => record.ids(&keys).map(FieldValue::Ids),
            Kind::Media => record.media(&keys).map(FieldValue::Media),
        };

        match value {
            Some(value) => {
                if let Err(err) = model.set(spec.field, value) {
                    tracing::debug!(field = %spec.field, error = %err, "Record field degraded to default");
                    degraded.push(spec.field);
                }
            }
            None if keys.iter().any(|k| record.raw(k).is_some_and(|v| !is_blank(v))) => {
                tracing::debug!(field = %spec.field, "Unreadable record field degraded to default");
                degraded.push(spec.field);
            }
            None => {}
        }
    }

    Normalized { model, degraded }
}

fn candidate_keys(spec: &FieldKeys, locale: Locale) -> Vec<String> {
    let mut keys = Vec::with_capacity(spec.keys.len() * 2);
    for key in spec.keys {
        keys.push((*key).to_string());
        if spec.localized {
            keys.push(format!("{key}_{locale}"));
        }
    }
    keys
}

fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{DistanceUnit, MoneyType, Units};

    fn record(value: serde_json::Value) -> PropertyRecord {
        PropertyRecord::from_value(value)
    }

    #[test]
    fn test_create_defaults() {
        let model = normalize(None, Locale::En);
        assert_eq!(model, EditModel::new(false));
    }

    #[test]
    fn test_every_field_has_a_mapping() {
        for field in Field::ALL {
            if field == Field::IsMulti {
                continue;
            }
            assert!(
                FIELD_KEYS.iter().any(|k| k.field == field),
                "no record keys for {field}"
            );
        }
    }

    #[test]
    fn test_snake_case_server_shape() {
        let r = record(json!({
            "id": 12,
            "title": "Sea View Flat",
            "location": "kadikoy",
            "area": "center",
            "price": 90000,
            "price_min": "100000",
            "money_type": "euro",
            "bathroom": "2",
            "bed_room": 3,
            "metrage": 85,
            "is_multi": 0,
            "dist_sea": 450,
            "dist_sea_type": "m",
            "dist_airport": 40,
            "dist_airport_type": "km",
            "location_map": "https://maps.example/x",
            "building_floor": 4,
            "age_of_the_building": 5,
            "furnished_sale": 1,
            "types": [{"id": 3, "name": "Apartment"}],
            "houseTypes": [{"id": 8, "name": "2+1"}],
            "tags": [{"id": 10, "tag_key": "new_building"}, {"id": 11}],
            "heatingTypes": [{"id": 3, "heating_type_key": "gas"}],
            "landscapes": [],
            "images": [{"id": 1, "file_name": "a.jpg", "image_order": 1}]
        }));
        let model = normalize(Some(&r), Locale::En);

        assert!(!model.is_multi());
        assert_eq!(model.title, "Sea View Flat");
        assert_eq!(model.money_type, MoneyType::Euro);
        assert_eq!(model.spec().min_price, 100000.0);
        assert_eq!(model.spec().baths, 2.0);
        assert_eq!(model.spec().beds, "3");
        assert_eq!(model.distances.airport.unit, DistanceUnit::Km);
        assert!(model.furnished);
        assert_eq!(model.types, vec![3]);
        assert_eq!(model.unit_types, vec![8]);
        assert_eq!(model.tags, vec![10, 11]);
        assert_eq!(model.heating, vec![3]);
        assert_eq!(model.images.len(), 1);
    }

    #[test]
    fn test_legacy_camel_case_shape() {
        let r = record(json!({
            "isMulti": true,
            "title": "Project",
            "locationValue": "besiktas",
            "areaValue": "levent",
            "typeValue": [1, 2],
            "typeUnit": 5,
            "minPrice": 1000,
            "maxPrice": "5000",
            "maxBaths": 3
        }));
        let model = normalize(Some(&r), Locale::En);
        assert!(model.is_multi());
        assert_eq!(model.location, "besiktas");
        assert_eq!(model.area, "levent");
        assert_eq!(model.types, vec![1, 2]);
        assert_eq!(model.unit_types, vec![5]);
        let max = model.maxima().unwrap();
        assert_eq!(max.max_price, Some(5000.0));
        assert_eq!(max.max_baths, Some(3.0));
        assert_eq!(max.max_sqt, None);
    }

    #[test]
    fn test_locale_suffixed_columns() {
        let r = record(json!({
            "title_ru": "Квартира у моря",
            "location_ru": "kadikoy",
            "details_des_ru": "Описание"
        }));
        let model = normalize(Some(&r), Locale::Ru);
        assert_eq!(model.title, "Квартира у моря");
        assert_eq!(model.location, "kadikoy");
        assert_eq!(model.description, "Описание");

        let model = normalize(Some(&r), Locale::En);
        assert_eq!(model.title, "");
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let r = record(json!({
            "title": {"nested": true},
            "metrage": "large",
            "money_type": "yen",
            "dist_sea_type": "miles",
            "tags": "not-a-list",
            "bathroom": null
        }));
        let normalized = normalize_with_report(Some(&r), Locale::En);
        let model = &normalized.model;
        assert_eq!(model.title, "");
        assert_eq!(model.spec().sqt, 0.0);
        assert_eq!(model.money_type, MoneyType::Dollar);
        assert_eq!(model.distances.sea.unit, DistanceUnit::M);
        assert!(model.tags.is_empty());
        assert_eq!(model.spec().baths, 1.0);
        for field in [Field::Title, Field::Sqt, Field::MoneyType, Field::SeaType, Field::Tags] {
            assert!(normalized.degraded.contains(&field), "{field} not reported");
        }
        assert!(!normalized.degraded.contains(&Field::Baths));
    }

    #[test]
    fn test_single_record_ignores_range_fields() {
        let r = record(json!({"is_multi": false, "max_bath": 4}));
        let model = normalize(Some(&r), Locale::En);
        assert!(matches!(model.units, Units::Single(_)));
    }

    #[test]
    fn test_empty_record_matches_create_defaults() {
        let model = normalize(Some(&PropertyRecord::default()), Locale::En);
        assert_eq!(model, EditModel::new(false));
    }
}
