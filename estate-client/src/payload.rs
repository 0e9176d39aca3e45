//! Edit model → request payload
//!
//! A pure function of the model and the form mode. Range bounds are only
//! emitted for multi-unit projects; booleans go out as 0/1. Single-line
//! text is trimmed, the description goes out as written.

use shared::{EditModel, FormMode, SubmissionPayload, Units};

pub fn build_payload(model: &EditModel, mode: FormMode) -> SubmissionPayload {
    let spec = model.spec();
    let max = match &model.units {
        Units::Single(_) => Default::default(),
        Units::Multi { max, .. } => *max,
    };
    let d = &model.distances;

    SubmissionPayload {
        id: mode.property_id(),
        title: model.title.trim().to_string(),
        details: model.description.clone(),
        location: model.location.trim().to_string(),
        area: model.area.trim().to_string(),
        location_map: model.map_link.trim().to_string(),
        money_type: model.money_type,
        price_min: spec.min_price,
        price_max: max.max_price,
        bathroom: spec.baths,
        max_bath: max.max_baths,
        bed_room: spec.beds.trim().to_string(),
        max_bed: max.max_beds,
        metrage: spec.sqt,
        max_sqt: max.max_sqt,
        building_floor: spec.floor,
        max_floor: max.max_floor,
        age_of_the_building: spec.age_of_building,
        furnished_sale: u8::from(model.furnished),
        is_multi: u8::from(model.is_multi()),
        dist_shopping: d.shop.value,
        dist_shopping_type: d.shop.unit,
        dist_airport: d.airport.value,
        dist_airport_type: d.airport.unit,
        dist_hospital: d.hospital.value,
        dist_hospital_type: d.hospital.unit,
        dist_sea: d.sea.value,
        dist_sea_type: d.sea.unit,
        buy_media: model.buy_property_link.trim().to_string(),
        available_media: model.available_property_link.trim().to_string(),
        types: model.types.clone(),
        house_types: model.unit_types.clone(),
        tags: model.tags.clone(),
        features: model.features.clone(),
        heating_types: model.heating.clone(),
        landscapes: model.landscapes.clone(),
        images: model.images.clone(),
        downloads: model.downloads.clone(),
    }
}
