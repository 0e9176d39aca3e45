//! Edit model
//!
//! The flat, consistently typed representation of a property while it is
//! being created or edited. Single-unit listings and multi-unit projects are
//! separate [`Units`] variants, so the range fields (`maxBaths`, ...) only
//! exist where they are meaningful.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Field names
// ============================================================================

/// Canonical form field name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    IsMulti,
    Title,
    Description,
    Location,
    Area,
    MapLink,
    MoneyType,
    Furnished,
    BuyPropertyLink,
    AvailablePropertyLink,
    Images,
    Downloads,
    Types,
    UnitTypes,
    Tags,
    Features,
    Heating,
    Landscapes,
    DistShop,
    ShopType,
    DistAirport,
    AirportType,
    DistHospital,
    HospitalType,
    DistSea,
    SeaType,
    Baths,
    MaxBaths,
    Beds,
    MaxBeds,
    Sqt,
    MaxSqt,
    Floor,
    MaxFloor,
    AgeOfBuilding,
    MinPrice,
    MaxPrice,
}

impl Field {
    pub const ALL: [Field; 37] = [
        Self::IsMulti,
        Self::Title,
        Self::Description,
        Self::Location,
        Self::Area,
        Self::MapLink,
        Self::MoneyType,
        Self::Furnished,
        Self::BuyPropertyLink,
        Self::AvailablePropertyLink,
        Self::Images,
        Self::Downloads,
        Self::Types,
        Self::UnitTypes,
        Self::Tags,
        Self::Features,
        Self::Heating,
        Self::Landscapes,
        Self::DistShop,
        Self::ShopType,
        Self::DistAirport,
        Self::AirportType,
        Self::DistHospital,
        Self::HospitalType,
        Self::DistSea,
        Self::SeaType,
        Self::Baths,
        Self::MaxBaths,
        Self::Beds,
        Self::MaxBeds,
        Self::Sqt,
        Self::MaxSqt,
        Self::Floor,
        Self::MaxFloor,
        Self::AgeOfBuilding,
        Self::MinPrice,
        Self::MaxPrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsMulti => "isMulti",
            Self::Title => "title",
            Self::Description => "description",
            Self::Location => "location",
            Self::Area => "area",
            Self::MapLink => "mapLink",
            Self::MoneyType => "moneyType",
            Self::Furnished => "furnished",
            Self::BuyPropertyLink => "buyPropertyLink",
            Self::AvailablePropertyLink => "availablePropertyLink",
            Self::Images => "images",
            Self::Downloads => "downloads",
            Self::Types => "types",
            Self::UnitTypes => "unitTypes",
            Self::Tags => "tags",
            Self::Features => "features",
            Self::Heating => "heating",
            Self::Landscapes => "landscapes",
            Self::DistShop => "distShop",
            Self::ShopType => "shopType",
            Self::DistAirport => "distAirport",
            Self::AirportType => "airportType",
            Self::DistHospital => "distHospital",
            Self::HospitalType => "hospitalType",
            Self::DistSea => "distSea",
            Self::SeaType => "seaType",
            Self::Baths => "baths",
            Self::MaxBaths => "maxBaths",
            Self::Beds => "beds",
            Self::MaxBeds => "maxBeds",
            Self::Sqt => "sqt",
            Self::MaxSqt => "maxSqt",
            Self::Floor => "floor",
            Self::MaxFloor => "maxFloor",
            Self::AgeOfBuilding => "ageOfBuilding",
            Self::MinPrice => "minPrice",
            Self::MaxPrice => "maxPrice",
        }
    }

    /// Range upper bounds, present only on multi-unit projects
    pub fn is_multi_only(&self) -> bool {
        matches!(
            self,
            Self::MaxBaths | Self::MaxBeds | Self::MaxSqt | Self::MaxFloor | Self::MaxPrice
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0:?}")]
pub struct UnknownField(pub String);

/// Field-level error (change event rejected or validation failed)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// ============================================================================
// Typed enums
// ============================================================================

/// Listing currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoneyType {
    #[default]
    Dollar,
    Euro,
    Ruble,
}

impl MoneyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dollar => "dollar",
            Self::Euro => "euro",
            Self::Ruble => "ruble",
        }
    }
}

impl FromStr for MoneyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dollar" | "usd" | "$" => Ok(Self::Dollar),
            "euro" | "eur" | "€" => Ok(Self::Euro),
            "ruble" | "rub" | "₽" => Ok(Self::Ruble),
            other => Err(UnknownVariant::new("dollar, euro, ruble", other)),
        }
    }
}

/// Unit of a distance-to-amenity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    M,
    Km,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M => "m",
            Self::Km => "km",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" => Ok(Self::M),
            "km" => Ok(Self::Km),
            other => Err(UnknownVariant::new("m, km", other)),
        }
    }
}

/// Text that names none of an enum's variants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected one of {expected}; got {got:?}")]
pub struct UnknownVariant {
    pub expected: &'static str,
    pub got: String,
}

impl UnknownVariant {
    fn new(expected: &'static str, got: &str) -> Self {
        Self {
            expected,
            got: got.to_string(),
        }
    }
}

/// Bedroom choices offered for single-unit listings
pub const BED_OPTIONS: [&str; 6] = ["1", "2", "3", "4", "5", "+5"];

// ============================================================================
// Model
// ============================================================================

/// Uploaded image or downloadable file attached to a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }
}

/// Distances to nearby amenities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distances {
    pub shop: Distance,
    pub airport: Distance,
    pub hospital: Distance,
    pub sea: Distance,
}

impl Default for Distances {
    fn default() -> Self {
        Self {
            shop: Distance::new(0.0, DistanceUnit::M),
            airport: Distance::new(0.0, DistanceUnit::Km),
            hospital: Distance::new(0.0, DistanceUnit::M),
            sea: Distance::new(0.0, DistanceUnit::M),
        }
    }
}

/// Per-unit figures; the lower bound of the range for multi-unit projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub baths: f64,
    /// `1`..`5` or `+5` for single units, a plain number for projects
    pub beds: String,
    pub sqt: f64,
    pub floor: f64,
    pub age_of_building: f64,
    pub min_price: f64,
}

impl Default for UnitSpec {
    fn default() -> Self {
        Self {
            baths: 1.0,
            beds: String::new(),
            sqt: 0.0,
            floor: 0.0,
            age_of_building: 0.0,
            min_price: 0.0,
        }
    }
}

/// Upper bounds of a multi-unit project; all optional
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitMaxima {
    pub max_baths: Option<f64>,
    pub max_beds: Option<f64>,
    pub max_sqt: Option<f64>,
    pub max_floor: Option<f64>,
    pub max_price: Option<f64>,
}

/// Single unit vs. multi-unit project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Units {
    Single(UnitSpec),
    Multi { spec: UnitSpec, max: UnitMaxima },
}

impl Default for Units {
    fn default() -> Self {
        Self::Single(UnitSpec::default())
    }
}

/// Normalized property being created or edited
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditModel {
    pub title: String,
    pub description: String,
    pub location: String,
    pub area: String,
    pub map_link: String,
    pub money_type: MoneyType,
    pub furnished: bool,
    pub buy_property_link: String,
    pub available_property_link: String,
    pub images: Vec<MediaRef>,
    pub downloads: Vec<MediaRef>,
    /// Property type ids
    pub types: Vec<i64>,
    /// Unit (house) type ids
    pub unit_types: Vec<i64>,
    pub tags: Vec<i64>,
    pub features: Vec<i64>,
    pub heating: Vec<i64>,
    pub landscapes: Vec<i64>,
    pub distances: Distances,
    pub units: Units,
}

impl EditModel {
    /// Create-mode defaults
    pub fn new(multi: bool) -> Self {
        let mut model = Self::default();
        model.set_multi(multi);
        model
    }

    pub fn is_multi(&self) -> bool {
        matches!(self.units, Units::Multi { .. })
    }

    pub fn spec(&self) -> &UnitSpec {
        match &self.units {
            Units::Single(spec) | Units::Multi { spec, .. } => spec,
        }
    }

    pub fn spec_mut(&mut self) -> &mut UnitSpec {
        match &mut self.units {
            Units::Single(spec) | Units::Multi { spec, .. } => spec,
        }
    }

    pub fn maxima(&self) -> Option<&UnitMaxima> {
        match &self.units {
            Units::Single(_) => None,
            Units::Multi { max, .. } => Some(max),
        }
    }

    /// Switch between single unit and project; the shared figures are kept
    pub fn set_multi(&mut self, multi: bool) {
        if multi == self.is_multi() {
            return;
        }
        let spec = std::mem::take(self.spec_mut());
        self.units = if multi {
            Units::Multi {
                spec,
                max: UnitMaxima::default(),
            }
        } else {
            Units::Single(spec)
        };
    }

    /// Apply a field change event, coercing the incoming value.
    ///
    /// `isMulti` is not settable here; mode switches go through
    /// [`EditModel::set_multi`] so callers can gate them.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), FieldError> {
        match field {
            Field::IsMulti => {
                return Err(FieldError::new(field, "use set_multi to switch unit mode"));
            }
            Field::Title => self.title = value.into_text(field)?,
            Field::Description => self.description = value.into_text(field)?,
            Field::Location => self.location = value.into_text(field)?,
            Field::Area => self.area = value.into_text(field)?,
            Field::MapLink => self.map_link = value.into_text(field)?,
            Field::BuyPropertyLink => self.buy_property_link = value.into_text(field)?,
            Field::AvailablePropertyLink => {
                self.available_property_link = value.into_text(field)?
            }
            Field::MoneyType => self.money_type = value.parse_enum(field)?,
            Field::Furnished => self.furnished = value.to_flag(field)?,
            Field::Images => self.images = value.into_media(field)?,
            Field::Downloads => self.downloads = value.into_media(field)?,
            Field::Types => self.types = value.into_ids(field)?,
            Field::UnitTypes => self.unit_types = value.into_ids(field)?,
            Field::Tags => self.tags = value.into_ids(field)?,
            Field::Features => self.features = value.into_ids(field)?,
            Field::Heating => self.heating = value.into_ids(field)?,
            Field::Landscapes => self.landscapes = value.into_ids(field)?,
            Field::DistShop => self.distances.shop.value = value.to_number(field)?,
            Field::DistAirport => self.distances.airport.value = value.to_number(field)?,
            Field::DistHospital => self.distances.hospital.value = value.to_number(field)?,
            Field::DistSea => self.distances.sea.value = value.to_number(field)?,
            Field::ShopType => self.distances.shop.unit = value.parse_enum(field)?,
            Field::AirportType => self.distances.airport.unit = value.parse_enum(field)?,
            Field::HospitalType => self.distances.hospital.unit = value.parse_enum(field)?,
            Field::SeaType => self.distances.sea.unit = value.parse_enum(field)?,
            Field::Baths => self.spec_mut().baths = value.to_number(field)?,
            Field::Beds => self.spec_mut().beds = value.into_text(field)?,
            Field::Sqt => self.spec_mut().sqt = value.to_number(field)?,
            Field::Floor => self.spec_mut().floor = value.to_number(field)?,
            Field::AgeOfBuilding => self.spec_mut().age_of_building = value.to_number(field)?,
            Field::MinPrice => self.spec_mut().min_price = value.to_number(field)?,
            Field::MaxBaths
            | Field::MaxBeds
            | Field::MaxSqt
            | Field::MaxFloor
            | Field::MaxPrice => {
                let number = value.to_optional_number(field)?;
                let Units::Multi { max, .. } = &mut self.units else {
                    return Err(FieldError::new(field, "only available for multi-unit projects"));
                };
                let slot = match field {
                    Field::MaxBaths => &mut max.max_baths,
                    Field::MaxBeds => &mut max.max_beds,
                    Field::MaxSqt => &mut max.max_sqt,
                    Field::MaxFloor => &mut max.max_floor,
                    _ => &mut max.max_price,
                };
                *slot = number;
            }
        }
        Ok(())
    }

    /// Current value of a field; multi-only fields read as `Empty` on single units
    pub fn value(&self, field: Field) -> FieldValue {
        let spec = self.spec();
        let max = |pick: fn(&UnitMaxima) -> Option<f64>| {
            self.maxima()
                .and_then(pick)
                .map(FieldValue::Number)
                .unwrap_or(FieldValue::Empty)
        };
        match field {
            Field::IsMulti => FieldValue::Flag(self.is_multi()),
            Field::Title => FieldValue::Text(self.title.clone()),
            Field::Description => FieldValue::Text(self.description.clone()),
            Field::Location => FieldValue::Text(self.location.clone()),
            Field::Area => FieldValue::Text(self.area.clone()),
            Field::MapLink => FieldValue::Text(self.map_link.clone()),
            Field::BuyPropertyLink => FieldValue::Text(self.buy_property_link.clone()),
            Field::AvailablePropertyLink => {
                FieldValue::Text(self.available_property_link.clone())
            }
            Field::MoneyType => FieldValue::Text(self.money_type.as_str().to_string()),
            Field::Furnished => FieldValue::Flag(self.furnished),
            Field::Images => FieldValue::Media(self.images.clone()),
            Field::Downloads => FieldValue::Media(self.downloads.clone()),
            Field::Types => FieldValue::Ids(self.types.clone()),
            Field::UnitTypes => FieldValue::Ids(self.unit_types.clone()),
            Field::Tags => FieldValue::Ids(self.tags.clone()),
            Field::Features => FieldValue::Ids(self.features.clone()),
            Field::Heating => FieldValue::Ids(self.heating.clone()),
            Field::Landscapes => FieldValue::Ids(self.landscapes.clone()),
            Field::DistShop => FieldValue::Number(self.distances.shop.value),
            Field::DistAirport => FieldValue::Number(self.distances.airport.value),
            Field::DistHospital => FieldValue::Number(self.distances.hospital.value),
            Field::DistSea => FieldValue::Number(self.distances.sea.value),
            Field::ShopType => FieldValue::Text(self.distances.shop.unit.as_str().into()),
            Field::AirportType => FieldValue::Text(self.distances.airport.unit.as_str().into()),
            Field::HospitalType => {
                FieldValue::Text(self.distances.hospital.unit.as_str().into())
            }
            Field::SeaType => FieldValue::Text(self.distances.sea.unit.as_str().into()),
            Field::Baths => FieldValue::Number(spec.baths),
            Field::Beds => FieldValue::Text(spec.beds.clone()),
            Field::Sqt => FieldValue::Number(spec.sqt),
            Field::Floor => FieldValue::Number(spec.floor),
            Field::AgeOfBuilding => FieldValue::Number(spec.age_of_building),
            Field::MinPrice => FieldValue::Number(spec.min_price),
            Field::MaxBaths => max(|m| m.max_baths),
            Field::MaxBeds => max(|m| m.max_beds),
            Field::MaxSqt => max(|m| m.max_sqt),
            Field::MaxFloor => max(|m| m.max_floor),
            Field::MaxPrice => max(|m| m.max_price),
        }
    }

    /// Fields whose value differs from `other`
    pub fn changed_fields(&self, other: &EditModel) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| self.value(*f) != other.value(*f))
            .collect()
    }
}

// ============================================================================
// Change event values
// ============================================================================

/// Raw value carried by a field change event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Ids(Vec<i64>),
    Media(Vec<MediaRef>),
    Empty,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    fn into_text(self, field: Field) -> Result<String, FieldError> {
        match self {
            Self::Text(s) => Ok(s),
            Self::Number(n) => Ok(format_number(n)),
            Self::Empty => Ok(String::new()),
            _ => Err(FieldError::new(field, "expected text")),
        }
    }

    /// Number coercion: `""` reads as 0, unparsable text is rejected
    fn to_number(&self, field: Field) -> Result<f64, FieldError> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(*n),
            Self::Text(s) if s.trim().is_empty() => Ok(0.0),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| FieldError::new(field, "expected a number")),
            Self::Flag(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Empty => Ok(0.0),
            _ => Err(FieldError::new(field, "expected a number")),
        }
    }

    fn to_optional_number(&self, field: Field) -> Result<Option<f64>, FieldError> {
        match self {
            Self::Empty => Ok(None),
            Self::Text(s) if s.trim().is_empty() => Ok(None),
            other => other.to_number(field).map(Some),
        }
    }

    fn to_flag(&self, field: Field) -> Result<bool, FieldError> {
        match self {
            Self::Flag(b) => Ok(*b),
            Self::Number(n) => Ok(*n != 0.0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => Ok(true),
                "0" | "false" | "off" | "" => Ok(false),
                _ => Err(FieldError::new(field, "expected true or false")),
            },
            Self::Empty => Ok(false),
            _ => Err(FieldError::new(field, "expected true or false")),
        }
    }

    fn into_ids(self, field: Field) -> Result<Vec<i64>, FieldError> {
        match self {
            Self::Ids(ids) => Ok(ids),
            Self::Empty => Ok(Vec::new()),
            Self::Number(n) if n.fract() == 0.0 => Ok(vec![n as i64]),
            Self::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<i64>()
                        .map_err(|_| FieldError::new(field, format!("invalid id {part:?}")))
                })
                .collect(),
            _ => Err(FieldError::new(field, "expected a list of ids")),
        }
    }

    fn into_media(self, field: Field) -> Result<Vec<MediaRef>, FieldError> {
        match self {
            Self::Media(media) => Ok(media),
            // `[]` deserializes as an empty id list
            Self::Ids(ids) if ids.is_empty() => Ok(Vec::new()),
            Self::Empty => Ok(Vec::new()),
            _ => Err(FieldError::new(field, "expected a media list")),
        }
    }

    fn parse_enum<T: FromStr<Err = UnknownVariant>>(&self, field: Field) -> Result<T, FieldError> {
        match self {
            Self::Text(s) => s
                .parse()
                .map_err(|e: UnknownVariant| FieldError::new(field, e.to_string())),
            _ => Err(FieldError::new(field, "expected text")),
        }
    }
}

/// `40.0` → `"40"`, `2.5` → `"2.5"`
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
