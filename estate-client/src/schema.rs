//! Validation schema
//!
//! Requiredness is a per-mode matrix ([`Schema`]) rather than hard-coded
//! checks, so deployments can tighten or relax individual fields.

use serde::Serialize;
use shared::models::edit::{BED_OPTIONS, format_number};
use shared::{EditModel, Field, FieldValue, UnitMaxima};
use std::collections::BTreeMap;

/// Which variant of the edit model a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitMode {
    Single,
    Multi,
}

impl UnitMode {
    pub fn of(model: &EditModel) -> Self {
        if model.is_multi() { Self::Multi } else { Self::Single }
    }
}

/// Constraint on one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Not checked
    Optional,
    /// Non-blank text
    Required,
    /// Non-blank, well-formed http(s) URL
    Url,
    /// Number no smaller than the floor
    AtLeast(f64),
    /// At least one id selected
    NonEmptyList,
    /// Bedroom choice: one of [`BED_OPTIONS`] for single units, a number ≥ 1 for projects
    BedCount,
}

/// Outcome of a validation pass: field → message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

/// Per-mode requiredness matrix
#[derive(Debug, Clone)]
pub struct Schema {
    single: BTreeMap<Field, Rule>,
    multi: BTreeMap<Field, Rule>,
}

impl Default for Schema {
    fn default() -> Self {
        let common = [
            (Field::Title, Rule::Required),
            (Field::Location, Rule::Required),
            (Field::Area, Rule::Required),
            (Field::MapLink, Rule::Url),
            (Field::Baths, Rule::AtLeast(1.0)),
            (Field::Beds, Rule::BedCount),
            (Field::Sqt, Rule::AtLeast(1.0)),
            (Field::Floor, Rule::AtLeast(0.0)),
            (Field::AgeOfBuilding, Rule::AtLeast(0.0)),
            (Field::MinPrice, Rule::AtLeast(1.0)),
            (Field::Types, Rule::NonEmptyList),
            (Field::UnitTypes, Rule::NonEmptyList),
            (Field::DistShop, Rule::AtLeast(0.0)),
            (Field::DistAirport, Rule::AtLeast(0.0)),
            (Field::DistHospital, Rule::AtLeast(0.0)),
            (Field::DistSea, Rule::AtLeast(0.0)),
        ];
        let single: BTreeMap<Field, Rule> = common.into_iter().collect();
        let mut multi = single.clone();
        for field in [
            Field::MaxBaths,
            Field::MaxBeds,
            Field::MaxSqt,
            Field::MaxFloor,
            Field::MaxPrice,
        ] {
            multi.insert(field, Rule::Optional);
        }
        Self { single, multi }
    }
}

impl Schema {
    /// Override the rule of a field in one mode
    pub fn with_rule(mut self, mode: UnitMode, field: Field, rule: Rule) -> Self {
        self.rules_mut(mode).insert(field, rule);
        self
    }

    /// Override the rule of a field in both modes
    pub fn with_rule_everywhere(self, field: Field, rule: Rule) -> Self {
        self.with_rule(UnitMode::Single, field, rule)
            .with_rule(UnitMode::Multi, field, rule)
    }

    pub fn rule(&self, mode: UnitMode, field: Field) -> Rule {
        self.rules(mode)
            .get(&field)
            .copied()
            .unwrap_or(Rule::Optional)
    }

    /// Fields that must be filled in for the given mode
    pub fn required_fields(&self, mode: UnitMode) -> Vec<Field> {
        self.rules(mode)
            .iter()
            .filter(|(field, rule)| {
                **rule != Rule::Optional && !(mode == UnitMode::Single && field.is_multi_only())
            })
            .map(|(field, _)| *field)
            .collect()
    }

    fn rules(&self, mode: UnitMode) -> &BTreeMap<Field, Rule> {
        match mode {
            UnitMode::Single => &self.single,
            UnitMode::Multi => &self.multi,
        }
    }

    fn rules_mut(&mut self, mode: UnitMode) -> &mut BTreeMap<Field, Rule> {
        match mode {
            UnitMode::Single => &mut self.single,
            UnitMode::Multi => &mut self.multi,
        }
    }

    /// Check a model against the matrix of its mode
    pub fn validate(&self, model: &EditModel) -> ValidationReport {
        let mode = UnitMode::of(model);
        let mut report = ValidationReport::default();

        for (field, rule) in self.rules(mode) {
            if mode == UnitMode::Single && field.is_multi_only() {
                continue;
            }
            if let Err(message) = check(*rule, mode, &model.value(*field)) {
                report.insert(*field, message);
            }
        }

        if let Some(max) = model.maxima() {
            check_ranges(model, max, &mut report);
        }
        report
    }
}

/// Validate with the default matrix
pub fn validate(model: &EditModel) -> ValidationReport {
    Schema::default().validate(model)
}

fn check(rule: Rule, mode: UnitMode, value: &FieldValue) -> Result<(), String> {
    match (rule, value) {
        (Rule::Optional, _) => Ok(()),
        (Rule::Required, FieldValue::Text(s)) if !s.trim().is_empty() => Ok(()),
        (Rule::Required, _) => Err("Required".to_string()),
        (Rule::Url, FieldValue::Text(s)) if is_web_url(s) => Ok(()),
        (Rule::Url, _) => Err("Must be a valid URL".to_string()),
        (Rule::AtLeast(min), FieldValue::Number(n)) if *n >= min => Ok(()),
        (Rule::AtLeast(min), _) => Err(format!("Must be at least {}", format_number(min))),
        (Rule::NonEmptyList, FieldValue::Ids(ids)) if !ids.is_empty() => Ok(()),
        (Rule::NonEmptyList, _) => Err("Select at least one".to_string()),
        (Rule::BedCount, FieldValue::Text(s)) => check_beds(mode, s.trim()),
        (Rule::BedCount, _) => Err("Required".to_string()),
    }
}

fn check_beds(mode: UnitMode, beds: &str) -> Result<(), String> {
    if beds.is_empty() {
        return Err("Required".to_string());
    }
    match mode {
        UnitMode::Single if BED_OPTIONS.contains(&beds) => Ok(()),
        UnitMode::Single => Err(format!("Must be one of {}", BED_OPTIONS.join(", "))),
        UnitMode::Multi => match beds.parse::<f64>() {
            Ok(n) if n >= 1.0 => Ok(()),
            _ => Err("Must be a number of at least 1".to_string()),
        },
    }
}

/// Range upper bounds, when given, may not undercut the lower bound
fn check_ranges(model: &EditModel, max: &UnitMaxima, report: &mut ValidationReport) {
    let spec = model.spec();
    let min_beds = spec.beds.trim().parse::<f64>().ok();
    let pairs = [
        (Field::MaxBaths, max.max_baths, Some(spec.baths)),
        (Field::MaxBeds, max.max_beds, min_beds),
        (Field::MaxSqt, max.max_sqt, Some(spec.sqt)),
        (Field::MaxFloor, max.max_floor, Some(spec.floor)),
        (Field::MaxPrice, max.max_price, Some(spec.min_price)),
    ];
    for (field, upper, lower) in pairs {
        if let (Some(upper), Some(lower)) = (upper, lower)
            && upper < lower
        {
            report.insert(field, "Must not be less than the minimum");
        }
    }
}

fn is_web_url(value: &str) -> bool {
    match reqwest::Url::parse(value.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
