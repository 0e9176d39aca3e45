//! Reference data used to populate the property form's selection fields

use super::record::{as_i64, as_text};
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One selectable reference item (`{id, name, key}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Areas share the reference item shape (`{id, area_key, area_name}`)
pub type AreaItem = OptionItem;

impl OptionItem {
    pub fn new(id: i64, name: impl Into<String>, key: Option<&str>) -> Self {
        Self {
            id,
            name: name.into(),
            key: key.map(str::to_string),
        }
    }

    /// Read an item from whichever shape the endpoint returned.
    ///
    /// Name: `name`, then `name_{locale}`, then any `*_name`.
    /// Key: `key`, then any `*_key`. Items without an id yield `None`.
    pub fn from_value(value: &Value, locale: Locale) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id").and_then(as_i64)?;

        let localized = format!("name_{locale}");
        let name = obj
            .get("name")
            .or_else(|| obj.get(&localized))
            .and_then(as_text)
            .or_else(|| {
                obj.iter()
                    .find(|(k, _)| k.ends_with("_name"))
                    .and_then(|(_, v)| as_text(v))
            })
            .unwrap_or_default();

        let key = obj
            .get("key")
            .and_then(as_text)
            .or_else(|| {
                obj.iter()
                    .find(|(k, _)| k.ends_with("_key"))
                    .and_then(|(_, v)| as_text(v))
            })
            .filter(|k| !k.is_empty());

        Some(Self { id, name, key })
    }

    /// Value stored in the edit model when this item is selected
    pub fn value_key(&self) -> String {
        self.key.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// Parse a list endpoint response (`[...]` or `{"data": [...]}`)
pub fn parse_items(value: &Value, locale: Locale) -> Vec<OptionItem> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };
    items
        .iter()
        .filter_map(|v| OptionItem::from_value(v, locale))
        .collect()
}

/// Reference data category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionCategory {
    Features,
    Locations,
    Types,
    Tags,
    Landscapes,
    HeatingTypes,
    UnitTypes,
}

impl OptionCategory {
    pub const ALL: [OptionCategory; 7] = [
        Self::Features,
        Self::Locations,
        Self::Types,
        Self::Tags,
        Self::Landscapes,
        Self::HeatingTypes,
        Self::UnitTypes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Features => "features",
            Self::Locations => "locations",
            Self::Types => "types",
            Self::Tags => "tags",
            Self::Landscapes => "landscapes",
            Self::HeatingTypes => "heating_types",
            Self::UnitTypes => "unit_types",
        }
    }
}

impl std::fmt::Display for OptionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale-scoped reference data, complete for every category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionCatalog {
    pub locale: Locale,
    items: BTreeMap<OptionCategory, Vec<OptionItem>>,
}

impl OptionCatalog {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            items: BTreeMap::new(),
        }
    }

    pub fn with(mut self, category: OptionCategory, items: Vec<OptionItem>) -> Self {
        self.items.insert(category, items);
        self
    }

    pub fn insert(&mut self, category: OptionCategory, items: Vec<OptionItem>) {
        self.items.insert(category, items);
    }

    /// Items of a category in server order (empty when not loaded)
    pub fn get(&self, category: OptionCategory) -> &[OptionItem] {
        self.items.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether every category has been filled in
    pub fn is_complete(&self) -> bool {
        OptionCategory::ALL.iter().all(|c| self.items.contains_key(c))
    }

    /// Look up a location by the value stored in the edit model
    pub fn location(&self, value: &str) -> Option<&OptionItem> {
        self.get(OptionCategory::Locations)
            .iter()
            .find(|item| item.value_key() == value)
    }
}
