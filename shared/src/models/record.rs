//! Property record as returned by the server
//!
//! The detail endpoint has changed shape several times: snake_case vs
//! camelCase keys, locale-suffixed columns (`title_ru`), numbers sent as
//! strings, reference collections sent as ids, objects, or a single scalar.
//! [`PropertyRecord`] keeps the raw JSON object and exposes lenient typed
//! accessors that take a list of candidate keys in preference order.
//! Accessors return `None` for anything missing or malformed, never an error.

use super::edit::MediaRef;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw property record (read-only input)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRecord(Map<String, Value>);

/// Keys some server versions wrap the record in
const ENVELOPE_KEYS: &[&str] = &["data", "property", "propertyDetails"];

impl PropertyRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record from any JSON value, unwrapping known envelopes.
    ///
    /// Non-object input yields an empty record.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                for key in ENVELOPE_KEYS {
                    if matches!(map.get(*key), Some(Value::Object(_)))
                        && let Some(Value::Object(inner)) = map.remove(*key)
                    {
                        return Self(inner);
                    }
                }
                Self(map)
            }
            _ => Self::default(),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First non-blank textual value among `keys`, whitespace preserved
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().filter_map(|k| self.raw(k)).find_map(|v| match v {
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => as_text(other),
        })
    }

    /// First numeric value among `keys` (numbers or numeric strings)
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().filter_map(|k| self.raw(k)).find_map(as_f64)
    }

    /// First boolean-ish value among `keys` (`true`, `1`, `"1"`, `"true"`)
    pub fn flag(&self, keys: &[&str]) -> Option<bool> {
        keys.iter().filter_map(|k| self.raw(k)).find_map(as_flag)
    }

    /// First id collection among `keys`.
    ///
    /// Accepts `[1, 2]`, `["1", "2"]`, `[{"id": 1, ...}]`, a single scalar id
    /// or a single `{"id": ..}` object. Elements without a usable id are dropped.
    pub fn ids(&self, keys: &[&str]) -> Option<Vec<i64>> {
        keys.iter().filter_map(|k| self.raw(k)).find_map(as_ids)
    }

    /// First media list among `keys` (images or downloads)
    pub fn media(&self, keys: &[&str]) -> Option<Vec<MediaRef>> {
        keys.iter().filter_map(|k| self.raw(k)).find_map(as_media)
    }
}

impl From<Map<String, Value>> for PropertyRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

// ── Lenient value readers ──────────────────────────────────────────

pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

pub(crate) fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn id_of(value: &Value) -> Option<i64> {
    match value {
        Value::Object(obj) => obj.get("id").and_then(as_i64),
        other => as_i64(other),
    }
}

fn as_ids(value: &Value) -> Option<Vec<i64>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(id_of).collect()),
        Value::String(s) if s.trim().is_empty() => Some(Vec::new()),
        other => id_of(other).map(|id| vec![id]),
    }
}

fn as_media(value: &Value) -> Option<Vec<MediaRef>> {
    let Value::Array(items) = value else {
        return None;
    };
    let media = items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| match item {
            Value::String(name) if !name.is_empty() => Some(MediaRef {
                id: None,
                name: name.clone(),
                order: idx as i64 + 1,
            }),
            Value::Object(obj) => {
                let name = ["file_name", "name", "url"]
                    .iter()
                    .filter_map(|k| obj.get(*k))
                    .find_map(as_text)
                    .or_else(|| {
                        // locale-suffixed download names: name_ru, name_en
                        obj.iter()
                            .find(|(k, _)| k.starts_with("name_"))
                            .and_then(|(_, v)| as_text(v))
                    })?;
                let order = ["image_order", "file_order", "order"]
                    .iter()
                    .filter_map(|k| obj.get(*k))
                    .find_map(as_i64)
                    .unwrap_or(idx as i64 + 1);
                Some(MediaRef {
                    id: obj.get("id").and_then(as_i64),
                    name,
                    order,
                })
            }
            _ => None,
        })
        .collect();
    Some(media)
}
