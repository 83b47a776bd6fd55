//! Weakly typed chart values

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Chart values: string keys mapped to arbitrary JSON-like values
///
/// This is the shape a Helm release consumes. Typed chart arguments are
/// written over it during default-merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub Map<String, JsonValue>);

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Load values from a YAML or JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse values from a YAML string (JSON is accepted as well)
    ///
    /// An empty document yields empty values.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Self::from_json_value(value)
    }

    /// Parse values from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Wrap a JSON value, which must be an object (or null)
    pub fn from_json_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(Self(map)),
            JsonValue::Null => Ok(Self::new()),
            other => Err(CoreError::Values {
                message: format!("expected a mapping at the top level, found {}", kind_of(&other)),
            }),
        }
    }

    /// Write every set key of `payload` over these values
    ///
    /// Top-level keys present in both take the payload's value. Keys only
    /// present here are left untouched. Null payload entries are unset
    /// fields and never introduce or replace a key.
    pub fn overlay(&mut self, payload: Map<String, JsonValue>) {
        for (key, value) in payload {
            if value.is_null() {
                continue;
            }
            self.0.insert(key, value);
        }
    }

    /// Deep merge another Values into this one
    ///
    /// Rules:
    /// - Scalars: overlay replaces base
    /// - Mappings: recursive merge
    /// - Sequences: overlay replaces base (not appended)
    pub fn merge(&mut self, overlay: &Values) {
        for (key, overlay_value) in &overlay.0 {
            match self.0.get_mut(key) {
                Some(base_value) => deep_merge(base_value, overlay_value),
                None => {
                    self.0.insert(key.clone(), overlay_value.clone());
                }
            }
        }
    }

    /// Insert a top-level key
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) -> Option<JsonValue> {
        self.0.insert(key.into(), value)
    }

    /// Remove a top-level key
    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.0.remove(key)
    }

    /// Check for a top-level key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a value by dotted path (e.g., "controller.replicaCount")
    pub fn set(&mut self, path: &str, value: JsonValue) -> Result<()> {
        let parts: Vec<&str> = path.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(CoreError::Values {
                message: format!("invalid key path '{}'", path),
            });
        }
        set_nested(&mut self.0, &parts, value);
        Ok(())
    }

    /// Get a value by dotted path
    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        let mut parts = path.split('.');
        let first = self.0.get(parts.next()?)?;
        parts.try_fold(first, |value, key| value.as_object()?.get(key))
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if values are empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the inner map
    pub fn inner(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// Convert into the inner map
    pub fn into_inner(self) -> Map<String, JsonValue> {
        self.0
    }
}

impl From<Map<String, JsonValue>> for Values {
    fn from(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }
}

/// Deep merge two JSON values
fn deep_merge(base: &mut JsonValue, overlay: &JsonValue) {
    match (base, overlay) {
        (JsonValue::Object(base_map), JsonValue::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a sequence",
        JsonValue::Object(_) => "a mapping",
    }
}

/// Set a nested value by path, creating intermediate mappings
fn set_nested(map: &mut Map<String, JsonValue>, path: &[&str], new_value: JsonValue) {
    let (key, remaining) = match path.split_first() {
        Some(split) => split,
        None => return,
    };

    if remaining.is_empty() {
        map.insert(key.to_string(), new_value);
        return;
    }

    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| JsonValue::Object(Map::new()));

    // Scalars on the way down are replaced by mappings
    if !entry.is_object() {
        *entry = JsonValue::Object(Map::new());
    }

    if let JsonValue::Object(child) = entry {
        set_nested(child, remaining, new_value);
    }
}

/// Parse --set arguments (key=value format)
pub fn parse_set_values(set_args: &[String]) -> Result<Values> {
    let mut values = Values::new();

    for arg in set_args {
        let (key, val) = arg.split_once('=').ok_or_else(|| CoreError::Values {
            message: format!("Invalid --set format: '{}'. Expected key=value", arg),
        })?;

        // Try to parse as JSON, fallback to string
        let json_value = if val == "true" {
            JsonValue::Bool(true)
        } else if val == "false" {
            JsonValue::Bool(false)
        } else if val == "null" {
            JsonValue::Null
        } else if let Ok(num) = val.parse::<i64>() {
            JsonValue::Number(num.into())
        } else if let Some(num) = val.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
            JsonValue::Number(num)
        } else if val.starts_with('[') || val.starts_with('{') {
            serde_json::from_str(val).unwrap_or(JsonValue::String(val.to_string()))
        } else {
            JsonValue::String(val.to_string())
        };

        values.set(key, json_value)?;
    }

    Ok(values)
}
