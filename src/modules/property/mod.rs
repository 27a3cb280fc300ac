// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Out-of-schema properties carried alongside the well-known item fields.
//!
//! Two containers share one wire object with the item's own fields:
//!
//! * extended properties: opaque JSON objects stored under
//!   `PimExtProp_<index>`. A slot whose value is no longer an object has been
//!   freed and is handed out again by the next add.
//! * additional properties: single named values stored under
//!   `PimAddProp_<name>`. A `null` value is a tombstone that asks upstream to
//!   delete the field; removing the key leaves the upstream value untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(test)]
mod tests;

pub type JsonObject = Map<String, Value>;

pub const EXTENDED_PROPERTY_PREFIX: &str = "PimExtProp";
pub const ADDITIONAL_PROPERTY_PREFIX: &str = "PimAddProp_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyStore {
    extended: BTreeMap<String, Value>,
    additional: BTreeMap<String, Value>,
}

pub fn extended_key(index: usize) -> String {
    format!("{}_{}", EXTENDED_PROPERTY_PREFIX, index)
}

pub fn additional_key(name: &str) -> String {
    format!("{}{}", ADDITIONAL_PROPERTY_PREFIX, name)
}

/// Slot index of an extended-property key, `None` for malformed suffixes.
fn parse_extended_index(key: &str) -> Option<usize> {
    key.strip_prefix(EXTENDED_PROPERTY_PREFIX)?
        .strip_prefix('_')?
        .parse::<usize>()
        .ok()
}

/// Every identifier pair must be present with an equal value. An empty
/// identifier never matches.
fn matches_identifier(candidate: &JsonObject, identifier: &JsonObject) -> bool {
    !identifier.is_empty()
        && identifier
            .iter()
            .all(|(key, value)| candidate.get(key) == Some(value))
}

impl PropertyStore {
    /// Collects both property containers out of a document-shaped object.
    pub fn from_document(object: &JsonObject) -> Self {
        let mut store = PropertyStore::default();
        for (key, value) in object {
            if key.starts_with(ADDITIONAL_PROPERTY_PREFIX) {
                store.additional.insert(key.clone(), value.clone());
            } else if key.starts_with(EXTENDED_PROPERTY_PREFIX) {
                // Domino text fields may hand the object back JSON-encoded.
                let value = match value {
                    Value::String(text) => match serde_json::from_str::<Value>(text) {
                        Ok(parsed @ Value::Object(_)) => parsed,
                        _ => value.clone(),
                    },
                    _ => value.clone(),
                };
                store.extended.insert(key.clone(), value);
            }
        }
        store
    }

    /// Writes every stored key, tombstones included, into `target`.
    pub fn write_into(&self, target: &mut JsonObject) {
        for (key, value) in self.extended.iter().chain(self.additional.iter()) {
            target.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extended.is_empty() && self.additional.is_empty()
    }

    /// Index the next added extended property will occupy: the lowest freed
    /// slot if any, otherwise one past the highest live slot.
    pub fn next_extended_index(&self) -> usize {
        let mut freed: Option<usize> = None;
        let mut highest: Option<usize> = None;
        for (key, value) in &self.extended {
            let Some(index) = parse_extended_index(key) else {
                continue;
            };
            if value.is_object() {
                highest = Some(highest.map_or(index, |h| h.max(index)));
            } else {
                freed = Some(freed.map_or(index, |f| f.min(index)));
            }
        }
        freed.unwrap_or_else(|| highest.map_or(0, |h| h + 1))
    }

    pub fn add_extended_property(&mut self, property: &JsonObject) -> usize {
        let index = self.next_extended_index();
        self.extended
            .insert(extended_key(index), Value::Object(property.clone()));
        index
    }

    /// Replaces the slot matching `identifier`, or adds `property` when no
    /// slot matches. Returns the slot index written.
    pub fn update_extended_property(
        &mut self,
        identifier: &JsonObject,
        property: &JsonObject,
    ) -> usize {
        match self.find_extended_slot(identifier) {
            Some(index) => {
                self.extended
                    .insert(extended_key(index), Value::Object(property.clone()));
                index
            }
            None => self.add_extended_property(property),
        }
    }

    pub fn find_extended_property(&self, identifier: &JsonObject) -> Option<JsonObject> {
        let index = self.find_extended_slot(identifier)?;
        self.extended
            .get(&extended_key(index))
            .and_then(Value::as_object)
            .cloned()
    }

    /// Tombstones the matching slot in place. The key stays so upstream sees
    /// the deletion, and the index becomes reusable.
    pub fn delete_extended_property(&mut self, identifier: &JsonObject) -> bool {
        match self.find_extended_slot(identifier) {
            Some(index) => {
                self.extended.insert(extended_key(index), Value::Null);
                true
            }
            None => false,
        }
    }

    /// Live extended properties in slot order.
    pub fn extended_properties(&self) -> Vec<(usize, JsonObject)> {
        let mut live: Vec<(usize, JsonObject)> = self
            .extended
            .iter()
            .filter_map(|(key, value)| {
                let index = parse_extended_index(key)?;
                value.as_object().map(|object| (index, object.clone()))
            })
            .collect();
        live.sort_by_key(|(index, _)| *index);
        live
    }

    fn find_extended_slot(&self, identifier: &JsonObject) -> Option<usize> {
        self.extended_slots()
            .into_iter()
            .find(|(_, object)| matches_identifier(object, identifier))
            .map(|(index, _)| index)
    }

    fn extended_slots(&self) -> Vec<(usize, &JsonObject)> {
        let mut slots: Vec<(usize, &JsonObject)> = self
            .extended
            .iter()
            .filter_map(|(key, value)| Some((parse_extended_index(key)?, value.as_object()?)))
            .collect();
        slots.sort_by_key(|(index, _)| *index);
        slots
    }

    /// `Some(Value::Null)` for a tombstoned property, `None` when the key is
    /// not tracked at all.
    pub fn get_additional_property(&self, name: &str) -> Option<&Value> {
        self.additional.get(&additional_key(name))
    }

    pub fn set_additional_property(&mut self, name: &str, value: Value) {
        self.additional.insert(additional_key(name), value);
    }

    pub fn delete_additional_property(&mut self, name: &str) {
        self.additional.insert(additional_key(name), Value::Null);
    }

    pub fn remove_additional_property(&mut self, name: &str) -> Option<Value> {
        self.additional.remove(&additional_key(name))
    }

    /// Tracked additional properties by bare name, tombstones included.
    pub fn additional_properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.additional.iter().filter_map(|(key, value)| {
            key.strip_prefix(ADDITIONAL_PROPERTY_PREFIX)
                .map(|name| (name, value))
        })
    }
}
