// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

use crate::modules::property::{extended_key, JsonObject, PropertyStore};

fn object(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap()
}

#[test]
fn tombstoned_extended_slot_is_reused() {
    let mut store = PropertyStore::default();
    assert_eq!(store.add_extended_property(&object(json!({"id": "a", "v": 1}))), 0);
    assert_eq!(store.add_extended_property(&object(json!({"id": "b", "v": 2}))), 1);

    assert!(store.delete_extended_property(&object(json!({"id": "a"}))));
    assert_eq!(store.add_extended_property(&object(json!({"id": "c"}))), 0);
    assert_eq!(store.add_extended_property(&object(json!({"id": "d"}))), 2);
}

#[test]
fn deleted_slot_keeps_its_key_as_null() {
    let mut store = PropertyStore::default();
    store.add_extended_property(&object(json!({"id": "a"})));
    store.delete_extended_property(&object(json!({"id": "a"})));

    let mut wire = JsonObject::new();
    store.write_into(&mut wire);
    assert_eq!(wire.get(&extended_key(0)), Some(&Value::Null));
    assert!(store.extended_properties().is_empty());
}

#[test]
fn malformed_extended_keys_are_ignored_for_allocation() {
    let document = object(json!({
        "PimExtProp_abc": {"id": "junk"},
        "PimExtProp_": {"id": "junk"},
        "PimExtProp_4": {"id": "x"},
        "Subject": "unrelated"
    }));
    let mut store = PropertyStore::from_document(&document);
    assert_eq!(store.next_extended_index(), 5);
    assert_eq!(store.add_extended_property(&object(json!({"id": "y"}))), 5);
}

#[test]
fn json_encoded_extended_property_is_decoded() {
    let document = object(json!({ "PimExtProp_0": "{\"id\":\"enc\",\"n\":3}" }));
    let store = PropertyStore::from_document(&document);
    let found = store
        .find_extended_property(&object(json!({"id": "enc"})))
        .unwrap();
    assert_eq!(found.get("n"), Some(&json!(3)));
}

#[test]
fn update_replaces_matching_slot_or_adds() {
    let mut store = PropertyStore::default();
    store.add_extended_property(&object(json!({"ns": "x", "name": "color", "value": "red"})));

    let index = store.update_extended_property(
        &object(json!({"ns": "x", "name": "color"})),
        &object(json!({"ns": "x", "name": "color", "value": "blue"})),
    );
    assert_eq!(index, 0);
    let found = store
        .find_extended_property(&object(json!({"name": "color"})))
        .unwrap();
    assert_eq!(found.get("value"), Some(&json!("blue")));

    let index = store.update_extended_property(
        &object(json!({"name": "size"})),
        &object(json!({"name": "size", "value": 3})),
    );
    assert_eq!(index, 1);
}

#[test]
fn empty_identifier_matches_nothing() {
    let mut store = PropertyStore::default();
    store.add_extended_property(&object(json!({"id": "a"})));
    assert!(store.find_extended_property(&JsonObject::new()).is_none());
    assert!(!store.delete_extended_property(&JsonObject::new()));
}

#[test]
fn additional_property_tombstone_and_removal() {
    let mut store = PropertyStore::default();
    store.set_additional_property("Color", json!("green"));
    assert_eq!(store.get_additional_property("Color"), Some(&json!("green")));

    store.delete_additional_property("Color");
    assert_eq!(store.get_additional_property("Color"), Some(&Value::Null));
    let mut wire = JsonObject::new();
    store.write_into(&mut wire);
    assert_eq!(wire.get("PimAddProp_Color"), Some(&Value::Null));

    assert_eq!(store.remove_additional_property("Color"), Some(Value::Null));
    assert!(store.get_additional_property("Color").is_none());
    let mut wire = JsonObject::new();
    store.write_into(&mut wire);
    assert!(!wire.contains_key("PimAddProp_Color"));
}
