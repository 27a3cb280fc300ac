// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use itertools::Itertools;
use regex::Regex;
use serde_json::Value;

use crate::modules::property::JsonObject;

/// Category value the mail file stores for "no categories".
pub const UNCATEGORIZED: &str = "Not Categorized";

static FIELD_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\d+$").expect("field code pattern is valid"));

/// Positional view columns are named `$<number>`.
pub fn is_field_code(key: &str) -> bool {
    FIELD_CODE.is_match(key)
}

/// View entries carry a position marker or numeric column codes; documents do not.
pub fn is_primitive(object: &JsonObject) -> bool {
    object.contains_key("@position")
        || object.contains_key("@entryid")
        || object.keys().any(|key| is_field_code(key))
}

/// Resolves a dotted path such as `@meta.unid`.
pub fn lookup<'a>(object: &'a JsonObject, path: &str) -> Option<&'a Value> {
    if let Some(value) = object.get(path) {
        return Some(value);
    }
    let mut parts = path.split('.');
    let mut current = object.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

pub fn first_value<'a>(object: &'a JsonObject, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(object, path))
        .find(|value| is_present(value))
}

pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items.iter().find_map(value_to_string),
        _ => None,
    }
}

pub fn first_string(object: &JsonObject, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(object, path))
        .find_map(value_to_string)
}

pub fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Array(items) => items.first().and_then(value_to_u64),
        _ => None,
    }
}

pub fn first_u64(object: &JsonObject, paths: &[&str]) -> Option<u64> {
    paths
        .iter()
        .filter_map(|path| lookup(object, path))
        .find_map(value_to_u64)
}

/// Boolean-like values: `true`/`false`, `"1"`/`"0"`, numbers, yes/no.
pub fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" => Some(true),
            "0" | "false" | "no" | "n" => Some(false),
            _ => None,
        },
        Value::Array(items) => items.first().and_then(parse_flag),
        _ => None,
    }
}

/// First field from `fields` that carries a usable signal. The second tuple
/// member marks fields whose meaning is inverted (e.g. `$Unread` for read).
pub fn first_flag(object: &JsonObject, fields: &[(&str, bool)]) -> Option<bool> {
    fields.iter().find_map(|(path, inverted)| {
        lookup(object, path)
            .and_then(parse_flag)
            .map(|flag| flag != *inverted)
    })
}

pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
        Value::Null => Vec::new(),
        other => value_to_string(other).into_iter().collect(),
    }
}

pub fn first_list(object: &JsonObject, paths: &[&str]) -> Vec<String> {
    first_value(object, paths)
        .map(string_list)
        .unwrap_or_default()
}

/// Category list with the "uncategorized" sentinel removed. JSCalendar
/// keyword maps (`{"name": true}`) are accepted as well.
pub fn categories(value: &Value) -> Vec<String> {
    let raw = match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| parse_flag(v).unwrap_or(true))
            .map(|(k, _)| k.clone())
            .collect(),
        other => string_list(other),
    };
    raw.into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(UNCATEGORIZED))
        .unique()
        .collect()
}

pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Array(items) => items.first().and_then(parse_datetime),
        _ => None,
    }
}

fn parse_datetime_str(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    // Domino compact form: 20240131T101500,00Z
    let compact = text.trim_end_matches('Z');
    let compact = compact.split(',').next().unwrap_or(compact);
    if let Ok(naive) = NaiveDateTime::parse_from_str(compact, "%Y%m%dT%H%M%S") {
        return Some(naive.and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn first_datetime(object: &JsonObject, paths: &[&str]) -> Option<DateTime<Utc>> {
    paths
        .iter()
        .filter_map(|path| lookup(object, path))
        .find_map(parse_datetime)
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn flag_value(flag: bool) -> Value {
    Value::String(if flag { "1" } else { "0" }.into())
}
