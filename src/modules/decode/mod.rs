// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Offline decoding of captured upstream records.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        item::{factory::ItemFactory, PimItem},
    },
    raise_error,
};

#[cfg(test)]
mod tests;

/// Reads a JSON file holding either one raw record or an array of them.
pub async fn load_records(path: &Path) -> PimResult<Vec<Value>> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        raise_error!(
            format!("Failed to read {}: {}", path.display(), e),
            ErrorCode::InvalidParameter
        )
    })?;
    let parsed: Value = serde_json::from_str(&content).map_err(|e| {
        raise_error!(
            format!("{} is not valid JSON: {}", path.display(), e),
            ErrorCode::InvalidParameter
        )
    })?;
    match parsed {
        Value::Array(records) => Ok(records),
        Value::Object(_) => Ok(vec![parsed]),
        other => Err(raise_error!(
            format!(
                "Expected a record or an array of records in {}, found {}",
                path.display(),
                other
            ),
            ErrorCode::InvalidParameter
        )),
    }
}

/// Converts every record, skipping the malformed ones.
pub fn decode_records(
    factory: &ItemFactory,
    records: &[Value],
    view_name: Option<&str>,
) -> Vec<PimItem> {
    let conversion = factory.create_items_from_objects(records, view_name, None, &[]);
    info!(
        "Decoded {} of {} records",
        conversion.items.len(),
        conversion.consumed
    );
    conversion.items
}

pub fn render(items: &[PimItem]) -> PimResult<String> {
    serde_json::to_string_pretty(items).map_err(|e| {
        raise_error!(
            format!("Failed to serialize decoded items: {}", e),
            ErrorCode::InternalError
        )
    })
}
