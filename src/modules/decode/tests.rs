// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::Write;

use serde_json::{json, Value};
use tempfile::NamedTempFile;

use crate::modules::{
    decode::{decode_records, load_records, render},
    error::code::ErrorCode,
    item::{factory::ItemFactory, ItemKind},
};

fn file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn loads_an_array_of_records() {
    let file = file_with(r#"[{"@unid": "A"}, {"@unid": "B"}]"#);
    let records = load_records(file.path()).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn single_object_becomes_one_record() {
    let file = file_with(r#"{"@unid": "A", "Form": "Memo"}"#);
    let records = load_records(file.path()).await.unwrap();
    assert_eq!(records, vec![json!({"@unid": "A", "Form": "Memo"})]);
}

#[tokio::test]
async fn scalar_payload_is_rejected() {
    let file = file_with("42");
    let err = load_records(file.path()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);

    let file = file_with("{not json");
    assert!(load_records(file.path()).await.is_err());
}

#[tokio::test]
async fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_records(&dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
}

#[test]
fn decoded_output_is_tagged_by_kind() {
    let factory = ItemFactory::new("default");
    let records = vec![
        json!({"@unid": "M1", "Form": "Memo", "Subject": "Hello"}),
        json!("not a record"),
        json!({"@unid": "C1", "Form": "Person", "FirstName": "Ann"}),
    ];

    let items = decode_records(&factory, &records, None);
    let kinds: Vec<_> = items.iter().map(|item| item.kind()).collect();
    assert_eq!(kinds, vec![ItemKind::Message, ItemKind::Contact]);

    let rendered: Value = serde_json::from_str(&render(&items).unwrap()).unwrap();
    assert_eq!(rendered[0]["kind"], json!("message"));
    assert_eq!(rendered[1]["kind"], json!("contact"));
}
