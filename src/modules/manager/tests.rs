// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use chrono::NaiveDate;
use http::StatusCode;
use serde_json::{json, Value};

use crate::modules::{
    cache::label::{LabelCache, LabelIgnoreFilter},
    error::code::ErrorCode,
    item::{
        contact::PimContact,
        label::{LabelKind, PimLabel},
        ItemKind,
    },
    manager::PimManager,
    retrieval::Selector,
    settings::cli::PimConfig,
    transport::{
        fixture::{FixtureAuth, FixtureTransport},
        Resource, ResultEnvelope, UserCredentials,
    },
};

type TestManager = PimManager<FixtureTransport, FixtureAuth>;

fn manager_with(transport: FixtureTransport, accept: bool) -> TestManager {
    let config = PimConfig::default();
    let cache = Arc::new(LabelCache::from_config(&config));
    PimManager::new(transport, FixtureAuth { accept }, cache, config)
}

fn manager(transport: FixtureTransport) -> TestManager {
    manager_with(transport, true)
}

fn ann() -> UserCredentials {
    UserCredentials::new("ann", "secret")
}

fn label_records() -> Vec<Value> {
    vec![
        json!({"$FolderScript": "", "FolderId": "F1", "$TITLE": "($Inbox)", "Type": "mail", "unreadCount": 3}),
        json!({"$FolderScript": "", "FolderId": "F2", "$TITLE": "Projects", "Type": "mail"}),
        json!({"FolderId": "F3", "$TITLE": "Calendar", "Type": "calendar", "isFolder": false}),
    ]
}

#[tokio::test]
async fn creating_a_contact_invalidates_both_label_lists() {
    let pim = manager(FixtureTransport::new().with_labels(label_records()));
    let none = LabelIgnoreFilter::none();

    pim.get_labels(&ann(), false, &none).await.unwrap();
    pim.get_labels(&ann(), true, &none).await.unwrap();
    pim.get_labels(&ann(), false, &none).await.unwrap();
    pim.get_labels(&ann(), true, &none).await.unwrap();
    assert_eq!(pim.transport().calls_to("get_labels"), 2);

    let contact = PimContact {
        first_name: Some("Bob".into()),
        work_emails: vec!["bob@example.com".into()],
        ..Default::default()
    };
    pim.create_contact(&ann(), &contact).await.unwrap();

    pim.get_labels(&ann(), false, &none).await.unwrap();
    pim.get_labels(&ann(), true, &none).await.unwrap();
    assert_eq!(pim.transport().calls_to("get_labels"), 4);
}

#[tokio::test]
async fn label_mutations_invalidate_before_upstream_call() {
    let pim = manager(FixtureTransport::new().with_labels(label_records()));
    let none = LabelIgnoreFilter::none();

    let before = pim.get_labels(&ann(), false, &none).await.unwrap();
    assert_eq!(before.len(), 3);

    pim.create_label(&ann(), &PimLabel::new("Archive", LabelKind::Mail))
        .await
        .unwrap();
    let after = pim.get_labels(&ann(), false, &none).await.unwrap();
    assert_eq!(after.len(), 4);
    assert!(after.iter().any(|label| label.name == "Archive"));

    pim.move_label(&ann(), "F2", "F1").await.unwrap();
    pim.get_labels(&ann(), false, &none).await.unwrap();
    assert_eq!(pim.transport().calls_to("get_labels"), 3);
}

#[tokio::test]
async fn ignore_filter_applies_on_miss_and_hit() {
    let pim = manager(FixtureTransport::new().with_labels(label_records()));

    let mail_only = pim
        .get_labels(&ann(), true, &LabelIgnoreFilter::kinds([LabelKind::Calendar]))
        .await
        .unwrap();
    assert_eq!(mail_only.len(), 2);
    assert_eq!(mail_only[0].unread_count, Some(3));

    let everything = pim
        .get_labels(&ann(), true, &LabelIgnoreFilter::none())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
    assert_eq!(pim.transport().calls_to("get_labels"), 1);
}

#[tokio::test]
async fn rejected_credentials_are_unauthenticated() {
    let pim = manager_with(FixtureTransport::new().with_labels(label_records()), false);
    let err = pim
        .get_labels(&ann(), false, &LabelIgnoreFilter::none())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert!(pim.transport().calls().is_empty());

    let pim = manager(FixtureTransport::new());
    let err = pim
        .get_message(&UserCredentials::new("ann", ""), "M1")
        .await
        .unwrap_err();
    assert!(err.is_unauthenticated());
}

#[tokio::test]
async fn failed_envelope_is_propagated_unchanged() {
    let pim = manager(FixtureTransport::new());
    pim.transport().fail_next(ResultEnvelope {
        status: 409,
        message: Some("Label already exists".into()),
        unid: None,
    });

    let err = pim
        .create_label(&ann(), &PimLabel::new("Projects", LabelKind::Mail))
        .await
        .unwrap_err();
    assert_eq!(err.status().as_u16(), 409);
    assert_eq!(err.message(), "Label already exists");
}

#[tokio::test]
async fn message_listing_drops_rules() {
    let documents = (0..12)
        .map(|i| {
            let form = if i % 3 == 0 { "Rule" } else { "Memo" };
            json!({"@unid": format!("M{i}"), "Form": form})
        })
        .collect();
    let pim = manager(FixtureTransport::new().with_documents(Resource::Message, documents));

    let items = pim
        .get_message_items(&ann(), &Selector::Inbox, 0, Some(5), None)
        .await
        .unwrap();

    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|item| item.kind() == ItemKind::Message));
    let unids: Vec<_> = items.iter().filter_map(|item| item.unid()).collect();
    assert_eq!(unids, vec!["M1", "M2", "M4", "M5", "M7"]);
}

#[tokio::test]
async fn contact_listing_skips_groups() {
    let documents = vec![
        json!({"@unid": "C1", "Form": "Person", "FirstName": "Ann"}),
        json!({"@unid": "G1", "Form": "Group", "ListName": "Team"}),
        json!({"@unid": "C2", "Form": "Person", "FirstName": "Bob"}),
    ];
    let pim = manager(FixtureTransport::new().with_documents(Resource::Contact, documents));

    let contacts = pim
        .get_contact_items(&ann(), 0, Some(10), None)
        .await
        .unwrap();
    let names: Vec<_> = contacts
        .iter()
        .filter_map(|c| c.first_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

#[tokio::test]
async fn contact_listing_fills_page_past_other_kinds() {
    let mut documents = vec![json!({"@unid": "memo-1", "Form": "Memo"})];
    documents.extend((0..15).map(|i| {
        json!({"@unid": format!("C{i}"), "Form": "Person", "FirstName": format!("P{i}")})
    }));
    let pim = manager(FixtureTransport::new().with_documents(Resource::Contact, documents));

    let contacts = pim
        .get_contact_items(&ann(), 0, Some(10), None)
        .await
        .unwrap();
    assert_eq!(contacts.len(), 10);
    assert_eq!(contacts[0].core.unid.as_deref(), Some("C0"));
    assert_eq!(contacts[9].core.unid.as_deref(), Some("C9"));
}

#[tokio::test]
async fn note_listing_recurses_past_other_kinds() {
    let config = PimConfig {
        min_page_size: 1,
        ..PimConfig::default()
    };
    let cache = Arc::new(LabelCache::from_config(&config));
    let documents = vec![
        json!({"@unid": "N1", "Form": "JournalEntry"}),
        json!({"@unid": "M1", "Form": "Memo"}),
        json!({"@unid": "M2", "Form": "Memo"}),
        json!({"@unid": "N2", "Form": "JournalEntry"}),
        json!({"@unid": "N3", "Form": "JournalEntry"}),
    ];
    let pim = PimManager::new(
        FixtureTransport::new().with_documents(Resource::Note, documents),
        FixtureAuth { accept: true },
        cache,
        config,
    );

    let notes = pim.get_note_items(&ann(), 0, Some(2), None).await.unwrap();
    let unids: Vec<_> = notes.iter().filter_map(|n| n.core.unid.as_deref()).collect();
    assert_eq!(unids, vec!["N1", "N2"]);
    assert!(pim.transport().calls_to("list_documents") > 1);
}

#[tokio::test]
async fn created_contact_clears_unused_slots_upstream() {
    let pim = manager(FixtureTransport::new());
    let contact = PimContact {
        primary_email: Some("bob@example.com".into()),
        work_emails: vec!["bob@example.com".into()],
        ..Default::default()
    };
    let envelope = pim.create_contact(&ann(), &contact).await.unwrap();
    assert!(envelope.unid.is_some());

    let stored = pim.transport().documents(Resource::Contact);
    assert_eq!(stored[0]["Work0Email"], json!("bob@example.com"));
    assert_eq!(stored[0]["work1Email"], json!(""));
    assert_eq!(stored[0]["Home5Email"], json!(""));
    assert_eq!(stored[0]["Form"], json!("Person"));
}

#[tokio::test]
async fn updating_without_identifier_is_rejected() {
    let pim = manager(FixtureTransport::new());
    let err = pim
        .update_contact(&ann(), &PimContact::default())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
    assert!(pim.transport().calls().is_empty());
}

#[tokio::test]
async fn missing_document_is_not_found() {
    let pim = manager(FixtureTransport::new());
    let err = pim.get_contact(&ann(), "nope").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn calendar_listing_defaults_calendar_id() {
    let documents = vec![
        json!({"@type": "jsevent", "uid": "E1", "title": "Standup", "start": "2024-02-01T09:00:00"}),
        json!({"@type": "jsevent", "uid": "E2", "title": "Review", "calendarId": "team"}),
    ];
    let pim = manager(FixtureTransport::new().with_documents(Resource::Calendar, documents));
    let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

    let events = pim
        .get_calendar_items(
            &ann(),
            None,
            day.and_hms_opt(0, 0, 0).unwrap(),
            day.and_hms_opt(23, 59, 59).unwrap(),
        )
        .await
        .unwrap();

    let calendars: Vec<_> = events
        .iter()
        .filter_map(|e| e.calendar_id.as_deref())
        .collect();
    assert_eq!(calendars, vec!["default", "team"]);
}

#[tokio::test]
async fn inverted_calendar_range_is_rejected() {
    let pim = manager(FixtureTransport::new());
    let day = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let err = pim
        .get_calendar_items(
            &ann(),
            Some("team"),
            day.and_hms_opt(10, 0, 0).unwrap(),
            day.and_hms_opt(9, 0, 0).unwrap(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
}

#[tokio::test]
async fn search_goes_through_conversion() {
    let documents = vec![
        json!({"@unid": "M1", "Form": "Memo", "Subject": "Budget review"}),
        json!({"@unid": "R1", "Form": "Rule", "Subject": "Budget filter"}),
        json!({"@unid": "M2", "Form": "Memo", "Subject": "Lunch"}),
    ];
    let pim = manager(FixtureTransport::new().with_documents(Resource::Message, documents));

    let hits = pim.search_messages(&ann(), "budget", None).await.unwrap();
    let unids: Vec<_> = hits.iter().filter_map(|item| item.unid()).collect();
    assert_eq!(unids, vec!["M1"]);
}

#[tokio::test]
async fn delegates_need_a_name() {
    let pim = manager(FixtureTransport::new());
    let delegate = json!({"access": "read"}).as_object().cloned().unwrap();
    let err = pim.add_delegate(&ann(), &delegate).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
}
