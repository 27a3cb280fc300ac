// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use crate::modules::{
    error::code::ErrorCode,
    item::{
        calendar::{PimCalendarItem, PimTask, TaskProgress},
        contact::{PhoneKind, PhoneNumber, PimContact, HOME_EMAIL_SLOTS, WORK_EMAIL_SLOTS},
        factory::{ExcludedKind, ItemFactory},
        message::{Importance, PimMessage},
        views::{INBOX_VIEW, SENT_VIEW, THREADS_VIEW},
        ItemCodec, ItemKind, PimItem,
    },
    property::JsonObject,
};

fn object(value: Value) -> JsonObject {
    value.as_object().cloned().unwrap()
}

fn factory() -> ItemFactory {
    ItemFactory::new("default")
}

#[test]
fn document_scalars_survive_reencoding() {
    let raw = object(json!({
        "@unid": "M1",
        "Form": "Memo",
        "Subject": "Quarterly numbers",
        "Body": "See attached",
        "Categories": ["Finance", "Q3"],
        "PimAddProp_Color": "blue",
        "PimAddProp_Retired": null
    }));
    let message = PimMessage::from_document(&raw).unwrap();
    let encoded = message.to_document();

    assert_eq!(encoded["Subject"], json!("Quarterly numbers"));
    assert_eq!(encoded["Body"], json!("See attached"));
    assert_eq!(encoded["Categories"], json!(["Finance", "Q3"]));
    assert_eq!(encoded["PimAddProp_Color"], json!("blue"));
    assert_eq!(encoded.get("PimAddProp_Retired"), Some(&Value::Null));
    assert_eq!(encoded["Form"], json!("Memo"));
}

#[test]
fn single_work_email_clears_remaining_slots() {
    let contact = PimContact {
        work_emails: vec!["ann@example.com".into()],
        ..Default::default()
    };
    let encoded = contact.to_document();

    let populated: Vec<&str> = WORK_EMAIL_SLOTS
        .iter()
        .filter(|slot| encoded[**slot] != json!(""))
        .copied()
        .collect();
    assert!(WORK_EMAIL_SLOTS.iter().all(|slot| encoded.contains_key(*slot)));
    assert_eq!(populated, vec!["Work0Email"]);
    assert_eq!(encoded["Work0Email"], json!("ann@example.com"));
}

#[test]
fn no_emails_still_writes_every_slot() {
    let encoded = PimContact::default().to_document();
    for slot in WORK_EMAIL_SLOTS.iter().chain(HOME_EMAIL_SLOTS.iter()) {
        assert_eq!(encoded.get(*slot), Some(&json!("")), "slot {slot}");
    }
    assert_eq!(encoded["Other5Email"], json!(""));
    assert_eq!(encoded["InternetAddress"], json!(""));
    assert_eq!(encoded["Phone0Number"], json!(""));
    assert_eq!(encoded["OfficeCity"], json!(""));
}

#[test]
fn primary_work_email_takes_slot_zero() {
    let contact = PimContact {
        primary_email: Some("boss@example.com".into()),
        work_emails: vec!["desk@example.com".into(), "boss@example.com".into()],
        ..Default::default()
    };
    let encoded = contact.to_document();
    assert_eq!(encoded["Work0Email"], json!("boss@example.com"));
    assert_eq!(encoded["work1Email"], json!("desk@example.com"));
    assert_eq!(encoded["InternetAddress"], json!("boss@example.com"));
}

#[test]
fn irregular_work_slots_decode_with_primary_first() {
    let raw = object(json!({
        "@unid": "C1",
        "Form": "Person",
        "FirstName": "Ann",
        "LastName": "Lee",
        "InternetAddress": "ann@corp.example.com",
        "Work0Email": "ann.lee@corp.example.com",
        "work1Email": "ann@corp.example.com",
        "Work3Email": "sales@corp.example.com",
        "Home0Email": "ann@home.example.com",
        "CellPhoneNumber": "555-0101",
        "Phone0Number": "555-0199",
        "Phone0Label": "pager",
        "OfficeCity": "Berlin",
        "Birthday": "1990-05-17"
    }));
    let contact = PimContact::from_document(&raw).unwrap();

    assert_eq!(
        contact.work_emails,
        vec![
            "ann@corp.example.com",
            "ann.lee@corp.example.com",
            "sales@corp.example.com"
        ]
    );
    assert_eq!(contact.home_emails, vec!["ann@home.example.com"]);
    assert_eq!(contact.core.subject.as_deref(), Some("Ann Lee"));
    assert_eq!(
        contact.phones,
        vec![
            PhoneNumber {
                kind: PhoneKind::Mobile,
                number: "555-0101".into()
            },
            PhoneNumber {
                kind: PhoneKind::Pager,
                number: "555-0199".into()
            },
        ]
    );
    assert_eq!(
        contact.work_address.and_then(|a| a.city).as_deref(),
        Some("Berlin")
    );
    assert_eq!(contact.birthday, NaiveDate::from_ymd_opt(1990, 5, 17));
}

#[test]
fn uncategorized_sentinel_decodes_to_empty_list() {
    let item = factory()
        .create_item_from_object(
            &json!({
                "@unid": "N1",
                "Form": "JournalEntry",
                "Subject": "Ideas",
                "Categories": "Not Categorized"
            }),
            None,
        )
        .unwrap();
    assert_eq!(item.kind(), ItemKind::Note);
    assert!(item.core().categories.is_empty());
}

#[test]
fn jsevent_without_calendar_gets_default() {
    let item = factory()
        .create_item_from_object(
            &json!({
                "@type": "jsevent",
                "uid": "E1",
                "title": "Standup",
                "start": "2024-02-01T09:00:00",
                "timeZone": "Europe/Berlin",
                "duration": "PT15M",
                "locations": {"1": {"@type": "Location", "name": "Room 4"}},
                "privacy": "private"
            }),
            None,
        )
        .unwrap();
    let PimItem::CalendarItem(event) = item else {
        panic!("expected a calendar item");
    };
    assert_eq!(event.calendar_id.as_deref(), Some("default"));
    assert_eq!(event.core.subject.as_deref(), Some("Standup"));
    assert_eq!(event.location.as_deref(), Some("Room 4"));
    assert!(event.core.private);
    assert_eq!(
        event.start,
        NaiveDate::from_ymd_opt(2024, 2, 1).and_then(|d| d.and_hms_opt(9, 0, 0))
    );

    let encoded = event.to_document();
    assert_eq!(encoded["@type"], json!("jsevent"));
    assert_eq!(encoded["start"], json!("2024-02-01T09:00:00"));
    assert_eq!(encoded["locations"]["1"]["name"], json!("Room 4"));
    assert_eq!(encoded["privacy"], json!("private"));
}

#[test]
fn contact_and_note_without_unid_fail() {
    for raw in [
        json!({"Form": "Person", "FirstName": "Ann"}),
        json!({"Form": "JournalEntry", "Subject": "Loose"}),
    ] {
        let err = factory().create_item_from_object(&raw, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingIdentifier);
    }
}

#[test]
fn non_object_records_are_malformed() {
    let err = factory().create_item_from_object(&json!(42), None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedItem);
    let err = factory().create_item_from_object(&json!({}), None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedItem);
}

#[test]
fn inbox_entry_uses_inbox_columns() {
    let raw = json!({
        "@unid": "A1",
        "@position": "1",
        "$93": "Alice",
        "$73": "Hello",
        "$70": "20240131T101500,00Z",
        "$86": "1",
        "$Unread": "1"
    });
    let item = factory()
        .create_item_from_object(&raw, Some(INBOX_VIEW))
        .unwrap();
    let PimItem::Message(message) = item else {
        panic!("expected a message");
    };
    assert_eq!(message.from.as_deref(), Some("Alice"));
    assert_eq!(message.core.subject.as_deref(), Some("Hello"));
    assert_eq!(
        message.delivered_date,
        Utc.with_ymd_and_hms(2024, 1, 31, 10, 15, 0).single()
    );
    assert_eq!(message.importance, Some(Importance::High));
    assert!(!message.core.read);
    assert!(message.core.created.is_some());
    assert_eq!(message.core.view_name.as_deref(), Some(INBOX_VIEW));
}

#[test]
fn sent_entry_prefers_sent_columns_over_generic() {
    let raw = object(json!({
        "@unid": "S1",
        "@position": "3",
        "$116": "Sent subject",
        "$73": "Generic subject",
        "$94": ["bob@example.com", "carol@example.com"]
    }));
    let message = PimMessage::from_primitive(&raw, SENT_VIEW).unwrap();
    assert_eq!(message.core.subject.as_deref(), Some("Sent subject"));
    assert_eq!(message.send_to.len(), 2);
}

#[test]
fn folder_marker_builds_label() {
    let item = factory()
        .create_item_from_object(
            &json!({
                "$FolderScript": "",
                "FolderId": "F1",
                "$TITLE": "Projects",
                "@noteid": "2F6",
                "Form": "Memo"
            }),
            None,
        )
        .unwrap();
    let label = item.as_label().unwrap();
    assert_eq!(label.folder_id(), Some("F1"));
    assert_eq!(label.name, "Projects");
    assert_eq!(label.view_name(), "Projects");
    assert_eq!(label.core.note_id.as_deref(), Some("2F6"));
}

#[test]
fn task_form_maps_importance_and_completion() {
    let raw = object(json!({
        "@unid": "T1",
        "Form": "Task",
        "Subject": "File taxes",
        "Importance": "1",
        "DueDateTime": "2024-04-15T00:00:00Z",
        "CompletedDateTime": "2024-04-10T12:00:00Z"
    }));
    let task = PimTask::from_document(&raw).unwrap();
    assert_eq!(task.priority, Some(1));
    assert_eq!(task.progress, TaskProgress::Completed);
    assert!(task.is_completed());
    assert_eq!(
        task.due,
        NaiveDate::from_ymd_opt(2024, 4, 15).and_then(|d| d.and_hms_opt(0, 0, 0))
    );

    let encoded = task.to_document();
    assert_eq!(encoded["@type"], json!("jstask"));
    assert_eq!(encoded["progress"], json!("completed"));
    assert_eq!(encoded["title"], json!("File taxes"));
}

#[test]
fn jstask_marker_dispatches_to_task() {
    let item = factory()
        .create_item_from_object(
            &json!({
                "@type": "jstask",
                "uid": "T2",
                "title": "Review",
                "progress": "in-process",
                "percentComplete": 40,
                "priority": 3
            }),
            None,
        )
        .unwrap();
    let task: PimTask = item.try_into().unwrap();
    assert_eq!(task.progress, TaskProgress::InProcess);
    assert_eq!(task.percent_complete, Some(40));
    assert_eq!(task.priority, Some(3));
}

#[test]
fn threads_view_builds_thread() {
    let item = factory()
        .create_item_from_object(
            &json!({
                "threadId": "TH1",
                "topic": "Launch",
                "messages": [{"@unid": "M1"}, "M2"]
            }),
            Some(THREADS_VIEW),
        )
        .unwrap();
    let PimItem::Thread(thread) = item else {
        panic!("expected a thread");
    };
    assert_eq!(thread.core.unid.as_deref(), Some("TH1"));
    assert_eq!(thread.topic(), Some("Launch"));
    assert_eq!(thread.message_unids, vec!["M1", "M2"]);
    assert_eq!(thread.message_count, Some(2));
}

#[test]
fn typed_creation_rejects_other_kinds() {
    let err = factory()
        .create_typed::<PimCalendarItem>(&json!({"@unid": "M9", "Form": "Memo"}), None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnsupportedItemKind);
}

#[test]
fn bulk_conversion_honours_limit_and_exclusions() {
    let raws = vec![
        json!({"@unid": "1", "Form": "Memo"}),
        json!({"@unid": "2", "Form": "Rule"}),
        json!({"@unid": "3", "Form": "Memo"}),
        json!({"@unid": "4", "Form": "Memo"}),
        json!({"@unid": "5", "Form": "Memo"}),
    ];
    let conversion = factory().create_items_from_objects(
        &raws,
        Some(INBOX_VIEW),
        Some(3),
        &[ExcludedKind::form("Rule")],
    );
    let unids: Vec<_> = conversion.items.iter().filter_map(|i| i.unid()).collect();
    assert_eq!(unids, vec!["1", "3", "4"]);
    assert_eq!(conversion.consumed, 4);
}

#[test]
fn bulk_conversion_skips_malformed_records() {
    let raws = vec![
        json!({"@unid": "ok", "Form": "Memo"}),
        json!({"Form": "Memo", "Subject": "no id"}),
        json!("garbage"),
    ];
    let conversion = factory().create_items_from_objects(&raws, None, None, &[]);
    assert_eq!(conversion.items.len(), 1);
    assert_eq!(conversion.consumed, 3);
}

#[test]
fn serialized_item_carries_kind_tag() {
    let item = factory()
        .create_item_from_object(&json!({"@unid": "M1", "Subject": "Hi"}), None)
        .unwrap();
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["kind"], json!("message"));
    assert_eq!(value["unid"], json!("M1"));
    assert_eq!(value["subject"], json!("Hi"));
}

#[test]
fn private_flag_prefers_is_private() {
    let message = PimMessage::from_document(&object(json!({
        "@unid": "M9",
        "Form": "Memo",
        "isPrivate": true,
        "$Private": "0"
    })))
    .unwrap();
    assert!(message.core.private);

    let public = PimMessage::from_document(&object(json!({
        "@unid": "M10",
        "Form": "Memo",
        "$PublicAccess": "1"
    })))
    .unwrap();
    assert!(!public.core.private);
    assert_eq!(public.to_document()["$Private"], json!("0"));
}
