// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::modules::{
    error::PimResult,
    item::{
        core::{ItemCore, DOCUMENT_ALIASES},
        fields::{
            first_datetime, first_list, first_string, first_u64, first_value, parse_datetime,
            string_list, value_to_string, value_to_u64,
        },
        views::{ThreadField, THREAD_TABLES},
        ItemCodec, ItemKind,
    },
    property::JsonObject,
};

const THREAD_ID_FIELDS: &[&str] = &["threadId", "@threadid", "$TUA"];
const TOPIC_FIELDS: &[&str] = &["topic", "Topic", "Subject"];
const MESSAGE_FIELDS: &[&str] = &["messages", "documents", "@children"];
const MESSAGE_COUNT_FIELDS: &[&str] = &["messageCount", "@childcount", "count"];
const UNREAD_COUNT_FIELDS: &[&str] = &["unreadCount", "@unreadcount"];
const LATEST_FIELDS: &[&str] = &["latestDate", "@lastmodified", "DeliveredDate"];
const PARTICIPANT_FIELDS: &[&str] = &["participants", "From"];

/// A conversation grouping several messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimThread {
    #[serde(flatten)]
    pub core: ItemCore,
    pub thread_id: Option<String>,
    pub message_unids: Vec<String>,
    pub message_count: Option<u64>,
    pub unread_count: Option<u64>,
    pub latest_date: Option<DateTime<Utc>>,
    pub participants: Vec<String>,
}

impl PimThread {
    pub fn topic(&self) -> Option<&str> {
        self.core.subject.as_deref()
    }

    fn fill_unid(&mut self) {
        if self.core.unid.is_none() {
            self.core.unid = self.thread_id.clone();
        }
    }
}

/// Member entries are either bare unids or objects carrying one.
fn member_unids(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(entry) => first_string(entry, &["@unid", "unid", "@meta.unid"]),
                other => value_to_string(other),
            })
            .collect(),
        _ => Vec::new(),
    }
}

impl ItemCodec for PimThread {
    const KIND: ItemKind = ItemKind::Thread;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut core = ItemCore::from_primitive(object, view_name);
        let fields = THREAD_TABLES.resolve(object, view_name);
        core.subject = fields.get(ThreadField::Topic).and_then(value_to_string);
        core.ensure_created();

        let mut thread = PimThread {
            thread_id: fields.get(ThreadField::ThreadId).and_then(value_to_string),
            message_count: fields.get(ThreadField::MessageCount).and_then(value_to_u64),
            unread_count: fields.get(ThreadField::UnreadCount).and_then(value_to_u64),
            latest_date: fields.get(ThreadField::LatestDate).and_then(parse_datetime),
            participants: fields
                .get(ThreadField::Participants)
                .map(string_list)
                .unwrap_or_default(),
            core,
            ..Default::default()
        };
        thread.fill_unid();
        Ok(thread)
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        let mut core = ItemCore::from_document(object, &DOCUMENT_ALIASES);
        core.set_subject_if_empty(first_string(object, TOPIC_FIELDS));
        let message_unids = first_value(object, MESSAGE_FIELDS)
            .map(member_unids)
            .unwrap_or_default();
        let message_count = first_u64(object, MESSAGE_COUNT_FIELDS)
            .or_else(|| (!message_unids.is_empty()).then_some(message_unids.len() as u64));

        let mut thread = PimThread {
            thread_id: first_string(object, THREAD_ID_FIELDS),
            message_unids,
            message_count,
            unread_count: first_u64(object, UNREAD_COUNT_FIELDS),
            latest_date: first_datetime(object, LATEST_FIELDS),
            participants: first_list(object, PARTICIPANT_FIELDS),
            core,
        };
        thread.fill_unid();
        Ok(thread)
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        if let Some(thread_id) = &self.thread_id {
            document.insert("threadId".into(), json!(thread_id));
        }
        if let Some(topic) = self.topic() {
            document.insert("topic".into(), json!(topic));
        }
        document.insert("messages".into(), json!(self.message_unids));
        self.core.properties.write_into(&mut document);
        document
    }

    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}
