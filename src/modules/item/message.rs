// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::modules::{
    error::PimResult,
    item::{
        core::{ItemCore, DOCUMENT_ALIASES, FORM_FIELDS},
        fields::{
            first_datetime, first_flag, first_list, first_string, first_u64, first_value,
            parse_datetime, parse_flag, string_list, value_to_string, value_to_u64,
        },
        views::{MessageField, DRAFTS_VIEW, MESSAGE_TABLES},
        ItemCodec, ItemKind,
    },
    property::JsonObject,
};

pub const MEMO_FORM: &str = "Memo";

const FROM_FIELDS: &[&str] = &["From", "Principal", "InetFrom"];
const SEND_TO_FIELDS: &[&str] = &["SendTo", "InetSendTo"];
const COPY_TO_FIELDS: &[&str] = &["CopyTo", "InetCopyTo"];
const BLIND_COPY_TO_FIELDS: &[&str] = &["BlindCopyTo", "InetBlindCopyTo"];
const REPLY_TO_FIELDS: &[&str] = &["ReplyTo", "$ReplyTo"];
const DELIVERED_FIELDS: &[&str] = &["DeliveredDate", "@delivered"];
const POSTED_FIELDS: &[&str] = &["PostedDate", "@posted"];
const IMPORTANCE_FIELDS: &[&str] = &["Importance", "$Importance"];
const MESSAGE_ID_FIELDS: &[&str] = &["$MessageID", "MessageId"];
const IN_REPLY_TO_FIELDS: &[&str] = &["In_Reply_To", "$InReplyTo"];
const THREAD_ID_FIELDS: &[&str] = &["$TUA", "@threadid", "threadId"];
const SIZE_FIELDS: &[&str] = &["@size", "$Size", "size"];
const SNIPPET_FIELDS: &[&str] = &["$Abstract", "@abstract"];
const DRAFT_FLAGS: &[(&str, bool)] = &[("@draft", false), ("IsDraft", false)];
const ATTACHMENT_FLAGS: &[(&str, bool)] = &[("$HasAttachment", false), ("@hasattachment", false)];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Importance {
    High,
    #[default]
    Normal,
    Low,
}

impl Importance {
    pub fn parse(value: &Value) -> Option<Self> {
        match value_to_string(value)?.trim().to_ascii_lowercase().as_str() {
            "1" | "high" => Some(Importance::High),
            "2" | "normal" => Some(Importance::Normal),
            "3" | "low" => Some(Importance::Low),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Importance::High => "1",
            Importance::Normal => "2",
            Importance::Low => "3",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimMessage {
    #[serde(flatten)]
    pub core: ItemCore,
    pub form: Option<String>,
    pub from: Option<String>,
    pub send_to: Vec<String>,
    pub copy_to: Vec<String>,
    pub blind_copy_to: Vec<String>,
    pub reply_to: Option<String>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub posted_date: Option<DateTime<Utc>>,
    pub importance: Option<Importance>,
    pub message_id: Option<String>,
    pub in_reply_to: Option<String>,
    pub thread_id: Option<String>,
    pub size: Option<u64>,
    pub has_attachments: bool,
    pub draft: bool,
    pub snippet: Option<String>,
}

impl ItemCodec for PimMessage {
    const KIND: ItemKind = ItemKind::Message;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut core = ItemCore::from_primitive(object, view_name);
        let fields = MESSAGE_TABLES.resolve(object, view_name);

        core.subject = fields.get(MessageField::Subject).and_then(value_to_string);
        if let Some(created) = fields.get(MessageField::CreatedDate).and_then(parse_datetime) {
            core.created = Some(created);
        }
        core.ensure_created();

        let has_attachments = fields
            .get(MessageField::HasAttachment)
            .and_then(parse_flag)
            .unwrap_or(false)
            || !core.attachments.is_empty();

        Ok(PimMessage {
            form: first_string(object, FORM_FIELDS),
            from: fields.get(MessageField::From).and_then(value_to_string),
            send_to: fields
                .get(MessageField::SendTo)
                .map(string_list)
                .unwrap_or_default(),
            copy_to: fields
                .get(MessageField::CopyTo)
                .map(string_list)
                .unwrap_or_default(),
            delivered_date: fields.get(MessageField::DeliveredDate).and_then(parse_datetime),
            posted_date: fields.get(MessageField::PostedDate).and_then(parse_datetime),
            importance: fields.get(MessageField::Importance).and_then(Importance::parse),
            thread_id: fields.get(MessageField::ThreadId).and_then(value_to_string),
            size: fields.get(MessageField::Size).and_then(value_to_u64),
            snippet: fields.get(MessageField::Snippet).and_then(value_to_string),
            draft: view_name.eq_ignore_ascii_case(DRAFTS_VIEW)
                || first_flag(object, DRAFT_FLAGS).unwrap_or(false),
            has_attachments,
            core,
            ..Default::default()
        })
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        let core = ItemCore::from_document(object, &DOCUMENT_ALIASES);
        let delivered_date = first_datetime(object, DELIVERED_FIELDS);
        let posted_date = first_datetime(object, POSTED_FIELDS);
        let has_attachments =
            first_flag(object, ATTACHMENT_FLAGS).unwrap_or(false) || !core.attachments.is_empty();
        let draft = first_flag(object, DRAFT_FLAGS)
            .unwrap_or(delivered_date.is_none() && posted_date.is_none());

        Ok(PimMessage {
            form: first_string(object, FORM_FIELDS),
            from: first_string(object, FROM_FIELDS),
            send_to: first_list(object, SEND_TO_FIELDS),
            copy_to: first_list(object, COPY_TO_FIELDS),
            blind_copy_to: first_list(object, BLIND_COPY_TO_FIELDS),
            reply_to: first_string(object, REPLY_TO_FIELDS),
            delivered_date,
            posted_date,
            importance: first_value(object, IMPORTANCE_FIELDS).and_then(Importance::parse),
            message_id: first_string(object, MESSAGE_ID_FIELDS),
            in_reply_to: first_string(object, IN_REPLY_TO_FIELDS),
            thread_id: first_string(object, THREAD_ID_FIELDS),
            size: first_u64(object, SIZE_FIELDS),
            snippet: first_string(object, SNIPPET_FIELDS),
            has_attachments,
            draft,
            core,
        })
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        document.insert(
            "Form".into(),
            json!(self.form.as_deref().unwrap_or(MEMO_FORM)),
        );
        self.core.write_document(&mut document, &DOCUMENT_ALIASES);
        self.core.write_document_flags(&mut document);
        document.insert("SendTo".into(), json!(self.send_to));
        document.insert("CopyTo".into(), json!(self.copy_to));
        document.insert("BlindCopyTo".into(), json!(self.blind_copy_to));
        if let Some(from) = &self.from {
            document.insert("From".into(), json!(from));
        }
        if let Some(reply_to) = &self.reply_to {
            document.insert("ReplyTo".into(), json!(reply_to));
        }
        if let Some(in_reply_to) = &self.in_reply_to {
            document.insert("In_Reply_To".into(), json!(in_reply_to));
        }
        if let Some(importance) = &self.importance {
            document.insert("Importance".into(), json!(importance.code()));
        }
        document
    }

    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}
