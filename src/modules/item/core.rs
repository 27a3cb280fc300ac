// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::modules::{
    item::fields::{
        categories, first_datetime, first_flag, first_list, first_string, first_value,
        flag_value, value_to_string,
    },
    property::{JsonObject, PropertyStore},
};

pub const UNID_FIELDS: &[&str] = &["@meta.unid", "@unid", "uid"];
pub const NOTE_ID_FIELDS: &[&str] = &["@meta.noteid", "@noteid"];
pub const CREATED_FIELDS: &[&str] = &["@meta.created", "@created"];
pub const MODIFIED_FIELDS: &[&str] = &["@meta.lastmodified", "@lastmodified", "@modified"];
pub const FORM_FIELDS: &[&str] = &["Form", "@form", "form"];
pub const TYPE_MARKER_FIELDS: &[&str] = &["@type"];
pub const PARENT_FOLDER_FIELDS: &[&str] = &["$FolderRefs", "@parentfolder", "parentFolders"];
pub const ATTACHMENT_FIELDS: &[&str] = &["$FILE", "@attachments", "attachments"];

pub const READ_FLAGS: &[(&str, bool)] = &[
    ("@read", false),
    ("read", false),
    ("$Read", false),
    ("@unread", true),
    ("$Unread", true),
];
pub const CONFIDENTIAL_FLAGS: &[(&str, bool)] =
    &[("Confidential", false), ("$Confidential", false)];
pub const PRIVATE_FLAGS: &[(&str, bool)] = &[
    ("isPrivate", false),
    ("$Private", false),
    ("$PublicAccess", true),
];
/// Document field written on encode; `isPrivate` is read-only on documents.
const PRIVATE_DOCUMENT_FIELD: &str = "$Private";

/// Field names one family of wire documents uses for the shared scalars.
pub struct CoreAliases {
    pub subject: &'static [&'static str],
    pub body: &'static [&'static str],
    pub body_type: &'static [&'static str],
    pub categories: &'static [&'static str],
    /// Categories are written as a JSCalendar keyword map instead of a list.
    pub keyword_map: bool,
}

pub const DOCUMENT_ALIASES: CoreAliases = CoreAliases {
    subject: &["Subject", "subject"],
    body: &["Body", "body"],
    body_type: &["BodyType", "$BodyType"],
    categories: &["Categories", "$Categories", "categories"],
    keyword_map: false,
};

pub const CONTACT_ALIASES: CoreAliases = CoreAliases {
    subject: &["Subject", "FullName"],
    body: &["Comment", "Body"],
    body_type: &["BodyType"],
    categories: &["Categories", "categories"],
    keyword_map: false,
};

pub const JSCALENDAR_ALIASES: CoreAliases = CoreAliases {
    subject: &["title", "Subject"],
    body: &["description", "Body"],
    body_type: &["descriptionContentType", "BodyType"],
    categories: &["keywords", "categories", "Categories"],
    keyword_map: true,
};

/// Attributes every item carries regardless of its kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCore {
    pub unid: Option<String>,
    pub note_id: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    pub confidential: bool,
    pub view_name: Option<String>,
    pub parent_folder_ids: Vec<String>,
    pub body: Option<String>,
    pub body_type: Option<String>,
    pub subject: Option<String>,
    pub read: bool,
    pub private: bool,
    pub categories: Vec<String>,
    pub attachments: Vec<String>,
    #[serde(skip_serializing_if = "PropertyStore::is_empty")]
    pub properties: PropertyStore,
}

impl ItemCore {
    /// Fields shared by view entries and documents: identifiers, timestamps
    /// and flags all use the same `@`-prefixed system names.
    fn from_system_fields(object: &JsonObject) -> Self {
        ItemCore {
            unid: first_string(object, UNID_FIELDS),
            note_id: first_string(object, NOTE_ID_FIELDS),
            created: first_datetime(object, CREATED_FIELDS),
            last_modified: first_datetime(object, MODIFIED_FIELDS),
            confidential: first_flag(object, CONFIDENTIAL_FLAGS).unwrap_or(false),
            parent_folder_ids: first_list(object, PARENT_FOLDER_FIELDS),
            read: first_flag(object, READ_FLAGS).unwrap_or(false),
            private: first_flag(object, PRIVATE_FLAGS).unwrap_or(false),
            attachments: attachment_ids(object),
            ..Default::default()
        }
    }

    pub fn from_document(object: &JsonObject, aliases: &CoreAliases) -> Self {
        let mut core = Self::from_system_fields(object);
        core.subject = first_string(object, aliases.subject);
        match first_value(object, aliases.body) {
            Some(Value::Object(body)) => {
                core.body = first_string(body, &["content", "data"]);
                core.body_type = first_string(body, &["type", "contentType"]);
            }
            Some(other) => core.body = value_to_string(other),
            None => {}
        }
        if core.body_type.is_none() {
            core.body_type = first_string(object, aliases.body_type);
        }
        core.categories = first_value(object, aliases.categories)
            .map(categories)
            .unwrap_or_default();
        core.properties = PropertyStore::from_document(object);
        core
    }

    pub fn from_primitive(object: &JsonObject, view_name: &str) -> Self {
        let mut core = Self::from_system_fields(object);
        core.view_name = Some(view_name.to_string());
        core.categories = first_value(object, DOCUMENT_ALIASES.categories)
            .map(categories)
            .unwrap_or_default();
        core
    }

    /// View entries without any creation column still need a creation date.
    pub fn ensure_created(&mut self) {
        if self.created.is_none() {
            self.created = Some(Utc::now());
        }
    }

    pub fn set_subject_if_empty(&mut self, value: Option<String>) {
        if self.subject.is_none() {
            self.subject = value;
        }
    }

    /// Writes subject, body, categories and both property containers.
    pub fn write_document(&self, target: &mut JsonObject, aliases: &CoreAliases) {
        if let Some(subject) = &self.subject {
            target.insert(aliases.subject[0].into(), json!(subject));
        }
        if let Some(body) = &self.body {
            target.insert(aliases.body[0].into(), json!(body));
            if let Some(body_type) = &self.body_type {
                target.insert(aliases.body_type[0].into(), json!(body_type));
            }
        }
        let categories = if aliases.keyword_map {
            Value::Object(
                self.categories
                    .iter()
                    .map(|c| (c.clone(), Value::Bool(true)))
                    .collect::<Map<String, Value>>(),
            )
        } else {
            json!(self.categories)
        };
        target.insert(aliases.categories[0].into(), categories);
        self.properties.write_into(target);
    }

    /// Domino document flags; JSCalendar records carry `privacy` instead.
    pub fn write_document_flags(&self, target: &mut JsonObject) {
        target.insert(CONFIDENTIAL_FLAGS[0].0.into(), flag_value(self.confidential));
        target.insert(PRIVATE_DOCUMENT_FIELD.into(), flag_value(self.private));
    }
}

fn attachment_ids(object: &JsonObject) -> Vec<String> {
    match first_value(object, ATTACHMENT_FIELDS) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(attachment) => {
                    first_string(attachment, &["@id", "id", "name", "fileName"])
                }
                other => value_to_string(other),
            })
            .collect(),
        Some(other) => value_to_string(other).into_iter().collect(),
        None => Vec::new(),
    }
}
