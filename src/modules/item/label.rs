// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use serde_json::json;

use crate::modules::{
    error::PimResult,
    item::{
        core::{ItemCore, NOTE_ID_FIELDS, PARENT_FOLDER_FIELDS},
        fields::{first_flag, first_string, first_u64},
        ItemCodec, ItemKind,
    },
    property::JsonObject,
};

/// Design-note item that only folder and view metadata records carry.
pub const FOLDER_DESIGN_MARKER: &str = "$FolderScript";

const FOLDER_ID_FIELDS: &[&str] = &["FolderId", "folderId", "@unid", "unid"];
const NAME_FIELDS: &[&str] = &["$TITLE", "Name", "name"];
const TITLE_FIELDS: &[&str] = &["Title", "DisplayName", "displayName", "title"];
const KIND_FIELDS: &[&str] = &["Type", "type", "$FolderType"];
const PARENT_FIELDS: &[&str] = &["ParentId", "parentId"];
const UNREAD_FIELDS: &[&str] = &["unreadCount", "UnreadCount", "@unread"];
const TOTAL_FIELDS: &[&str] = &["documentCount", "DocumentCount", "total"];
const FOLDER_FLAGS: &[(&str, bool)] = &[("isFolder", false), ("IsFolder", false), ("isView", true)];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelKind {
    #[default]
    Mail,
    Calendar,
    Contacts,
    Tasks,
    Notes,
}

impl LabelKind {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "calendar" | "calendars" => LabelKind::Calendar,
            "contacts" | "contact" | "addressbook" => LabelKind::Contacts,
            "tasks" | "task" | "todo" => LabelKind::Tasks,
            "notes" | "note" | "journal" => LabelKind::Notes,
            _ => LabelKind::Mail,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Mail => "mail",
            LabelKind::Calendar => "calendar",
            LabelKind::Contacts => "contacts",
            LabelKind::Tasks => "tasks",
            LabelKind::Notes => "notes",
        }
    }
}

/// A folder or view: mail folder, calendar, address book, task list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimLabel {
    #[serde(flatten)]
    pub core: ItemCore,
    pub name: String,
    pub display_name: String,
    pub label_kind: LabelKind,
    pub is_folder: bool,
    pub parent_id: Option<String>,
    pub unread_count: Option<u64>,
    pub total_count: Option<u64>,
}

impl PimLabel {
    pub fn new(name: &str, label_kind: LabelKind) -> Self {
        PimLabel {
            name: name.to_string(),
            display_name: name.to_string(),
            label_kind,
            is_folder: true,
            ..Default::default()
        }
    }

    /// Folder metadata records only carry a narrow, ad hoc field set.
    pub fn from_label_record(object: &JsonObject) -> Self {
        let name = first_string(object, NAME_FIELDS).unwrap_or_default();
        let display_name = first_string(object, TITLE_FIELDS).unwrap_or_else(|| name.clone());
        let core = ItemCore {
            unid: first_string(object, FOLDER_ID_FIELDS),
            note_id: first_string(object, NOTE_ID_FIELDS),
            view_name: (!name.is_empty()).then(|| name.clone()),
            subject: Some(display_name.clone()),
            ..Default::default()
        };
        PimLabel {
            core,
            name,
            display_name,
            label_kind: first_string(object, KIND_FIELDS)
                .map(|kind| LabelKind::parse(&kind))
                .unwrap_or_default(),
            is_folder: first_flag(object, FOLDER_FLAGS).unwrap_or(true),
            parent_id: first_string(object, PARENT_FIELDS)
                .or_else(|| first_string(object, PARENT_FOLDER_FIELDS)),
            unread_count: first_u64(object, UNREAD_FIELDS),
            total_count: first_u64(object, TOTAL_FIELDS),
        }
    }

    pub fn folder_id(&self) -> Option<&str> {
        self.core.unid.as_deref()
    }

    pub fn view_name(&self) -> &str {
        self.core.view_name.as_deref().unwrap_or(&self.name)
    }
}

impl ItemCodec for PimLabel {
    const KIND: ItemKind = ItemKind::Label;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut label = Self::from_label_record(object);
        if label.core.view_name.is_none() {
            label.core.view_name = Some(view_name.to_string());
        }
        Ok(label)
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        Ok(Self::from_label_record(object))
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        document.insert("name".into(), json!(self.name));
        document.insert("displayName".into(), json!(self.display_name));
        document.insert("type".into(), json!(self.label_kind.as_str()));
        document.insert("isFolder".into(), json!(self.is_folder));
        if let Some(parent_id) = &self.parent_id {
            document.insert("parentId".into(), json!(parent_id));
        }
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
