// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use serde_json::json;

use crate::modules::{
    error::PimResult,
    item::{
        core::{ItemCore, DOCUMENT_ALIASES},
        fields::{parse_datetime, value_to_string},
        views::{NoteField, NOTE_TABLES},
        ItemCodec, ItemKind,
    },
    property::JsonObject,
};

pub const JOURNAL_FORM: &str = "JournalEntry";

/// Journal entry. Carries nothing beyond the shared item attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimNote {
    #[serde(flatten)]
    pub core: ItemCore,
}

impl ItemCodec for PimNote {
    const KIND: ItemKind = ItemKind::Note;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut core = ItemCore::from_primitive(object, view_name);
        let fields = NOTE_TABLES.resolve(object, view_name);
        core.subject = fields.get(NoteField::Subject).and_then(value_to_string);
        core.body = fields.get(NoteField::Snippet).and_then(value_to_string);
        if let Some(created) = fields.get(NoteField::CreatedDate).and_then(parse_datetime) {
            core.created = Some(created);
        }
        core.ensure_created();
        Ok(PimNote { core })
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        Ok(PimNote {
            core: ItemCore::from_document(object, &DOCUMENT_ALIASES),
        })
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        document.insert("Form".into(), json!(JOURNAL_FORM));
        self.core.write_document(&mut document, &DOCUMENT_ALIASES);
        self.core.write_document_flags(&mut document);
        document
    }

    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}
