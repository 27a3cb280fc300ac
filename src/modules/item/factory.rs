// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        item::{
            calendar::{
                PimCalendarItem, PimTask, APPOINTMENT_FORM, JSEVENT_TYPE, JSTASK_TYPE, TASK_FORM,
            },
            contact::{PimContact, PERSON_FORM},
            core::{FORM_FIELDS, TYPE_MARKER_FIELDS},
            fields::{first_string, is_primitive},
            label::{PimLabel, FOLDER_DESIGN_MARKER},
            message::PimMessage,
            note::{PimNote, JOURNAL_FORM},
            thread::PimThread,
            views::{CALENDAR_VIEW, CONTACTS_VIEW, JOURNAL_VIEW, THREADS_VIEW, TODO_VIEW},
            ItemCodec, ItemKind, PimItem,
        },
        property::JsonObject,
    },
    raise_error,
};

/// Records dropped during bulk conversion, matched either on the raw form
/// name or on the kind the record would decode to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludedKind {
    Form(String),
    Kind(ItemKind),
}

impl ExcludedKind {
    pub fn form(name: &str) -> Self {
        ExcludedKind::Form(name.to_string())
    }

    fn matches(&self, form: Option<&str>, kind: ItemKind) -> bool {
        match self {
            ExcludedKind::Form(name) => form.is_some_and(|f| f.eq_ignore_ascii_case(name)),
            ExcludedKind::Kind(excluded) => *excluded == kind,
        }
    }
}

/// Outcome of converting one upstream page.
#[derive(Debug, Default)]
pub struct Conversion {
    pub items: Vec<PimItem>,
    /// Raw records examined, including excluded and malformed ones.
    pub consumed: usize,
}

#[derive(Debug, Clone)]
pub struct ItemFactory {
    default_calendar_id: String,
}

impl ItemFactory {
    pub fn new(default_calendar_id: impl Into<String>) -> Self {
        Self {
            default_calendar_id: default_calendar_id.into(),
        }
    }

    pub fn default_calendar_id(&self) -> &str {
        &self.default_calendar_id
    }

    /// Decides which variant a raw record decodes to.
    pub fn classify(object: &JsonObject, view_name: Option<&str>) -> ItemKind {
        let marker = first_string(object, TYPE_MARKER_FIELDS);
        let form = first_string(object, FORM_FIELDS);
        let is = |value: &Option<String>, expected: &str| {
            value
                .as_deref()
                .is_some_and(|v| v.eq_ignore_ascii_case(expected))
        };

        if is(&marker, JSEVENT_TYPE) {
            return ItemKind::CalendarItem;
        }
        if is(&form, TASK_FORM) || is(&marker, JSTASK_TYPE) {
            return ItemKind::Task;
        }
        if is(&form, PERSON_FORM) {
            return ItemKind::Contact;
        }
        if is(&form, JOURNAL_FORM) {
            return ItemKind::Note;
        }
        if object.contains_key(FOLDER_DESIGN_MARKER) {
            return ItemKind::Label;
        }
        if is(&form, APPOINTMENT_FORM) {
            return ItemKind::CalendarItem;
        }
        // View entries rarely carry a form, so the originating view decides.
        let view = view_name.unwrap_or_default();
        let view_is = |name: &str| view.eq_ignore_ascii_case(name);
        if view_is(THREADS_VIEW) {
            return ItemKind::Thread;
        }
        if form.is_none() && is_primitive(object) {
            if view_is(CALENDAR_VIEW) {
                return ItemKind::CalendarItem;
            }
            if view_is(TODO_VIEW) {
                return ItemKind::Task;
            }
            if view_is(CONTACTS_VIEW) {
                return ItemKind::Contact;
            }
            if view_is(JOURNAL_VIEW) {
                return ItemKind::Note;
            }
        }
        ItemKind::Message
    }

    pub fn create_item_from_object(
        &self,
        raw: &Value,
        view_name: Option<&str>,
    ) -> PimResult<PimItem> {
        let object = match raw {
            Value::Object(object) if !object.is_empty() => object,
            Value::Object(_) => {
                return Err(raise_error!(
                    "Cannot build an item from an empty object".into(),
                    ErrorCode::MalformedItem
                ))
            }
            other => {
                return Err(raise_error!(
                    format!("Expected a JSON object, found {}", json_type(other)),
                    ErrorCode::MalformedItem
                ))
            }
        };
        let kind = Self::classify(object, view_name);
        self.create_item_of_kind(object, kind, view_name)
    }

    fn create_item_of_kind(
        &self,
        object: &JsonObject,
        kind: ItemKind,
        view_name: Option<&str>,
    ) -> PimResult<PimItem> {
        let item: PimItem = match kind {
            ItemKind::CalendarItem => {
                let mut event = decode::<PimCalendarItem>(object, view_name)?;
                if event.calendar_id.is_none() {
                    warn!(
                        "Calendar item {:?} has no calendar id, defaulting to '{}'",
                        event.core.unid, self.default_calendar_id
                    );
                    event.calendar_id = Some(self.default_calendar_id.clone());
                }
                event.into()
            }
            ItemKind::Task => decode::<PimTask>(object, view_name)?.into(),
            ItemKind::Contact => decode::<PimContact>(object, view_name)?.into(),
            ItemKind::Note => decode::<PimNote>(object, view_name)?.into(),
            ItemKind::Label => PimLabel::from_label_record(object).into(),
            ItemKind::Thread => decode::<PimThread>(object, view_name)?.into(),
            ItemKind::Message => decode::<PimMessage>(object, view_name)?.into(),
        };

        if item.unid().is_none() {
            return Err(raise_error!(
                format!("{:?} record has no identifier", kind),
                ErrorCode::MissingIdentifier
            ));
        }
        Ok(item)
    }

    /// Decodes a record and insists it is of variant `T`.
    pub fn create_typed<T>(&self, raw: &Value, view_name: Option<&str>) -> PimResult<T>
    where
        T: ItemCodec + TryFrom<PimItem, Error = PimItem>,
    {
        let item = self.create_item_from_object(raw, view_name)?;
        T::try_from(item).map_err(|item| {
            raise_error!(
                format!("Expected a {:?} record, found {:?}", T::KIND, item.kind()),
                ErrorCode::UnsupportedItemKind
            )
        })
    }

    /// Converts one upstream page. Stops once `limit` items have been
    /// produced; excluded records are dropped and malformed records are
    /// logged and skipped. Both still count as consumed.
    pub fn create_items_from_objects(
        &self,
        raws: &[Value],
        view_name: Option<&str>,
        limit: Option<usize>,
        excluded: &[ExcludedKind],
    ) -> Conversion {
        let mut conversion = Conversion::default();
        for raw in raws {
            if limit.is_some_and(|limit| conversion.items.len() >= limit) {
                break;
            }
            conversion.consumed += 1;

            if let Value::Object(object) = raw {
                let form = first_string(object, FORM_FIELDS);
                let kind = Self::classify(object, view_name);
                if excluded.iter().any(|e| e.matches(form.as_deref(), kind)) {
                    debug!("Skipping excluded {:?} record (form {:?})", kind, form);
                    continue;
                }
            }

            match self.create_item_from_object(raw, view_name) {
                Ok(item) => conversion.items.push(item),
                Err(e) => {
                    warn!(
                        "Skipping malformed record from view {:?}: {}",
                        view_name.unwrap_or_default(),
                        e
                    );
                }
            }
        }
        conversion
    }
}

fn decode<T: ItemCodec>(object: &JsonObject, view_name: Option<&str>) -> PimResult<T> {
    if is_primitive(object) {
        T::from_primitive(object, view_name.unwrap_or_default())
    } else {
        T::from_document(object)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
