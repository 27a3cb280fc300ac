// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::modules::{
    error::PimResult,
    item::{
        calendar::{PimCalendarItem, PimTask},
        contact::PimContact,
        core::ItemCore,
        label::PimLabel,
        message::PimMessage,
        note::PimNote,
        thread::PimThread,
    },
    property::JsonObject,
};

pub mod calendar;
pub mod contact;
pub mod core;
pub mod factory;
pub mod fields;
pub mod label;
pub mod message;
pub mod note;
pub mod thread;
pub mod views;

#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Label,
    Task,
    Message,
    Contact,
    Note,
    CalendarItem,
    Thread,
}

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Label,
        ItemKind::Task,
        ItemKind::Message,
        ItemKind::Contact,
        ItemKind::Note,
        ItemKind::CalendarItem,
        ItemKind::Thread,
    ];
}

/// Decoding and encoding for one item variant.
pub trait ItemCodec: Sized {
    const KIND: ItemKind;

    /// Decodes a view entry whose `$NN` columns depend on `view_name`.
    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self>;

    /// Decodes a full document with named fields.
    fn from_document(object: &JsonObject) -> PimResult<Self>;

    /// Builds the payload sent upstream on create and update.
    fn to_document(&self) -> JsonObject;

    fn core(&self) -> &ItemCore;

    fn core_mut(&mut self) -> &mut ItemCore;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PimItem {
    Label(PimLabel),
    Task(PimTask),
    Message(PimMessage),
    Contact(PimContact),
    Note(PimNote),
    CalendarItem(PimCalendarItem),
    Thread(PimThread),
}

macro_rules! each_variant {
    ($item:expr, $inner:ident => $body:expr) => {
        match $item {
            PimItem::Label($inner) => $body,
            PimItem::Task($inner) => $body,
            PimItem::Message($inner) => $body,
            PimItem::Contact($inner) => $body,
            PimItem::Note($inner) => $body,
            PimItem::CalendarItem($inner) => $body,
            PimItem::Thread($inner) => $body,
        }
    };
}

impl PimItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            PimItem::Label(_) => ItemKind::Label,
            PimItem::Task(_) => ItemKind::Task,
            PimItem::Message(_) => ItemKind::Message,
            PimItem::Contact(_) => ItemKind::Contact,
            PimItem::Note(_) => ItemKind::Note,
            PimItem::CalendarItem(_) => ItemKind::CalendarItem,
            PimItem::Thread(_) => ItemKind::Thread,
        }
    }

    pub fn core(&self) -> &ItemCore {
        each_variant!(self, item => item.core())
    }

    pub fn core_mut(&mut self) -> &mut ItemCore {
        each_variant!(self, item => item.core_mut())
    }

    pub fn unid(&self) -> Option<&str> {
        self.core().unid.as_deref()
    }

    pub fn to_document(&self) -> JsonObject {
        each_variant!(self, item => item.to_document())
    }

    pub fn as_label(&self) -> Option<&PimLabel> {
        match self {
            PimItem::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn into_label(self) -> Option<PimLabel> {
        match self {
            PimItem::Label(label) => Some(label),
            _ => None,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for PimItem {
                fn from(value: $ty) -> Self {
                    PimItem::$variant(value)
                }
            }

            impl TryFrom<PimItem> for $ty {
                type Error = PimItem;

                fn try_from(item: PimItem) -> Result<Self, Self::Error> {
                    match item {
                        PimItem::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_variant!(
    Label(PimLabel),
    Task(PimTask),
    Message(PimMessage),
    Contact(PimContact),
    Note(PimNote),
    CalendarItem(PimCalendarItem),
    Thread(PimThread),
);
