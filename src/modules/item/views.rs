// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Column code tables for view entries.
//!
//! A view entry names its columns by position (`$93`, `$73`, ...) and the
//! same logical attribute sits in a different column depending on the view
//! that produced it. Each item kind owns one [`ViewCodeTables`]: an ordered
//! list of view-specific tables followed by a generic table. Resolution walks
//! the view's table first, then the generic one, and the first column that
//! yields a value for a field wins.

use std::hash::Hash;

use ahash::AHashMap;
use serde_json::Value;

use crate::modules::{item::fields::is_present, property::JsonObject};

pub const INBOX_VIEW: &str = "($Inbox)";
pub const SENT_VIEW: &str = "($Sent)";
pub const DRAFTS_VIEW: &str = "($Drafts)";
pub const TRASH_VIEW: &str = "($SoftDeletions)";
pub const JUNK_VIEW: &str = "($JunkMail)";
pub const THREADS_VIEW: &str = "($Threads)";
pub const CONTACTS_VIEW: &str = "Contacts";
pub const JOURNAL_VIEW: &str = "($Journal)";
pub const TODO_VIEW: &str = "($ToDo)";
pub const CALENDAR_VIEW: &str = "($Calendar)";

pub type CodeTable<F> = &'static [(&'static str, F)];

pub struct ViewCodeTables<F: 'static> {
    pub views: &'static [(&'static str, CodeTable<F>)],
    pub generic: CodeTable<F>,
}

impl<F> ViewCodeTables<F>
where
    F: Copy + Eq + Hash,
{
    /// Tables consulted for `view_name`, most specific first.
    pub fn tables_for(&self, view_name: &str) -> Vec<CodeTable<F>> {
        let mut tables: Vec<CodeTable<F>> = self
            .views
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(view_name))
            .map(|(_, table)| *table)
            .collect();
        tables.push(self.generic);
        tables
    }

    pub fn resolve<'a>(&self, object: &'a JsonObject, view_name: &str) -> ResolvedFields<'a, F> {
        let mut resolved = AHashMap::new();
        for table in self.tables_for(view_name) {
            for (code, field) in table.iter() {
                if resolved.contains_key(field) {
                    continue;
                }
                if let Some(value) = object.get(*code).filter(|v| is_present(v)) {
                    resolved.insert(*field, value);
                }
            }
        }
        ResolvedFields { values: resolved }
    }
}

pub struct ResolvedFields<'a, F> {
    values: AHashMap<F, &'a Value>,
}

impl<'a, F> ResolvedFields<'a, F>
where
    F: Eq + Hash,
{
    pub fn get(&self, field: F) -> Option<&'a Value> {
        self.values.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MessageField {
    From,
    SendTo,
    CopyTo,
    Subject,
    DeliveredDate,
    PostedDate,
    CreatedDate,
    Size,
    Importance,
    HasAttachment,
    Snippet,
    ThreadId,
}

pub static MESSAGE_TABLES: ViewCodeTables<MessageField> = ViewCodeTables {
    views: &[
        (
            INBOX_VIEW,
            &[
                ("$93", MessageField::From),
                ("$73", MessageField::Subject),
                ("$70", MessageField::DeliveredDate),
                ("$106", MessageField::Size),
                ("$97", MessageField::HasAttachment),
                ("$86", MessageField::Importance),
            ],
        ),
        (
            SENT_VIEW,
            &[
                ("$94", MessageField::SendTo),
                ("$116", MessageField::Subject),
                ("$113", MessageField::PostedDate),
                ("$106", MessageField::Size),
                ("$97", MessageField::HasAttachment),
            ],
        ),
        (
            DRAFTS_VIEW,
            &[
                ("$94", MessageField::SendTo),
                ("$116", MessageField::Subject),
                ("$4", MessageField::CreatedDate),
            ],
        ),
        (
            TRASH_VIEW,
            &[
                ("$93", MessageField::From),
                ("$94", MessageField::SendTo),
                ("$73", MessageField::Subject),
                ("$70", MessageField::DeliveredDate),
                ("$113", MessageField::PostedDate),
            ],
        ),
        (
            JUNK_VIEW,
            &[
                ("$93", MessageField::From),
                ("$73", MessageField::Subject),
                ("$70", MessageField::DeliveredDate),
            ],
        ),
    ],
    generic: &[
        ("$93", MessageField::From),
        ("$94", MessageField::SendTo),
        ("$73", MessageField::Subject),
        ("$116", MessageField::Subject),
        ("$70", MessageField::DeliveredDate),
        ("$113", MessageField::PostedDate),
        ("$4", MessageField::CreatedDate),
        ("$106", MessageField::Size),
        ("$97", MessageField::HasAttachment),
        ("$86", MessageField::Importance),
        ("From", MessageField::From),
        ("SendTo", MessageField::SendTo),
        ("CopyTo", MessageField::CopyTo),
        ("Subject", MessageField::Subject),
        ("DeliveredDate", MessageField::DeliveredDate),
        ("PostedDate", MessageField::PostedDate),
        ("Importance", MessageField::Importance),
        ("$Abstract", MessageField::Snippet),
        ("@threadid", MessageField::ThreadId),
        ("$TUA", MessageField::ThreadId),
    ],
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ThreadField {
    ThreadId,
    Topic,
    LatestDate,
    MessageCount,
    UnreadCount,
    Participants,
}

pub static THREAD_TABLES: ViewCodeTables<ThreadField> = ViewCodeTables {
    views: &[(
        THREADS_VIEW,
        &[
            ("$TUA", ThreadField::ThreadId),
            ("$73", ThreadField::Topic),
            ("$70", ThreadField::LatestDate),
            ("$93", ThreadField::Participants),
            ("$3", ThreadField::MessageCount),
        ],
    )],
    generic: &[
        ("@threadid", ThreadField::ThreadId),
        ("threadId", ThreadField::ThreadId),
        ("Topic", ThreadField::Topic),
        ("Subject", ThreadField::Topic),
        ("@children", ThreadField::MessageCount),
        ("@unreadcount", ThreadField::UnreadCount),
        ("From", ThreadField::Participants),
    ],
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ContactField {
    FullName,
    FirstName,
    LastName,
    CompanyName,
    JobTitle,
    Email,
    WorkPhone,
    HomePhone,
    MobilePhone,
}

pub static CONTACT_TABLES: ViewCodeTables<ContactField> = ViewCodeTables {
    views: &[(
        CONTACTS_VIEW,
        &[
            ("$8", ContactField::FullName),
            ("$16", ContactField::CompanyName),
            ("$27", ContactField::Email),
            ("$28", ContactField::WorkPhone),
            ("$29", ContactField::HomePhone),
        ],
    )],
    generic: &[
        ("FullName", ContactField::FullName),
        ("FirstName", ContactField::FirstName),
        ("LastName", ContactField::LastName),
        ("CompanyName", ContactField::CompanyName),
        ("JobTitle", ContactField::JobTitle),
        ("InternetAddress", ContactField::Email),
        ("MailAddress", ContactField::Email),
        ("OfficePhoneNumber", ContactField::WorkPhone),
        ("PhoneNumber", ContactField::HomePhone),
        ("CellPhoneNumber", ContactField::MobilePhone),
    ],
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NoteField {
    Subject,
    CreatedDate,
    Snippet,
}

pub static NOTE_TABLES: ViewCodeTables<NoteField> = ViewCodeTables {
    views: &[(
        JOURNAL_VIEW,
        &[
            ("$44", NoteField::Subject),
            ("$45", NoteField::CreatedDate),
        ],
    )],
    generic: &[
        ("Subject", NoteField::Subject),
        ("$Abstract", NoteField::Snippet),
    ],
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScheduleField {
    Subject,
    Start,
    End,
    Due,
    Location,
    Priority,
    Status,
}

pub static SCHEDULE_TABLES: ViewCodeTables<ScheduleField> = ViewCodeTables {
    views: &[
        (
            CALENDAR_VIEW,
            &[
                ("$147", ScheduleField::Subject),
                ("$134", ScheduleField::Start),
                ("$146", ScheduleField::End),
                ("$144", ScheduleField::Location),
            ],
        ),
        (
            TODO_VIEW,
            &[
                ("$10", ScheduleField::Subject),
                ("$12", ScheduleField::Due),
                ("$11", ScheduleField::Start),
                ("$6", ScheduleField::Priority),
                ("$22", ScheduleField::Status),
            ],
        ),
    ],
    generic: &[
        ("Subject", ScheduleField::Subject),
        ("StartDateTime", ScheduleField::Start),
        ("StartDate", ScheduleField::Start),
        ("EndDateTime", ScheduleField::End),
        ("DueDateTime", ScheduleField::Due),
        ("DueDate", ScheduleField::Due),
        ("Location", ScheduleField::Location),
        ("Importance", ScheduleField::Priority),
    ],
};
