// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! JSCalendar events and tasks.
//!
//! Upstream hands out calendar data as JSCalendar objects (`@type` is
//! `jsevent` or `jstask`) but still serves classic `Appointment` and `Task`
//! documents from older mail files and view entries from `($Calendar)` and
//! `($ToDo)`. Both decode paths land in the same types; encoding always
//! produces JSCalendar.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::modules::{
    error::PimResult,
    item::{
        core::{ItemCore, JSCALENDAR_ALIASES, TYPE_MARKER_FIELDS},
        fields::{
            first_datetime, first_flag, first_string, first_u64, first_value, format_datetime,
            lookup, parse_datetime, value_to_string, value_to_u64,
        },
        views::{ScheduleField, SCHEDULE_TABLES},
        ItemCodec, ItemKind,
    },
    property::JsonObject,
};

pub const JSEVENT_TYPE: &str = "jsevent";
pub const JSTASK_TYPE: &str = "jstask";
pub const APPOINTMENT_FORM: &str = "Appointment";
pub const TASK_FORM: &str = "Task";

pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const CALENDAR_ID_FIELDS: &[&str] = &["calendarId", "@calendar", "CalendarName"];
const UID_FIELDS: &[&str] = &["uid", "ApptUNID", "@meta.unid", "@unid"];
const TIME_ZONE_FIELDS: &[&str] = &["timeZone", "StartTimeZone"];
const EVENT_START_FIELDS: &[&str] = &["start", "StartDateTime", "StartDate"];
const EVENT_END_FIELDS: &[&str] = &["end", "EndDateTime", "EndDate"];
const ALL_DAY_FLAGS: &[(&str, bool)] = &[("showWithoutTime", false), ("AllDay", false)];
const LOCATION_FIELDS: &[&str] = &["location", "Location", "Room"];
const TASK_START_FIELDS: &[&str] = &["start", "StartDateTime", "StartDate"];
const TASK_DUE_FIELDS: &[&str] = &["due", "DueDateTime", "DueDate"];
const COMPLETED_FIELDS: &[&str] = &["completed", "CompletedDateTime"];
const PROGRESS_FIELDS: &[&str] = &["progress", "$TaskStatus", "TaskStatus"];
const PERCENT_FIELDS: &[&str] = &["percentComplete", "PercentComplete"];
const PRIORITY_FIELDS: &[&str] = &["priority"];
const IMPORTANCE_FIELDS: &[&str] = &["Importance", "$Importance"];

/// Wall-clock time as JSCalendar carries it next to a separate `timeZone`.
pub fn parse_local(value: &Value) -> Option<NaiveDateTime> {
    if let Value::String(text) = value {
        let text = text.trim();
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, LOCAL_FORMAT) {
            return Some(naive);
        }
    }
    parse_datetime(value).map(|dt| dt.naive_utc())
}

fn first_local(object: &JsonObject, paths: &[&str]) -> Option<NaiveDateTime> {
    paths
        .iter()
        .filter_map(|path| lookup(object, path))
        .find_map(parse_local)
}

fn format_local(value: &NaiveDateTime) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

fn is_jscalendar(object: &JsonObject, marker: &str) -> bool {
    first_string(object, TYPE_MARKER_FIELDS).is_some_and(|t| t.eq_ignore_ascii_case(marker))
}

/// `private` hides details from delegates, `secret` hides the event entirely.
fn apply_privacy(core: &mut ItemCore, object: &JsonObject) {
    match first_string(object, &["privacy"]).as_deref() {
        Some("private") => core.private = true,
        Some("secret") => core.confidential = true,
        _ => {}
    }
}

fn privacy_value(core: &ItemCore) -> &'static str {
    if core.confidential {
        "secret"
    } else if core.private {
        "private"
    } else {
        "public"
    }
}

/// JSCalendar locations are an id-keyed map; the first named entry wins.
fn location_name(object: &JsonObject) -> Option<String> {
    if let Some(Value::Object(locations)) = lookup(object, "locations") {
        let name = locations
            .values()
            .filter_map(Value::as_object)
            .find_map(|location| first_string(location, &["name"]));
        if name.is_some() {
            return name;
        }
    }
    first_string(object, LOCATION_FIELDS)
}

fn opaque(object: &JsonObject, field: &str) -> Option<Value> {
    object.get(field).filter(|v| !v.is_null()).cloned()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimCalendarItem {
    #[serde(flatten)]
    pub core: ItemCore,
    pub calendar_id: Option<String>,
    pub uid: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub time_zone: Option<String>,
    /// ISO 8601 duration, kept as upstream sent it.
    pub duration: Option<String>,
    pub end: Option<NaiveDateTime>,
    pub show_without_time: bool,
    pub location: Option<String>,
    pub status: Option<String>,
    pub free_busy_status: Option<String>,
    pub participants: Option<Value>,
    pub recurrence_rules: Option<Value>,
}

impl ItemCodec for PimCalendarItem {
    const KIND: ItemKind = ItemKind::CalendarItem;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut core = ItemCore::from_primitive(object, view_name);
        let fields = SCHEDULE_TABLES.resolve(object, view_name);
        core.subject = fields.get(ScheduleField::Subject).and_then(value_to_string);
        core.ensure_created();
        Ok(PimCalendarItem {
            calendar_id: first_string(object, CALENDAR_ID_FIELDS),
            uid: first_string(object, UID_FIELDS),
            start: fields.get(ScheduleField::Start).and_then(parse_local),
            end: fields.get(ScheduleField::End).and_then(parse_local),
            location: fields.get(ScheduleField::Location).and_then(value_to_string),
            core,
            ..Default::default()
        })
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        let mut core = ItemCore::from_document(object, &JSCALENDAR_ALIASES);
        apply_privacy(&mut core, object);
        Ok(PimCalendarItem {
            calendar_id: first_string(object, CALENDAR_ID_FIELDS),
            uid: first_string(object, UID_FIELDS),
            start: first_local(object, EVENT_START_FIELDS),
            time_zone: first_string(object, TIME_ZONE_FIELDS),
            duration: first_string(object, &["duration"]),
            end: first_local(object, EVENT_END_FIELDS),
            show_without_time: first_flag(object, ALL_DAY_FLAGS).unwrap_or(false),
            location: location_name(object),
            status: first_string(object, &["status"]),
            free_busy_status: first_string(object, &["freeBusyStatus"]),
            participants: opaque(object, "participants"),
            recurrence_rules: opaque(object, "recurrenceRules"),
            core,
        })
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        document.insert("@type".into(), json!(JSEVENT_TYPE));
        if let Some(uid) = self.uid.as_ref().or(self.core.unid.as_ref()) {
            document.insert("uid".into(), json!(uid));
        }
        if let Some(calendar_id) = &self.calendar_id {
            document.insert("calendarId".into(), json!(calendar_id));
        }
        self.core.write_document(&mut document, &JSCALENDAR_ALIASES);
        if let Some(start) = &self.start {
            document.insert("start".into(), json!(format_local(start)));
        }
        if let Some(time_zone) = &self.time_zone {
            document.insert("timeZone".into(), json!(time_zone));
        }
        if let Some(duration) = &self.duration {
            document.insert("duration".into(), json!(duration));
        }
        document.insert("showWithoutTime".into(), json!(self.show_without_time));
        if let Some(location) = &self.location {
            let mut entry = Map::new();
            entry.insert("@type".into(), json!("Location"));
            entry.insert("name".into(), json!(location));
            document.insert("locations".into(), json!({ "1": entry }));
        }
        if let Some(status) = &self.status {
            document.insert("status".into(), json!(status));
        }
        if let Some(free_busy) = &self.free_busy_status {
            document.insert("freeBusyStatus".into(), json!(free_busy));
        }
        if let Some(participants) = &self.participants {
            document.insert("participants".into(), participants.clone());
        }
        if let Some(rules) = &self.recurrence_rules {
            document.insert("recurrenceRules".into(), rules.clone());
        }
        document.insert("privacy".into(), json!(privacy_value(&self.core)));
        document
    }

    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskProgress {
    #[default]
    NeedsAction,
    InProcess,
    Completed,
    Cancelled,
}

impl TaskProgress {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "needs-action" | "needsaction" | "not started" => Some(TaskProgress::NeedsAction),
            "in-process" | "inprocess" | "in progress" => Some(TaskProgress::InProcess),
            "completed" | "complete" | "done" => Some(TaskProgress::Completed),
            "cancelled" | "canceled" => Some(TaskProgress::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskProgress::NeedsAction => "needs-action",
            TaskProgress::InProcess => "in-process",
            TaskProgress::Completed => "completed",
            TaskProgress::Cancelled => "cancelled",
        }
    }
}

/// Maps the mail template's `Importance` (1 high, 2 normal, 3 low) onto the
/// JSCalendar 1..9 priority scale.
fn importance_priority(value: &Value) -> Option<u8> {
    match value_to_string(value)?.trim() {
        "1" => Some(1),
        "2" => Some(5),
        "3" => Some(9),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PimTask {
    #[serde(flatten)]
    pub core: ItemCore,
    pub uid: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub due: Option<NaiveDateTime>,
    pub time_zone: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub progress: TaskProgress,
    pub percent_complete: Option<u8>,
    pub priority: Option<u8>,
}

impl PimTask {
    pub fn is_completed(&self) -> bool {
        self.progress == TaskProgress::Completed
    }

    fn resolve_progress(
        progress: Option<TaskProgress>,
        completed_at: Option<&DateTime<Utc>>,
    ) -> TaskProgress {
        match (progress, completed_at) {
            (Some(progress), _) => progress,
            (None, Some(_)) => TaskProgress::Completed,
            (None, None) => TaskProgress::NeedsAction,
        }
    }
}

impl ItemCodec for PimTask {
    const KIND: ItemKind = ItemKind::Task;

    fn from_primitive(object: &JsonObject, view_name: &str) -> PimResult<Self> {
        let mut core = ItemCore::from_primitive(object, view_name);
        let fields = SCHEDULE_TABLES.resolve(object, view_name);
        core.subject = fields.get(ScheduleField::Subject).and_then(value_to_string);
        core.ensure_created();
        let progress = fields
            .get(ScheduleField::Status)
            .and_then(value_to_string)
            .and_then(|status| TaskProgress::parse(&status));
        Ok(PimTask {
            uid: first_string(object, UID_FIELDS),
            start: fields.get(ScheduleField::Start).and_then(parse_local),
            due: fields.get(ScheduleField::Due).and_then(parse_local),
            priority: fields.get(ScheduleField::Priority).and_then(importance_priority),
            progress: Self::resolve_progress(progress, None),
            core,
            ..Default::default()
        })
    }

    fn from_document(object: &JsonObject) -> PimResult<Self> {
        let jstask = is_jscalendar(object, JSTASK_TYPE);
        let mut core = ItemCore::from_document(object, &JSCALENDAR_ALIASES);
        apply_privacy(&mut core, object);

        let completed_at = first_datetime(object, COMPLETED_FIELDS);
        let progress = first_string(object, PROGRESS_FIELDS).and_then(|p| TaskProgress::parse(&p));
        let priority = if jstask {
            first_u64(object, PRIORITY_FIELDS).map(|p| p.min(9) as u8)
        } else {
            first_value(object, IMPORTANCE_FIELDS).and_then(importance_priority)
        };

        Ok(PimTask {
            uid: first_string(object, UID_FIELDS),
            start: first_local(object, TASK_START_FIELDS),
            due: first_local(object, TASK_DUE_FIELDS),
            time_zone: first_string(object, TIME_ZONE_FIELDS),
            progress: Self::resolve_progress(progress, completed_at.as_ref()),
            percent_complete: first_value(object, PERCENT_FIELDS)
                .and_then(value_to_u64)
                .map(|p| p.min(100) as u8),
            priority,
            completed_at,
            core,
        })
    }

    fn to_document(&self) -> JsonObject {
        let mut document = JsonObject::new();
        document.insert("@type".into(), json!(JSTASK_TYPE));
        if let Some(uid) = self.uid.as_ref().or(self.core.unid.as_ref()) {
            document.insert("uid".into(), json!(uid));
        }
        self.core.write_document(&mut document, &JSCALENDAR_ALIASES);
        if let Some(start) = &self.start {
            document.insert("start".into(), json!(format_local(start)));
        }
        if let Some(due) = &self.due {
            document.insert("due".into(), json!(format_local(due)));
        }
        if let Some(time_zone) = &self.time_zone {
            document.insert("timeZone".into(), json!(time_zone));
        }
        document.insert("progress".into(), json!(self.progress.as_str()));
        if let Some(completed_at) = &self.completed_at {
            document.insert("completed".into(), json!(format_datetime(completed_at)));
        }
        if let Some(percent) = self.percent_complete {
            document.insert("percentComplete".into(), json!(percent));
        }
        if let Some(priority) = self.priority {
            document.insert("priority".into(), json!(priority));
        }
        document.insert("privacy".into(), json!(privacy_value(&self.core)));
        document
    }

    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }
}
