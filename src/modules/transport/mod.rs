// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Contracts for the collaborators that talk to the upstream service.
//!
//! The HTTP client and the credential store live outside this crate. Managers
//! are generic over these traits and only ever see raw JSON values and
//! [`ResultEnvelope`]s.

use std::{fmt, future::Future};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        property::JsonObject,
    },
    raise_error, raise_upstream_error,
};

#[cfg(test)]
pub mod fixture;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Label,
    Message,
    Thread,
    Calendar,
    Contact,
    Task,
    Note,
    Rule,
    Delegate,
}

impl Resource {
    /// Path segment of the upstream endpoint serving this resource.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Label => "labels",
            Resource::Message => "messages",
            Resource::Thread => "threads",
            Resource::Calendar => "calendar/events",
            Resource::Contact => "contacts",
            Resource::Task => "tasks",
            Resource::Note => "notes",
            Resource::Rule => "mailrules",
            Resource::Delegate => "delegation",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Parameters of a list request. Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub view: Option<String>,
    pub skip: usize,
    pub count: Option<usize>,
    pub mailbox_id: Option<String>,
    pub include_unread: bool,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub calendar_id: Option<String>,
    pub query: Option<String>,
}

impl ListQuery {
    pub fn for_view(view: &str) -> Self {
        ListQuery {
            view: Some(view.to_string()),
            ..Default::default()
        }
    }

    pub fn page(mut self, skip: usize, count: Option<usize>) -> Self {
        self.skip = skip;
        self.count = count;
        self
    }

    pub fn mailbox(mut self, mailbox_id: Option<&str>) -> Self {
        self.mailbox_id = mailbox_id.map(str::to_string);
        self
    }
}

/// Outcome of a mutating upstream call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub unid: Option<String>,
}

impl ResultEnvelope {
    pub fn ok(status: u16, unid: Option<String>) -> Self {
        ResultEnvelope {
            status,
            message: None,
            unid,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-success envelope into an upstream error carrying its
    /// message and status unchanged.
    pub fn into_result(self) -> PimResult<ResultEnvelope> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("upstream request failed with status {}", self.status));
        Err(raise_upstream_error!(message, self.status))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user_id: String,
    pub secret: String,
}

impl UserCredentials {
    pub fn new(user_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("user_id", &self.user_id)
            .field("secret", &"***")
            .finish()
    }
}

pub trait TokenProvider {
    fn get_access_token(
        &self,
        credentials: &UserCredentials,
    ) -> impl Future<Output = PimResult<String>> + Send;
}

/// The upstream API surface the managers consume. Every call takes the
/// bearer token obtained from a [`TokenProvider`].
pub trait KeepTransport {
    fn list_documents(
        &self,
        token: &str,
        resource: Resource,
        query: &ListQuery,
    ) -> impl Future<Output = PimResult<Vec<Value>>> + Send;

    fn get_document(
        &self,
        token: &str,
        resource: Resource,
        unid: &str,
    ) -> impl Future<Output = PimResult<Value>> + Send;

    fn create_document(
        &self,
        token: &str,
        resource: Resource,
        document: &JsonObject,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn update_document(
        &self,
        token: &str,
        resource: Resource,
        unid: &str,
        document: &JsonObject,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn delete_document(
        &self,
        token: &str,
        resource: Resource,
        unid: &str,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn move_document(
        &self,
        token: &str,
        resource: Resource,
        unid: &str,
        parent_id: &str,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn send_message(
        &self,
        token: &str,
        document: &JsonObject,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn get_labels(
        &self,
        token: &str,
        include_unread: bool,
    ) -> impl Future<Output = PimResult<Vec<Value>>> + Send;

    fn get_attachment(
        &self,
        token: &str,
        parent_unid: &str,
        name: &str,
    ) -> impl Future<Output = PimResult<Value>> + Send;

    fn create_attachment(
        &self,
        token: &str,
        parent_unid: &str,
        attachment: &JsonObject,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn delete_attachment(
        &self,
        token: &str,
        parent_unid: &str,
        name: &str,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn get_out_of_office(&self, token: &str) -> impl Future<Output = PimResult<Value>> + Send;

    fn update_out_of_office(
        &self,
        token: &str,
        settings: &JsonObject,
    ) -> impl Future<Output = PimResult<ResultEnvelope>> + Send;

    fn search(
        &self,
        token: &str,
        query: &ListQuery,
    ) -> impl Future<Output = PimResult<Vec<Value>>> + Send;
}

/// Checks that a fetched value is a single document object.
pub fn expect_object(value: Value, resource: Resource) -> PimResult<Value> {
    match value {
        Value::Object(ref object) if !object.is_empty() => Ok(value),
        Value::Null => Err(raise_error!(
            format!("{} not found", resource),
            ErrorCode::ResourceNotFound
        )),
        _ => Err(raise_error!(
            format!("Unexpected {} payload from upstream", resource),
            ErrorCode::UpstreamUnexpectedResult
        )),
    }
}
