// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory upstream used by tests. Every call is recorded.

use std::{collections::HashMap, sync::Mutex};

use serde_json::{json, Value};

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        property::JsonObject,
        transport::{
            KeepTransport, ListQuery, Resource, ResultEnvelope, TokenProvider, UserCredentials,
        },
    },
    raise_error,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub operation: &'static str,
    pub resource: Option<Resource>,
    pub skip: usize,
    pub count: Option<usize>,
}

#[derive(Default)]
pub struct FixtureTransport {
    collections: Mutex<HashMap<Resource, Vec<Value>>>,
    labels: Mutex<Vec<Value>>,
    calls: Mutex<Vec<Call>>,
    next_envelope: Mutex<Option<ResultEnvelope>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, resource: Resource, documents: Vec<Value>) -> Self {
        self.collections.lock().unwrap().insert(resource, documents);
        self
    }

    pub fn with_labels(self, labels: Vec<Value>) -> Self {
        *self.labels.lock().unwrap() = labels;
        self
    }

    /// The next mutating call returns `envelope` instead of succeeding.
    pub fn fail_next(&self, envelope: ResultEnvelope) {
        *self.next_envelope.lock().unwrap() = Some(envelope);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.operation == operation)
            .count()
    }

    pub fn documents(&self, resource: Resource) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    fn record(
        &self,
        operation: &'static str,
        resource: Option<Resource>,
        query: Option<&ListQuery>,
    ) {
        self.calls.lock().unwrap().push(Call {
            operation,
            resource,
            skip: query.map(|q| q.skip).unwrap_or_default(),
            count: query.and_then(|q| q.count),
        });
    }

    fn envelope(&self, status: u16, unid: Option<String>) -> ResultEnvelope {
        self.next_envelope
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| ResultEnvelope::ok(status, unid))
    }
}

fn unid_of(value: &Value) -> Option<&str> {
    value
        .get("@unid")
        .or_else(|| value.get("FolderId"))
        .or_else(|| value.get("uid"))
        .and_then(Value::as_str)
}

impl KeepTransport for FixtureTransport {
    async fn list_documents(
        &self,
        _token: &str,
        resource: Resource,
        query: &ListQuery,
    ) -> PimResult<Vec<Value>> {
        self.record("list_documents", Some(resource), Some(query));
        let documents = self.documents(resource);
        let page = documents
            .into_iter()
            .skip(query.skip)
            .take(query.count.unwrap_or(usize::MAX))
            .collect();
        Ok(page)
    }

    async fn get_document(
        &self,
        _token: &str,
        resource: Resource,
        unid: &str,
    ) -> PimResult<Value> {
        self.record("get_document", Some(resource), None);
        Ok(self
            .documents(resource)
            .into_iter()
            .find(|doc| unid_of(doc) == Some(unid))
            .unwrap_or(Value::Null))
    }

    async fn create_document(
        &self,
        _token: &str,
        resource: Resource,
        document: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        self.record("create_document", Some(resource), None);
        let envelope = self.envelope(201, None);
        if !envelope.is_success() {
            return Ok(envelope);
        }
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(resource).or_default();
        let unid = format!("FIXTURE{:04}", documents.len() + 1);
        let mut stored = document.clone();
        stored.insert("@unid".into(), json!(unid));
        documents.push(Value::Object(stored));
        Ok(ResultEnvelope::ok(envelope.status, Some(unid)))
    }

    async fn update_document(
        &self,
        _token: &str,
        resource: Resource,
        unid: &str,
        document: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        self.record("update_document", Some(resource), None);
        let envelope = self.envelope(200, Some(unid.to_string()));
        if envelope.is_success() {
            let mut collections = self.collections.lock().unwrap();
            if let Some(existing) = collections
                .get_mut(&resource)
                .and_then(|docs| docs.iter_mut().find(|doc| unid_of(doc) == Some(unid)))
                .and_then(Value::as_object_mut)
            {
                for (key, value) in document {
                    existing.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(envelope)
    }

    async fn delete_document(
        &self,
        _token: &str,
        resource: Resource,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.record("delete_document", Some(resource), None);
        let envelope = self.envelope(200, Some(unid.to_string()));
        if envelope.is_success() {
            if let Some(docs) = self.collections.lock().unwrap().get_mut(&resource) {
                docs.retain(|doc| unid_of(doc) != Some(unid));
            }
        }
        Ok(envelope)
    }

    async fn move_document(
        &self,
        _token: &str,
        resource: Resource,
        unid: &str,
        _parent_id: &str,
    ) -> PimResult<ResultEnvelope> {
        self.record("move_document", Some(resource), None);
        Ok(self.envelope(200, Some(unid.to_string())))
    }

    async fn send_message(
        &self,
        _token: &str,
        _document: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        self.record("send_message", Some(Resource::Message), None);
        Ok(self.envelope(200, None))
    }

    async fn get_labels(&self, _token: &str, include_unread: bool) -> PimResult<Vec<Value>> {
        self.record("get_labels", Some(Resource::Label), None);
        let mut labels = self.labels.lock().unwrap().clone();
        labels.extend(self.documents(Resource::Label));
        if !include_unread {
            for label in labels.iter_mut().filter_map(Value::as_object_mut) {
                label.remove("unreadCount");
            }
        }
        Ok(labels)
    }

    async fn get_attachment(
        &self,
        _token: &str,
        parent_unid: &str,
        name: &str,
    ) -> PimResult<Value> {
        self.record("get_attachment", None, None);
        Ok(json!({"parent": parent_unid, "name": name, "content": ""}))
    }

    async fn create_attachment(
        &self,
        _token: &str,
        _parent_unid: &str,
        _attachment: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        self.record("create_attachment", None, None);
        Ok(self.envelope(201, None))
    }

    async fn delete_attachment(
        &self,
        _token: &str,
        _parent_unid: &str,
        _name: &str,
    ) -> PimResult<ResultEnvelope> {
        self.record("delete_attachment", None, None);
        Ok(self.envelope(200, None))
    }

    async fn get_out_of_office(&self, _token: &str) -> PimResult<Value> {
        self.record("get_out_of_office", None, None);
        Ok(json!({"enabled": false}))
    }

    async fn update_out_of_office(
        &self,
        _token: &str,
        _settings: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        self.record("update_out_of_office", None, None);
        Ok(self.envelope(200, None))
    }

    async fn search(&self, _token: &str, query: &ListQuery) -> PimResult<Vec<Value>> {
        self.record("search", Some(Resource::Message), Some(query));
        let needle = query.query.clone().unwrap_or_default().to_lowercase();
        Ok(self
            .documents(Resource::Message)
            .into_iter()
            .filter(|doc| doc.to_string().to_lowercase().contains(&needle))
            .collect())
    }
}

/// Hands out a fixed token, or refuses every request.
pub struct FixtureAuth {
    pub accept: bool,
}

impl TokenProvider for FixtureAuth {
    async fn get_access_token(&self, credentials: &UserCredentials) -> PimResult<String> {
        if self.accept && !credentials.secret.is_empty() {
            Ok(format!("token-{}", credentials.user_id))
        } else {
            Err(raise_error!(
                format!("credentials rejected for {}", credentials.user_id),
                ErrorCode::Unauthenticated
            ))
        }
    }
}
