// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, warn};

use crate::{
    modules::{
        cache::label::LabelCache,
        error::{code::ErrorCode, PimResult},
        item::{factory::ItemFactory, ItemCodec, PimItem},
        property::JsonObject,
        retrieval::RetrievalEngine,
        settings::cli::PimConfig,
        transport::{
            expect_object, KeepTransport, Resource, ResultEnvelope, TokenProvider,
            UserCredentials,
        },
    },
    raise_error,
};

pub mod attachments;
pub mod calendar;
pub mod contacts;
pub mod labels;
pub mod messages;
pub mod misc;
pub mod notes;
pub mod tasks;
pub mod threads;

#[cfg(test)]
mod tests;

/// Entry point for every PIM operation of one upstream server.
///
/// The label cache is shared between managers created for the same server
/// so that a mutation through any of them invalidates the same entries.
pub struct PimManager<T, A> {
    transport: T,
    auth: A,
    labels: Arc<LabelCache>,
    factory: ItemFactory,
    config: PimConfig,
}

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub fn new(transport: T, auth: A, labels: Arc<LabelCache>, config: PimConfig) -> Self {
        let factory = ItemFactory::new(config.default_calendar_id.clone());
        Self {
            transport,
            auth,
            labels,
            factory,
            config,
        }
    }

    pub fn factory(&self) -> &ItemFactory {
        &self.factory
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn label_cache(&self) -> &Arc<LabelCache> {
        &self.labels
    }

    pub fn config(&self) -> &PimConfig {
        &self.config
    }

    /// Any failure to obtain a token surfaces as unauthenticated.
    async fn token(&self, credentials: &UserCredentials) -> PimResult<String> {
        match self.auth.get_access_token(credentials).await {
            Ok(token) if !token.is_empty() => Ok(token),
            Ok(_) => Err(raise_error!(
                format!("No access token available for user {}", credentials.user_id),
                ErrorCode::Unauthenticated
            )),
            Err(e) if e.is_unauthenticated() => Err(e),
            Err(e) => {
                error!(
                    "Token acquisition failed for user {}: {:#?}",
                    credentials.user_id, e
                );
                Err(raise_error!(
                    format!(
                        "Unable to authenticate user {}: {}",
                        credentials.user_id,
                        e.message()
                    ),
                    ErrorCode::Unauthenticated
                ))
            }
        }
    }

    fn engine(&self) -> RetrievalEngine<'_, T> {
        RetrievalEngine::new(&self.transport, &self.factory, self.config.min_page_size)
    }

    async fn get_typed<I>(
        &self,
        credentials: &UserCredentials,
        resource: Resource,
        unid: &str,
    ) -> PimResult<I>
    where
        I: ItemCodec + TryFrom<PimItem, Error = PimItem>,
    {
        let token = self.token(credentials).await?;
        let raw = self.transport.get_document(&token, resource, unid).await?;
        let raw = expect_object(raw, resource)?;
        self.factory.create_typed::<I>(&raw, None)
    }

    async fn create_encoded(
        &self,
        credentials: &UserCredentials,
        resource: Resource,
        document: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        let token = self.token(credentials).await?;
        self.transport
            .create_document(&token, resource, document)
            .await?
            .into_result()
    }

    async fn update_encoded<I: ItemCodec>(
        &self,
        credentials: &UserCredentials,
        resource: Resource,
        item: &I,
    ) -> PimResult<ResultEnvelope> {
        let unid = require_unid(item.core().unid.as_deref(), resource)?;
        let token = self.token(credentials).await?;
        self.transport
            .update_document(&token, resource, unid, &item.to_document())
            .await?
            .into_result()
    }

    async fn delete_by_unid(
        &self,
        credentials: &UserCredentials,
        resource: Resource,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        let unid = require_unid(Some(unid), resource)?;
        let token = self.token(credentials).await?;
        self.transport
            .delete_document(&token, resource, unid)
            .await?
            .into_result()
    }
}

fn require_unid(unid: Option<&str>, resource: Resource) -> PimResult<&str> {
    match unid.map(str::trim) {
        Some(unid) if !unid.is_empty() => Ok(unid),
        _ => Err(raise_error!(
            format!("An identifier is required to modify {}", resource),
            ErrorCode::InvalidParameter
        )),
    }
}

/// Keeps the items of variant `I`, logging any record of another kind.
fn typed_items<I>(items: Vec<PimItem>) -> Vec<I>
where
    I: ItemCodec + TryFrom<PimItem, Error = PimItem>,
{
    items
        .into_iter()
        .filter_map(|item| match I::try_from(item) {
            Ok(typed) => Some(typed),
            Err(other) => {
                warn!(
                    "Dropping {:?} {:?} from a {:?} listing",
                    other.kind(),
                    other.unid(),
                    I::KIND
                );
                None
            }
        })
        .collect()
}

fn expect_list(values: Vec<Value>) -> Vec<JsonObject> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(object) => Some(object),
            other => {
                warn!("Ignoring non-object entry in upstream list: {}", other);
                None
            }
        })
        .collect()
}
