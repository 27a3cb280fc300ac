// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Mailbox settings passed through as raw JSON: out-of-office, mail rules
//! and delegation. Full-text search is here too since it shares the mail
//! exclusion list.

use serde_json::Value;

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        item::PimItem,
        manager::{expect_list, require_unid, PimManager},
        property::JsonObject,
        retrieval::mail_exclusions,
        transport::{
            KeepTransport, ListQuery, Resource, ResultEnvelope, TokenProvider, UserCredentials,
        },
    },
    raise_error,
};

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub async fn get_out_of_office(&self, credentials: &UserCredentials) -> PimResult<Value> {
        let token = self.token(credentials).await?;
        self.transport.get_out_of_office(&token).await
    }

    pub async fn update_out_of_office(
        &self,
        credentials: &UserCredentials,
        settings: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        let token = self.token(credentials).await?;
        self.transport
            .update_out_of_office(&token, settings)
            .await?
            .into_result()
    }

    pub async fn get_rules(&self, credentials: &UserCredentials) -> PimResult<Vec<JsonObject>> {
        let token = self.token(credentials).await?;
        let rules = self
            .transport
            .list_documents(&token, Resource::Rule, &ListQuery::default())
            .await?;
        Ok(expect_list(rules))
    }

    pub async fn create_rule(
        &self,
        credentials: &UserCredentials,
        rule: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        self.create_encoded(credentials, Resource::Rule, rule).await
    }

    pub async fn delete_rule(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.delete_by_unid(credentials, Resource::Rule, unid).await
    }

    pub async fn get_delegates(
        &self,
        credentials: &UserCredentials,
    ) -> PimResult<Vec<JsonObject>> {
        let token = self.token(credentials).await?;
        let delegates = self
            .transport
            .list_documents(&token, Resource::Delegate, &ListQuery::default())
            .await?;
        Ok(expect_list(delegates))
    }

    /// Grants `delegate` (a `{name, access}` object) access to the mailbox.
    pub async fn add_delegate(
        &self,
        credentials: &UserCredentials,
        delegate: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        let named = delegate
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.trim().is_empty());
        if !named {
            return Err(raise_error!(
                "A delegate needs a name".into(),
                ErrorCode::InvalidParameter
            ));
        }
        self.create_encoded(credentials, Resource::Delegate, delegate)
            .await
    }

    pub async fn remove_delegate(
        &self,
        credentials: &UserCredentials,
        name: &str,
    ) -> PimResult<ResultEnvelope> {
        let name = require_unid(Some(name), Resource::Delegate)?;
        self.delete_by_unid(credentials, Resource::Delegate, name)
            .await
    }

    /// Full-text message search. Results go through the same conversion as
    /// listings, so rules and malformed records never come back.
    pub async fn search_messages(
        &self,
        credentials: &UserCredentials,
        query: &str,
        count: Option<usize>,
    ) -> PimResult<Vec<PimItem>> {
        if query.trim().is_empty() {
            return Err(raise_error!(
                "Search query must not be empty".into(),
                ErrorCode::InvalidParameter
            ));
        }
        let token = self.token(credentials).await?;
        let request = ListQuery {
            query: Some(query.to_string()),
            count,
            ..Default::default()
        };
        let raws = self.transport.search(&token, &request).await?;
        let excluded = mail_exclusions();
        Ok(self
            .factory
            .create_items_from_objects(&raws, None, count, &excluded)
            .items)
    }
}
