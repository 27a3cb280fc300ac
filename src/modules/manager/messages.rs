// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::info;

use crate::modules::{
    error::PimResult,
    item::{message::PimMessage, ItemCodec, PimItem},
    manager::{require_unid, PimManager},
    retrieval::{mail_exclusions, FetchPlan, Selector},
    transport::{
        KeepTransport, ListQuery, Resource, ResultEnvelope, TokenProvider, UserCredentials,
    },
};

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub async fn get_message(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<PimMessage> {
        self.get_typed(credentials, Resource::Message, unid).await
    }

    /// Exactly `count` items from the selected collection, with mail rules
    /// and calendar profiles filtered out.
    pub async fn get_message_items(
        &self,
        credentials: &UserCredentials,
        selector: &Selector,
        skip: usize,
        count: Option<usize>,
        mailbox_id: Option<&str>,
    ) -> PimResult<Vec<PimItem>> {
        let token = self.token(credentials).await?;
        let excluded = mail_exclusions();
        let plan = FetchPlan::new(
            Resource::Message,
            ListQuery::for_view(selector.view_name()).mailbox(mailbox_id),
            &excluded,
        );
        self.engine().fetch(&token, &plan, skip, count).await
    }

    /// Saves `message` as a draft.
    pub async fn create_message(
        &self,
        credentials: &UserCredentials,
        message: &PimMessage,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.create_encoded(credentials, Resource::Message, &message.to_document())
            .await
    }

    pub async fn send_message(
        &self,
        credentials: &UserCredentials,
        message: &PimMessage,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        let token = self.token(credentials).await?;
        let envelope = self
            .transport
            .send_message(&token, &message.to_document())
            .await?
            .into_result()?;
        info!(
            "Sent message for user {} to {} recipient(s)",
            credentials.user_id,
            message.send_to.len() + message.copy_to.len() + message.blind_copy_to.len()
        );
        Ok(envelope)
    }

    pub async fn update_message(
        &self,
        credentials: &UserCredentials,
        message: &PimMessage,
    ) -> PimResult<ResultEnvelope> {
        self.update_encoded(credentials, Resource::Message, message)
            .await
    }

    pub async fn delete_message(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.delete_by_unid(credentials, Resource::Message, unid)
            .await
    }

    /// Files a message under another label.
    pub async fn move_message(
        &self,
        credentials: &UserCredentials,
        unid: &str,
        label_id: &str,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        let unid = require_unid(Some(unid), Resource::Message)?;
        let token = self.token(credentials).await?;
        self.transport
            .move_document(&token, Resource::Message, unid, label_id)
            .await?
            .into_result()
    }
}
