// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::{
    error::PimResult,
    item::{contact::PimContact, views::CONTACTS_VIEW, ItemCodec},
    manager::{typed_items, PimManager},
    retrieval::{contact_exclusions, FetchPlan},
    transport::{
        KeepTransport, ListQuery, Resource, ResultEnvelope, TokenProvider, UserCredentials,
    },
};

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub async fn get_contact(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<PimContact> {
        self.get_typed(credentials, Resource::Contact, unid).await
    }

    /// Person documents only; groups share the view but are skipped.
    pub async fn get_contact_items(
        &self,
        credentials: &UserCredentials,
        skip: usize,
        count: Option<usize>,
        mailbox_id: Option<&str>,
    ) -> PimResult<Vec<PimContact>> {
        let token = self.token(credentials).await?;
        let excluded = contact_exclusions();
        let plan = FetchPlan::new(
            Resource::Contact,
            ListQuery::for_view(CONTACTS_VIEW).mailbox(mailbox_id),
            &excluded,
        );
        let items = self.engine().fetch(&token, &plan, skip, count).await?;
        Ok(typed_items(items))
    }

    pub async fn create_contact(
        &self,
        credentials: &UserCredentials,
        contact: &PimContact,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.create_encoded(credentials, Resource::Contact, &contact.to_document())
            .await
    }

    pub async fn update_contact(
        &self,
        credentials: &UserCredentials,
        contact: &PimContact,
    ) -> PimResult<ResultEnvelope> {
        self.update_encoded(credentials, Resource::Contact, contact)
            .await
    }

    pub async fn delete_contact(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.delete_by_unid(credentials, Resource::Contact, unid)
            .await
    }
}
