// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::{
    error::PimResult,
    item::{note::PimNote, views::JOURNAL_VIEW, ItemCodec},
    manager::{typed_items, PimManager},
    retrieval::{only_kind, FetchPlan},
    transport::{
        KeepTransport, ListQuery, Resource, ResultEnvelope, TokenProvider, UserCredentials,
    },
};

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub async fn get_note(&self, credentials: &UserCredentials, unid: &str) -> PimResult<PimNote> {
        self.get_typed(credentials, Resource::Note, unid).await
    }

    pub async fn get_note_items(
        &self,
        credentials: &UserCredentials,
        skip: usize,
        count: Option<usize>,
        mailbox_id: Option<&str>,
    ) -> PimResult<Vec<PimNote>> {
        let token = self.token(credentials).await?;
        let excluded = only_kind(PimNote::KIND);
        let plan = FetchPlan::new(
            Resource::Note,
            ListQuery::for_view(JOURNAL_VIEW).mailbox(mailbox_id),
            &excluded,
        );
        let items = self.engine().fetch(&token, &plan, skip, count).await?;
        Ok(typed_items(items))
    }

    pub async fn create_note(
        &self,
        credentials: &UserCredentials,
        note: &PimNote,
    ) -> PimResult<ResultEnvelope> {
        self.create_encoded(credentials, Resource::Note, &note.to_document())
            .await
    }

    pub async fn update_note(
        &self,
        credentials: &UserCredentials,
        note: &PimNote,
    ) -> PimResult<ResultEnvelope> {
        self.update_encoded(credentials, Resource::Note, note).await
    }

    pub async fn delete_note(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.delete_by_unid(credentials, Resource::Note, unid).await
    }
}
