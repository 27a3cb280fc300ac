// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::{
    error::PimResult,
    item::{calendar::PimTask, views::TODO_VIEW, ItemCodec},
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
    pub async fn get_task(&self, credentials: &UserCredentials, unid: &str) -> PimResult<PimTask> {
        self.get_typed(credentials, Resource::Task, unid).await
    }

    pub async fn get_task_items(
        &self,
        credentials: &UserCredentials,
        skip: usize,
        count: Option<usize>,
        mailbox_id: Option<&str>,
    ) -> PimResult<Vec<PimTask>> {
        let token = self.token(credentials).await?;
        let excluded = only_kind(PimTask::KIND);
        let plan = FetchPlan::new(
            Resource::Task,
            ListQuery::for_view(TODO_VIEW).mailbox(mailbox_id),
            &excluded,
        );
        let items = self.engine().fetch(&token, &plan, skip, count).await?;
        Ok(typed_items(items))
    }

    pub async fn create_task(
        &self,
        credentials: &UserCredentials,
        task: &PimTask,
    ) -> PimResult<ResultEnvelope> {
        self.create_encoded(credentials, Resource::Task, &task.to_document())
            .await
    }

    pub async fn update_task(
        &self,
        credentials: &UserCredentials,
        task: &PimTask,
    ) -> PimResult<ResultEnvelope> {
        self.update_encoded(credentials, Resource::Task, task).await
    }

    pub async fn delete_task(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.delete_by_unid(credentials, Resource::Task, unid).await
    }
}
