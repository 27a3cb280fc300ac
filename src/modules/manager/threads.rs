// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::{
    error::PimResult,
    item::{thread::PimThread, views::THREADS_VIEW, ItemCodec},
    manager::{typed_items, PimManager},
    retrieval::{only_kind, FetchPlan},
    transport::{KeepTransport, ListQuery, Resource, TokenProvider, UserCredentials},
};

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub async fn get_thread_items(
        &self,
        credentials: &UserCredentials,
        skip: usize,
        count: Option<usize>,
        mailbox_id: Option<&str>,
    ) -> PimResult<Vec<PimThread>> {
        let token = self.token(credentials).await?;
        let excluded = only_kind(PimThread::KIND);
        let plan = FetchPlan::new(
            Resource::Thread,
            ListQuery::for_view(THREADS_VIEW).mailbox(mailbox_id),
            &excluded,
        );
        let items = self.engine().fetch(&token, &plan, skip, count).await?;
        Ok(typed_items(items))
    }
}
