// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Exact-count page retrieval over an upstream that pages before filtering.
//!
//! A request for `count` items asks upstream for `max(count + 1, min_page_size)`
//! records. A full page means more records exist, and its last record is a
//! probe that is dropped before conversion so it is fetched again by the next
//! request. Excluded and malformed records are removed client-side; when that
//! leaves the result short and upstream still has data, the engine recurses
//! from the first record it has not examined yet.

use std::{fmt, future::Future, pin::Pin};

use serde_json::Value;
use tracing::debug;

use crate::modules::{
    error::PimResult,
    item::{
        contact::GROUP_FORM,
        factory::{ExcludedKind, ItemFactory},
        views::{DRAFTS_VIEW, INBOX_VIEW, JUNK_VIEW, SENT_VIEW, TRASH_VIEW},
        ItemKind, PimItem,
    },
    transport::{KeepTransport, ListQuery, Resource},
};


pub const RULE_FORM: &str = "Rule";
pub const CALENDAR_PROFILE_FORM: &str = "CalendarProfile";

/// Forms that live in mail views but are not messages.
pub fn mail_exclusions() -> Vec<ExcludedKind> {
    vec![
        ExcludedKind::form(RULE_FORM),
        ExcludedKind::form(CALENDAR_PROFILE_FORM),
    ]
}

/// Excludes every kind except `kind`, so a typed listing still fills its
/// page when the view mixes in records of other kinds.
pub fn only_kind(kind: ItemKind) -> Vec<ExcludedKind> {
    ItemKind::ALL
        .into_iter()
        .filter(|other| *other != kind)
        .map(ExcludedKind::Kind)
        .collect()
}

pub fn contact_exclusions() -> Vec<ExcludedKind> {
    let mut excluded = only_kind(ItemKind::Contact);
    excluded.push(ExcludedKind::form(GROUP_FORM));
    excluded
}

/// A well-known mail collection or an arbitrary label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Inbox,
    Sent,
    Drafts,
    Trash,
    Junk,
    Label(String),
}

impl Selector {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "inbox" => Selector::Inbox,
            "sent" => Selector::Sent,
            "drafts" => Selector::Drafts,
            "trash" | "deleted" => Selector::Trash,
            "junk" | "spam" => Selector::Junk,
            _ => Selector::Label(value.to_string()),
        }
    }

    pub fn view_name(&self) -> &str {
        match self {
            Selector::Inbox => INBOX_VIEW,
            Selector::Sent => SENT_VIEW,
            Selector::Drafts => DRAFTS_VIEW,
            Selector::Trash => TRASH_VIEW,
            Selector::Junk => JUNK_VIEW,
            Selector::Label(id) => id,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.view_name())
    }
}

/// One retrieval: which collection, and which records to drop.
#[derive(Debug, Clone)]
pub struct FetchPlan<'a> {
    pub resource: Resource,
    pub query: ListQuery,
    pub excluded: &'a [ExcludedKind],
}

impl<'a> FetchPlan<'a> {
    pub fn new(resource: Resource, query: ListQuery, excluded: &'a [ExcludedKind]) -> Self {
        Self {
            resource,
            query,
            excluded,
        }
    }

    fn view(&self) -> Option<&str> {
        self.query.view.as_deref()
    }
}

pub struct RetrievalEngine<'a, T> {
    transport: &'a T,
    factory: &'a ItemFactory,
    min_page_size: usize,
}

impl<'a, T> RetrievalEngine<'a, T>
where
    T: KeepTransport + Sync,
{
    pub fn new(transport: &'a T, factory: &'a ItemFactory, min_page_size: usize) -> Self {
        Self {
            transport,
            factory,
            min_page_size,
        }
    }

    /// Records requested from upstream for a page of `count` items.
    pub fn ask_count(&self, count: usize) -> usize {
        (count + 1).max(self.min_page_size)
    }

    /// Returns up to `count` items after exclusions, or every item of a
    /// single unbounded fetch when `count` is `None`.
    pub async fn fetch(
        &self,
        token: &str,
        plan: &FetchPlan<'_>,
        skip: usize,
        count: Option<usize>,
    ) -> PimResult<Vec<PimItem>> {
        match count {
            None => {
                let query = plan.query.clone().page(skip, None);
                let page = self
                    .transport
                    .list_documents(token, plan.resource, &query)
                    .await?;
                let conversion = self.factory.create_items_from_objects(
                    &page,
                    plan.view(),
                    None,
                    plan.excluded,
                );
                Ok(conversion.items)
            }
            Some(0) => Ok(Vec::new()),
            Some(count) => self.fetch_recursive(token, plan, skip, count).await,
        }
    }

    fn fetch_recursive<'b>(
        &'b self,
        token: &'b str,
        plan: &'b FetchPlan<'_>,
        skip: usize,
        count: usize,
    ) -> Pin<Box<dyn Future<Output = PimResult<Vec<PimItem>>> + Send + 'b>> {
        Box::pin(async move {
            let ask_count = self.ask_count(count);
            let query = plan.query.clone().page(skip, Some(ask_count));
            let mut page: Vec<Value> = self
                .transport
                .list_documents(token, plan.resource, &query)
                .await?;

            let fetched = page.len();
            let has_more = fetched >= ask_count;
            if has_more {
                page.truncate(ask_count - 1);
            }

            let conversion = self.factory.create_items_from_objects(
                &page,
                plan.view(),
                Some(count),
                plan.excluded,
            );
            let mut items = conversion.items;
            debug!(
                "{} page at {}: fetched {}, examined {}, kept {} of {} wanted",
                plan.resource,
                skip,
                fetched,
                conversion.consumed,
                items.len(),
                count
            );

            if has_more && items.len() < count && conversion.consumed > 0 {
                let rest = self
                    .fetch_recursive(
                        token,
                        plan,
                        skip + conversion.consumed,
                        count - items.len(),
                    )
                    .await?;
                items.extend(rest);
            }
            Ok(items)
        })
    }
}
