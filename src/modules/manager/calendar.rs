// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::NaiveDateTime;
use tracing::warn;

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        item::{calendar::PimCalendarItem, views::CALENDAR_VIEW, ItemCodec},
        manager::{typed_items, PimManager},
        retrieval::{only_kind, FetchPlan},
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
    pub async fn get_calendar_item(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<PimCalendarItem> {
        self.get_typed(credentials, Resource::Calendar, unid).await
    }

    /// Events of one calendar within `[start, end)`. Range queries are not
    /// paged upstream, so this is a single unbounded fetch.
    pub async fn get_calendar_items(
        &self,
        credentials: &UserCredentials,
        calendar_id: Option<&str>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> PimResult<Vec<PimCalendarItem>> {
        if end <= start {
            return Err(raise_error!(
                format!("Calendar range end {} is not after start {}", end, start),
                ErrorCode::InvalidParameter
            ));
        }
        let token = self.token(credentials).await?;
        let query = ListQuery {
            calendar_id: Some(
                calendar_id
                    .unwrap_or(&self.config.default_calendar_id)
                    .to_string(),
            ),
            start: Some(start),
            end: Some(end),
            ..ListQuery::for_view(CALENDAR_VIEW)
        };
        let excluded = only_kind(PimCalendarItem::KIND);
        let plan = FetchPlan::new(Resource::Calendar, query, &excluded);
        let items = self.engine().fetch(&token, &plan, 0, None).await?;
        Ok(typed_items(items))
    }

    pub async fn create_calendar_item(
        &self,
        credentials: &UserCredentials,
        event: &PimCalendarItem,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        let mut document = event.to_document();
        if event.calendar_id.is_none() {
            warn!(
                "New calendar item {:?} has no calendar id, using '{}'",
                event.uid, self.config.default_calendar_id
            );
            document.insert(
                "calendarId".into(),
                self.config.default_calendar_id.clone().into(),
            );
        }
        self.create_encoded(credentials, Resource::Calendar, &document)
            .await
    }

    pub async fn update_calendar_item(
        &self,
        credentials: &UserCredentials,
        event: &PimCalendarItem,
    ) -> PimResult<ResultEnvelope> {
        if event.calendar_id.is_none() {
            return Err(raise_error!(
                format!("Calendar item {:?} has no calendar id", event.core.unid),
                ErrorCode::MissingCalendarId
            ));
        }
        self.update_encoded(credentials, Resource::Calendar, event)
            .await
    }

    pub async fn delete_calendar_item(
        &self,
        credentials: &UserCredentials,
        unid: &str,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.delete_by_unid(credentials, Resource::Calendar, unid)
            .await
    }
}
