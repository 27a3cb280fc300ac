// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{info, warn};

use crate::{
    modules::{
        cache::label::LabelIgnoreFilter,
        error::{code::ErrorCode, PimResult},
        item::{label::PimLabel, ItemCodec},
        manager::{expect_list, require_unid, PimManager},
        transport::{
            expect_object, KeepTransport, Resource, ResultEnvelope, TokenProvider,
            UserCredentials,
        },
    },
    raise_error,
};

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    /// Lists the user's labels, served from the label cache when fresh.
    pub async fn get_labels(
        &self,
        credentials: &UserCredentials,
        include_unread: bool,
        ignore: &LabelIgnoreFilter,
    ) -> PimResult<Vec<PimLabel>> {
        if let Some(labels) = self
            .labels
            .get(&credentials.user_id, include_unread, ignore)
            .await
        {
            return Ok(labels);
        }

        let token = self.token(credentials).await?;
        let raw = self.transport.get_labels(&token, include_unread).await?;
        let labels: Vec<PimLabel> = expect_list(raw)
            .iter()
            .map(PimLabel::from_label_record)
            .filter(|label| {
                let named = !label.name.is_empty();
                if !named {
                    warn!("Skipping unnamed label {:?}", label.folder_id());
                }
                named
            })
            .collect();

        let visible = ignore.apply(&labels);
        self.labels
            .set(&credentials.user_id, include_unread, labels)
            .await;
        Ok(visible)
    }

    pub async fn get_label(
        &self,
        credentials: &UserCredentials,
        label_id: &str,
    ) -> PimResult<PimLabel> {
        let token = self.token(credentials).await?;
        let raw = self
            .transport
            .get_document(&token, Resource::Label, label_id)
            .await?;
        let raw = expect_object(raw, Resource::Label)?;
        let mut label = raw
            .as_object()
            .map(PimLabel::from_label_record)
            .unwrap_or_default();
        if label.core.unid.is_none() {
            label.core.unid = Some(label_id.to_string());
        }
        Ok(label)
    }

    pub async fn create_label(
        &self,
        credentials: &UserCredentials,
        label: &PimLabel,
    ) -> PimResult<ResultEnvelope> {
        if label.name.trim().is_empty() {
            return Err(raise_error!(
                "A label needs a name".into(),
                ErrorCode::InvalidParameter
            ));
        }
        self.labels.invalidate(&credentials.user_id).await;
        let envelope = self
            .create_encoded(credentials, Resource::Label, &label.to_document())
            .await?;
        info!(
            "Created label '{}' for user {} ({:?})",
            label.name, credentials.user_id, envelope.unid
        );
        Ok(envelope)
    }

    pub async fn update_label(
        &self,
        credentials: &UserCredentials,
        label: &PimLabel,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.update_encoded(credentials, Resource::Label, label)
            .await
    }

    pub async fn delete_label(
        &self,
        credentials: &UserCredentials,
        label_id: &str,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        self.delete_by_unid(credentials, Resource::Label, label_id)
            .await
    }

    /// Re-parents a label under `parent_id`.
    pub async fn move_label(
        &self,
        credentials: &UserCredentials,
        label_id: &str,
        parent_id: &str,
    ) -> PimResult<ResultEnvelope> {
        self.labels.invalidate(&credentials.user_id).await;
        let label_id = require_unid(Some(label_id), Resource::Label)?;
        let token = self.token(credentials).await?;
        self.transport
            .move_document(&token, Resource::Label, label_id, parent_id)
            .await?
            .into_result()
    }
}
