// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

use crate::{
    modules::{
        error::{code::ErrorCode, PimResult},
        manager::{require_unid, PimManager},
        property::JsonObject,
        transport::{KeepTransport, Resource, ResultEnvelope, TokenProvider, UserCredentials},
    },
    raise_error,
};

fn require_name(name: &str) -> PimResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(raise_error!(
            "An attachment name is required".into(),
            ErrorCode::InvalidParameter
        ));
    }
    Ok(name)
}

impl<T, A> PimManager<T, A>
where
    T: KeepTransport + Sync,
    A: TokenProvider + Sync,
{
    pub async fn get_attachment(
        &self,
        credentials: &UserCredentials,
        parent_unid: &str,
        name: &str,
    ) -> PimResult<Value> {
        let parent_unid = require_unid(Some(parent_unid), Resource::Message)?;
        let name = require_name(name)?;
        let token = self.token(credentials).await?;
        self.transport
            .get_attachment(&token, parent_unid, name)
            .await
    }

    pub async fn add_attachment(
        &self,
        credentials: &UserCredentials,
        parent_unid: &str,
        attachment: &JsonObject,
    ) -> PimResult<ResultEnvelope> {
        let parent_unid = require_unid(Some(parent_unid), Resource::Message)?;
        let token = self.token(credentials).await?;
        self.transport
            .create_attachment(&token, parent_unid, attachment)
            .await?
            .into_result()
    }

    pub async fn delete_attachment(
        &self,
        credentials: &UserCredentials,
        parent_unid: &str,
        name: &str,
    ) -> PimResult<ResultEnvelope> {
        let parent_unid = require_unid(Some(parent_unid), Resource::Message)?;
        let name = require_name(name)?;
        let token = self.token(credentials).await?;
        self.transport
            .delete_attachment(&token, parent_unid, name)
            .await?
            .into_result()
    }
}
