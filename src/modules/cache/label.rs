// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::{sync::Arc, time::Duration};

use tracing::debug;

use crate::modules::{
    common::lru::TimedLruCache,
    item::label::{LabelKind, PimLabel},
    settings::cli::PimConfig,
};

/// Keyed by user and by whether the list carries unread counts.
pub type LabelCacheKey = (String, bool);

/// Labels a caller does not want to see, matched by view name or by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelIgnoreFilter {
    pub view_names: Vec<String>,
    pub kinds: Vec<LabelKind>,
}

impl LabelIgnoreFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn views<I, S>(view_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            view_names: view_names.into_iter().map(Into::into).collect(),
            kinds: Vec::new(),
        }
    }

    pub fn kinds(kinds: impl IntoIterator<Item = LabelKind>) -> Self {
        Self {
            view_names: Vec::new(),
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.view_names.is_empty() && self.kinds.is_empty()
    }

    pub fn is_ignored(&self, label: &PimLabel) -> bool {
        self.kinds.contains(&label.label_kind)
            || self
                .view_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(label.view_name()))
    }

    pub fn apply(&self, labels: &[PimLabel]) -> Vec<PimLabel> {
        labels
            .iter()
            .filter(|label| !self.is_ignored(label))
            .cloned()
            .collect()
    }
}

/// Short-lived per-user label lists. Entries are replaced whole and the
/// ignore filter runs on every read, so one cached list serves any filter.
pub struct LabelCache {
    entries: TimedLruCache<LabelCacheKey, Vec<PimLabel>>,
}

impl LabelCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: TimedLruCache::new(capacity, ttl),
        }
    }

    pub fn from_config(config: &PimConfig) -> Self {
        Self::new(config.label_cache_capacity, config.label_cache_ttl)
    }

    fn key(user_id: &str, include_unread: bool) -> LabelCacheKey {
        (user_id.to_string(), include_unread)
    }

    pub async fn get(
        &self,
        user_id: &str,
        include_unread: bool,
        ignore: &LabelIgnoreFilter,
    ) -> Option<Vec<PimLabel>> {
        let labels = self.entries.get(&Self::key(user_id, include_unread)).await?;
        debug!(
            "Label cache hit for user {} (unread counts: {})",
            user_id, include_unread
        );
        Some(ignore.apply(&labels))
    }

    pub async fn set(&self, user_id: &str, include_unread: bool, labels: Vec<PimLabel>) {
        self.entries
            .set(Self::key(user_id, include_unread), Arc::new(labels))
            .await;
    }

    /// Drops both variants of the user's list.
    pub async fn invalidate(&self, user_id: &str) {
        let mut dropped = 0;
        for include_unread in [false, true] {
            if self
                .entries
                .invalidate(&Self::key(user_id, include_unread))
                .await
            {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!("Invalidated {} label cache entries for user {}", dropped, user_id);
        }
    }
}
