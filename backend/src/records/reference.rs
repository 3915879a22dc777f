use std::sync::LazyLock;

use regex::Regex;

use crate::config::{AppIds, RecordsConfig};
use crate::models::{EntityKind, RecordId};

static RECORD_ID_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-f0-9]{24})$").expect("valid record id pattern"));

/// `{base}/apps/{appId}/records/{id}`
pub fn record_url(base_url: &str, app_id: &str, id: &RecordId) -> String {
    format!("{}/apps/{}/records/{}", base_url.trim_end_matches('/'), app_id, id)
}

/// Pulls the 24-character hex record id off the end of a reference URL.
pub fn extract_record_id(url: &str) -> Option<RecordId> {
    RECORD_ID_SUFFIX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| RecordId::new(m.as_str()))
}

/// Encodes typed references as the absolute URLs the record store expects.
#[derive(Clone, Debug)]
pub struct RecordLinks {
    base_url: String,
    app_ids: AppIds,
}

impl RecordLinks {
    pub fn new(base_url: impl Into<String>, app_ids: AppIds) -> Self {
        Self {
            base_url: base_url.into(),
            app_ids,
        }
    }

    pub fn from_config(config: &RecordsConfig) -> Self {
        Self::new(config.base_url.clone(), config.app_ids.clone())
    }

    pub fn url(&self, kind: EntityKind, id: &RecordId) -> String {
        record_url(&self.base_url, self.app_ids.get(kind), id)
    }
}
