use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `GET /apps/{appId}/records` answers with an object keyed by record id.
pub type ListRecordsResponse = HashMap<String, RecordEnvelope>;

#[derive(Debug, Deserialize)]
pub struct RecordEnvelope {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateRecordResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub record_id: Option<String>,
}

impl CreateRecordResponse {
    pub fn assigned_id(self) -> Option<String> {
        self.id
            .filter(|id| !id.is_empty())
            .or(self.record_id.filter(|id| !id.is_empty()))
    }
}

#[derive(Debug, Serialize)]
pub struct FieldsRequest<'a> {
    pub fields: &'a serde_json::Value,
}
