use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{RawRecord, RecordClient};
use crate::error::AppError;
use crate::models::{EntityKind, RecordId};

type Collection = BTreeMap<RecordId, serde_json::Value>;

/// Record store kept in process memory. Ids look like the remote store's
/// (24 lowercase hex characters) so reference URLs round-trip.
#[derive(Default)]
pub struct InMemoryRecordClient {
    records: Mutex<HashMap<EntityKind, Collection>>,
}

impl InMemoryRecordClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a record in place without going through `create`.
    pub fn insert(&self, kind: EntityKind, id: RecordId, fields: serde_json::Value) {
        self.with_collection(kind, |records| {
            records.insert(id, fields);
        });
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.with_collection(kind, |records| records.len())
    }

    pub fn is_empty(&self, kind: EntityKind) -> bool {
        self.len(kind) == 0
    }

    pub fn fields(&self, kind: EntityKind, id: &RecordId) -> Option<serde_json::Value> {
        self.with_collection(kind, |records| records.get(id).cloned())
    }

    fn with_collection<T>(&self, kind: EntityKind, f: impl FnOnce(&mut Collection) -> T) -> T {
        let mut guard = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(guard.entry(kind).or_default())
    }

    fn not_found(kind: EntityKind, id: &RecordId) -> AppError {
        AppError::Request {
            status: 404,
            body: format!("{} record {} not found", kind, id),
        }
    }
}

pub fn generate_record_id() -> RecordId {
    let hex = Uuid::new_v4().simple().to_string();
    RecordId::new(&hex[..24])
}

#[async_trait]
impl RecordClient for InMemoryRecordClient {
    async fn list(&self, kind: EntityKind) -> Result<Vec<RawRecord>, AppError> {
        Ok(self.with_collection(kind, |records| {
            records
                .iter()
                .map(|(id, fields)| RawRecord {
                    id: id.clone(),
                    fields: fields.clone(),
                })
                .collect()
        }))
    }

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<RawRecord, AppError> {
        self.fields(kind, id)
            .map(|fields| RawRecord {
                id: id.clone(),
                fields,
            })
            .ok_or_else(|| Self::not_found(kind, id))
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: serde_json::Value,
    ) -> Result<Option<RecordId>, AppError> {
        let id = generate_record_id();
        self.insert(kind, id.clone(), fields);
        Ok(Some(id))
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RecordId,
        fields: serde_json::Value,
    ) -> Result<(), AppError> {
        self.with_collection(kind, |records| {
            let existing = records.get_mut(id).ok_or_else(|| Self::not_found(kind, id))?;
            // PATCH semantics: only the keys sent are replaced.
            match (existing, fields) {
                (serde_json::Value::Object(current), serde_json::Value::Object(patch)) => {
                    current.extend(patch);
                }
                (current, patch) => *current = patch,
            }
            Ok(())
        })
    }

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), AppError> {
        self.with_collection(kind, |records| {
            records
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| Self::not_found(kind, id))
        })
    }
}
