#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use backend::config::AppIds;
use backend::error::AppError;
use backend::models::{EntityKind, RecordId};
use backend::records::{InMemoryRecordClient, RawRecord, RecordClient, RecordLinks};
use chrono::NaiveDate;

pub const BASE_URL: &str = "https://records.test/rest";

pub fn app_ids() -> AppIds {
    AppIds {
        courses: "courses-app".to_string(),
        instructors: "instructors-app".to_string(),
        participants: "participants-app".to_string(),
        rooms: "rooms-app".to_string(),
        enrollments: "enrollments-app".to_string(),
    }
}

pub fn test_links() -> RecordLinks {
    RecordLinks::new(BASE_URL, app_ids())
}

/// A 24-digit hex id, the shape the record store hands out.
pub fn hex_id(n: u32) -> RecordId {
    RecordId::new(format!("{:024x}", n))
}

pub fn url(kind: EntityKind, id: &RecordId) -> String {
    test_links().url(kind, id)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// In-memory store with knobs for failures, hidden create ids and a call counter.
#[derive(Default)]
pub struct ScriptedClient {
    pub inner: InMemoryRecordClient,
    calls: AtomicUsize,
    failing_lists: Mutex<HashSet<EntityKind>>,
    fail_mutations: AtomicBool,
    hide_created_ids: AtomicBool,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_list(&self, kind: EntityKind) {
        self.failing_lists.lock().expect("lock").insert(kind);
    }

    pub fn fail_mutations(&self) {
        self.fail_mutations.store(true, Ordering::SeqCst);
    }

    pub fn hide_created_ids(&self) {
        self.hide_created_ids.store(true, Ordering::SeqCst);
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn mutation_guard(&self) -> Result<(), AppError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(AppError::Request {
                status: 500,
                body: "scripted failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordClient for ScriptedClient {
    async fn list(&self, kind: EntityKind) -> Result<Vec<RawRecord>, AppError> {
        self.record_call();
        if self.failing_lists.lock().expect("lock").contains(&kind) {
            return Err(AppError::Request {
                status: 503,
                body: format!("{} unavailable", kind),
            });
        }
        self.inner.list(kind).await
    }

    async fn get(&self, kind: EntityKind, id: &RecordId) -> Result<RawRecord, AppError> {
        self.record_call();
        self.inner.get(kind, id).await
    }

    async fn create(
        &self,
        kind: EntityKind,
        fields: serde_json::Value,
    ) -> Result<Option<RecordId>, AppError> {
        self.record_call();
        self.mutation_guard()?;
        let id = self.inner.create(kind, fields).await?;
        if self.hide_created_ids.load(Ordering::SeqCst) {
            Ok(None)
        } else {
            Ok(id)
        }
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: &RecordId,
        fields: serde_json::Value,
    ) -> Result<(), AppError> {
        self.record_call();
        self.mutation_guard()?;
        self.inner.update(kind, id, fields).await
    }

    async fn delete(&self, kind: EntityKind, id: &RecordId) -> Result<(), AppError> {
        self.record_call();
        self.mutation_guard()?;
        self.inner.delete(kind, id).await
    }
}

/// Two instructors, a room, two courses, two participants and two enrollments.
pub fn seed(store: &InMemoryRecordClient) {
    store.insert(
        EntityKind::Instructor,
        hex_id(1),
        serde_json::json!({
            "name": "Ada Lovelace",
            "email": "ada@example.org",
            "telefon": "0123",
            "fachgebiet": "Mathematics"
        }),
    );
    store.insert(
        EntityKind::Instructor,
        hex_id(2),
        serde_json::json!({ "name": "Alan Turing" }),
    );
    store.insert(
        EntityKind::Room,
        hex_id(10),
        serde_json::json!({ "raumname": "Lab 1", "gebaeude": "North", "kapazitaet": 24 }),
    );
    store.insert(
        EntityKind::Course,
        hex_id(20),
        serde_json::json!({
            "titel": "Rust Basics",
            "beschreibung": "Ownership and borrowing",
            "startdatum": "2024-01-01",
            "enddatum": "2024-12-31",
            "max_teilnehmer": 12,
            "preis": 100.0,
            "dozent": url(EntityKind::Instructor, &hex_id(1)),
            "raum": url(EntityKind::Room, &hex_id(10))
        }),
    );
    store.insert(
        EntityKind::Course,
        hex_id(21),
        serde_json::json!({
            "titel": "Async Rust",
            "startdatum": "2025-03-01",
            "enddatum": "2025-04-30",
            "preis": 50.0
        }),
    );
    store.insert(
        EntityKind::Participant,
        hex_id(30),
        serde_json::json!({ "name": "Grace Hopper", "geburtsdatum": "1906-12-09" }),
    );
    store.insert(
        EntityKind::Participant,
        hex_id(31),
        serde_json::json!({ "name": "Edsger Dijkstra" }),
    );
    store.insert(
        EntityKind::Enrollment,
        hex_id(40),
        serde_json::json!({
            "teilnehmer": url(EntityKind::Participant, &hex_id(30)),
            "kurs": url(EntityKind::Course, &hex_id(20)),
            "anmeldedatum": "2023-12-01",
            "bezahlt": true
        }),
    );
    store.insert(
        EntityKind::Enrollment,
        hex_id(41),
        serde_json::json!({
            "teilnehmer": url(EntityKind::Participant, &hex_id(31)),
            "kurs": url(EntityKind::Course, &hex_id(21)),
            "anmeldedatum": "2025-01-15",
            "bezahlt": false
        }),
    );
}
