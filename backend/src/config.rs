use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::models::EntityKind;

pub const DEFAULT_BASE_URL: &str = "https://my.living-apps.de/rest";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Per-entity application identifiers on the record store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppIds {
    pub courses: String,
    pub instructors: String,
    pub participants: String,
    pub rooms: String,
    pub enrollments: String,
}

impl AppIds {
    pub fn get(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Course => &self.courses,
            EntityKind::Instructor => &self.instructors,
            EntityKind::Participant => &self.participants,
            EntityKind::Room => &self.rooms,
            EntityKind::Enrollment => &self.enrollments,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Remote,
    Memory,
}

#[derive(Clone, Debug)]
pub struct RecordsConfig {
    pub base_url: String,
    pub app_ids: AppIds,
    pub session_cookie: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub records: RecordsConfig,
    pub store: StoreBackend,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let store = match env::var("RECORD_STORE").as_deref() {
            Err(_) | Ok("remote") => StoreBackend::Remote,
            Ok("memory") => StoreBackend::Memory,
            Ok(other) => {
                return Err(AppError::Config(format!(
                    "RECORD_STORE must be 'remote' or 'memory', got '{}'",
                    other
                )));
            }
        };

        let base_url = env::var("RECORDS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        // The in-memory store never leaves the process, so placeholder ids are fine.
        let app_id = |name: &str, fallback: &str| -> Result<String, AppError> {
            match env::var(name) {
                Ok(value) if !value.is_empty() => Ok(value),
                _ if store == StoreBackend::Memory => Ok(fallback.to_string()),
                _ => Err(AppError::Config(format!("{} is not set", name))),
            }
        };

        let app_ids = AppIds {
            courses: app_id("COURSES_APP_ID", "courses")?,
            instructors: app_id("INSTRUCTORS_APP_ID", "instructors")?,
            participants: app_id("PARTICIPANTS_APP_ID", "participants")?,
            rooms: app_id("ROOMS_APP_ID", "rooms")?,
            enrollments: app_id("ENROLLMENTS_APP_ID", "enrollments")?,
        };

        let session_cookie = env::var("RECORDS_SESSION_COOKIE")
            .ok()
            .filter(|c| !c.is_empty());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        Ok(Self {
            records: RecordsConfig {
                base_url,
                app_ids,
                session_cookie,
            },
            store,
            bind_addr,
        })
    }
}
