use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::models::{Course, Enrollment, Entity, Instructor, Participant, Record, RecordId, Room};
use crate::records::{RecordClient, RecordLinks};
use crate::services::console_state::{ConsoleState, LoadedCollections, Transition};
use crate::services::notification::{Notification, Operation};
use crate::services::summary::{Summary, summarize};
use crate::views::Submission;

/// Page controller: owns the console state and turns operator actions into
/// record API calls.
pub struct Console {
    client: Arc<dyn RecordClient>,
    links: RecordLinks,
    state: ConsoleState,
}

impl Console {
    pub fn new(client: Arc<dyn RecordClient>, links: RecordLinks) -> Self {
        Self {
            client,
            links,
            state: ConsoleState::default(),
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn links(&self) -> &RecordLinks {
        &self.links
    }

    /// Counters are derived on every call, never stored.
    pub fn summary(&self, today: NaiveDate) -> Summary {
        summarize(&self.state.courses, &self.state.enrollments, today)
    }

    /// Loads all five collections concurrently. Every load runs to the end;
    /// collections that loaded are stored even if another one failed. Any
    /// failure yields a single notification.
    pub async fn load_all(&mut self) -> Option<Notification> {
        info!("Loading all collections");
        self.state = self.state.load_started();

        let (courses, instructors, participants, rooms, enrollments) = tokio::join!(
            self.fetch::<Course>(),
            self.fetch::<Instructor>(),
            self.fetch::<Participant>(),
            self.fetch::<Room>(),
            self.fetch::<Enrollment>(),
        );

        let collections = LoadedCollections {
            courses: loaded("courses", courses),
            instructors: loaded("instructors", instructors),
            participants: loaded("participants", participants),
            rooms: loaded("rooms", rooms),
            enrollments: loaded("enrollments", enrollments),
        };
        let complete = collections.is_complete();
        self.state = self.state.loaded(collections);

        if complete {
            info!(
                "Loaded {} courses, {} instructors, {} participants, {} rooms, {} enrollments",
                self.state.courses.len(),
                self.state.instructors.len(),
                self.state.participants.len(),
                self.state.rooms.len(),
                self.state.enrollments.len()
            );
            None
        } else {
            Some(Notification::failure(Operation::Load))
        }
    }

    pub async fn submit<E: Entity>(&mut self, submission: Submission<E>) -> Notification {
        match submission {
            Submission::Create(draft) => self.create(draft).await,
            Submission::Update(id, draft) => self.update(&id, draft).await,
        }
    }

    pub async fn create<E: Entity>(&mut self, draft: E) -> Notification {
        match self.try_create(draft).await {
            Ok(()) => Notification::success(Operation::Create, E::KIND),
            Err(e) => {
                error!("Failed to create {} record: {}", E::KIND, e);
                Notification::failure(Operation::Create)
            }
        }
    }

    pub async fn update<E: Entity>(&mut self, id: &RecordId, draft: E) -> Notification {
        match self.try_update(id, draft).await {
            Ok(()) => Notification::success(Operation::Update, E::KIND),
            Err(e) => {
                error!("Failed to update {} record {}: {}", E::KIND, id, e);
                Notification::failure(Operation::Update)
            }
        }
    }

    pub async fn delete<E: Entity>(&mut self, id: &RecordId) -> Notification {
        match self.client.delete(E::KIND, id).await {
            Ok(()) => {
                self.state = self.state.apply(Transition::<E>::Remove(id.clone()));
                Notification::success(Operation::Delete, E::KIND)
            }
            Err(e) => {
                error!("Failed to delete {} record {}: {}", E::KIND, id, e);
                Notification::failure(Operation::Delete)
            }
        }
    }

    /// Reads a single record straight from the store.
    pub async fn fetch_one<E: Entity>(&self, id: &RecordId) -> Result<Record<E>, AppError> {
        let raw = self.client.get(E::KIND, id).await?;
        Ok(Record::from_raw(raw))
    }

    /// Fetches one collection again and replaces it wholesale.
    pub async fn reload<E: Entity>(&mut self) -> Result<(), AppError> {
        let fresh = self.fetch::<E>().await?;
        self.state = self.state.apply(Transition::ReplaceAll(fresh));
        Ok(())
    }

    async fn try_create<E: Entity>(&mut self, draft: E) -> Result<(), AppError> {
        let fields = serde_json::to_value(draft.to_fields(&self.links))?;
        match self.client.create(E::KIND, fields).await? {
            Some(id) => {
                info!("Created {} record {}", E::KIND, id);
                self.state = self.state.apply(Transition::Append(Record::new(id, draft)));
                Ok(())
            }
            None => {
                warn!(
                    "Create response for {} carried no record id, reloading the collection",
                    E::KIND
                );
                self.reload::<E>().await
            }
        }
    }

    async fn try_update<E: Entity>(&mut self, id: &RecordId, draft: E) -> Result<(), AppError> {
        let fields = serde_json::to_value(draft.to_fields(&self.links))?;
        self.client.update(E::KIND, id, fields).await?;
        info!("Updated {} record {}", E::KIND, id);
        self.reload::<E>().await
    }

    async fn fetch<E: Entity>(&self) -> Result<Vec<Record<E>>, AppError> {
        let raw = self.client.list(E::KIND).await?;
        Ok(raw.into_iter().map(Record::from_raw).collect())
    }
}

fn loaded<E>(name: &str, result: Result<Vec<Record<E>>, AppError>) -> Option<Vec<Record<E>>> {
    match result {
        Ok(records) => Some(records),
        Err(e) => {
            error!("Failed to load {}: {}", name, e);
            None
        }
    }
}
