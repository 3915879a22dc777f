use serde::Serialize;

use crate::models::{Course, Enrollment, Entity, Instructor, Participant, Record, RecordId, Room};

/// Everything the console shows, as one value. Each transition returns a
/// new state; nothing mutates a state in place from outside this module.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsoleState {
    pub loading: bool,
    pub courses: Vec<Record<Course>>,
    pub instructors: Vec<Record<Instructor>>,
    pub participants: Vec<Record<Participant>>,
    pub rooms: Vec<Record<Room>>,
    pub enrollments: Vec<Record<Enrollment>>,
}

/// Result of the five parallel loads. `None` marks a collection whose load
/// failed; that collection keeps whatever it held before.
#[derive(Debug, Default)]
pub struct LoadedCollections {
    pub courses: Option<Vec<Record<Course>>>,
    pub instructors: Option<Vec<Record<Instructor>>>,
    pub participants: Option<Vec<Record<Participant>>>,
    pub rooms: Option<Vec<Record<Room>>>,
    pub enrollments: Option<Vec<Record<Enrollment>>>,
}

impl LoadedCollections {
    pub fn is_complete(&self) -> bool {
        self.courses.is_some()
            && self.instructors.is_some()
            && self.participants.is_some()
            && self.rooms.is_some()
            && self.enrollments.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition<E> {
    /// A record was created and the store told us its id.
    Append(Record<E>),
    /// The collection was fetched again.
    ReplaceAll(Vec<Record<E>>),
    /// A record was deleted.
    Remove(RecordId),
}

impl ConsoleState {
    pub fn records<E: Entity>(&self) -> &[Record<E>] {
        E::collection(self)
    }

    pub fn find<E: Entity>(&self, id: &RecordId) -> Option<&Record<E>> {
        self.records::<E>().iter().find(|r| &r.id == id)
    }

    pub fn load_started(&self) -> Self {
        Self {
            loading: true,
            ..self.clone()
        }
    }

    pub fn loaded(&self, collections: LoadedCollections) -> Self {
        let mut next = self.clone();
        next.loading = false;
        if let Some(courses) = collections.courses {
            next.courses = courses;
        }
        if let Some(instructors) = collections.instructors {
            next.instructors = instructors;
        }
        if let Some(participants) = collections.participants {
            next.participants = participants;
        }
        if let Some(rooms) = collections.rooms {
            next.rooms = rooms;
        }
        if let Some(enrollments) = collections.enrollments {
            next.enrollments = enrollments;
        }
        next
    }

    pub fn apply<E: Entity>(&self, transition: Transition<E>) -> Self {
        let mut next = self.clone();
        let records = E::collection_mut(&mut next);
        match transition {
            Transition::Append(record) => records.push(record),
            Transition::ReplaceAll(fresh) => *records = fresh,
            Transition::Remove(id) => records.retain(|r| r.id != id),
        }
        next
    }
}
