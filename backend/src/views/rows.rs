use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Course, Enrollment, Instructor, Participant, Record, RecordId, Room};
use crate::services::{CourseStatus, course_status};

/// Shown wherever a reference does not resolve to a loaded record.
pub const UNRESOLVED: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRow {
    pub id: RecordId,
    pub title: String,
    pub instructor: String,
    pub room: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub price: f64,
    pub status: CourseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentRow {
    pub id: RecordId,
    pub participant: String,
    pub course: String,
    pub enrollment_date: Option<NaiveDate>,
    pub paid: bool,
}

fn resolve<'a, E>(records: &'a [Record<E>], id: Option<&RecordId>) -> Option<&'a E> {
    let id = id?;
    records.iter().find(|r| &r.id == id).map(|r| &r.data)
}

pub fn course_rows(
    courses: &[Record<Course>],
    instructors: &[Record<Instructor>],
    rooms: &[Record<Room>],
    today: NaiveDate,
) -> Vec<CourseRow> {
    courses
        .iter()
        .map(|c| CourseRow {
            id: c.id.clone(),
            title: c.data.title.clone(),
            instructor: resolve(instructors, c.data.instructor.as_ref())
                .map(|i| i.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNRESOLVED.to_string()),
            room: resolve(rooms, c.data.room.as_ref())
                .map(Room::display_name)
                .unwrap_or_else(|| UNRESOLVED.to_string()),
            start_date: c.data.start_date,
            end_date: c.data.end_date,
            price: c.data.price,
            status: course_status(&c.data, today),
        })
        .collect()
}

pub fn enrollment_rows(
    enrollments: &[Record<Enrollment>],
    participants: &[Record<Participant>],
    courses: &[Record<Course>],
) -> Vec<EnrollmentRow> {
    enrollments
        .iter()
        .map(|e| EnrollmentRow {
            id: e.id.clone(),
            participant: resolve(participants, e.data.participant.as_ref())
                .map(|p| p.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNRESOLVED.to_string()),
            course: resolve(courses, e.data.course.as_ref())
                .map(|c| c.title.clone())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| UNRESOLVED.to_string()),
            enrollment_date: e.data.enrollment_date,
            paid: e.data.paid,
        })
        .collect()
}
