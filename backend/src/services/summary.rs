use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Course, Enrollment, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    Planned,
    Active,
    Ended,
}

/// Lifecycle of a course relative to `today`. A missing start date never
/// makes a course planned; a course without an end date counts as ended.
pub fn course_status(course: &Course, today: NaiveDate) -> CourseStatus {
    match (course.start_date, course.end_date) {
        (Some(start), _) if start > today => CourseStatus::Planned,
        (_, Some(end)) if end >= today => CourseStatus::Active,
        _ => CourseStatus::Ended,
    }
}

/// Sum of course prices over paid enrollments. Enrollments pointing at a
/// course that is not loaded contribute nothing.
pub fn paid_revenue(courses: &[Record<Course>], enrollments: &[Record<Enrollment>]) -> f64 {
    let mut prices: HashMap<&RecordId, f64> = HashMap::with_capacity(courses.len());
    for course in courses {
        prices.entry(&course.id).or_insert(course.data.price);
    }

    enrollments
        .iter()
        .filter(|e| e.data.paid)
        .filter_map(|e| e.data.course.as_ref())
        .map(|course_id| prices.get(course_id).copied().unwrap_or(0.0))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub active_courses: usize,
    pub total_courses: usize,
    pub enrollments: usize,
    pub revenue: f64,
}

pub fn summarize(
    courses: &[Record<Course>],
    enrollments: &[Record<Enrollment>],
    today: NaiveDate,
) -> Summary {
    let active_courses = courses
        .iter()
        .filter(|c| course_status(&c.data, today) == CourseStatus::Active)
        .count();

    Summary {
        active_courses,
        total_courses: courses.len(),
        enrollments: enrollments.len(),
        revenue: paid_revenue(courses, enrollments),
    }
}
