use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    Entity, EntityKind, Record, RecordId, format_wire_date, form_value, parse_wire_date,
    wire_value,
};
use crate::records::{RecordLinks, extract_record_id};
use crate::services::ConsoleState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Enrollment {
    #[serde(deserialize_with = "form_value::optional_id")]
    pub participant: Option<RecordId>,
    #[serde(deserialize_with = "form_value::optional_id")]
    pub course: Option<RecordId>,
    #[serde(deserialize_with = "form_value::optional_date")]
    pub enrollment_date: Option<NaiveDate>,
    pub paid: bool,
}

impl Default for Enrollment {
    fn default() -> Self {
        Self {
            participant: None,
            course: None,
            enrollment_date: Some(Local::now().date_naive()),
            paid: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentFields {
    #[serde(
        rename = "teilnehmer",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub participant: Option<String>,
    #[serde(
        rename = "kurs",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub course: Option<String>,
    #[serde(
        rename = "anmeldedatum",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub enrollment_date: Option<String>,
    #[serde(
        rename = "bezahlt",
        deserialize_with = "wire_value::lenient_bool",
        skip_serializing_if = "Option::is_none",
    )]
    pub paid: Option<bool>,
}

impl Entity for Enrollment {
    type Fields = EnrollmentFields;

    const KIND: EntityKind = EntityKind::Enrollment;

    fn from_fields(fields: EnrollmentFields) -> Self {
        Self {
            participant: fields.participant.as_deref().and_then(extract_record_id),
            course: fields.course.as_deref().and_then(extract_record_id),
            enrollment_date: parse_wire_date(fields.enrollment_date.as_deref()),
            paid: fields.paid.unwrap_or(false),
        }
    }

    fn to_fields(&self, links: &RecordLinks) -> EnrollmentFields {
        EnrollmentFields {
            participant: self
                .participant
                .as_ref()
                .map(|id| links.url(EntityKind::Participant, id)),
            course: self
                .course
                .as_ref()
                .map(|id| links.url(EntityKind::Course, id)),
            enrollment_date: format_wire_date(self.enrollment_date),
            paid: Some(self.paid),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.participant.is_none() {
            missing.push("participant");
        }
        if self.course.is_none() {
            missing.push("course");
        }
        missing
    }

    fn collection(state: &ConsoleState) -> &[Record<Self>] {
        &state.enrollments
    }

    fn collection_mut(state: &mut ConsoleState) -> &mut Vec<Record<Self>> {
        &mut state.enrollments
    }
}
