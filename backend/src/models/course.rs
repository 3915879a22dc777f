use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Entity, EntityKind, Record, RecordId, format_wire_date, form_value, parse_wire_date,
    wire_value,
};
use crate::error::ValidationError;
use crate::records::{RecordLinks, extract_record_id};
use crate::services::ConsoleState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "form_value::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "form_value::optional_date")]
    pub end_date: Option<NaiveDate>,
    pub max_participants: u32,
    pub price: f64,
    #[serde(deserialize_with = "form_value::optional_id")]
    pub instructor: Option<RecordId>,
    #[serde(deserialize_with = "form_value::optional_id")]
    pub room: Option<RecordId>,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            max_participants: 20,
            price: 0.0,
            instructor: None,
            room: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseFields {
    #[serde(
        rename = "titel",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub title: Option<String>,
    #[serde(
        rename = "beschreibung",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub description: Option<String>,
    #[serde(
        rename = "startdatum",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub start_date: Option<String>,
    #[serde(
        rename = "enddatum",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub end_date: Option<String>,
    #[serde(
        rename = "max_teilnehmer",
        deserialize_with = "wire_value::lenient_u32",
        skip_serializing_if = "Option::is_none",
    )]
    pub max_participants: Option<u32>,
    #[serde(
        rename = "preis",
        deserialize_with = "wire_value::lenient_f64",
        skip_serializing_if = "Option::is_none",
    )]
    pub price: Option<f64>,
    #[serde(
        rename = "dozent",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub instructor: Option<String>,
    #[serde(
        rename = "raum",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub room: Option<String>,
}

impl Entity for Course {
    type Fields = CourseFields;

    const KIND: EntityKind = EntityKind::Course;

    fn from_fields(fields: CourseFields) -> Self {
        Self {
            title: fields.title.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            start_date: parse_wire_date(fields.start_date.as_deref()),
            end_date: parse_wire_date(fields.end_date.as_deref()),
            max_participants: fields.max_participants.unwrap_or(0),
            price: fields.price.unwrap_or(0.0),
            instructor: fields.instructor.as_deref().and_then(extract_record_id),
            room: fields.room.as_deref().and_then(extract_record_id),
        }
    }

    fn to_fields(&self, links: &RecordLinks) -> CourseFields {
        CourseFields {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            start_date: format_wire_date(self.start_date),
            end_date: format_wire_date(self.end_date),
            max_participants: Some(self.max_participants),
            price: Some(self.price),
            instructor: self
                .instructor
                .as_ref()
                .map(|id| links.url(EntityKind::Instructor, id)),
            room: self.room.as_ref().map(|id| links.url(EntityKind::Room, id)),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.start_date.is_none() {
            missing.push("start_date");
        }
        if self.end_date.is_none() {
            missing.push("end_date");
        }
        missing
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ValidationError::DateRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(())
    }

    fn collection(state: &ConsoleState) -> &[Record<Self>] {
        &state.courses
    }

    fn collection_mut(state: &mut ConsoleState) -> &mut Vec<Record<Self>> {
        &mut state.courses
    }
}
