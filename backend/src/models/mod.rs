pub mod course;
pub mod enrollment;
pub mod instructor;
pub mod participant;
pub mod room;

use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::ValidationError;
use crate::records::{RawRecord, RecordLinks};
use crate::services::ConsoleState;

pub use course::{Course, CourseFields};
pub use enrollment::{Enrollment, EnrollmentFields};
pub use instructor::{Instructor, InstructorFields};
pub use participant::{Participant, ParticipantFields};
pub use room::{Room, RoomFields};

/// Opaque identifier assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Course,
    Instructor,
    Participant,
    Room,
    Enrollment,
}

impl EntityKind {
    /// Path segment used by the console's HTTP API.
    pub fn collection_name(self) -> &'static str {
        match self {
            EntityKind::Course => "courses",
            EntityKind::Instructor => "instructors",
            EntityKind::Participant => "participants",
            EntityKind::Room => "rooms",
            EntityKind::Enrollment => "enrollments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Course => "Course",
            EntityKind::Instructor => "Instructor",
            EntityKind::Participant => "Participant",
            EntityKind::Room => "Room",
            EntityKind::Enrollment => "Enrollment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}

/// A UI record together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<E> {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: E,
}

impl<E: Entity> Record<E> {
    pub fn new(id: RecordId, data: E) -> Self {
        Self { id, data }
    }

    /// Never fails: mistyped values are dropped field by field, and a bag
    /// that is not an object at all reads as empty.
    pub fn from_raw(raw: RawRecord) -> Self {
        let fields = match raw.fields {
            serde_json::Value::Null => E::Fields::default(),
            value => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("{} record {} has an unreadable field bag: {}", E::KIND, raw.id, e);
                E::Fields::default()
            }),
        };
        Self {
            id: raw.id,
            data: E::from_fields(fields),
        }
    }
}

/// One of the five record types the console manages.
///
/// `Fields` is the wire field bag. `from_fields` never fails: absent values
/// fall back to the form defaults of an empty record (`""`, `0`, `false`) and
/// reference URLs are reduced to bare ids. `to_fields` is the inverse, with
/// references resolved back into URLs through [`RecordLinks`].
pub trait Entity:
    Clone + fmt::Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Fields: Serialize + DeserializeOwned + Default + fmt::Debug + Send;

    const KIND: EntityKind;

    fn from_fields(fields: Self::Fields) -> Self;

    fn to_fields(&self, links: &RecordLinks) -> Self::Fields;

    /// Names of required fields that are empty.
    fn missing_required(&self) -> Vec<&'static str>;

    fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    fn collection(state: &ConsoleState) -> &[Record<Self>];

    fn collection_mut(state: &mut ConsoleState) -> &mut Vec<Record<Self>>;
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reads the calendar date off a wire date value. Timestamps are cut to
/// their date part; anything unparseable counts as absent.
pub(crate) fn parse_wire_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

pub(crate) fn format_wire_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

/// Deserializers for values posted by the frontend, where an untouched
/// input or select arrives as an empty string.
pub(crate) mod form_value {
    use super::*;

    pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|id| !id.trim().is_empty()).map(RecordId::new))
    }
}

/// Deserializers for the wire field bags. A value of the wrong JSON type
/// reads as absent instead of failing the whole record.
pub(crate) mod wire_value {
    use super::*;
    use serde_json::Value;

    pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// Numbers, or strings holding one.
    pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        Ok(number.filter(|n| n.is_finite()))
    }

    pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(lenient_f64(deserializer)?.map(|n| n.max(0.0).round() as u32))
    }

    pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Bool(b) => Some(b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        })
    }
}
