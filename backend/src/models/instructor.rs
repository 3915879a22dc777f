use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record, wire_value};
use crate::records::RecordLinks;
use crate::services::ConsoleState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject_area: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructorFields {
    #[serde(
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub name: Option<String>,
    #[serde(
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub email: Option<String>,
    #[serde(
        rename = "telefon",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub phone: Option<String>,
    #[serde(
        rename = "fachgebiet",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub subject_area: Option<String>,
}

impl Entity for Instructor {
    type Fields = InstructorFields;

    const KIND: EntityKind = EntityKind::Instructor;

    fn from_fields(fields: InstructorFields) -> Self {
        Self {
            name: fields.name.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            subject_area: fields.subject_area.unwrap_or_default(),
        }
    }

    fn to_fields(&self, _links: &RecordLinks) -> InstructorFields {
        InstructorFields {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            subject_area: Some(self.subject_area.clone()),
        }
    }

    fn missing_required(&self) -> Vec<&'static str> {
        if self.name.trim().is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }

    fn collection(state: &ConsoleState) -> &[Record<Self>] {
        &state.instructors
    }

    fn collection_mut(state: &mut ConsoleState) -> &mut Vec<Record<Self>> {
        &mut state.instructors
    }
}
