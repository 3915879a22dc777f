use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Entity, EntityKind, Record, format_wire_date, form_value, parse_wire_date, wire_value,
};
use crate::records::RecordLinks;
use crate::services::ConsoleState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(deserialize_with = "form_value::optional_date")]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantFields {
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
        rename = "geburtsdatum",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub birth_date: Option<String>,
}

impl Entity for Participant {
    type Fields = ParticipantFields;

    const KIND: EntityKind = EntityKind::Participant;

    fn from_fields(fields: ParticipantFields) -> Self {
        Self {
            name: fields.name.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            phone: fields.phone.unwrap_or_default(),
            birth_date: parse_wire_date(fields.birth_date.as_deref()),
        }
    }

    fn to_fields(&self, _links: &RecordLinks) -> ParticipantFields {
        ParticipantFields {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            birth_date: format_wire_date(self.birth_date),
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
        &state.participants
    }

    fn collection_mut(state: &mut ConsoleState) -> &mut Vec<Record<Self>> {
        &mut state.participants
    }
}
