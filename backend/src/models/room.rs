use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind, Record, wire_value};
use crate::records::RecordLinks;
use crate::services::ConsoleState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Room {
    pub name: String,
    pub building: String,
    pub capacity: u32,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            name: String::new(),
            building: String::new(),
            capacity: 30,
        }
    }
}

impl Room {
    /// `"name (building)"`, the way rooms are shown next to courses.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.building)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomFields {
    #[serde(
        rename = "raumname",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub name: Option<String>,
    #[serde(
        rename = "gebaeude",
        deserialize_with = "wire_value::lenient_string",
        skip_serializing_if = "Option::is_none",
    )]
    pub building: Option<String>,
    #[serde(
        rename = "kapazitaet",
        deserialize_with = "wire_value::lenient_u32",
        skip_serializing_if = "Option::is_none",
    )]
    pub capacity: Option<u32>,
}

impl Entity for Room {
    type Fields = RoomFields;

    const KIND: EntityKind = EntityKind::Room;

    fn from_fields(fields: RoomFields) -> Self {
        Self {
            name: fields.name.unwrap_or_default(),
            building: fields.building.unwrap_or_default(),
            capacity: fields.capacity.unwrap_or(0),
        }
    }

    fn to_fields(&self, _links: &RecordLinks) -> RoomFields {
        RoomFields {
            name: Some(self.name.clone()),
            building: Some(self.building.clone()),
            capacity: Some(self.capacity),
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
        &state.rooms
    }

    fn collection_mut(state: &mut ConsoleState) -> &mut Vec<Record<Self>> {
        &mut state.rooms
    }
}
