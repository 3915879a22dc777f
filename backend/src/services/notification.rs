use serde::Serialize;

use crate::models::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

/// Transient message shown to the operator after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(operation: Operation, kind: EntityKind) -> Self {
        let verb = match operation {
            Operation::Load => "loaded",
            Operation::Create => "created",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        };
        Self {
            level: Level::Success,
            message: format!("{} {}", kind.label(), verb),
        }
    }

    /// Failures carry one fixed message per action, whatever went wrong.
    pub fn failure(operation: Operation) -> Self {
        let message = match operation {
            Operation::Load => "Error loading data",
            Operation::Create => "Error creating",
            Operation::Update => "Error updating",
            Operation::Delete => "Error deleting",
        };
        Self {
            level: Level::Error,
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}
