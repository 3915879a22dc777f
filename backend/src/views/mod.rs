pub mod rows;

use tracing::debug;

use crate::error::ValidationError;
use crate::models::{Entity, Record, RecordId};

pub use rows::{CourseRow, EnrollmentRow, course_rows, enrollment_rows};

/// Whether the shared dialog creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode<E> {
    Create,
    Edit(Record<E>),
}

impl<E: Entity> EditMode<E> {
    /// Checks the form and turns it into something the controller can send.
    /// Nothing leaves the view when a required field is empty.
    pub fn submit(&self, form: E) -> Result<Submission<E>, ValidationError> {
        form.validate()?;
        Ok(match self {
            EditMode::Create => Submission::Create(form),
            EditMode::Edit(record) => Submission::Update(record.id.clone(), form),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission<E> {
    Create(E),
    Update(RecordId, E),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog<E> {
    Closed,
    Open { mode: EditMode<E>, form: E },
}

/// UI state of one entity tab: the create/edit dialog and the delete
/// confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<E> {
    dialog: Dialog<E>,
    pending_delete: Option<RecordId>,
}

impl<E: Entity> Default for ListView<E> {
    fn default() -> Self {
        Self {
            dialog: Dialog::Closed,
            pending_delete: None,
        }
    }
}

impl<E: Entity> ListView<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> &Dialog<E> {
        &self.dialog
    }

    pub fn is_open(&self) -> bool {
        matches!(self.dialog, Dialog::Open { .. })
    }

    pub fn mode(&self) -> Option<&EditMode<E>> {
        match &self.dialog {
            Dialog::Open { mode, .. } => Some(mode),
            Dialog::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&E> {
        match &self.dialog {
            Dialog::Open { form, .. } => Some(form),
            Dialog::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut E> {
        match &mut self.dialog {
            Dialog::Open { form, .. } => Some(form),
            Dialog::Closed => None,
        }
    }

    pub fn open_create(&mut self) {
        self.dialog = Dialog::Open {
            mode: EditMode::Create,
            form: E::default(),
        };
    }

    pub fn open_edit(&mut self, record: &Record<E>) {
        self.dialog = Dialog::Open {
            mode: EditMode::Edit(record.clone()),
            form: record.data.clone(),
        };
    }

    pub fn cancel(&mut self) {
        self.dialog = Dialog::Closed;
    }

    /// Closes the dialog and hands back the submission. On a validation
    /// failure the dialog stays open with the form as it was. Saving a
    /// closed dialog is `Ok(None)`.
    pub fn save(&mut self) -> Result<Option<Submission<E>>, ValidationError> {
        let Dialog::Open { mode, form } = &self.dialog else {
            return Ok(None);
        };

        match mode.submit(form.clone()) {
            Ok(submission) => {
                self.dialog = Dialog::Closed;
                Ok(Some(submission))
            }
            Err(e) => {
                debug!("Rejected {} form: {}", E::KIND, e);
                Err(e)
            }
        }
    }

    pub fn pending_delete(&self) -> Option<&RecordId> {
        self.pending_delete.as_ref()
    }

    pub fn request_delete(&mut self, id: RecordId) {
        self.pending_delete = Some(id);
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The id to delete, if a deletion was requested. Clears the request.
    pub fn confirm_delete(&mut self) -> Option<RecordId> {
        self.pending_delete.take()
    }
}
