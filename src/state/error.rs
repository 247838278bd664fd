//! Engine error types

use super::field::{FieldId, FieldType};

/// Errors raised by the field editing engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// A field with this id is already in the list
    #[error("duplicate field id `{0}`")]
    DuplicateId(FieldId),

    /// No field with this id exists
    #[error("field `{0}` not found")]
    NotFound(FieldId),

    /// Field types are fixed once created
    #[error("field `{id}` is a {existing} field and cannot become {requested}")]
    TypeChange {
        id: FieldId,
        existing: FieldType,
        requested: FieldType,
    },

    /// Undo or redo requested at a history boundary
    #[error("no history in that direction")]
    NoHistory,
}

impl EditorError {
    /// Boundary conditions the caller should show as a disabled affordance
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::NoHistory)
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
