//! Submitted responses for shared forms

use super::{StorageError, StorageResult};
use crate::state::{Field, FieldId, FieldType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One submitted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    /// Text, textarea, dropdown and date answers
    Text(String),
    /// Selected options of a checkbox group
    Choices(Vec<String>),
    /// A single checkbox
    Flag(bool),
}

impl ResponseValue {
    /// Whether this value counts as an answer
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Choices(c) => !c.is_empty(),
            Self::Flag(_) => true,
        }
    }
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Choices(c) => write!(f, "{}", c.join(", ")),
            Self::Flag(true) => write!(f, "yes"),
            Self::Flag(false) => write!(f, "no"),
        }
    }
}

/// A single submission: field id to value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub submitted_at: DateTime<Utc>,
    pub values: BTreeMap<FieldId, ResponseValue>,
}

impl ResponseRecord {
    pub fn new(values: BTreeMap<FieldId, ResponseValue>) -> Self {
        Self {
            submitted_at: Utc::now(),
            values,
        }
    }

    pub fn get(&self, id: &FieldId) -> Option<&ResponseValue> {
        self.values.get(id)
    }
}

/// Every response collected for one shared form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLog {
    pub form_id: String,
    pub records: Vec<ResponseRecord>,
}

/// A response log paired with the shared form it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponses {
    pub log: ResponseLog,
    /// Empty when the shared snapshot is gone
    pub fields: Vec<Field>,
}

impl FormResponses {
    /// `(label, answer)` rows for one record in form order. Answers to
    /// fields missing from the form follow, keyed by id.
    pub fn rows(&self, record: &ResponseRecord) -> Vec<(String, String)> {
        let mut rows: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|field| {
                let answer = record
                    .get(&field.id)
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string());
                (field.label.clone(), answer)
            })
            .collect();
        rows.extend(
            record
                .values
                .iter()
                .filter(|(id, _)| !self.fields.iter().any(|f| &f.id == *id))
                .map(|(id, value)| (id.to_string(), value.to_string())),
        );
        rows
    }
}

/// Check a submission against the form it answers. Required checkbox
/// groups need at least one selection; other required inputs need a
/// non-empty value. Single checkboxes are never enforced.
pub fn validate_submission(
    fields: &[Field],
    values: &BTreeMap<FieldId, ResponseValue>,
) -> StorageResult<()> {
    for field in fields.iter().filter(|f| f.required) {
        let answered = values.get(&field.id).is_some_and(ResponseValue::is_answered);
        if field.is_checkbox_group() {
            let has_choice = matches!(values.get(&field.id), Some(ResponseValue::Choices(c)) if !c.is_empty());
            if !has_choice {
                return Err(StorageError::Submission(format!(
                    "please select at least one option for: {}",
                    field.label
                )));
            }
        } else if field.field_type != FieldType::Checkbox && !answered {
            return Err(StorageError::Submission(format!(
                "{} is required",
                field.label
            )));
        }
    }
    Ok(())
}
