//! Form field descriptors

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, immutable field identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Mint a fresh random identifier
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The fixed set of supported field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Checkbox,
    Dropdown,
    Date,
}

impl FieldType {
    /// Palette order
    pub const ALL: [FieldType; 5] = [
        FieldType::Text,
        FieldType::Textarea,
        FieldType::Checkbox,
        FieldType::Dropdown,
        FieldType::Date,
    ];

    /// Wire name, also used as the label of freshly dropped fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Dropdown => "dropdown",
            Self::Date => "date",
        }
    }

    /// Palette label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Textarea => "Textarea",
            Self::Checkbox => "Checkbox",
            Self::Dropdown => "Dropdown",
            Self::Date => "Date",
        }
    }

    /// Text-like fields carry placeholder, length bounds and pattern
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text | Self::Textarea)
    }

    /// Fields that carry an option list
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Checkbox)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single form field descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Regular expression source, stored opaquely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl Field {
    /// Create a field with the given id and type, labelled by its type
    pub fn new(id: impl Into<FieldId>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: field_type.as_str().to_string(),
            field_type,
            placeholder: None,
            required: false,
            options: Vec::new(),
            help_text: None,
            min_length: None,
            max_length: None,
            pattern: None,
            checked: None,
        }
    }

    /// Create a field of the given type with a freshly minted id
    pub fn fresh(field_type: FieldType) -> Self {
        Self::new(FieldId::mint(), field_type)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Copy of this field under a new id
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: FieldId::mint(),
            ..self.clone()
        }
    }

    /// A checkbox with options renders as a multi-select group
    pub fn is_checkbox_group(&self) -> bool {
        self.field_type == FieldType::Checkbox && !self.options.is_empty()
    }

    /// Set options from a comma separated string
    pub fn set_options_csv(&mut self, csv: &str) {
        self.options = if csv.is_empty() {
            Vec::new()
        } else {
            csv.split(',').map(|s| s.to_string()).collect()
        };
    }

    /// Options joined back into their comma separated form
    pub fn options_csv(&self) -> String {
        self.options.join(",")
    }
}

/// Returns the first id that appears more than once, if any
pub fn find_duplicate_id(fields: &[Field]) -> Option<&FieldId> {
    let mut seen = std::collections::HashSet::with_capacity(fields.len());
    fields.iter().map(|f| &f.id).find(|id| !seen.insert(*id))
}
