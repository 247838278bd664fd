//! Form templates

use crate::state::{Field, FieldType};
use serde::{Deserialize, Serialize};

const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

/// A named, reusable field list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Template {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Copy of the template's fields, each under a freshly minted id
    pub fn instantiate(&self) -> Vec<Field> {
        self.fields.iter().map(Field::with_fresh_id).collect()
    }
}

/// Templates shipped with the editor
pub fn predefined_templates() -> Vec<Template> {
    vec![
        Template::new(
            "Contact Us",
            vec![
                Field::new("name", FieldType::Text)
                    .with_label("Name")
                    .with_required(true)
                    .with_placeholder("Your name"),
                Field::new("email", FieldType::Text)
                    .with_label("Email")
                    .with_required(true)
                    .with_placeholder("you@example.com")
                    .with_pattern(EMAIL_PATTERN),
                Field::new("message", FieldType::Textarea)
                    .with_label("Message")
                    .with_required(true)
                    .with_placeholder("How can we help?"),
            ],
        ),
        Template::new(
            "Feedback",
            vec![
                Field::new("feedback", FieldType::Textarea)
                    .with_label("Feedback")
                    .with_required(true)
                    .with_placeholder("Your feedback"),
                Field::new("email", FieldType::Text)
                    .with_label("Email (optional)")
                    .with_placeholder("you@example.com")
                    .with_pattern(EMAIL_PATTERN),
            ],
        ),
    ]
}
