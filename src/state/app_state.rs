//! Terminal editor state definitions

use super::field::Field;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Editor,
    Templates,
    Responses,
}

/// Which attribute a text prompt is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Label,
    Placeholder,
    HelpText,
    Options,
    MinLength,
    MaxLength,
    Pattern,
    TemplateName,
}

/// Prompt input that does not fit the attribute being edited
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a whole number")]
pub struct InvalidNumber(pub String);

impl EditTarget {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Label => "Label",
            Self::Placeholder => "Placeholder",
            Self::HelpText => "Help text",
            Self::Options => "Options (comma separated)",
            Self::MinLength => "Minimum length",
            Self::MaxLength => "Maximum length",
            Self::Pattern => "Pattern (regular expression)",
            Self::TemplateName => "Template name",
        }
    }

    /// Only text-like fields carry these attributes
    pub fn text_only(&self) -> bool {
        matches!(
            self,
            Self::Placeholder | Self::MinLength | Self::MaxLength | Self::Pattern
        )
    }

    /// Current value of this attribute on `field`
    pub fn read(&self, field: &Field) -> String {
        match self {
            Self::Label => field.label.clone(),
            Self::Placeholder => field.placeholder.clone().unwrap_or_default(),
            Self::HelpText => field.help_text.clone().unwrap_or_default(),
            Self::Options => field.options_csv(),
            Self::MinLength => field.min_length.map(|n| n.to_string()).unwrap_or_default(),
            Self::MaxLength => field.max_length.map(|n| n.to_string()).unwrap_or_default(),
            Self::Pattern => field.pattern.clone().unwrap_or_default(),
            Self::TemplateName => String::new(),
        }
    }

    /// Write `value` into this attribute of `field`. Empty input clears
    /// optional attributes; lengths must parse as whole numbers.
    pub fn apply(&self, field: &mut Field, value: &str) -> Result<(), InvalidNumber> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());
        let length = || -> Result<Option<u32>, InvalidNumber> {
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse()
                .map(Some)
                .map_err(|_| InvalidNumber(value.to_string()))
        };
        match self {
            Self::Label => field.label = value.to_string(),
            Self::Placeholder => field.placeholder = optional(),
            Self::HelpText => field.help_text = optional(),
            Self::Options => field.set_options_csv(value),
            Self::MinLength => field.min_length = length()?,
            Self::MaxLength => field.max_length = length()?,
            Self::Pattern => field.pattern = optional(),
            Self::TemplateName => {}
        }
        Ok(())
    }
}

/// A single-line text prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub target: EditTarget,
    pub buffer: String,
}

impl TextInput {
    pub fn new(target: EditTarget, initial: String) -> Self {
        Self {
            target,
            buffer: initial,
        }
    }

    /// Push a character to the buffer
    pub fn push_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character from the buffer
    pub fn pop_char(&mut self) {
        self.buffer.pop();
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Selected card within the current step
    pub selected_index: usize,
    /// Highlighted row in the template picker
    pub template_index: usize,
    /// Highlighted form in the responses view
    pub response_index: usize,
    pub input: Option<TextInput>,
    pub status_message: Option<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Keep the selection inside a list of `len` items
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }
}
