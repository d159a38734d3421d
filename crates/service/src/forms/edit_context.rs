use std::collections::HashMap;
use std::fmt;

use models::errors::ModelError;

use super::css_class::{DefaultFieldCssClassProvider, FieldCssClassProvider};

/// Identifies one field of the model being edited.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldIdentifier {
    pub model: String,
    pub field_name: String,
}

impl FieldIdentifier {
    pub fn new(model: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self { model: model.into(), field_name: field_name.into() }
    }
}

#[derive(Debug, Default)]
struct FieldState {
    modified: bool,
    messages: Vec<String>,
}

/// Modification and validation state for a single form.
pub struct EditContext {
    model: String,
    fields: HashMap<FieldIdentifier, FieldState>,
    css_provider: Box<dyn FieldCssClassProvider>,
}

impl EditContext {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: HashMap::new(),
            css_provider: Box::new(DefaultFieldCssClassProvider),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Identifier for `field_name` on this context's model.
    pub fn field(&self, field_name: &str) -> FieldIdentifier {
        FieldIdentifier::new(self.model.clone(), field_name)
    }

    pub fn notify_field_changed(&mut self, field: &FieldIdentifier) {
        self.fields.entry(field.clone()).or_default().modified = true;
    }

    pub fn is_modified(&self, field: &FieldIdentifier) -> bool {
        self.fields.get(field).is_some_and(|s| s.modified)
    }

    pub fn is_any_modified(&self) -> bool {
        self.fields.values().any(|s| s.modified)
    }

    pub fn mark_as_unmodified(&mut self) {
        for state in self.fields.values_mut() {
            state.modified = false;
        }
    }

    pub fn add_validation_message(&mut self, field: &FieldIdentifier, message: impl Into<String>) {
        self.fields.entry(field.clone()).or_default().messages.push(message.into());
    }

    /// Record a model validation failure against `field`.
    pub fn add_model_error(&mut self, field: &FieldIdentifier, err: &ModelError) {
        match err {
            ModelError::Validation(msg) => self.add_validation_message(field, msg.clone()),
        }
    }

    pub fn clear_validation_messages(&mut self) {
        for state in self.fields.values_mut() {
            state.messages.clear();
        }
    }

    pub fn validation_messages(&self, field: &FieldIdentifier) -> &[String] {
        self.fields.get(field).map(|s| s.messages.as_slice()).unwrap_or(&[])
    }

    pub fn is_valid(&self, field: &FieldIdentifier) -> bool {
        self.validation_messages(field).is_empty()
    }

    pub fn set_field_css_class_provider(&mut self, provider: Box<dyn FieldCssClassProvider>) {
        self.css_provider = provider;
    }

    /// Class string for `field` from the installed provider.
    pub fn field_css_class(&self, field: &FieldIdentifier) -> String {
        self.css_provider.field_css_class(self, field)
    }
}

impl fmt::Debug for EditContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditContext")
            .field("model", &self.model)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
