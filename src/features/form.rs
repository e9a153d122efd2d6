use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

use crate::ui::{node, FormField as UiFormField, TextInput as UiTextInput};

/// Field name satisfied by the signature surface instead of a text input.
pub const RESERVED_SIGNATURE_FIELD: &str = "signature";

/// One fillable field as reported by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Raw PDF field type (`/Tx`, `/Btn`, ...), when the service reports it.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Button,
    Choice,
    Signature,
    Unknown,
}

impl FieldKind {
    pub fn from_pdf_type(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("/Tx") => FieldKind::Text,
            Some("/Btn") => FieldKind::Button,
            Some("/Ch") => FieldKind::Choice,
            Some("/Sig") => FieldKind::Signature,
            _ => FieldKind::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Button => "button",
            FieldKind::Choice => "choice",
            FieldKind::Signature => "signature",
            FieldKind::Unknown => "unknown",
        }
    }

    /// Placeholder shown for kinds whose accepted values are not free text.
    pub fn input_hint(self) -> Option<&'static str> {
        match self {
            FieldKind::Button => Some("Checkbox state, e.g. /Yes or /Off"),
            FieldKind::Choice => Some("One of the field's options"),
            _ => None,
        }
    }
}

/// A rendered input: its name, its current value and the type hint it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
}

pub fn is_reserved_field(name: &str) -> bool {
    name.to_lowercase() == RESERVED_SIGNATURE_FIELD
}

/// Build the inputs for a descriptor list, in server order. The result
/// replaces whatever was rendered before.
pub fn build_form(fields: &[FieldDescriptor]) -> Vec<FormInput> {
    fields
        .iter()
        .filter(|f| !is_reserved_field(&f.name))
        .map(|f| FormInput {
            name: f.name.clone(),
            value: f.value.clone().unwrap_or_default(),
            kind: FieldKind::from_pdf_type(f.kind.as_deref()),
        })
        .collect()
}

/// Apply values typed by the user. Keys that do not name a rendered input are ignored.
pub fn apply_bindings(form: &mut [FormInput], bindings: &HashMap<String, String>) {
    for input in form.iter_mut() {
        if let Some(value) = bindings.get(&input.name) {
            input.value = value.clone();
        }
    }
}

pub fn collect_form_data(form: &[FormInput]) -> BTreeMap<String, String> {
    form.iter()
        .map(|input| (input.name.clone(), input.value.clone()))
        .collect()
}

pub fn render_form(form: &[FormInput]) -> Vec<Value> {
    form.iter()
        .map(|input| {
            let mut text_input = UiTextInput::new(&input.name)
                .text(&input.value)
                .single_line(true)
                .field_type(input.kind.as_str());
            if let Some(hint) = input.kind.input_hint() {
                text_input = text_input.hint(hint);
            }
            node(UiFormField::new(&input.name, text_input))
        })
        .collect()
}
