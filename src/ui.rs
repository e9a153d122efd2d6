use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct Text<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Text<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            kind: "Text",
            text,
            size: None,
            content_description: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

#[derive(Serialize)]
pub struct Button<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    pub action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_file_picker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> Button<'a> {
    pub fn new(text: &'a str, action: &'a str) -> Self {
        Self {
            kind: "Button",
            text,
            action,
            id: None,
            requires_file_picker: None,
            accept: None,
            enabled: None,
            content_description: None,
        }
    }

    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn requires_file_picker(mut self, needs: bool) -> Self {
        self.requires_file_picker = Some(needs);
        self
    }

    /// Picker filter hint (MIME type or extension list). Hosts may ignore it.
    pub fn accept(mut self, accept: &'a str) -> Self {
        self.accept = Some(accept);
        self
    }

    /// Only emitted when disabled; an absent flag means enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = if enabled { None } else { Some(false) };
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

#[derive(Serialize)]
pub struct Column {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    pub children: Vec<Value>,
}

impl Column {
    pub fn new(children: Vec<Value>) -> Self {
        Self {
            kind: "Column",
            padding: None,
            children,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }
}

#[derive(Serialize)]
pub struct Section<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub children: Vec<Value>,
}

impl<'a> Section<'a> {
    pub fn new(id: &'a str, children: Vec<Value>) -> Self {
        Self {
            kind: "Section",
            id,
            title: None,
            children,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

#[derive(Serialize)]
pub struct TextInput<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub bind_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<&'a str>,
}

impl<'a> TextInput<'a> {
    pub fn new(bind_key: &'a str) -> Self {
        Self {
            kind: "TextInput",
            bind_key,
            text: None,
            hint: None,
            single_line: None,
            field_type: None,
        }
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn single_line(mut self, single: bool) -> Self {
        self.single_line = Some(single);
        self
    }

    pub fn field_type(mut self, field_type: &'a str) -> Self {
        self.field_type = Some(field_type);
        self
    }
}

/// A label paired with the input it names.
#[derive(Serialize)]
pub struct FormField<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'a str,
    pub label_for: &'a str,
    pub input: TextInput<'a>,
}

impl<'a> FormField<'a> {
    pub fn new(label: &'a str, input: TextInput<'a>) -> Self {
        Self {
            kind: "FormField",
            label,
            label_for: input.bind_key,
            input,
        }
    }
}

#[derive(Serialize)]
pub struct SignaturePad<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub stroke_action: &'a str,
    pub width: u32,
    pub height: u32,
    pub pen_width: f32,
    pub background: &'static str,
    pub stroke_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<&'a str>,
}

impl<'a> SignaturePad<'a> {
    pub fn new(stroke_action: &'a str, width: u32, height: u32) -> Self {
        Self {
            kind: "SignaturePad",
            stroke_action,
            width,
            height,
            pen_width: 1.0,
            background: "#ffffff",
            stroke_count: 0,
            content_description: None,
        }
    }

    pub fn pen_width(mut self, pen_width: f32) -> Self {
        self.pen_width = pen_width;
        self
    }

    pub fn stroke_count(mut self, count: usize) -> Self {
        self.stroke_count = count;
        self
    }

    pub fn content_description(mut self, cd: &'a str) -> Self {
        self.content_description = Some(cd);
        self
    }
}

#[derive(Serialize)]
pub struct DownloadLink<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
    pub path: &'a str,
    pub mime_type: &'static str,
    pub size_bytes: u64,
}

impl<'a> DownloadLink<'a> {
    pub fn new(text: &'a str, path: &'a str, size_bytes: u64) -> Self {
        Self {
            kind: "DownloadLink",
            text,
            path,
            mime_type: "application/pdf",
            size_bytes,
        }
    }
}

/// Serialize a builder into a tree node. Builders only hold strings and
/// numbers, so this cannot fail in practice; a failure degrades to `null`.
pub fn node<T: Serialize>(builder: T) -> Value {
    serde_json::to_value(builder).unwrap_or(Value::Null)
}
