use serde::{Deserialize, Serialize};

/// A named typography style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTypeEntry {
    pub id: String,
    pub name: String,
    pub font_family: String,
    pub font_weight: u16,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_underline: bool,
    pub font_size: u32,
    pub is_custom: bool,
}

impl TextTypeEntry {
    /// A user-added entry with the default body face.
    pub fn custom(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            font_family: "Open Sans".into(),
            font_weight: 400,
            is_bold: false,
            is_italic: false,
            is_underline: false,
            font_size: 16,
            is_custom: true,
        }
    }

    fn builtin(id: &str, name: &str, family: &str, weight: u16, size: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            font_family: family.into(),
            font_weight: weight,
            is_bold: weight >= 700,
            is_italic: false,
            is_underline: false,
            font_size: size,
            is_custom: false,
        }
    }
}

/// Built-in entries, which can be edited but never removed.
pub fn builtin_text_types() -> Vec<TextTypeEntry> {
    vec![
        TextTypeEntry::builtin("title", "Title", "Inter", 700, 32),
        TextTypeEntry::builtin("subtitle", "Subtitle", "Inter", 600, 24),
        TextTypeEntry::builtin("paragraph", "Paragraph", "Open Sans", 400, 16),
    ]
}

/// Field-wise edit of a text type. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTypePatch {
    pub name: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<u16>,
    pub is_bold: Option<bool>,
    pub is_italic: Option<bool>,
    pub is_underline: Option<bool>,
    pub font_size: Option<u32>,
}

impl TextTypePatch {
    pub fn apply(&self, entry: &mut TextTypeEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(family) = &self.font_family {
            entry.font_family = family.clone();
        }
        if let Some(weight) = self.font_weight {
            entry.font_weight = weight;
        }
        if let Some(bold) = self.is_bold {
            entry.is_bold = bold;
        }
        if let Some(italic) = self.is_italic {
            entry.is_italic = italic;
        }
        if let Some(underline) = self.is_underline {
            entry.is_underline = underline;
        }
        if let Some(size) = self.font_size {
            entry.font_size = size;
        }
    }
}
