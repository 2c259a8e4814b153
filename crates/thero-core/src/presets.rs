//! Built-in style presets.
//!
//! A preset is a partial override of the token set. Applying one is a
//! shallow merge: fields named in the patch overwrite, the rest stay.

use serde::{Deserialize, Serialize};

use crate::color::{ColorRole, HexColor};
use crate::tokens::DesignTokenSet;

/// Partial token override. `None` / absent entries leave the token untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenPatch {
    pub colors: Vec<(ColorRole, HexColor)>,
    pub font_family_body: Option<String>,
    pub font_family_heading: Option<String>,
    pub base_font_size: Option<u32>,
    pub spacing_unit: Option<u32>,
    pub border_radius: Option<u32>,
}

impl TokenPatch {
    pub fn apply(&self, tokens: &mut DesignTokenSet) {
        for (role, color) in &self.colors {
            tokens.colors.set(*role, *color);
        }
        if let Some(body) = &self.font_family_body {
            tokens.font_family_body = body.clone();
        }
        if let Some(heading) = &self.font_family_heading {
            tokens.font_family_heading = heading.clone();
        }
        if let Some(size) = self.base_font_size {
            tokens.base_font_size = size;
        }
        if let Some(unit) = self.spacing_unit {
            tokens.spacing_unit = unit;
        }
        if let Some(radius) = self.border_radius {
            tokens.border_radius = radius;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    pub label: String,
    pub changes: TokenPatch,
}

/// The preset catalog, in display order.
pub fn builtin_presets() -> Vec<StylePreset> {
    vec![
        StylePreset {
            id: "modern-rounded".into(),
            label: "Modern rounded".into(),
            changes: TokenPatch {
                border_radius: Some(12),
                spacing_unit: Some(10),
                font_family_heading: Some("\"Inter\", system-ui, sans-serif".into()),
                ..Default::default()
            },
        },
        StylePreset {
            id: "minimal-sharp".into(),
            label: "Minimal sharp".into(),
            changes: TokenPatch {
                border_radius: Some(2),
                spacing_unit: Some(8),
                font_family_heading: Some("\"Roboto\", system-ui, sans-serif".into()),
                ..Default::default()
            },
        },
        StylePreset {
            id: "editorial-soft".into(),
            label: "Editorial soft".into(),
            changes: TokenPatch {
                border_radius: Some(16),
                spacing_unit: Some(12),
                font_family_heading: Some("\"Georgia\", \"Times New Roman\", serif".into()),
                ..Default::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_ids_are_unique() {
        let presets = builtin_presets();
        let mut ids: Vec<_> = presets.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), presets.len());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut tokens = DesignTokenSet::default();
        TokenPatch::default().apply(&mut tokens);
        assert_eq!(tokens, DesignTokenSet::default());
    }

    #[test]
    fn patch_colors_overwrite_named_roles_only() {
        let mut tokens = DesignTokenSet::default();
        let patch = TokenPatch {
            colors: vec![(ColorRole::Accent, HexColor::rgb(0, 0, 0))],
            ..Default::default()
        };
        patch.apply(&mut tokens);
        assert_eq!(tokens.colors.accent, HexColor::rgb(0, 0, 0));
        assert_eq!(tokens.colors.primary, DesignTokenSet::default().colors.primary);
    }
}
