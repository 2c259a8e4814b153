use serde::{Deserialize, Serialize};

use crate::color::{ColorRole, HexColor};

pub const DEFAULT_BODY_STACK: &str =
    "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif";
pub const DEFAULT_HEADING_STACK: &str = "\"Georgia\", \"Times New Roman\", serif";

/// One value per color role. Roles are fields, so none can go missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: HexColor,
    pub secondary: HexColor,
    pub accent: HexColor,
    pub success: HexColor,
    pub error: HexColor,
    pub warning: HexColor,
    pub background: HexColor,
    pub surface: HexColor,
    pub text: HexColor,
    pub muted_text: HexColor,
}

impl Palette {
    pub fn get(&self, role: ColorRole) -> HexColor {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Success => self.success,
            ColorRole::Error => self.error,
            ColorRole::Warning => self.warning,
            ColorRole::Background => self.background,
            ColorRole::Surface => self.surface,
            ColorRole::Text => self.text,
            ColorRole::MutedText => self.muted_text,
        }
    }

    pub fn set(&mut self, role: ColorRole, color: HexColor) {
        let slot = match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Accent => &mut self.accent,
            ColorRole::Success => &mut self.success,
            ColorRole::Error => &mut self.error,
            ColorRole::Warning => &mut self.warning,
            ColorRole::Background => &mut self.background,
            ColorRole::Surface => &mut self.surface,
            ColorRole::Text => &mut self.text,
            ColorRole::MutedText => &mut self.muted_text,
        };
        *slot = color;
    }
}

/// Canonical design-token state: colors, font stacks and dimensions (px).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokenSet {
    pub colors: Palette,
    pub font_family_body: String,
    pub font_family_heading: String,
    pub base_font_size: u32,
    pub spacing_unit: u32,
    pub border_radius: u32,
}

impl Default for DesignTokenSet {
    fn default() -> Self {
        Self {
            colors: Palette {
                primary: HexColor::rgb(0x4f, 0x46, 0xe5),
                secondary: HexColor::rgb(0xec, 0x48, 0x99),
                accent: HexColor::rgb(0xf5, 0x9e, 0x0b),
                success: HexColor::rgb(0x22, 0xc5, 0x5e),
                error: HexColor::rgb(0xef, 0x44, 0x44),
                warning: HexColor::rgb(0xea, 0xb3, 0x08),
                background: LIGHT_QUARTET.background,
                surface: LIGHT_QUARTET.surface,
                text: LIGHT_QUARTET.text,
                muted_text: LIGHT_QUARTET.muted_text,
            },
            font_family_body: DEFAULT_BODY_STACK.to_string(),
            font_family_heading: DEFAULT_HEADING_STACK.to_string(),
            base_font_size: 16,
            spacing_unit: 8,
            border_radius: 8,
        }
    }
}

/// The four mode-dependent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeQuartet {
    pub background: HexColor,
    pub surface: HexColor,
    pub text: HexColor,
    pub muted_text: HexColor,
}

pub const LIGHT_QUARTET: ModeQuartet = ModeQuartet {
    background: HexColor::rgb(0xf9, 0xfa, 0xfb),
    surface: HexColor::rgb(0xff, 0xff, 0xff),
    text: HexColor::rgb(0x11, 0x18, 0x27),
    muted_text: HexColor::rgb(0x6b, 0x72, 0x80),
};

pub const DARK_QUARTET: ModeQuartet = ModeQuartet {
    background: HexColor::rgb(0x0f, 0x17, 0x2a),
    surface: HexColor::rgb(0x1e, 0x29, 0x3b),
    text: HexColor::rgb(0xf9, 0xfa, 0xfb),
    muted_text: HexColor::rgb(0x9c, 0xa3, 0xaf),
};

impl ModeQuartet {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            DARK_QUARTET
        } else {
            LIGHT_QUARTET
        }
    }

    /// Overwrite the mode roles of `palette`.
    pub fn apply(&self, palette: &mut Palette) {
        palette.background = self.background;
        palette.surface = self.surface;
        palette.text = self.text;
        palette.muted_text = self.muted_text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_get_set_covers_every_role() {
        let mut palette = DesignTokenSet::default().colors;
        let marker = HexColor::rgb(1, 2, 3);
        for role in ColorRole::ALL {
            assert_ne!(palette.get(*role), marker);
            palette.set(*role, marker);
            assert_eq!(palette.get(*role), marker);
        }
    }

    #[test]
    fn default_palette_is_light() {
        let palette = DesignTokenSet::default().colors;
        assert_eq!(palette.background.to_string(), "#f9fafb");
        assert_eq!(palette.surface.to_string(), "#ffffff");
        assert_eq!(palette.text.to_string(), "#111827");
        assert_eq!(palette.muted_text.to_string(), "#6b7280");
    }

    #[test]
    fn serializes_with_camel_case_role_keys() {
        let json = serde_json::to_value(DesignTokenSet::default()).unwrap();
        assert_eq!(json["colors"]["mutedText"], "#6b7280");
        assert_eq!(json["borderRadius"], 8);
    }
}
