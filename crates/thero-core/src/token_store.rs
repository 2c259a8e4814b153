//! Canonical, mutable design-token session state.
//!
//! All mutations go through [`TokenStore`]. Lookups by id are lenient: an
//! unknown preset, text type, or spacing category leaves the store
//! untouched and the call returns `false`.

use chrono::Utc;
use rand::Rng;

use crate::color::{ColorRole, HexColor};
use crate::palette::{self, LockSet};
use crate::presets::{builtin_presets, StylePreset};
use crate::spacing::{
    builtin_spacing_categories, SpacingCategory, SpacingVariable, DEFAULT_SPACING_VALUE,
};
use crate::tokens::{DesignTokenSet, ModeQuartet};
use crate::typography::{builtin_text_types, TextTypeEntry, TextTypePatch};

#[derive(Debug, Clone)]
pub struct TokenStore {
    tokens: DesignTokenSet,
    locks: LockSet,
    dark: bool,
    presets: Vec<StylePreset>,
    current_preset: Option<String>,
    text_types: Vec<TextTypeEntry>,
    selected_text_type: Option<String>,
    spacing: Vec<SpacingCategory>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore {
    pub fn new() -> Self {
        let text_types = builtin_text_types();
        let selected_text_type = text_types.first().map(|t| t.id.clone());
        let presets = builtin_presets();
        Self {
            tokens: DesignTokenSet::default(),
            locks: LockSet::default(),
            dark: false,
            current_preset: presets.first().map(|p| p.id.clone()),
            presets,
            text_types,
            selected_text_type,
            spacing: builtin_spacing_categories(),
        }
    }

    // ── Snapshots ───────────────────────────────────────────────

    pub fn tokens(&self) -> &DesignTokenSet {
        &self.tokens
    }

    pub fn snapshot(&self) -> DesignTokenSet {
        self.tokens.clone()
    }

    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    pub fn is_locked(&self, role: ColorRole) -> bool {
        self.locks.is_locked(role)
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn presets(&self) -> &[StylePreset] {
        &self.presets
    }

    /// Last preset id requested, known or not.
    pub fn current_preset(&self) -> Option<&str> {
        self.current_preset.as_deref()
    }

    pub fn text_types(&self) -> &[TextTypeEntry] {
        &self.text_types
    }

    pub fn selected_text_type(&self) -> Option<&TextTypeEntry> {
        let id = self.selected_text_type.as_deref()?;
        self.text_types.iter().find(|t| t.id == id)
    }

    pub fn spacing_categories(&self) -> &[SpacingCategory] {
        &self.spacing
    }

    // ── Presets & colors ────────────────────────────────────────

    /// Shallow-merge a preset's changes into the token set.
    pub fn apply_preset(&mut self, id: &str) -> bool {
        self.current_preset = Some(id.to_string());
        let Some(preset) = self.presets.iter().find(|p| p.id == id) else {
            tracing::debug!(preset = id, "unknown preset, ignoring");
            return false;
        };
        preset.changes.apply(&mut self.tokens);
        true
    }

    pub fn set_color(&mut self, role: ColorRole, color: HexColor) {
        self.tokens.colors.set(role, color);
    }

    /// String-keyed form of [`set_color`](Self::set_color). Unknown roles and
    /// malformed colors are ignored.
    pub fn set_color_by_id(&mut self, role: &str, hex: &str) -> bool {
        let Some(role) = ColorRole::from_id(role) else {
            tracing::debug!(role, "unknown color role, ignoring");
            return false;
        };
        match hex.parse() {
            Ok(color) => {
                self.set_color(role, color);
                true
            }
            Err(e) => {
                tracing::debug!(%role, "ignoring color: {e}");
                false
            }
        }
    }

    /// Flip a role's lock, returning the new state.
    pub fn toggle_lock(&mut self, role: ColorRole) -> bool {
        self.locks.toggle(role)
    }

    /// Switch light/dark. Overwrites the neutral quartet regardless of locks.
    pub fn set_mode(&mut self, dark: bool) {
        self.dark = dark;
        ModeQuartet::for_mode(dark).apply(&mut self.tokens.colors);
    }

    /// Re-sample every unlocked role for the current mode.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<ColorRole> {
        palette::randomize(&mut self.tokens.colors, &self.locks, self.dark, rng)
    }

    // ── Typography & dimensions ─────────────────────────────────

    pub fn set_font_family_body(&mut self, stack: impl Into<String>) {
        self.tokens.font_family_body = stack.into();
    }

    pub fn set_font_family_heading(&mut self, stack: impl Into<String>) {
        self.tokens.font_family_heading = stack.into();
    }

    pub fn set_base_font_size(&mut self, px: u32) {
        self.tokens.base_font_size = px;
    }

    pub fn set_spacing_unit(&mut self, px: u32) {
        self.tokens.spacing_unit = px;
    }

    pub fn set_border_radius(&mut self, px: u32) {
        self.tokens.border_radius = px;
    }

    // ── Text types ──────────────────────────────────────────────

    /// Append a custom text type and select it. Returns the new id.
    pub fn add_text_type(&mut self, name: &str) -> String {
        let id = unique_id("custom", |candidate| {
            self.text_types.iter().any(|t| t.id == candidate)
        });
        self.text_types.push(TextTypeEntry::custom(id.clone(), name));
        self.selected_text_type = Some(id.clone());
        id
    }

    /// Remove a custom text type. Built-ins and unknown ids are ignored.
    pub fn remove_text_type(&mut self, id: &str) -> bool {
        let Some(index) = self
            .text_types
            .iter()
            .position(|t| t.id == id && t.is_custom)
        else {
            tracing::debug!(id, "text type missing or built-in, not removing");
            return false;
        };
        self.text_types.remove(index);
        if self.selected_text_type.as_deref() == Some(id) {
            self.selected_text_type = self.text_types.first().map(|t| t.id.clone());
        }
        true
    }

    pub fn select_text_type(&mut self, id: &str) -> bool {
        if self.text_types.iter().any(|t| t.id == id) {
            self.selected_text_type = Some(id.to_string());
            true
        } else {
            tracing::debug!(id, "unknown text type, selection unchanged");
            false
        }
    }

    pub fn update_text_type(&mut self, id: &str, patch: &TextTypePatch) -> bool {
        match self.text_types.iter_mut().find(|t| t.id == id) {
            Some(entry) => {
                patch.apply(entry);
                true
            }
            None => {
                tracing::debug!(id, "unknown text type, ignoring update");
                false
            }
        }
    }

    // ── Spacing ─────────────────────────────────────────────────

    pub fn toggle_category(&mut self, category_id: &str) -> bool {
        match self.category_mut(category_id) {
            Some(category) => {
                category.expanded = !category.expanded;
                true
            }
            None => false,
        }
    }

    /// Append a variable to a category. Returns its id, or `None` when the
    /// category does not exist.
    pub fn add_spacing_variable(&mut self, category_id: &str, name: &str) -> Option<String> {
        let category = self.category_mut(category_id)?;
        let id = unique_id("spacing", |candidate| {
            category.variables.iter().any(|v| v.id == candidate)
        });
        category.variables.push(SpacingVariable {
            id: id.clone(),
            name: name.to_string(),
            value: DEFAULT_SPACING_VALUE,
        });
        Some(id)
    }

    pub fn remove_spacing_variable(&mut self, category_id: &str, variable_id: &str) -> bool {
        let Some(category) = self.category_mut(category_id) else {
            return false;
        };
        let before = category.variables.len();
        category.variables.retain(|v| v.id != variable_id);
        before != category.variables.len()
    }

    pub fn set_spacing_value(&mut self, category_id: &str, variable_id: &str, px: u32) -> bool {
        match self
            .category_mut(category_id)
            .and_then(|c| c.variable_mut(variable_id))
        {
            Some(variable) => {
                variable.value = px;
                true
            }
            None => false,
        }
    }

    fn category_mut(&mut self, id: &str) -> Option<&mut SpacingCategory> {
        let found = self.spacing.iter_mut().find(|c| c.id == id);
        if found.is_none() {
            tracing::debug!(category = id, "unknown spacing category, ignoring");
        }
        found
    }
}

/// `<prefix>-<millis>`, bumped until `taken` rejects no candidate.
fn unique_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let candidate = format!("{prefix}-{stamp}");
        if !taken(&candidate) {
            return candidate;
        }
        stamp += 1;
    }
}
