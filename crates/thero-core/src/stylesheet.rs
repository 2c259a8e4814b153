//! Token snapshot → CSS text.
//!
//! Output is a pure function of its inputs, byte for byte: the same
//! snapshot always renders the same stylesheet.

use std::fmt::Write;

use crate::color::ColorRole;
use crate::font_spec::stylesheet_url;
use crate::spacing::SpacingCategory;
use crate::storage::PersistedFonts;
use crate::tokens::DesignTokenSet;

pub const HEADER: &str = "/* Generated by Thero Studio */";

/// Fixed utility rules. Colors come from variables, except white ink on
/// colored fills.
const UTILITY_RULES: &str = "\
body {
  font-family: var(--font-body);
  font-size: var(--base-font-size);
  color: var(--text-color);
  background-color: var(--background-color);
}

.btn-primary {
  background-color: var(--primary-color);
  color: #ffffff;
  border-radius: var(--border-radius);
  padding: calc(var(--spacing-unit) * 0.75) calc(var(--spacing-unit) * 1.5);
}

.card {
  background-color: var(--surface-color);
  border-radius: var(--border-radius);
  padding: calc(var(--spacing-unit) * 2);
  box-shadow: 0 1px 3px color-mix(in srgb, var(--text-color) 10%, transparent);
}

.badge-accent {
  background-color: var(--accent-color);
  color: #ffffff;
  border-radius: 999px;
  padding: 0.25rem 0.75rem;
}

.text-success {
  color: var(--success-color);
}

.text-error {
  color: var(--error-color);
}

.text-warning {
  color: var(--warning-color);
}
";

/// Render the stylesheet using `stylesheet_base` for `@import` URLs.
pub fn generate_stylesheet(
    tokens: &DesignTokenSet,
    spacing: &[SpacingCategory],
    fonts: &PersistedFonts,
    stylesheet_base: &str,
) -> String {
    let mut css = String::new();
    css.push_str(HEADER);
    css.push('\n');

    if let Some(body) = &fonts.body {
        let _ = writeln!(css, "@import url('{}');", stylesheet_url(stylesheet_base, body));
    }
    if let Some(heading) = &fonts.heading {
        if fonts.body.as_ref() != Some(heading) {
            let _ = writeln!(css, "@import url('{}');", stylesheet_url(stylesheet_base, heading));
        }
    }

    css.push_str(":root {\n");
    for &role in ColorRole::ALL {
        let _ = writeln!(css, "  --{}: {};", role.css_var(), tokens.colors.get(role));
    }
    let _ = writeln!(css, "  --font-body: {};", tokens.font_family_body);
    let _ = writeln!(css, "  --font-heading: {};", tokens.font_family_heading);
    let _ = writeln!(css, "  --base-font-size: {}px;", tokens.base_font_size);
    let _ = writeln!(css, "  --spacing-unit: {}px;", tokens.spacing_unit);
    let _ = writeln!(css, "  --border-radius: {}px;", tokens.border_radius);
    for category in spacing {
        for variable in &category.variables {
            let _ = writeln!(css, "  --{}-{}: {}px;", category.id, variable.id, variable.value);
        }
    }
    css.push_str("}\n\n");

    css.push_str(UTILITY_RULES);
    css
}
