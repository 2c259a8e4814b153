//! Font family specs and stylesheet URLs.
//!
//! A spec is either a bare family (`"Roboto Slab"`) or a family with an
//! axis list (`"Roboto Slab:wght@400;700"`), the form the stylesheet
//! delivery service accepts.

use url::form_urlencoded;

/// Stylesheet endpoint used when no config override is given.
pub const DEFAULT_STYLESHEET_URL: &str = "https://fonts.googleapis.com/css2";

/// Body stack suffix appended after a resolved family.
const BODY_FALLBACKS: &str = "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif";
const HEADING_FALLBACKS: &str = "\"Times New Roman\", serif";

/// The family name of a spec: everything before the first `:`, trimmed.
pub fn family_name(spec: &str) -> &str {
    spec.split(':').next().unwrap_or(spec).trim()
}

/// Map a catalog variant label to a numeric weight.
///
/// `regular` is 400; otherwise the first run of digits (`700italic` is 700).
/// Labels without digits (`italic`) carry no weight.
pub fn variant_weight(variant: &str) -> Option<String> {
    if variant == "regular" {
        return Some("400".into());
    }
    let digits: String = variant
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    (!digits.is_empty()).then_some(digits)
}

/// Build `"Family"` or `"Family:wght@w1;w2"` from selected variants.
pub fn family_spec<S: AsRef<str>>(family: &str, variants: &[S]) -> String {
    let mut weights: Vec<String> = Vec::new();
    for weight in variants.iter().filter_map(|v| variant_weight(v.as_ref())) {
        if !weights.contains(&weight) {
            weights.push(weight);
        }
    }
    if weights.is_empty() {
        family.to_string()
    } else {
        format!("{family}:wght@{}", weights.join(";"))
    }
}

/// Stylesheet URL for a spec on the given delivery endpoint.
///
/// Runs of whitespace collapse to a single space before encoding, and the
/// spec is form-encoded so spaces become `+`.
pub fn stylesheet_url(base: &str, spec: &str) -> String {
    let collapsed = spec.split_whitespace().collect::<Vec<_>>().join(" ");
    let family: String = form_urlencoded::byte_serialize(collapsed.as_bytes()).collect();
    format!("{base}?family={family}&display=swap")
}

/// Font stack written to the body token after resolving `spec`.
pub fn body_stack(spec: &str) -> String {
    format!("\"{}\", {BODY_FALLBACKS}", family_name(spec))
}

/// Font stack written to the heading token after resolving `spec`.
pub fn heading_stack(spec: &str) -> String {
    format!("\"{}\", {HEADING_FALLBACKS}", family_name(spec))
}

/// Registration key fragment for a family: lowercase, whitespace as `-`.
pub fn sanitize_family_id(family: &str) -> String {
    family
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_name_strips_axes() {
        assert_eq!(family_name("Roboto Slab:wght@400;700"), "Roboto Slab");
        assert_eq!(family_name("Inter"), "Inter");
    }

    #[test]
    fn variant_weights() {
        assert_eq!(variant_weight("regular").as_deref(), Some("400"));
        assert_eq!(variant_weight("700").as_deref(), Some("700"));
        assert_eq!(variant_weight("300italic").as_deref(), Some("300"));
        assert_eq!(variant_weight("italic"), None);
    }

    #[test]
    fn spec_from_variants_dedupes_weights() {
        assert_eq!(family_spec("Lato", &["regular", "700", "700italic"]), "Lato:wght@400;700");
        assert_eq!(family_spec::<&str>("Lato", &[]), "Lato");
        assert_eq!(family_spec("Lato", &["italic"]), "Lato");
    }

    #[test]
    fn url_encodes_spec() {
        assert_eq!(
            stylesheet_url(DEFAULT_STYLESHEET_URL, "Roboto  Slab:wght@400;700"),
            "https://fonts.googleapis.com/css2?family=Roboto+Slab%3Awght%40400%3B700&display=swap"
        );
    }

    #[test]
    fn stacks_quote_family() {
        assert_eq!(heading_stack("Inter:wght@700"), "\"Inter\", \"Times New Roman\", serif");
        assert!(body_stack("Lato").starts_with("\"Lato\", system-ui"));
    }

    #[test]
    fn sanitized_ids() {
        assert_eq!(sanitize_family_id("Playfair  Display"), "playfair-display");
    }
}
