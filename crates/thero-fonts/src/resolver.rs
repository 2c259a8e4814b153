//! Resolves font specs to stylesheet references and applies them to the
//! token state.
//!
//! Only body and heading resolutions are persisted. Preview fonts are
//! registered under their own keys and never touch tokens or the store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use thero_core::font_spec::{
    body_stack, family_name, family_spec, heading_stack, sanitize_family_id, stylesheet_url,
};
use thero_core::storage::{
    get_or_default, remove_or_warn, set_or_warn, KeyValueStore, PersistedFonts, KEY_CREDENTIAL,
    KEY_FONT_BODY, KEY_FONT_HEADING,
};
use thero_core::typography::TextTypePatch;
use thero_core::TokenStore;

use crate::catalog::{FontCatalog, FontCatalogEntry};
use crate::registry::StylesheetRegistry;
use crate::search::{FontSearch, SearchDebouncer, SearchResults};

/// What a resolved font is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontTarget {
    Body,
    Heading,
    /// A text type entry, by id.
    TextType(String),
}

impl FontTarget {
    /// Registration key for this target.
    pub fn key(&self) -> String {
        match self {
            Self::Body => "thero-font-body".into(),
            Self::Heading => "thero-font-heading".into(),
            Self::TextType(id) => format!("thero-font-text-{id}"),
        }
    }
}

/// Outcome of [`FontResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub family: String,
    pub url: String,
    /// False when the key already pointed at this URL.
    pub registered: bool,
}

pub struct FontResolver<C, R> {
    search: Arc<FontSearch<C>>,
    debouncer: SearchDebouncer<C>,
    registry: R,
    store: Arc<dyn KeyValueStore>,
    stylesheet_base: String,
    registered: HashMap<String, String>,
    selected_variants: BTreeMap<String, Vec<String>>,
}

impl<C: FontCatalog, R: StylesheetRegistry> FontResolver<C, R> {
    /// Build a resolver, loading the persisted credential.
    pub fn new(
        catalog: C,
        registry: R,
        store: Arc<dyn KeyValueStore>,
        stylesheet_base: impl Into<String>,
        debounce: Duration,
    ) -> Self {
        let credential = get_or_default(store.as_ref(), KEY_CREDENTIAL);
        let search = Arc::new(FontSearch::new(catalog, credential));
        Self {
            debouncer: SearchDebouncer::new(Arc::clone(&search), debounce),
            search,
            registry,
            store,
            stylesheet_base: stylesheet_base.into(),
            registered: HashMap::new(),
            selected_variants: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    // ── Credential ──────────────────────────────────────────────

    pub fn credential(&self) -> Option<String> {
        self.search.credential()
    }

    /// Set or clear the catalog credential and persist the change.
    pub fn set_credential(&mut self, credential: Option<&str>) {
        self.search.set_credential(credential);
        match self.search.credential() {
            Some(key) => set_or_warn(self.store.as_ref(), KEY_CREDENTIAL, &key),
            None => remove_or_warn(self.store.as_ref(), KEY_CREDENTIAL),
        }
    }

    // ── Search ──────────────────────────────────────────────────

    pub async fn search(&self, term: &str) -> Vec<FontCatalogEntry> {
        self.search.search(term).await
    }

    /// Debounced search; see [`SearchDebouncer::submit`].
    pub fn debounced_search(&mut self, term: &str) -> u64 {
        self.debouncer.submit(term)
    }

    pub fn cancel_search(&mut self) {
        self.debouncer.cancel();
    }

    pub fn search_results(&self) -> watch::Receiver<SearchResults> {
        self.debouncer.subscribe()
    }

    // ── Variants ────────────────────────────────────────────────

    /// Check or uncheck a variant for a family. Order of first check is kept.
    pub fn toggle_variant(&mut self, family: &str, variant: &str, checked: bool) {
        let selected = self.selected_variants.entry(family.to_string()).or_default();
        if checked {
            if !selected.iter().any(|v| v == variant) {
                selected.push(variant.to_string());
            }
        } else {
            selected.retain(|v| v != variant);
        }
    }

    pub fn selected_variants(&self, family: &str) -> &[String] {
        self.selected_variants
            .get(family)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `"Family"` or `"Family:wght@…"` from the selected variants.
    pub fn family_spec(&self, family: &str) -> String {
        family_spec(family, self.selected_variants(family))
    }

    // ── Resolution ──────────────────────────────────────────────

    /// Register the stylesheet for `spec` under `target` and apply the
    /// family to the tokens. Blank specs are ignored.
    pub fn resolve(
        &mut self,
        tokens: &mut TokenStore,
        spec: &str,
        target: FontTarget,
    ) -> Option<Resolution> {
        let spec = spec.trim();
        let family = family_name(spec);
        if family.is_empty() {
            tracing::debug!("ignoring blank font spec");
            return None;
        }
        if let FontTarget::TextType(id) = &target {
            if !tokens.text_types().iter().any(|t| &t.id == id) {
                tracing::debug!(id = %id, "unknown text type, not resolving font");
                return None;
            }
        }

        let url = stylesheet_url(&self.stylesheet_base, spec);
        let registered = self.register(&target.key(), &url);

        match &target {
            FontTarget::Body => {
                tokens.set_font_family_body(body_stack(spec));
                set_or_warn(self.store.as_ref(), KEY_FONT_BODY, spec);
            }
            FontTarget::Heading => {
                tokens.set_font_family_heading(heading_stack(spec));
                set_or_warn(self.store.as_ref(), KEY_FONT_HEADING, spec);
            }
            FontTarget::TextType(id) => {
                let patch = TextTypePatch {
                    font_family: Some(family.to_string()),
                    ..Default::default()
                };
                tokens.update_text_type(id, &patch);
            }
        }

        tracing::debug!(family, key = %target.key(), registered, "resolved font");
        Some(Resolution {
            family: family.to_string(),
            url,
            registered,
        })
    }

    /// Resolve a search result using its selected variants.
    pub fn select_from_search(
        &mut self,
        tokens: &mut TokenStore,
        family: &str,
        target: FontTarget,
    ) -> Option<Resolution> {
        let spec = self.family_spec(family);
        self.resolve(tokens, &spec, target)
    }

    /// Re-apply the persisted body/heading fonts at session start.
    pub fn restore(&mut self, tokens: &mut TokenStore) -> PersistedFonts {
        let fonts = PersistedFonts::load(self.store.as_ref());
        if let Some(body) = &fonts.body {
            self.resolve(tokens, body, FontTarget::Body);
        }
        if let Some(heading) = &fonts.heading {
            self.resolve(tokens, heading, FontTarget::Heading);
        }
        fonts
    }

    // ── Previews ────────────────────────────────────────────────

    /// Temporarily load a family, e.g. while hovering a search result.
    pub fn preview_font<S: AsRef<str>>(&mut self, family: &str, variants: &[S]) {
        let family = family.trim();
        if family.is_empty() {
            return;
        }
        let key = preview_key(family);
        if self.registered.contains_key(&key) {
            return;
        }
        let url = stylesheet_url(&self.stylesheet_base, &family_spec(family, variants));
        self.register(&key, &url);
    }

    pub fn remove_preview_font(&mut self, family: &str) {
        let key = preview_key(family.trim());
        if self.registered.remove(&key).is_some() {
            self.registry.unregister(&key);
        }
    }

    /// Returns true when the registry was written.
    fn register(&mut self, key: &str, url: &str) -> bool {
        if self.registered.get(key).map(String::as_str) == Some(url) {
            return false;
        }
        self.registry.register(key, url);
        self.registered.insert(key.to_string(), url.to_string());
        true
    }
}

fn preview_key(family: &str) -> String {
    format!("thero-preview-{}", sanitize_family_id(family))
}
