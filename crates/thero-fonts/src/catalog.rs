//! Font catalog sources: the remote webfonts endpoint and the bundled
//! fallback list used when no credential is configured or the remote
//! catalog cannot be reached.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::FontError;

/// Popular families searchable without a credential.
pub const FALLBACK_FONTS: &[&str] = &[
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Source Sans Pro",
    "Poppins",
    "Nunito",
    "Merriweather",
    "Playfair Display",
    "Oswald",
    "Raleway",
    "PT Sans",
    "Bebas Neue",
    "Roboto Slab",
    "Cormorant Garamond",
    "Dancing Script",
    "Inconsolata",
    "Fira Sans",
    "Quicksand",
    "Nunito Sans",
    "Work Sans",
    "Inter",
    "Josefin Sans",
    "Anton",
    "Cabin",
    "Arimo",
];

/// Variants reported for bundled entries, which carry no metadata.
pub const FALLBACK_VARIANTS: &[&str] = &["regular", "700"];

/// A searchable font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontCatalogEntry {
    pub family: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub variants: Vec<String>,
}

impl FontCatalogEntry {
    fn bundled(family: &str) -> Self {
        Self {
            family: family.to_string(),
            category: None,
            variants: FALLBACK_VARIANTS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Bundled entries whose family contains `query` (already lowercased).
pub fn fallback_matches(query: &str) -> Vec<FontCatalogEntry> {
    FALLBACK_FONTS
        .iter()
        .filter(|family| family.to_lowercase().contains(query))
        .map(|family| FontCatalogEntry::bundled(family))
        .collect()
}

/// A remote source of the full font catalog.
pub trait FontCatalog: Send + Sync + 'static {
    /// Fetch every family the service knows about.
    fn fetch_catalog(
        &self,
        credential: &str,
    ) -> impl Future<Output = Result<Vec<FontCatalogEntry>, FontError>> + Send;
}

#[derive(Debug, Deserialize)]
struct WebfontsResponse {
    #[serde(default)]
    items: Vec<FontCatalogEntry>,
}

/// Google Fonts developer API client.
pub struct GoogleFontsClient {
    catalog_url: String,
    http: Client,
}

impl GoogleFontsClient {
    pub fn new(catalog_url: impl Into<String>, timeout: Duration) -> Result<Self, FontError> {
        Ok(Self {
            catalog_url: catalog_url.into(),
            http: Client::builder().timeout(timeout).build()?,
        })
    }

    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, FontError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(FontError::Api {
                status,
                message: body,
            })
        }
    }
}

impl FontCatalog for GoogleFontsClient {
    async fn fetch_catalog(&self, credential: &str) -> Result<Vec<FontCatalogEntry>, FontError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(FontError::MissingCredential);
        }

        let resp = self
            .http
            .get(&self.catalog_url)
            .query(&[("key", credential), ("sort", "popularity")])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: WebfontsResponse = resp
            .json()
            .await
            .map_err(|e| FontError::Parse(e.to_string()))?;

        tracing::info!(families = body.items.len(), "loaded remote font catalog");
        Ok(body.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families(entries: &[FontCatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.family.as_str()).collect()
    }

    #[test]
    fn fallback_list_size() {
        assert_eq!(FALLBACK_FONTS.len(), 26);
    }

    #[test]
    fn fallback_ro_matches() {
        let matches = fallback_matches("ro");
        let names = families(&matches);
        assert_eq!(names, vec!["Roboto", "Source Sans Pro", "Roboto Slab"]);
        assert!(!names.contains(&"Lato"));
        for entry in &matches {
            assert_eq!(entry.variants, vec!["regular", "700"]);
            assert_eq!(entry.category, None);
        }
    }

    #[test]
    fn webfonts_response_parses() {
        let json = r#"{
            "kind": "webfonts#webfontList",
            "items": [
                {"family": "ABeeZee", "category": "sans-serif", "variants": ["regular", "italic"], "files": {}},
                {"family": "Abel"}
            ]
        }"#;
        let parsed: WebfontsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].category.as_deref(), Some("sans-serif"));
        assert!(parsed.items[1].variants.is_empty());
    }

    #[test]
    fn empty_response_has_no_items() {
        let parsed: WebfontsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }

    #[tokio::test]
    async fn blank_credential_is_rejected_without_network() {
        let client =
            GoogleFontsClient::new("http://127.0.0.1:9/unused", Duration::from_millis(50)).unwrap();
        let err = client.fetch_catalog("   ").await.unwrap_err();
        assert!(matches!(err, FontError::MissingCredential));
    }
}
