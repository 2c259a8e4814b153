//! Font search over the remote catalog with a bundled fallback, plus a
//! debounced front end that tags every request with an increasing id.
//!
//! The remote catalog is fetched at most once per session and only while a
//! credential is set. A failed fetch leaves the cache empty, so the next
//! search retries; that search falls back to the bundled list meanwhile.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::catalog::{fallback_matches, FontCatalog, FontCatalogEntry};
use crate::error::FontError;

/// Default quiet window before a debounced search fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct FontSearch<C> {
    catalog: C,
    credential: RwLock<Option<String>>,
    cache: Mutex<Option<Arc<Vec<FontCatalogEntry>>>>,
}

impl<C: FontCatalog> FontSearch<C> {
    pub fn new(catalog: C, credential: Option<String>) -> Self {
        Self {
            catalog,
            credential: RwLock::new(normalize_credential(credential.as_deref())),
            cache: Mutex::new(None),
        }
    }

    pub fn credential(&self) -> Option<String> {
        self.credential.read().ok().and_then(|c| c.clone())
    }

    pub fn set_credential(&self, credential: Option<&str>) {
        if let Ok(mut slot) = self.credential.write() {
            *slot = normalize_credential(credential);
        }
    }

    /// Whether the remote catalog has been loaded this session.
    pub async fn is_catalog_loaded(&self) -> bool {
        self.cache.lock().await.is_some()
    }

    /// Case-insensitive substring search on family names.
    ///
    /// Blank terms match nothing. Network failures fall back to the bundled
    /// list for this call only.
    pub async fn search(&self, term: &str) -> Vec<FontCatalogEntry> {
        let query = term.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let Some(credential) = self.credential() else {
            return fallback_matches(&query);
        };

        match self.catalog_entries(&credential).await {
            Ok(entries) => entries
                .iter()
                .filter(|entry| entry.family.to_lowercase().contains(&query))
                .cloned()
                .collect(),
            Err(e) => {
                tracing::warn!("Font catalog unavailable, using bundled list: {e}");
                fallback_matches(&query)
            }
        }
    }

    /// The cached catalog, fetching it first if needed. The cache lock is
    /// held across the fetch so concurrent searches share one request.
    async fn catalog_entries(
        &self,
        credential: &str,
    ) -> Result<Arc<Vec<FontCatalogEntry>>, FontError> {
        let mut cache = self.cache.lock().await;
        if let Some(entries) = cache.as_ref() {
            return Ok(Arc::clone(entries));
        }
        let entries = Arc::new(self.catalog.fetch_catalog(credential).await?);
        *cache = Some(Arc::clone(&entries));
        Ok(entries)
    }
}

fn normalize_credential(credential: Option<&str>) -> Option<String> {
    credential
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// The most recently published search outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub request_id: u64,
    pub term: String,
    pub fonts: Vec<FontCatalogEntry>,
}

/// Debounced search with request ids.
///
/// Each submission aborts the pending one and gets a fresh id. A response is
/// published only while its id is still the latest issued, so a slow, older
/// reply can never overwrite a newer one.
pub struct SearchDebouncer<C> {
    search: Arc<FontSearch<C>>,
    delay: Duration,
    latest: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    results: Arc<watch::Sender<SearchResults>>,
}

impl<C: FontCatalog> SearchDebouncer<C> {
    pub fn new(search: Arc<FontSearch<C>>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(SearchResults::default());
        Self {
            search,
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            pending: None,
            results: Arc::new(tx),
        }
    }

    /// Restart the quiet window with `term`. Returns the request id.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, term: &str) -> u64 {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_pending();

        let search = Arc::clone(&self.search);
        let latest = Arc::clone(&self.latest);
        let results = Arc::clone(&self.results);
        let delay = self.delay;
        let term = term.to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let fonts = search.search(&term).await;
            results.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != id {
                    tracing::debug!(id, "discarding superseded font search");
                    return false;
                }
                *current = SearchResults {
                    request_id: id,
                    term,
                    fonts,
                };
                true
            });
        }));
        id
    }

    /// Drop the pending search, if any. No result is published for it.
    pub fn cancel(&mut self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Id of the most recently issued request.
    pub fn latest_request(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
        self.results.subscribe()
    }

    pub fn current(&self) -> SearchResults {
        self.results.borrow().clone()
    }
}

impl<C> Drop for SearchDebouncer<C> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    /// Catalog fake: counts fetches, optionally fails or stalls.
    pub(crate) struct FakeCatalog {
        pub fetches: Arc<AtomicUsize>,
        pub fail: bool,
        pub latency: Duration,
    }

    impl FakeCatalog {
        pub fn ok() -> Self {
            Self {
                fetches: Arc::new(AtomicUsize::new(0)),
                fail: false,
                latency: Duration::ZERO,
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }
    }

    impl FontCatalog for FakeCatalog {
        async fn fetch_catalog(&self, _credential: &str) -> Result<Vec<FontCatalogEntry>, FontError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            if self.fail {
                return Err(FontError::Api {
                    status: 403,
                    message: "forbidden".into(),
                });
            }
            Ok(vec![
                entry("Roboto Mono", "monospace", &["regular", "700"]),
                entry("Lora", "serif", &["regular", "italic", "700"]),
                entry("Rokkitt", "serif", &["100", "900"]),
            ])
        }
    }

    fn entry(family: &str, category: &str, variants: &[&str]) -> FontCatalogEntry {
        FontCatalogEntry {
            family: family.into(),
            category: Some(category.into()),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn families(entries: &[FontCatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.family.as_str()).collect()
    }

    #[tokio::test]
    async fn blank_term_is_empty_in_both_modes() {
        let fallback = FontSearch::new(FakeCatalog::ok(), None);
        assert!(fallback.search("").await.is_empty());
        assert!(fallback.search("   ").await.is_empty());

        let remote = FontSearch::new(FakeCatalog::ok(), Some("key".into()));
        assert!(remote.search("").await.is_empty());
        assert_eq!(remote.catalog.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fallback_mode_filters_bundled_list() {
        let search = FontSearch::new(FakeCatalog::ok(), Some("   ".into()));
        let results = search.search("RO").await;
        assert_eq!(families(&results), vec!["Roboto", "Source Sans Pro", "Roboto Slab"]);
        assert_eq!(search.catalog.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn catalog_is_fetched_once() {
        let search = FontSearch::new(FakeCatalog::ok(), Some("key".into()));
        let first = search.search("ro").await;
        assert_eq!(families(&first), vec!["Roboto Mono", "Rokkitt"]);
        assert_eq!(first[0].category.as_deref(), Some("monospace"));

        let second = search.search("lora").await;
        assert_eq!(families(&second), vec!["Lora"]);
        assert_eq!(second[0].variants, vec!["regular", "italic", "700"]);
        assert_eq!(search.catalog.fetches.load(Ordering::SeqCst), 1);
        assert!(search.is_catalog_loaded().await);
    }

    #[tokio::test]
    async fn failed_fetch_falls_back_and_retries() {
        let search = FontSearch::new(FakeCatalog::failing(), Some("key".into()));
        let results = search.search("lato").await;
        assert_eq!(families(&results), vec!["Lato"]);
        assert!(!search.is_catalog_loaded().await);

        search.search("lato").await;
        assert_eq!(search.catalog.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_submission_fires() {
        let search = Arc::new(FontSearch::new(FakeCatalog::ok(), Some("key".into())));
        let mut debouncer = SearchDebouncer::new(Arc::clone(&search), DEFAULT_DEBOUNCE);
        let mut rx = debouncer.subscribe();

        debouncer.submit("r");
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.submit("ro");
        tokio::time::sleep(Duration::from_millis(100)).await;
        let last = debouncer.submit("rok");

        rx.changed().await.unwrap();
        let published = rx.borrow_and_update().clone();
        assert_eq!(published.request_id, last);
        assert_eq!(published.term, "rok");
        assert_eq!(families(&published.fonts), vec!["Rokkitt"]);
        assert_eq!(search.catalog.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_inside_quiet_window() {
        let search = Arc::new(FontSearch::new(FakeCatalog::ok(), None));
        let mut debouncer = SearchDebouncer::new(search, DEFAULT_DEBOUNCE);
        debouncer.submit("lato");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(debouncer.current(), SearchResults::default());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(debouncer.current().term, "lato");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_superseded_request_never_publishes() {
        let catalog = FakeCatalog {
            latency: Duration::from_secs(5),
            ..FakeCatalog::ok()
        };
        let fetches = Arc::clone(&catalog.fetches);
        let search = Arc::new(FontSearch::new(catalog, Some("key".into())));
        let mut debouncer = SearchDebouncer::new(search, DEFAULT_DEBOUNCE);
        let mut rx = debouncer.subscribe();

        debouncer.submit("lora");
        // First request is now stuck in the slow fetch.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fetches.load(Ordering::SeqCst), 1);

        let second = debouncer.submit("rokk");
        rx.changed().await.unwrap();
        let published = rx.borrow_and_update().clone();
        assert_eq!(published.request_id, second);
        assert_eq!(families(&published.fonts), vec!["Rokkitt"]);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(debouncer.current().request_id, second);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_total() {
        let search = Arc::new(FontSearch::new(FakeCatalog::ok(), None));
        let mut debouncer = SearchDebouncer::new(search, DEFAULT_DEBOUNCE);
        debouncer.submit("inter");
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(debouncer.current(), SearchResults::default());
        assert_eq!(debouncer.latest_request(), 2);
    }
}
