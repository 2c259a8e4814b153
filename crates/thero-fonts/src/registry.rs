use std::collections::BTreeMap;

/// Where resolved stylesheet references end up: a document head, a
/// preview surface, an export manifest. Keys are stable per target.
pub trait StylesheetRegistry {
    fn register(&mut self, key: &str, url: &str);
    fn unregister(&mut self, key: &str);
}

/// Registry that just remembers what is registered.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    links: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.links.get(key).map(String::as_str)
    }

    pub fn links(&self) -> &BTreeMap<String, String> {
        &self.links
    }

    /// Number of register/unregister calls received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StylesheetRegistry for MemoryRegistry {
    fn register(&mut self, key: &str, url: &str) {
        self.writes += 1;
        self.links.insert(key.to_string(), url.to_string());
    }

    fn unregister(&mut self, key: &str) {
        self.writes += 1;
        self.links.remove(key);
    }
}
