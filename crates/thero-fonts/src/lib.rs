//! Font search, resolution and preview for the studio.

pub mod catalog;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod search;

pub use catalog::{FontCatalog, FontCatalogEntry, GoogleFontsClient, FALLBACK_FONTS};
pub use error::FontError;
pub use registry::{MemoryRegistry, StylesheetRegistry};
pub use resolver::{FontResolver, FontTarget, Resolution};
pub use search::{FontSearch, SearchDebouncer, SearchResults, DEFAULT_DEBOUNCE};
