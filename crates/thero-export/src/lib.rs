pub mod archive;
pub mod error;
pub mod fs;
pub mod skeleton;
pub mod tree;

use std::path::{Path, PathBuf};

use thero_core::{generate_stylesheet, PersistedFonts, TokenStore};

pub use archive::{ArchiveWriter, ZipArchiveWriter};
pub use error::ExportError;
pub use fs::write_to_dir;
pub use skeleton::{skeleton, ExportKind};
pub use tree::{ProjectFile, ProjectTree};

pub const DEFAULT_CSS_FILE_NAME: &str = "styleguide.css";

/// A finished export, ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deliverable {
    Stylesheet { file_name: String, contents: String },
    Archive { file_name: String, bytes: Vec<u8> },
}

impl Deliverable {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Stylesheet { file_name, .. } | Self::Archive { file_name, .. } => file_name,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Stylesheet { contents, .. } => contents.as_bytes(),
            Self::Archive { bytes, .. } => bytes,
        }
    }

    /// Save into `dir` under [`Deliverable::file_name`], creating `dir` if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.bytes())?;
        Ok(path)
    }
}

/// Packages generated CSS as a bare stylesheet or a starter project archive.
pub struct ProjectExporter<W = ZipArchiveWriter> {
    writer: W,
    css_file_name: String,
}

impl ProjectExporter {
    pub fn new() -> Self {
        Self::with_writer(ZipArchiveWriter, DEFAULT_CSS_FILE_NAME)
    }
}

impl Default for ProjectExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ArchiveWriter> ProjectExporter<W> {
    pub fn with_writer(writer: W, css_file_name: impl Into<String>) -> Self {
        Self {
            writer,
            css_file_name: css_file_name.into(),
        }
    }

    pub fn css_file_name(&self) -> &str {
        &self.css_file_name
    }

    pub fn export(&self, kind: ExportKind, css: &str) -> Result<Deliverable, ExportError> {
        let Some(tree) = skeleton(kind, css) else {
            tracing::info!(kind = %kind, bytes = css.len(), "exported stylesheet");
            return Ok(Deliverable::Stylesheet {
                file_name: self.css_file_name.clone(),
                contents: css.to_string(),
            });
        };

        let bytes = self.writer.write_archive(&tree)?;
        let file_name = format!("{}.{}", tree.name(), self.writer.extension());
        tracing::info!(kind = %kind, file = %file_name, bytes = bytes.len(), "exported project");
        Ok(Deliverable::Archive { file_name, bytes })
    }

    /// Snapshot `store`, render it and export the result.
    pub fn export_tokens(
        &self,
        kind: ExportKind,
        store: &TokenStore,
        fonts: &PersistedFonts,
        stylesheet_base: &str,
    ) -> Result<Deliverable, ExportError> {
        let css = generate_stylesheet(
            &store.snapshot(),
            store.spacing_categories(),
            fonts,
            stylesheet_base,
        );
        self.export(kind, &css)
    }
}
