//! Serializing a [`ProjectTree`] into archive bytes.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ExportError;
use crate::tree::ProjectTree;

/// Turns a project tree into a single downloadable payload.
pub trait ArchiveWriter {
    /// File extension of the produced archive, without the dot.
    fn extension(&self) -> &'static str;

    fn write_archive(&self, tree: &ProjectTree) -> Result<Vec<u8>, ExportError>;
}

/// Deflated zip with every entry under `<project>/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiveWriter;

impl ArchiveWriter for ZipArchiveWriter {
    fn extension(&self) -> &'static str {
        "zip"
    }

    fn write_archive(&self, tree: &ProjectTree) -> Result<Vec<u8>, ExportError> {
        tree.validate()?;

        let mut out = Cursor::new(Vec::new());
        {
            let mut writer = ZipWriter::new(&mut out);
            let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

            for dir in tree.directories() {
                writer.add_directory(dir, options)?;
            }

            for file in tree.files() {
                writer.start_file(format!("{}/{}", tree.name(), file.path), options)?;
                writer.write_all(file.contents.as_bytes())?;
            }

            writer.finish()?;
        }

        Ok(out.into_inner())
    }
}
