use thiserror::Error;

use thero_core::TheroError;
use thero_export::ExportError;
use thero_fonts::FontError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TheroError),

    #[error(transparent)]
    Fonts(#[from] FontError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("unknown color role: {0}")]
    UnknownRole(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}
