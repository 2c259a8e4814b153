use thiserror::Error;

/// Errors from the remote font catalog.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no catalog credential configured")]
    MissingCredential,
}
