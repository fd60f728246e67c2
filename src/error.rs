//! All error types for the xliffcodec crate.
//!
//! These are returned from all fallible operations (document parsing,
//! serialization, resource persistence).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The raw XML did not parse to a structured document.
    ///
    /// This is fatal to the single document being processed, never to a
    /// whole batch. A locale mismatch or a monolingual document is *not*
    /// malformed; both surface as zero extracted resources instead.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid project: {0}")]
    InvalidProject(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

impl Error {
    /// Creates a new malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDocument(message.into())
    }
}
