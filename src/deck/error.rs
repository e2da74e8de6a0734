use thiserror::Error;

use super::ShapeKey;

/// Errors raised while opening, rewriting or saving a presentation.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The input is not a `.pptx` file.
    #[error("Unsupported file format: '{0}'. Please provide a .pptx file")]
    UnsupportedFormat(String),

    /// The zip container could not be read or written.
    #[error("Invalid presentation archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A package part is not well-formed XML.
    #[error("Malformed XML in '{part}': {message}")]
    Xml { part: String, message: String },

    /// A part required by the presentation structure is absent.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// A slide id references a relationship that does not exist.
    #[error("Relationship '{0}' not found in presentation relationships")]
    MissingRelationship(String),

    /// A translated fragment does not match the shape tree it is written to.
    #[error("Fragment for {key} does not match a text shape in the presentation")]
    Misaligned { key: ShapeKey },

    #[error("Package part '{part}' exceeds the {limit}-byte limit when decompressed")]
    TooLarge { part: String, limit: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeckError {
    pub(crate) fn xml(part: &str, message: impl ToString) -> Self {
        Self::Xml {
            part: part.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
