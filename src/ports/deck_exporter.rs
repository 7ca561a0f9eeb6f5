//! Deck Exporter Port - Presentation file rendering interface.
//!
//! This port defines the contract for rendering an immutable slide deck into
//! a downloadable presentation file. Exporters must consume the deck as-is:
//! they never re-derive or mutate the model, so the exported file and the
//! interactive view can never drift apart.

use thiserror::Error;

use crate::domain::deck::SlideDeck;

/// Port for exporting a slide deck to a presentation file.
pub trait DeckExporter: Send + Sync {
    /// Render the deck into file bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering or packaging fails.
    fn export(&self, deck: &SlideDeck) -> Result<ExportedDeck, ExportError>;
}

/// MIME content type for Office Open XML presentations.
pub const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Exported presentation with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDeck {
    /// The exported file as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
}

impl ExportedDeck {
    /// Create an exported PPTX deck.
    pub fn pptx(content: Vec<u8>, base_filename: &str) -> Self {
        Self {
            content,
            content_type: PPTX_CONTENT_TYPE.to_string(),
            filename: format!("{}.pptx", base_filename),
        }
    }
}

/// Errors that can occur during deck export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Slide markup generation failed.
    #[error("Slide markup generation failed: {0}")]
    Markup(String),

    /// Packaging the presentation archive failed.
    #[error("Presentation packaging failed: {0}")]
    Archive(String),
}

impl ExportError {
    /// Creates a markup error.
    pub fn markup(reason: impl Into<String>) -> Self {
        Self::Markup(reason.into())
    }

    /// Creates an archive error.
    pub fn archive(reason: impl Into<String>) -> Self {
        Self::Archive(reason.into())
    }
}
