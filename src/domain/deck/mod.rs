//! Slide deck model.
//!
//! The deck is the single source of truth for both presentation surfaces:
//! the interactive viewer and the file exporter consume the same immutable
//! slide sequence and never re-derive it.

mod model;
mod viewer;

pub use model::{build_deck, cover_date, Accent, Slide, SlideDeck, FOOTER_NOTE};
pub use viewer::{render_slide, DeckViewer};
