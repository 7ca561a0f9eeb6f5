//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TextGenerator` - Port for the external text-generation service
//! - `KeyValueStore` - Port for key-value persistence (snapshots, context)
//! - `DeckExporter` - Port for rendering a slide deck to a presentation file

mod deck_exporter;
mod key_value_store;
mod text_generator;

pub use deck_exporter::{DeckExporter, ExportError, ExportedDeck};
pub use key_value_store::{KeyValueStore, StorageError};
pub use text_generator::{GenerationError, TextGenerator};
