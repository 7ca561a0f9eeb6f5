//! Assessment text ingestion.
//!
//! Turns the free text returned by the generation service into structured
//! pieces: named narrative sections and per-section bullet sequences. All
//! functions here are pure; tolerance is the rule since the source text is
//! untrusted model output.

mod bullets;
mod sections;

pub use bullets::{extract_bullets, strip_bold};
pub use sections::{extract_sections, SectionKey, SectionMap};
