//! Application layer - use-case handlers.
//!
//! Handlers wire the ports to the domain pipeline: validate input, call the
//! text-generation port, and hand the response to the parsers. They own the
//! prompts; the domain never sees them.

mod assess;
mod generate_raid;

pub use assess::{AssessError, Assessment, AssessmentHandler, AssessmentSnapshot};
pub use generate_raid::{RaidGenError, RaidGeneration, RaidGenerationHandler};
