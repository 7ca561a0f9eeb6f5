//! RAID log generation use case.
//!
//! Asks the generation service for a tagged RAID log and parses it into
//! records. A well-formed response that yields zero records is a soft
//! failure the caller must distinguish from a transport error.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::AssessmentConfig;
use crate::domain::raid::{RaidRecord, RaidResponseParser};
use crate::ports::{GenerationError, TextGenerator};

/// Prompt template for the RAID generation request. The tagged format below
/// is what the parser recognizes.
const RAID_PROMPT: &str = "You are a project management expert. Analyze this project and generate a RAID log (Risks, Assumptions, Issues, Dependencies).

For each item, provide EXACTLY this format:

TYPE: Risk
DESCRIPTION: [clear description of the risk]
SEVERITY: [High/Medium/Low]
PROBABILITY: [High/Medium/Low]
MITIGATION: [specific mitigation strategy]
STATUS: Open

TYPE: Assumption
DESCRIPTION: [clear description of the assumption]
SEVERITY: [High/Medium/Low - impact if wrong]
PROBABILITY: [High/Medium/Low - likelihood it's wrong]
MITIGATION: [how to validate or what to do if wrong]
STATUS: Open

TYPE: Dependency
DESCRIPTION: [clear description of the dependency]
SEVERITY: [High/Medium/Low - impact if blocked]
PROBABILITY: [High/Medium/Low - likelihood of delay]
MITIGATION: [backup plan or mitigation]
STATUS: In Progress

Generate 4-6 Risks, 3-4 Assumptions, and 2-3 Dependencies. No Issues yet (project hasn't started).

Keep descriptions concise (under 100 characters). Be specific to THIS project, not generic PM advice.

Project Description:
";

/// Errors surfaced by the RAID generation use case.
#[derive(Debug, Error)]
pub enum RaidGenError {
    /// Description below the accepted minimum; user-correctable.
    #[error("please provide a project description (at least {min} characters)")]
    DescriptionTooShort { min: usize, actual: usize },

    /// The generation call failed; retryable when the source error is.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl RaidGenError {
    /// Returns true when retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RaidGenError::Generation(err) if err.is_retryable())
    }
}

/// Parsed outcome of a RAID generation run.
#[derive(Debug, Clone)]
pub struct RaidGeneration {
    /// Accepted records in source order, ids ascending from 1.
    pub records: Vec<RaidRecord>,
}

impl RaidGeneration {
    /// True when the response yielded no usable records.
    ///
    /// Soft failure: the surface should offer regeneration or manual entry,
    /// not an error banner.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Handler for the RAID generation use case.
pub struct RaidGenerationHandler {
    generator: Arc<dyn TextGenerator>,
    parser: RaidResponseParser,
    config: AssessmentConfig,
}

impl RaidGenerationHandler {
    /// Creates a handler over the given generation port.
    pub fn new(generator: Arc<dyn TextGenerator>, config: AssessmentConfig) -> Self {
        let parser = RaidResponseParser::new().with_min_block_lines(config.raid_min_block_lines);
        Self {
            generator,
            parser,
            config,
        }
    }

    /// Generates and parses a RAID log for the given project description.
    pub async fn generate(&self, description: &str) -> Result<RaidGeneration, RaidGenError> {
        let description = description.trim();

        let actual = description.chars().count();
        if actual < self.config.min_description_chars {
            return Err(RaidGenError::DescriptionTooShort {
                min: self.config.min_description_chars,
                actual,
            });
        }

        let prompt = format!("{}{}", RAID_PROMPT, description);
        let response = self.generator.generate(&prompt).await?;

        let records = self.parser.parse(&response);
        info!(records = records.len(), "parsed RAID generation response");

        Ok(RaidGeneration { records })
    }
}
