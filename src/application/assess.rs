//! Project assessment use case.
//!
//! Validates the description, asks the generation service for a
//! recommendation, and turns the response into the section map and slide
//! deck. The successful assessment context is persisted so the RAID surface
//! can reuse the same project description later.

use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AssessmentConfig;
use crate::domain::assessment::{extract_sections, SectionMap};
use crate::domain::deck::{build_deck, cover_date, SlideDeck};
use crate::domain::raid::ASSESSMENT_CONTEXT_KEY;
use crate::ports::{GenerationError, KeyValueStore, TextGenerator};

/// Prompt template for the assessment request.
const ASSESS_PROMPT: &str = "You are a project management expert. Analyze this project description and provide:

1. Recommended PM approach (Waterfall, Agile, Hybrid)
2. Key templates needed (Project Plan, Kanban, RAID Log, etc.)
3. Critical success factors
4. Potential risks to watch for

Keep your response concise and actionable (under 400 words).

Project Description:
";

/// Errors surfaced by the assess use case.
#[derive(Debug, Error)]
pub enum AssessError {
    /// Description below the accepted minimum; user-correctable.
    #[error("please provide a project description (at least {min} characters)")]
    DescriptionTooShort { min: usize, actual: usize },

    /// Description above the accepted maximum; user-correctable.
    #[error("project description is too long (at most {max} characters)")]
    DescriptionTooLong { max: usize, actual: usize },

    /// The generation call failed; retryable when the source error is.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl AssessError {
    /// Returns true when retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AssessError::Generation(err) if err.is_retryable())
    }
}

/// Result of a completed assessment.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// The validated project description.
    pub description: String,
    /// The raw recommendation text from the generation service.
    pub recommendation: String,
    /// Sections extracted from the recommendation.
    pub sections: SectionMap,
    /// The slide deck built from the sections.
    pub deck: SlideDeck,
}

impl Assessment {
    /// True when the response carried no recognizable section at all.
    ///
    /// This is a soft outcome, not an error: the surface should offer a
    /// "nothing generated" affordance distinct from a transport failure.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Persisted assessment context, shared with the RAID surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSnapshot {
    pub project_description: String,
    pub recommendation: String,
}

/// Handler for the assessment use case.
pub struct AssessmentHandler {
    generator: Arc<dyn TextGenerator>,
    storage: Arc<dyn KeyValueStore>,
    config: AssessmentConfig,
}

impl AssessmentHandler {
    /// Creates a handler over the given ports.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        storage: Arc<dyn KeyValueStore>,
        config: AssessmentConfig,
    ) -> Self {
        Self {
            generator,
            storage,
            config,
        }
    }

    /// Runs an assessment for the given project description.
    pub async fn assess(&self, description: &str) -> Result<Assessment, AssessError> {
        let description = description.trim();
        self.validate(description)?;

        info!(chars = description.len(), "running project assessment");

        let prompt = format!("{}{}", ASSESS_PROMPT, description);
        let recommendation = self.generator.generate(&prompt).await?;

        let sections = extract_sections(&recommendation);
        if sections.is_empty() {
            info!("recommendation contained no recognizable sections");
        }

        let date = cover_date(Local::now().date_naive());
        let deck = build_deck(&sections, description, &date);

        self.persist_context(description, &recommendation);

        Ok(Assessment {
            description: description.to_string(),
            recommendation,
            sections,
            deck,
        })
    }

    fn validate(&self, description: &str) -> Result<(), AssessError> {
        let actual = description.chars().count();
        if actual < self.config.min_description_chars {
            return Err(AssessError::DescriptionTooShort {
                min: self.config.min_description_chars,
                actual,
            });
        }
        if actual > self.config.max_description_chars {
            return Err(AssessError::DescriptionTooLong {
                max: self.config.max_description_chars,
                actual,
            });
        }
        Ok(())
    }

    /// Stores the assessment context; failure to persist is logged, not fatal.
    fn persist_context(&self, description: &str, recommendation: &str) {
        let snapshot = AssessmentSnapshot {
            project_description: description.to_string(),
            recommendation: recommendation.to_string(),
        };
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(err) = self.storage.set(ASSESSMENT_CONTEXT_KEY, &json) {
                    warn!(error = %err, "failed to persist assessment context");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize assessment context"),
        }
    }
}
