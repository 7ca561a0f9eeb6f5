//! Assessment pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Bounds and thresholds for the assessment pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Minimum project description length accepted, in characters.
    #[serde(default = "default_min_description")]
    pub min_description_chars: usize,

    /// Maximum project description length accepted, in characters.
    #[serde(default = "default_max_description")]
    pub max_description_chars: usize,

    /// Minimum non-empty lines a RAID block needs to be considered a record.
    /// Blocks below this threshold are treated as model noise and dropped.
    #[serde(default = "default_raid_block_lines")]
    pub raid_min_block_lines: usize,
}

impl AssessmentConfig {
    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_description_chars == 0
            || self.max_description_chars < self.min_description_chars
        {
            return Err(ValidationError::InvalidDescriptionBounds);
        }
        if self.raid_min_block_lines == 0 {
            return Err(ValidationError::InvalidBlockThreshold);
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            min_description_chars: default_min_description(),
            max_description_chars: default_max_description(),
            raid_min_block_lines: default_raid_block_lines(),
        }
    }
}

fn default_min_description() -> usize {
    20
}

fn default_max_description() -> usize {
    500
}

fn default_raid_block_lines() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssessmentConfig::default();
        assert_eq!(config.min_description_chars, 20);
        assert_eq!(config.max_description_chars, 500);
        assert_eq!(config.raid_min_block_lines, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_bounds() {
        let config = AssessmentConfig {
            min_description_chars: 100,
            max_description_chars: 50,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDescriptionBounds)
        ));
    }

    #[test]
    fn test_validation_rejects_zero_block_threshold() {
        let config = AssessmentConfig {
            raid_min_block_lines: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBlockThreshold)
        ));
    }
}
