//! RAID record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing a RAID enum from free text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value: {0}")]
pub struct UnrecognizedValue(pub String);

/// The four RAID record categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidType {
    Risk,
    Assumption,
    Issue,
    Dependency,
}

impl RaidType {
    /// All record categories.
    pub const ALL: [RaidType; 4] = [
        RaidType::Risk,
        RaidType::Assumption,
        RaidType::Issue,
        RaidType::Dependency,
    ];

    /// Matches a type name at the start of a line, case-insensitively.
    ///
    /// The tag value line in model output is just the type name, possibly
    /// followed by trailing commentary, so a prefix match is used.
    pub fn match_line_prefix(line: &str) -> Option<RaidType> {
        Self::ALL.into_iter().find(|t| {
            let name = t.as_str();
            line.get(..name.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
        })
    }

    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidType::Risk => "Risk",
            RaidType::Assumption => "Assumption",
            RaidType::Issue => "Issue",
            RaidType::Dependency => "Dependency",
        }
    }
}

impl fmt::Display for RaidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RaidType {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| trimmed.eq_ignore_ascii_case(t.as_str()))
            .ok_or_else(|| UnrecognizedValue(trimmed.to_string()))
    }
}

/// Severity or probability rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl RaidLevel {
    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidLevel::High => "High",
            RaidLevel::Medium => "Medium",
            RaidLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RaidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RaidLevel {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [RaidLevel::High, RaidLevel::Medium, RaidLevel::Low]
            .into_iter()
            .find(|l| trimmed.eq_ignore_ascii_case(l.as_str()))
            .ok_or_else(|| UnrecognizedValue(trimmed.to_string()))
    }
}

/// Workflow status of a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaidStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Mitigated,
    Resolved,
    Closed,
}

impl RaidStatus {
    const ALL: [RaidStatus; 5] = [
        RaidStatus::Open,
        RaidStatus::InProgress,
        RaidStatus::Mitigated,
        RaidStatus::Resolved,
        RaidStatus::Closed,
    ];

    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidStatus::Open => "Open",
            RaidStatus::InProgress => "In Progress",
            RaidStatus::Mitigated => "Mitigated",
            RaidStatus::Resolved => "Resolved",
            RaidStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for RaidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RaidStatus {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| trimmed.eq_ignore_ascii_case(st.as_str()))
            .ok_or_else(|| UnrecognizedValue(trimmed.to_string()))
    }
}

/// One entry of the RAID register.
///
/// The `owner` field is only ever set by user edits; the parser always
/// leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidRecord {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: RaidType,
    pub description: String,
    #[serde(default)]
    pub severity: RaidLevel,
    #[serde(default)]
    pub probability: RaidLevel,
    #[serde(default)]
    pub mitigation: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub status: RaidStatus,
}

impl RaidRecord {
    /// Creates a blank record of the given type with default field values.
    pub fn blank(id: u32, kind: RaidType) -> Self {
        Self {
            id,
            kind,
            description: String::new(),
            severity: RaidLevel::default(),
            probability: RaidLevel::default(),
            mitigation: String::new(),
            owner: String::new(),
            status: RaidStatus::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_record_uses_documented_defaults() {
        let record = RaidRecord::blank(7, RaidType::Assumption);

        assert_eq!(record.id, 7);
        assert_eq!(record.kind, RaidType::Assumption);
        assert_eq!(record.severity, RaidLevel::Medium);
        assert_eq!(record.probability, RaidLevel::Medium);
        assert_eq!(record.status, RaidStatus::Open);
        assert!(record.description.is_empty());
        assert!(record.mitigation.is_empty());
        assert!(record.owner.is_empty());
    }

    #[test]
    fn type_prefix_match_is_case_insensitive() {
        assert_eq!(RaidType::match_line_prefix("risk"), Some(RaidType::Risk));
        assert_eq!(
            RaidType::match_line_prefix("DEPENDENCY on vendor"),
            Some(RaidType::Dependency)
        );
        assert_eq!(RaidType::match_line_prefix("Unknown"), None);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("high".parse::<RaidLevel>(), Ok(RaidLevel::High));
        assert_eq!(" Low ".parse::<RaidLevel>(), Ok(RaidLevel::Low));
        assert!("severe".parse::<RaidLevel>().is_err());
    }

    #[test]
    fn status_parses_two_word_variant() {
        assert_eq!("in progress".parse::<RaidStatus>(), Ok(RaidStatus::InProgress));
        assert_eq!("Closed".parse::<RaidStatus>(), Ok(RaidStatus::Closed));
        assert!("Done".parse::<RaidStatus>().is_err());
    }

    #[test]
    fn record_serializes_with_original_field_names() {
        let record = RaidRecord {
            id: 1,
            kind: RaidType::Risk,
            description: "Vendor delay".to_string(),
            severity: RaidLevel::High,
            probability: RaidLevel::Medium,
            mitigation: String::new(),
            owner: String::new(),
            status: RaidStatus::InProgress,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"Risk\""));
        assert!(json.contains("\"severity\":\"High\""));
        assert!(json.contains("\"status\":\"In Progress\""));
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = RaidRecord::blank(3, RaidType::Issue);
        let json = serde_json::to_string(&record).unwrap();
        let back: RaidRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
