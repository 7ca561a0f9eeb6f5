//! RAID record parsing from tagged model output.
//!
//! The generation prompt asks for blocks of `TAG: value` lines introduced by
//! a `TYPE:` tag. The model does not always comply, so parsing is tolerant
//! throughout: blocks too sparse to be real records are dropped, lines with
//! no recognized tag are ignored, and input with no usable blocks yields an
//! empty sequence rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{RaidLevel, RaidRecord, RaidStatus, RaidType};

/// Default minimum of non-empty lines for a block to count as a record.
///
/// Roughly one tag line short of the full five; a heuristic against
/// malformed output, not a strict field count.
pub const DEFAULT_MIN_BLOCK_LINES: usize = 4;

/// Splits the response into candidate record blocks.
static TYPE_TAG_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)TYPE:\s*").expect("type tag pattern is valid"));

/// Recognized field tags within a block, scanned per line.
const FIELD_TAGS: [&str; 5] = [
    "DESCRIPTION:",
    "SEVERITY:",
    "PROBABILITY:",
    "MITIGATION:",
    "STATUS:",
];

/// Parser for RAID-tagged model responses.
#[derive(Debug, Clone)]
pub struct RaidResponseParser {
    min_block_lines: usize,
}

impl Default for RaidResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RaidResponseParser {
    /// Creates a parser with the default noise-rejection threshold.
    pub fn new() -> Self {
        Self {
            min_block_lines: DEFAULT_MIN_BLOCK_LINES,
        }
    }

    /// Overrides the minimum non-empty lines per accepted block.
    pub fn with_min_block_lines(mut self, min_block_lines: usize) -> Self {
        self.min_block_lines = min_block_lines;
        self
    }

    /// Parses a model response into RAID records.
    ///
    /// Records are returned in source-block order with identifiers assigned
    /// ascending from 1, independent of any existing store content; the
    /// caller re-keys on merge. An unusable response yields an empty vec.
    pub fn parse(&self, text: &str) -> Vec<RaidRecord> {
        let mut records = Vec::new();

        for block in TYPE_TAG_SPLIT.split(text) {
            if let Some(record) = self.parse_block(block, records.len() as u32 + 1) {
                records.push(record);
            }
        }

        records
    }

    /// Parses one candidate block, or rejects it.
    fn parse_block(&self, block: &str, id: u32) -> Option<RaidRecord> {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < self.min_block_lines {
            return None;
        }

        let mut kind = None;
        let mut description = None;
        let mut severity = None;
        let mut probability = None;
        let mut mitigation = None;
        let mut status = None;

        for line in lines {
            if let Some(t) = RaidType::match_line_prefix(line) {
                kind = Some(t);
            } else if let Some(value) = tag_value(line, "DESCRIPTION:") {
                description = Some(value.to_string());
            } else if let Some(value) = tag_value(line, "SEVERITY:") {
                severity = value.parse::<RaidLevel>().ok();
            } else if let Some(value) = tag_value(line, "PROBABILITY:") {
                probability = value.parse::<RaidLevel>().ok();
            } else if let Some(value) = tag_value(line, "MITIGATION:") {
                mitigation = Some(value.to_string());
            } else if let Some(value) = tag_value(line, "STATUS:") {
                status = value.parse::<RaidStatus>().ok();
            }
            // Lines matching no known tag are ignored.
        }

        // A block becomes a record only when both type and description were
        // extracted; every other field falls back to its default.
        let kind = kind?;
        let description = description.filter(|d| !d.is_empty())?;

        Some(RaidRecord {
            id,
            kind,
            description,
            severity: severity.unwrap_or_default(),
            probability: probability.unwrap_or_default(),
            mitigation: mitigation.unwrap_or_default(),
            owner: String::new(),
            status: status.unwrap_or_default(),
        })
    }
}

/// Extracts the value after a tag prefix, case-insensitively.
fn tag_value<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    debug_assert!(FIELD_TAGS.contains(&tag));
    match line.get(..tag.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(tag) => Some(line[tag.len()..].trim()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> RaidResponseParser {
        RaidResponseParser::new()
    }

    mod acceptance {
        use super::*;

        #[test]
        fn parses_a_complete_block() {
            let text = "TYPE: Risk\n\
                        DESCRIPTION: Vendor integration may slip\n\
                        SEVERITY: High\n\
                        PROBABILITY: Medium\n\
                        MITIGATION: Weekly vendor checkpoints\n\
                        STATUS: Open\n";

            let records = parser().parse(text);

            assert_eq!(records.len(), 1);
            let record = &records[0];
            assert_eq!(record.id, 1);
            assert_eq!(record.kind, RaidType::Risk);
            assert_eq!(record.description, "Vendor integration may slip");
            assert_eq!(record.severity, RaidLevel::High);
            assert_eq!(record.probability, RaidLevel::Medium);
            assert_eq!(record.mitigation, "Weekly vendor checkpoints");
            assert_eq!(record.status, RaidStatus::Open);
            assert!(record.owner.is_empty());
        }

        #[test]
        fn missing_optional_fields_take_defaults() {
            let text = "TYPE: Risk\n\
                        DESCRIPTION: Vendor delay\n\
                        some note line\n\
                        another note line\n";

            let records = parser().parse(text);

            assert_eq!(records.len(), 1);
            let record = &records[0];
            assert_eq!(record.severity, RaidLevel::Medium);
            assert_eq!(record.probability, RaidLevel::Medium);
            assert_eq!(record.status, RaidStatus::Open);
            assert_eq!(record.mitigation, "");
        }

        #[test]
        fn tags_match_case_insensitively_in_any_order() {
            let text = "type: dependency\n\
                        mitigation: Order hardware early\n\
                        severity: low\n\
                        description: Hardware delivery\n\
                        status: in progress\n";

            let records = parser().parse(text);

            assert_eq!(records.len(), 1);
            assert_eq!(records[0].kind, RaidType::Dependency);
            assert_eq!(records[0].severity, RaidLevel::Low);
            assert_eq!(records[0].status, RaidStatus::InProgress);
        }

        #[test]
        fn multiple_blocks_keep_source_order_and_ascending_ids() {
            let text = "TYPE: Risk\nDESCRIPTION: First\nSEVERITY: High\nPROBABILITY: Low\n\
                        TYPE: Assumption\nDESCRIPTION: Second\nSEVERITY: Medium\nSTATUS: Open\n";

            let records = parser().parse(text);

            assert_eq!(records.len(), 2);
            assert_eq!(records[0].id, 1);
            assert_eq!(records[0].description, "First");
            assert_eq!(records[1].id, 2);
            assert_eq!(records[1].kind, RaidType::Assumption);
        }

        #[test]
        fn ids_skip_rejected_blocks() {
            let text = "TYPE: Risk\nDESCRIPTION: Kept\nSEVERITY: High\nSTATUS: Open\n\
                        TYPE: Risk\ntoo sparse\n\
                        TYPE: Issue\nDESCRIPTION: Also kept\nSEVERITY: Low\nSTATUS: Open\n";

            let records = parser().parse(text);

            assert_eq!(records.len(), 2);
            assert_eq!(records[0].id, 1);
            assert_eq!(records[1].id, 2);
        }
    }

    mod rejection {
        use super::*;

        #[test]
        fn block_with_three_populated_lines_is_dropped() {
            let text = "TYPE: Risk\nDESCRIPTION: Sparse\nSEVERITY: High\n";

            assert!(parser().parse(text).is_empty());
        }

        #[test]
        fn block_without_description_is_dropped() {
            let text = "TYPE: Risk\nSEVERITY: High\nPROBABILITY: Low\nSTATUS: Open\n";

            assert!(parser().parse(text).is_empty());
        }

        #[test]
        fn free_text_response_yields_empty_sequence() {
            let text = "I could not produce a RAID log for this project, sorry.";

            assert!(parser().parse(text).is_empty());
        }

        #[test]
        fn empty_input_yields_empty_sequence() {
            assert!(parser().parse("").is_empty());
        }

        #[test]
        fn unrecognized_level_values_fall_back_to_defaults() {
            let text = "TYPE: Risk\nDESCRIPTION: Odd values\nSEVERITY: Catastrophic\nSTATUS: Done\n";

            let records = parser().parse(text);

            assert_eq!(records.len(), 1);
            assert_eq!(records[0].severity, RaidLevel::Medium);
            assert_eq!(records[0].status, RaidStatus::Open);
        }
    }

    mod threshold {
        use super::*;

        #[test]
        fn lowered_threshold_accepts_sparser_blocks() {
            let text = "TYPE: Risk\nDESCRIPTION: Sparse\nSEVERITY: High\n";
            let lenient = RaidResponseParser::new().with_min_block_lines(3);

            assert_eq!(lenient.parse(text).len(), 1);
        }

        #[test]
        fn blank_lines_do_not_count_toward_the_threshold() {
            let text = "TYPE: Risk\n\n\nDESCRIPTION: Sparse\n\nSEVERITY: High\n\n";

            assert!(parser().parse(text).is_empty());
        }
    }
}
