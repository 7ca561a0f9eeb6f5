//! Heading-delimited section extraction.
//!
//! The recommendation text is expected to carry markdown-style `##` headings
//! with a known set of labels. Each label is looked up independently with its
//! own precompiled pattern, so extraction has no ordering requirement and an
//! unknown heading in the source is simply ignored. Every extraction is
//! "find or default": a missing heading yields an empty section, never an
//! error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The known section labels, in the order they appear on the slide deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    /// Recommended PM approach and rationale.
    Approach,
    /// Key templates needed.
    Templates,
    /// Critical success factors.
    SuccessFactors,
    /// Potential risks to monitor.
    Risks,
    /// Rough cost and timeline estimates.
    Estimates,
    /// Quick implementation tip.
    Tip,
}

impl SectionKey {
    /// All known section keys.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Approach,
        SectionKey::Templates,
        SectionKey::SuccessFactors,
        SectionKey::Risks,
        SectionKey::Estimates,
        SectionKey::Tip,
    ];

    /// The heading pattern fragment recognized for this key.
    ///
    /// The estimates label has a tolerated variant; both map to the same key.
    fn heading_pattern(self) -> &'static str {
        match self {
            SectionKey::Approach => r"Recommended PM Approach",
            SectionKey::Templates => r"Key Templates Needed",
            SectionKey::SuccessFactors => r"Critical Success Factors",
            SectionKey::Risks => r"Potential Risks",
            SectionKey::Estimates => r"(?:Rough Estimates|Project Estimates)",
            SectionKey::Tip => r"Quick Implementation Tip",
        }
    }
}

/// One precompiled body-capture regex per section key.
///
/// The tip section runs to the end of the text; every other section body is
/// a non-greedy match up to the next heading or end of input, so only the
/// first occurrence of a label is honored.
static SECTION_REGEXES: Lazy<Vec<(SectionKey, Regex)>> = Lazy::new(|| {
    SectionKey::ALL
        .iter()
        .map(|&key| {
            let pattern = match key {
                SectionKey::Tip => format!(r"(?is)##\s*{}\s*(.*)", key.heading_pattern()),
                _ => format!(r"(?is)##\s*{}\s*(.*?)(?:##|\z)", key.heading_pattern()),
            };
            let regex = Regex::new(&pattern).expect("section heading pattern is valid");
            (key, regex)
        })
        .collect()
});

/// Extracted narrative sections keyed by topic.
///
/// Every key is always present; absence of a heading in the source yields an
/// empty string, never a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMap {
    pub approach: String,
    pub templates: String,
    pub success_factors: String,
    pub risks: String,
    pub estimates: String,
    pub tip: String,
}

impl SectionMap {
    /// Returns the section body for a key.
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Approach => &self.approach,
            SectionKey::Templates => &self.templates,
            SectionKey::SuccessFactors => &self.success_factors,
            SectionKey::Risks => &self.risks,
            SectionKey::Estimates => &self.estimates,
            SectionKey::Tip => &self.tip,
        }
    }

    fn set(&mut self, key: SectionKey, value: String) {
        match key {
            SectionKey::Approach => self.approach = value,
            SectionKey::Templates => self.templates = value,
            SectionKey::SuccessFactors => self.success_factors = value,
            SectionKey::Risks => self.risks = value,
            SectionKey::Estimates => self.estimates = value,
            SectionKey::Tip => self.tip = value,
        }
    }

    /// Returns true if no section was extracted at all.
    pub fn is_empty(&self) -> bool {
        SectionKey::ALL.iter().all(|&key| self.get(key).is_empty())
    }
}

/// Splits a free-text recommendation into named sections.
///
/// Pure function: matching is case-insensitive, headings may appear in any
/// order, and duplicate headings keep only the first match per label.
pub fn extract_sections(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    for (key, regex) in SECTION_REGEXES.iter() {
        if let Some(captures) = regex.captures(text) {
            let body = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            sections.set(*key, body.trim().to_string());
        }
    }
    sections
}
