//! Slide descriptors and deck building.
//!
//! `build_deck` composes the extracted sections into a fixed-order sequence
//! of eight candidate slides, then filters out bullet slides that ended up
//! with nothing to show. Output ordering is always the candidate order minus
//! dropped entries; content never reorders slides.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::assessment::{extract_bullets, strip_bold, SectionMap};

/// Attribution line carried on every non-cover slide.
pub const FOOTER_NOTE: &str = "AI-Generated Assessment • Review and Validate";

/// Placeholder body for the overview slide when no description was given.
const NO_DESCRIPTION_PLACEHOLDER: &str = "No project description provided";

/// Disclaimer shown with the estimates slide.
const ESTIMATES_DISCLAIMER: &str = "Actual costs and timelines may vary significantly based on \
     your specific context, team capabilities, organizational constraints, and unforeseen \
     challenges. These estimates are provided for initial planning purposes only.";

/// Fixed guidance bullets on the next-steps slide, always present.
const NEXT_STEP_BULLETS: [&str; 4] = [
    "Review these recommendations with your team",
    "Adapt to your specific organizational context",
    "Begin with a focused pilot phase",
    "Monitor progress and adjust as needed",
];

/// Accent color tag for bullet slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Green,
    Amber,
    Blue,
}

/// One unit of the presentation model, tagged by layout variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Slide {
    /// Title slide with subtitle and date.
    Cover {
        title: String,
        subtitle: String,
        date: String,
    },
    /// Free-text body slide.
    Content {
        icon: String,
        title: String,
        summary: String,
        body: String,
    },
    /// Bulleted slide, optionally accented, with an optional disclaimer band
    /// and an optional prose fallback used when no bullets were extracted.
    Bullets {
        icon: String,
        title: String,
        summary: String,
        bullets: Vec<String>,
        accent: Option<Accent>,
        disclaimer: Option<String>,
        fallback: Option<String>,
    },
    /// Tip-plus-bullets closing slide.
    Mixed {
        icon: String,
        title: String,
        summary: String,
        tip: Option<String>,
        bullets: Vec<String>,
    },
}

impl Slide {
    /// Returns the slide title.
    pub fn title(&self) -> &str {
        match self {
            Slide::Cover { title, .. }
            | Slide::Content { title, .. }
            | Slide::Bullets { title, .. }
            | Slide::Mixed { title, .. } => title,
        }
    }
}

/// Ordered, filtered slide sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideDeck {
    slides: Vec<Slide>,
}

impl SlideDeck {
    fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Number of slides in the deck.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns true if the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Returns the slide at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// The full slide sequence.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Iterates over the slides in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }
}

/// Formats a cover-slide date ("January 5, 2026").
pub fn cover_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Builds the slide deck from extracted sections.
///
/// The candidate order is fixed: cover, overview, approach, templates,
/// success factors, risks, estimates, next steps. Bullet slides with an
/// empty bullet sequence are dropped, except the approach slide, which falls
/// back to the raw section text when that text is non-empty. The cover,
/// overview, and next-steps slides are never dropped.
pub fn build_deck(sections: &SectionMap, project_description: &str, date: &str) -> SlideDeck {
    let mut slides = Vec::with_capacity(8);

    slides.push(Slide::Cover {
        title: "Project Assessment Results".to_string(),
        subtitle: "AI-Powered Project Management Recommendations".to_string(),
        date: date.to_string(),
    });

    let overview_body = if project_description.is_empty() {
        NO_DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        project_description.to_string()
    };
    slides.push(Slide::Content {
        icon: "📋".to_string(),
        title: "Project Overview".to_string(),
        summary: "Project context and initial assessment".to_string(),
        body: overview_body,
    });

    let approach_bullets = extract_bullets(&sections.approach);
    let approach_fallback = if approach_bullets.is_empty() && !sections.approach.is_empty() {
        Some(strip_bold(&sections.approach))
    } else {
        None
    };
    push_bullet_slide(
        &mut slides,
        Slide::Bullets {
            icon: "📋".to_string(),
            title: "Recommended Approach".to_string(),
            summary: "Suggested project management methodology and rationale".to_string(),
            bullets: approach_bullets,
            accent: None,
            disclaimer: None,
            fallback: approach_fallback,
        },
    );

    push_bullet_slide(
        &mut slides,
        Slide::Bullets {
            icon: "📄".to_string(),
            title: "Key Templates Needed".to_string(),
            summary: "Essential documentation and frameworks for project success".to_string(),
            bullets: extract_bullets(&sections.templates),
            accent: None,
            disclaimer: None,
            fallback: None,
        },
    );

    push_bullet_slide(
        &mut slides,
        Slide::Bullets {
            icon: "✅".to_string(),
            title: "Critical Success Factors".to_string(),
            summary: "Key elements required for project success".to_string(),
            bullets: extract_bullets(&sections.success_factors),
            accent: Some(Accent::Green),
            disclaimer: None,
            fallback: None,
        },
    );

    push_bullet_slide(
        &mut slides,
        Slide::Bullets {
            icon: "⚠️".to_string(),
            title: "Potential Risks to Monitor".to_string(),
            summary: "Challenges and obstacles to anticipate and mitigate".to_string(),
            bullets: extract_bullets(&sections.risks),
            accent: Some(Accent::Amber),
            disclaimer: None,
            fallback: None,
        },
    );

    push_bullet_slide(
        &mut slides,
        Slide::Bullets {
            icon: "📊".to_string(),
            title: "Rough Estimates".to_string(),
            summary: "Based on available information - does not represent the full range of \
                      possible actual costs"
                .to_string(),
            bullets: extract_bullets(&sections.estimates),
            accent: Some(Accent::Blue),
            disclaimer: Some(ESTIMATES_DISCLAIMER.to_string()),
            fallback: None,
        },
    );

    let tip = if sections.tip.is_empty() {
        None
    } else {
        Some(sections.tip.clone())
    };
    slides.push(Slide::Mixed {
        icon: "💡".to_string(),
        title: "Next Steps".to_string(),
        summary: "Recommended immediate actions to begin implementation".to_string(),
        tip,
        bullets: NEXT_STEP_BULLETS.iter().map(|b| b.to_string()).collect(),
    });

    SlideDeck::new(slides)
}

/// Adds a bullet slide unless it has nothing to display.
fn push_bullet_slide(slides: &mut Vec<Slide>, slide: Slide) {
    if let Slide::Bullets {
        bullets, fallback, ..
    } = &slide
    {
        if bullets.is_empty() && fallback.is_none() {
            return;
        }
    }
    slides.push(slide);
}
