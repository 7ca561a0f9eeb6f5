//! Interactive step-through deck viewer.
//!
//! A cursor over an immutable deck plus a plain-text rendering of each slide.
//! The viewer never mutates or re-derives the model; it only walks it.

use super::model::{Slide, SlideDeck, FOOTER_NOTE};

/// Step-through cursor over a slide deck.
#[derive(Debug)]
pub struct DeckViewer<'a> {
    deck: &'a SlideDeck,
    index: usize,
}

impl<'a> DeckViewer<'a> {
    /// Creates a viewer positioned on the first slide.
    pub fn new(deck: &'a SlideDeck) -> Self {
        Self { deck, index: 0 }
    }

    /// The slide under the cursor, if the deck is non-empty.
    pub fn current(&self) -> Option<&'a Slide> {
        self.deck.get(self.index)
    }

    /// One-based position and total count, for "Slide X of N" displays.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.deck.len())
    }

    /// Advances to the next slide. Returns false when already on the last.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.deck.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Steps back to the previous slide. Returns false when on the first.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Plain-text rendering of the slide under the cursor.
    pub fn render_current(&self) -> String {
        self.current().map(render_slide).unwrap_or_default()
    }
}

/// Renders one slide as plain text.
pub fn render_slide(slide: &Slide) -> String {
    let mut out = String::new();

    match slide {
        Slide::Cover {
            title,
            subtitle,
            date,
        } => {
            out.push_str(&format!("=== {} ===\n", title));
            out.push_str(subtitle);
            out.push('\n');
            out.push_str(date);
            out.push('\n');
        }
        Slide::Content {
            icon,
            title,
            summary,
            body,
        } => {
            push_header(&mut out, icon, title, summary);
            out.push_str(body);
            out.push('\n');
            push_footer(&mut out);
        }
        Slide::Bullets {
            icon,
            title,
            summary,
            bullets,
            disclaimer,
            fallback,
            ..
        } => {
            push_header(&mut out, icon, title, summary);
            if bullets.is_empty() {
                if let Some(text) = fallback {
                    out.push_str(text);
                    out.push('\n');
                }
            } else {
                push_bullets(&mut out, bullets);
            }
            if let Some(text) = disclaimer {
                out.push_str(&format!("\nNote: {}\n", text));
            }
            push_footer(&mut out);
        }
        Slide::Mixed {
            icon,
            title,
            summary,
            tip,
            bullets,
        } => {
            push_header(&mut out, icon, title, summary);
            if let Some(tip) = tip {
                out.push_str("Quick Implementation Tip:\n");
                out.push_str(tip);
                out.push_str("\n\n");
            }
            push_bullets(&mut out, bullets);
            push_footer(&mut out);
        }
    }

    out
}

fn push_header(out: &mut String, icon: &str, title: &str, summary: &str) {
    out.push_str(&format!("{} {}\n{}\n\n", icon, title, summary));
}

fn push_bullets(out: &mut String, bullets: &[String]) {
    for bullet in bullets {
        out.push_str(&format!("  • {}\n", bullet));
    }
}

fn push_footer(out: &mut String) {
    out.push_str(&format!("\n{}\n", FOOTER_NOTE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::SectionMap;
    use crate::domain::deck::build_deck;

    fn sample_deck() -> SlideDeck {
        let sections = SectionMap {
            approach: "- Use Agile".to_string(),
            risks: "- Scope creep\n- Vendor delay".to_string(),
            tip: "Start with a pilot.".to_string(),
            ..Default::default()
        };
        build_deck(&sections, "Build an app", "June 1, 2026")
    }

    mod navigation {
        use super::*;

        #[test]
        fn starts_on_cover() {
            let deck = sample_deck();
            let viewer = DeckViewer::new(&deck);

            assert_eq!(viewer.position(), (1, deck.len()));
            assert!(matches!(viewer.current(), Some(Slide::Cover { .. })));
        }

        #[test]
        fn next_and_prev_move_the_cursor() {
            let deck = sample_deck();
            let mut viewer = DeckViewer::new(&deck);

            assert!(viewer.next());
            assert_eq!(viewer.position().0, 2);
            assert!(viewer.prev());
            assert_eq!(viewer.position().0, 1);
        }

        #[test]
        fn navigation_clamps_at_both_ends() {
            let deck = sample_deck();
            let mut viewer = DeckViewer::new(&deck);

            assert!(!viewer.prev());
            assert_eq!(viewer.position().0, 1);

            while viewer.next() {}
            let (last, total) = viewer.position();
            assert_eq!(last, total);
            assert!(!viewer.next());
            assert_eq!(viewer.position().0, total);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn cover_renders_title_subtitle_and_date() {
            let deck = sample_deck();
            let viewer = DeckViewer::new(&deck);
            let text = viewer.render_current();

            assert!(text.contains("Project Assessment Results"));
            assert!(text.contains("AI-Powered Project Management Recommendations"));
            assert!(text.contains("June 1, 2026"));
            assert!(!text.contains(FOOTER_NOTE));
        }

        #[test]
        fn bullet_slide_renders_each_bullet_and_footer() {
            let deck = sample_deck();
            let risks = deck
                .iter()
                .find(|s| s.title() == "Potential Risks to Monitor")
                .unwrap();
            let text = render_slide(risks);

            assert!(text.contains("• Scope creep"));
            assert!(text.contains("• Vendor delay"));
            assert!(text.contains(FOOTER_NOTE));
        }

        #[test]
        fn fallback_text_renders_when_bullets_are_empty() {
            let slide = Slide::Bullets {
                icon: "📋".to_string(),
                title: "Recommended Approach".to_string(),
                summary: "s".to_string(),
                bullets: vec![],
                accent: None,
                disclaimer: None,
                fallback: Some("Prose recommendation.".to_string()),
            };

            let text = render_slide(&slide);
            assert!(text.contains("Prose recommendation."));
        }

        #[test]
        fn tip_renders_with_heading() {
            let deck = sample_deck();
            let next_steps = deck.slides().last().unwrap();
            let text = render_slide(next_steps);

            assert!(text.contains("Quick Implementation Tip:"));
            assert!(text.contains("Start with a pilot."));
        }
    }
}
