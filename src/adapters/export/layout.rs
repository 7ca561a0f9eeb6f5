//! Fixed slide layouts for file export.
//!
//! Every slide variant maps to a fixed set of positioned text boxes on a
//! 10in x 5.625in canvas. The coordinates are per slide type, not per
//! content: the layout never moves boxes around based on how much text the
//! model produced.

use crate::domain::assessment::strip_bold;
use crate::domain::deck::{Accent, Slide, FOOTER_NOTE};

/// Slide canvas width in inches (16:9).
pub const SLIDE_WIDTH_IN: f32 = 10.0;
/// Slide canvas height in inches (16:9).
pub const SLIDE_HEIGHT_IN: f32 = 5.625;

// Theme colors (hex RGB without '#').
const PRIMARY: &str = "4F46E5";
const SECONDARY: &str = "6B7280";
const ACCENT_GREEN: &str = "10B981";
const WARNING: &str = "F59E0B";
const BODY_TEXT: &str = "1F2937";
const COVER_TITLE: &str = "FFFFFF";
const COVER_SUBTITLE: &str = "E0E7FF";
const COVER_DATE: &str = "C7D2FE";

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One positioned text frame on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    /// Paragraphs in the frame; bullet frames get one paragraph per bullet.
    pub paragraphs: Vec<String>,
    /// Position and size in inches.
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Font size in points.
    pub font_size: u32,
    pub bold: bool,
    pub italic: bool,
    /// Text color as hex RGB.
    pub color: &'static str,
    pub align: Align,
    /// Render paragraphs with bullet markers.
    pub bullet: bool,
}

impl TextBox {
    fn new(text: impl Into<String>, x: f32, y: f32, w: f32, h: f32, font_size: u32) -> Self {
        let text = text.into();
        Self {
            paragraphs: text.split('\n').map(str::to_string).collect(),
            x,
            y,
            w,
            h,
            font_size,
            bold: false,
            italic: false,
            color: BODY_TEXT,
            align: Align::Left,
            bullet: false,
        }
    }

    fn bullets(items: &[String], x: f32, y: f32, w: f32, h: f32, font_size: u32) -> Self {
        Self {
            paragraphs: items.to_vec(),
            bullet: true,
            ..Self::new(String::new(), x, y, w, h, font_size)
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    fn center(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// A laid-out slide: optional background fill plus positioned text frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    /// Background fill as hex RGB, if any.
    pub background: Option<&'static str>,
    pub boxes: Vec<TextBox>,
}

/// Lays out one slide as positioned text boxes.
pub fn layout_slide(slide: &Slide) -> SlideLayout {
    match slide {
        Slide::Cover {
            title,
            subtitle,
            date,
        } => SlideLayout {
            background: Some(PRIMARY),
            boxes: vec![
                TextBox::new(title.clone(), 0.5, 1.5, 9.0, 1.5, 44)
                    .bold()
                    .color(COVER_TITLE)
                    .center(),
                TextBox::new(subtitle.clone(), 0.5, 3.2, 9.0, 0.5, 20)
                    .color(COVER_SUBTITLE)
                    .center(),
                TextBox::new(date.clone(), 0.5, 5.0, 9.0, 0.3, 14)
                    .color(COVER_DATE)
                    .center(),
            ],
        },

        Slide::Content {
            title,
            summary: _,
            body,
            ..
        } => SlideLayout {
            background: None,
            boxes: vec![
                TextBox::new(title.clone(), 0.5, 0.4, 9.0, 0.6, 32)
                    .bold()
                    .color(PRIMARY),
                TextBox::new("Project Context", 0.5, 1.2, 9.0, 0.3, 16).bold(),
                TextBox::new(body.clone(), 0.5, 1.6, 9.0, 3.4, 14).color(SECONDARY),
                footer_box(),
            ],
        },

        Slide::Bullets {
            icon,
            title,
            summary,
            bullets,
            accent,
            disclaimer,
            fallback,
        } => {
            let heading = format!("{} {}", icon, title);
            let mut boxes = vec![TextBox::new(heading, 0.5, 0.4, 9.0, 0.6, 32)
                .bold()
                .color(title_color(*accent))];

            // The disclaimer band shifts the body up and restyles the summary.
            if let Some(disclaimer) = disclaimer {
                boxes.push(
                    TextBox::new(summary.clone(), 0.5, 1.1, 9.0, 0.4, 11)
                        .bold()
                        .italic()
                        .color(WARNING),
                );
                boxes.push(TextBox::bullets(bullets, 0.5, 1.7, 9.0, 2.5, 14));
                boxes.push(
                    TextBox::new(format!("Note: {}", disclaimer), 0.5, 4.3, 9.0, 0.8, 10)
                        .italic()
                        .color(WARNING),
                );
            } else {
                boxes.push(
                    TextBox::new(summary.clone(), 0.5, 1.1, 9.0, 0.3, 12)
                        .italic()
                        .color(SECONDARY),
                );
                if bullets.is_empty() {
                    if let Some(text) = fallback {
                        boxes.push(TextBox::new(strip_bold(text), 0.5, 1.6, 9.0, 3.5, 14));
                    }
                } else {
                    boxes.push(TextBox::bullets(bullets, 0.5, 1.6, 9.0, 3.5, 14));
                }
            }

            boxes.push(footer_box());
            SlideLayout {
                background: None,
                boxes,
            }
        }

        Slide::Mixed {
            icon,
            title,
            summary,
            tip,
            bullets,
        } => {
            let heading = format!("{} {}", icon, title);
            let mut boxes = vec![
                TextBox::new(heading, 0.5, 0.4, 9.0, 0.6, 32)
                    .bold()
                    .color(PRIMARY),
                TextBox::new(summary.clone(), 0.5, 1.1, 9.0, 0.3, 12)
                    .italic()
                    .color(SECONDARY),
            ];

            if let Some(tip) = tip {
                boxes.push(TextBox::new("Quick Implementation Tip:", 0.5, 1.6, 9.0, 0.3, 16).bold());
                boxes.push(TextBox::new(strip_bold(tip), 0.5, 2.0, 9.0, 1.2, 13).color(SECONDARY));
            }

            boxes.push(TextBox::bullets(bullets, 0.5, 3.4, 9.0, 1.6, 14));
            boxes.push(footer_box());

            SlideLayout {
                background: None,
                boxes,
            }
        }
    }
}

fn title_color(accent: Option<Accent>) -> &'static str {
    match accent {
        Some(Accent::Green) => ACCENT_GREEN,
        Some(Accent::Amber) => WARNING,
        // The estimates slide keeps the primary title despite its blue tag.
        Some(Accent::Blue) | None => PRIMARY,
    }
}

fn footer_box() -> TextBox {
    TextBox::new(FOOTER_NOTE, 0.5, 5.3, 9.0, 0.3, 10)
        .italic()
        .color(SECONDARY)
        .center()
}
