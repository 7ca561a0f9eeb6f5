//! PPTX deck exporter.
//!
//! Implements the `DeckExporter` port by packaging the laid-out slides as an
//! Office Open XML presentation: one slide part per deck slide plus the
//! minimal master/layout/theme scaffolding, zipped into a `.pptx` archive.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::deck::SlideDeck;
use crate::ports::{DeckExporter, ExportError, ExportedDeck};

use super::layout::{layout_slide, Align, SlideLayout, TextBox, SLIDE_HEIGHT_IN, SLIDE_WIDTH_IN};

/// English Metric Units per inch.
const EMU_PER_INCH: f64 = 914_400.0;

const XMLNS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const XMLNS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const XMLNS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// Fixed-layout PPTX exporter.
#[derive(Debug, Clone)]
pub struct PptxExporter {
    base_filename: String,
}

impl Default for PptxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PptxExporter {
    /// Creates an exporter with the default download filename.
    pub fn new() -> Self {
        Self {
            base_filename: "project-assessment".to_string(),
        }
    }

    /// Overrides the base filename (without extension).
    pub fn with_base_filename(mut self, base: impl Into<String>) -> Self {
        self.base_filename = base.into();
        self
    }
}

impl DeckExporter for PptxExporter {
    fn export(&self, deck: &SlideDeck) -> Result<ExportedDeck, ExportError> {
        let layouts: Vec<SlideLayout> = deck.iter().map(layout_slide).collect();

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut add = |name: &str, content: String| -> Result<(), ExportError> {
            writer
                .start_file(name, options)
                .map_err(|e| ExportError::archive(e.to_string()))?;
            writer
                .write_all(content.as_bytes())
                .map_err(|e| ExportError::archive(e.to_string()))
        };

        add("[Content_Types].xml", content_types_xml(layouts.len()))?;
        add("_rels/.rels", package_rels_xml())?;
        add("ppt/presentation.xml", presentation_xml(layouts.len()))?;
        add(
            "ppt/_rels/presentation.xml.rels",
            presentation_rels_xml(layouts.len()),
        )?;
        add("ppt/slideMasters/slideMaster1.xml", slide_master_xml())?;
        add(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            slide_master_rels_xml(),
        )?;
        add("ppt/slideLayouts/slideLayout1.xml", slide_layout_xml())?;
        add(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            slide_layout_rels_xml(),
        )?;
        add("ppt/theme/theme1.xml", theme_xml())?;

        for (index, layout) in layouts.iter().enumerate() {
            let number = index + 1;
            add(&format!("ppt/slides/slide{}.xml", number), slide_xml(layout))?;
            add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels_xml(),
            )?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| ExportError::archive(e.to_string()))?;

        Ok(ExportedDeck::pptx(cursor.into_inner(), &self.base_filename))
    }
}

fn emu(inches: f32) -> i64 {
    (f64::from(inches) * EMU_PER_INCH).round() as i64
}

fn content_types_xml(slide_count: usize) -> String {
    let mut overrides = String::new();
    for number in 1..=slide_count {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>",
            number
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         {}\
         </Types>",
        overrides
    )
}

fn package_rels_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
     </Relationships>"
        .to_string()
}

fn presentation_xml(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for number in 1..=slide_count {
        slide_ids.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            255 + number,
            1 + number
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst>{ids}</p:sldIdLst>\
         <p:sldSz cx=\"{cx}\" cy=\"{cy}\"/>\
         <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>",
        a = XMLNS_A,
        r = XMLNS_R,
        p = XMLNS_P,
        ids = slide_ids,
        cx = emu(SLIDE_WIDTH_IN),
        cy = emu(SLIDE_HEIGHT_IN),
    )
}

fn presentation_rels_xml(slide_count: usize) -> String {
    let mut rels = String::from(
        "<Relationship Id=\"rId1\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" \
         Target=\"slideMasters/slideMaster1.xml\"/>",
    );
    for number in 1..=slide_count {
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" \
             Target=\"slides/slide{}.xml\"/>",
            1 + number,
            number
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{}</Relationships>",
        rels
    )
}

fn empty_sp_tree() -> &'static str {
    "<p:spTree>\
     <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
     <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
     </p:spTree>"
}

fn slide_master_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldMaster xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:cSld>{tree}</p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
         accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
         accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         </p:sldMaster>",
        a = XMLNS_A,
        r = XMLNS_R,
        p = XMLNS_P,
        tree = empty_sp_tree(),
    )
}

fn slide_master_rels_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn slide_layout_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sldLayout xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\" type=\"blank\">\
         <p:cSld>{tree}</p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sldLayout>",
        a = XMLNS_A,
        r = XMLNS_R,
        p = XMLNS_P,
        tree = empty_sp_tree(),
    )
}

fn slide_layout_rels_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
     </Relationships>"
        .to_string()
}

fn slide_rels_xml() -> String {
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
     <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
     <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout1.xml\"/>\
     </Relationships>"
        .to_string()
}

/// Minimal theme part; slides carry explicit colors so only the scaffold
/// matters here.
fn theme_xml() -> String {
    let color_scheme = "<a:clrScheme name=\"Advisor\">\
         <a:dk1><a:srgbClr val=\"1F2937\"/></a:dk1>\
         <a:lt1><a:srgbClr val=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"6B7280\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"F9FAFB\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4F46E5\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"10B981\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"F59E0B\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"6B7280\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"4F46E5\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"10B981\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"4F46E5\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"6B7280\"/></a:folHlink>\
         </a:clrScheme>";

    let font_scheme = "<a:fontScheme name=\"Advisor\">\
         <a:majorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>";

    let fill = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    let line = "<a:ln w=\"9525\"><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln>";
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <a:theme xmlns:a=\"{a}\" name=\"Advisor\">\
         <a:themeElements>\
         {colors}{fonts}\
         <a:fmtScheme name=\"Advisor\">\
         <a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>\
         <a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>\
         <a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>\
         <a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>\
         </a:fmtScheme>\
         </a:themeElements>\
         </a:theme>",
        a = XMLNS_A,
        colors = color_scheme,
        fonts = font_scheme,
        fill = fill,
        line = line,
        effect = effect,
    )
}

fn slide_xml(layout: &SlideLayout) -> String {
    let background = layout
        .background
        .map(|color| {
            format!(
                "<p:bg><p:bgPr><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>\
                 <a:effectLst/></p:bgPr></p:bg>",
                color
            )
        })
        .unwrap_or_default();

    let mut shapes = String::new();
    for (index, text_box) in layout.boxes.iter().enumerate() {
        shapes.push_str(&shape_xml(text_box, index as u32 + 2));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld xmlns:a=\"{a}\" xmlns:r=\"{r}\" xmlns:p=\"{p}\">\
         <p:cSld>{bg}\
         <p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
         <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
         <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>\
         {shapes}\
         </p:spTree>\
         </p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\
         </p:sld>",
        a = XMLNS_A,
        r = XMLNS_R,
        p = XMLNS_P,
        bg = background,
        shapes = shapes,
    )
}

fn shape_xml(text_box: &TextBox, id: u32) -> String {
    let mut paragraphs = String::new();
    for text in &text_box.paragraphs {
        paragraphs.push_str(&paragraph_xml(text, text_box));
    }

    format!(
        "<p:sp>\
         <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"TextBox {id}\"/>\
         <p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr>\
         <a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\
         </p:spPr>\
         <p:txBody>\
         <a:bodyPr wrap=\"square\" anchor=\"t\"/>\
         <a:lstStyle/>\
         {paragraphs}\
         </p:txBody>\
         </p:sp>",
        id = id,
        x = emu(text_box.x),
        y = emu(text_box.y),
        cx = emu(text_box.w),
        cy = emu(text_box.h),
        paragraphs = paragraphs,
    )
}

fn paragraph_xml(text: &str, text_box: &TextBox) -> String {
    let align = match text_box.align {
        Align::Left => String::new(),
        Align::Center => " algn=\"ctr\"".to_string(),
    };
    let bullet_props = if text_box.bullet {
        "<a:buFont typeface=\"Arial\"/><a:buChar char=\"\u{2022}\"/>"
    } else {
        "<a:buNone/>"
    };

    if text.is_empty() {
        return format!(
            "<a:p><a:pPr{}>{}</a:pPr><a:endParaRPr lang=\"en-US\"/></a:p>",
            align, bullet_props
        );
    }

    let bold = if text_box.bold { " b=\"1\"" } else { "" };
    let italic = if text_box.italic { " i=\"1\"" } else { "" };

    format!(
        "<a:p><a:pPr{align}>{bullets}</a:pPr>\
         <a:r><a:rPr lang=\"en-US\" sz=\"{size}\"{bold}{italic} dirty=\"0\">\
         <a:solidFill><a:srgbClr val=\"{color}\"/></a:solidFill>\
         </a:rPr><a:t>{text}</a:t></a:r></a:p>",
        align = align,
        bullets = bullet_props,
        size = text_box.font_size * 100,
        bold = bold,
        italic = italic,
        color = text_box.color,
        text = escape(text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::extract_sections;
    use crate::domain::deck::build_deck;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_deck() -> SlideDeck {
        let sections = extract_sections(
            "## Recommended PM Approach\n- Use Agile\n- Short sprints\n\
             ## Key Templates Needed\n- Kanban board\n\
             ## Quick Implementation Tip\nStart with a pilot.\n",
        );
        build_deck(&sections, "Build a food delivery app", "June 1, 2026")
    }

    fn archive_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    /// Collects all `a:t` text runs from a slide part, the same way the
    /// deck would be read back by a presentation parser.
    fn slide_texts(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut texts = Vec::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"a:t" => in_text_run = true,
                Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_text_run = false,
                Ok(Event::Text(e)) if in_text_run => {
                    texts.push(e.unescape().unwrap().to_string());
                }
                Ok(Event::Eof) => break,
                Err(e) => panic!("invalid slide XML: {}", e),
                _ => {}
            }
        }

        texts
    }

    #[test]
    fn export_packages_one_part_per_slide() {
        let deck = sample_deck();
        let exported = PptxExporter::new().export(&deck).unwrap();

        let names = archive_names(&exported.content);
        let slide_parts = names
            .iter()
            .filter(|n| n.starts_with("ppt/slides/slide") && !n.contains("_rels"))
            .count();

        // Cover, overview, approach, templates, next steps survive filtering.
        assert_eq!(deck.len(), 5);
        assert_eq!(slide_parts, deck.len());
        assert!(names.contains(&"[Content_Types].xml".to_string()));
        assert!(names.contains(&"ppt/presentation.xml".to_string()));
        assert!(names.contains(&"ppt/theme/theme1.xml".to_string()));
    }

    #[test]
    fn exported_metadata_is_pptx() {
        let exported = PptxExporter::new()
            .with_base_filename("assessment")
            .export(&sample_deck())
            .unwrap();

        assert_eq!(exported.filename, "assessment.pptx");
        assert!(exported.content_type.contains("presentationml"));
        // ZIP local file header magic.
        assert_eq!(&exported.content[..2], b"PK");
    }

    #[test]
    fn cover_slide_carries_background_and_title() {
        let exported = PptxExporter::new().export(&sample_deck()).unwrap();
        let xml = read_entry(&exported.content, "ppt/slides/slide1.xml");

        assert!(xml.contains("<p:bg>"));
        assert!(xml.contains("val=\"4F46E5\""));
        assert!(slide_texts(&xml).contains(&"Project Assessment Results".to_string()));
    }

    #[test]
    fn bullet_slide_renders_each_bullet_as_paragraph() {
        let exported = PptxExporter::new().export(&sample_deck()).unwrap();
        let xml = read_entry(&exported.content, "ppt/slides/slide3.xml");

        let texts = slide_texts(&xml);
        assert!(texts.contains(&"Use Agile".to_string()));
        assert!(texts.contains(&"Short sprints".to_string()));
        assert!(xml.contains("<a:buChar char=\"\u{2022}\"/>"));
    }

    #[test]
    fn presentation_lists_every_slide_id() {
        let deck = sample_deck();
        let exported = PptxExporter::new().export(&deck).unwrap();
        let xml = read_entry(&exported.content, "ppt/presentation.xml");

        for number in 1..=deck.len() {
            assert!(xml.contains(&format!("r:id=\"rId{}\"", 1 + number)));
        }
        assert!(xml.contains("cx=\"9144000\" cy=\"5143500\""));
    }

    #[test]
    fn text_is_xml_escaped() {
        let sections = extract_sections("## Potential Risks\n- Vendor <delays> & rework\n");
        let deck = build_deck(&sections, "desc", "June 1, 2026");
        let exported = PptxExporter::new().export(&deck).unwrap();

        let xml = read_entry(&exported.content, "ppt/slides/slide3.xml");
        assert!(xml.contains("Vendor &lt;delays&gt; &amp; rework"));
        assert!(slide_texts(&xml).contains(&"Vendor <delays> & rework".to_string()));
    }

    #[test]
    fn emu_conversion_is_exact_for_half_inch() {
        assert_eq!(emu(0.5), 457_200);
        assert_eq!(emu(10.0), 9_144_000);
    }
}
