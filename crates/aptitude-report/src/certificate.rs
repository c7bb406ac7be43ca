//! Single-page PDF certificate.
//!
//! Layout is fixed: a centred title block followed by one left-aligned line
//! per category, each 0.3 in below the previous. Only the two standard
//! Helvetica faces are used, so nothing is embedded and identical inputs
//! produce identical bytes.

use std::path::Path;

use anyhow::{Context, Result};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use aptitude_core::config::CertificateConfig;
use aptitude_core::scoring::{ScoreMap, NOMINAL_MAX};

/// US letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

const INCH: f32 = 72.0;
const SCORES_TOP: f32 = 3.4 * INCH;
const SCORE_STEP: f32 = 0.3 * INCH;
const SCORE_LEFT: f32 = INCH;

/// Certificate wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateStyle {
    pub title: String,
    pub attribution: String,
}

impl Default for CertificateStyle {
    fn default() -> Self {
        CertificateConfig::default().into()
    }
}

impl From<CertificateConfig> for CertificateStyle {
    fn from(config: CertificateConfig) -> Self {
        Self {
            title: config.title,
            attribution: config.attribution,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> Name<'static> {
        match self {
            Font::Regular => Name(b"F1"),
            Font::Bold => Name(b"F2"),
        }
    }

    fn base_font(self) -> Name<'static> {
        match self {
            Font::Regular => Name(b"Helvetica"),
            Font::Bold => Name(b"Helvetica-Bold"),
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

/// One positioned line of text; `y` is the baseline measured from the
/// bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

impl TextLine {
    fn centred(text: &str, font: Font, size: f32, from_top: f32) -> Self {
        let width = text_width(text, font, size);
        Self {
            text: text.to_string(),
            font,
            size,
            x: (PAGE_WIDTH - width) / 2.0,
            y: PAGE_HEIGHT - from_top,
        }
    }
}

/// The score line shown for one category.
pub fn score_line(category: impl std::fmt::Display, score: f64) -> String {
    format!("{category}: {score:.2} / {NOMINAL_MAX}")
}

/// Position every line of the certificate.
pub fn layout(style: &CertificateStyle, name: &str, scores: &ScoreMap) -> Vec<TextLine> {
    let mut lines = vec![
        TextLine::centred(&style.title, Font::Bold, 24.0, 1.5 * INCH),
        TextLine::centred("Awarded to", Font::Regular, 14.0, 1.9 * INCH),
        TextLine::centred(name, Font::Bold, 20.0, 2.4 * INCH),
        TextLine::centred(&style.attribution, Font::Regular, 12.0, 2.8 * INCH),
    ];

    let mut y = PAGE_HEIGHT - SCORES_TOP;
    for (category, score) in scores.iter() {
        lines.push(TextLine {
            text: score_line(category, score),
            font: Font::Regular,
            size: 12.0,
            x: SCORE_LEFT,
            y,
        });
        y -= SCORE_STEP;
    }

    lines
}

/// Render a certificate with the default wording.
pub fn render_certificate(name: &str, scores: &ScoreMap) -> Vec<u8> {
    render_certificate_with(&CertificateStyle::default(), name, scores)
}

/// Render a certificate as PDF bytes.
pub fn render_certificate_with(style: &CertificateStyle, name: &str, scores: &ScoreMap) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let regular_id = Ref::new(5);
    let bold_id = Ref::new(6);
    let info_id = Ref::new(7);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources()
            .fonts()
            .pair(Font::Regular.resource_name(), regular_id)
            .pair(Font::Bold.resource_name(), bold_id);
    }

    for (font, id) in [(Font::Regular, regular_id), (Font::Bold, bold_id)] {
        pdf.type1_font(id)
            .base_font(font.base_font())
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.document_info(info_id).title(TextStr(&style.title));

    let mut content = Content::new();
    for line in layout(style, name, scores) {
        let encoded = encode_win_ansi(&line.text);
        content.begin_text();
        content.set_font(line.font.resource_name(), line.size);
        content.next_line(line.x, line.y);
        content.show(Str(&encoded));
        content.end_text();
    }
    pdf.stream(content_id, &content.finish());

    pdf.finish()
}

/// `IQ_Certificate_<name>.pdf`, spaces replaced by underscores.
///
/// Path separators are replaced too so the result is always a bare file name.
pub fn certificate_file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("IQ_Certificate_{stem}.pdf")
}

/// Render and write a certificate to `path`.
pub fn write_certificate(
    path: &Path,
    style: &CertificateStyle,
    name: &str,
    scores: &ScoreMap,
) -> Result<()> {
    let bytes = render_certificate_with(style, name, scores);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write certificate to {}", path.display()))?;
    Ok(())
}

/// Map text onto WinAnsi (Latin-1 range); anything else becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7e | 0xa0..=0xff) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Advance width of `text` in points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|byte| match byte {
            0x20..=0x7e => u32::from(font.widths()[usize::from(byte - 0x20)]),
            // Latin-1 letters: average lowercase advance
            _ => 556,
        })
        .sum();
    units as f32 * size / 1000.0
}

// Standard Type 1 metrics for codes 0x20..=0x7e, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

#[cfg(test)]
mod tests {
    use super::*;
    use aptitude_core::model::Category;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn sample_scores() -> ScoreMap {
        ScoreMap::from_iter([
            (Category::Analytical, 4.0),
            (Category::Social, 3.3333),
            (Category::CreativeTechnical, 12.0),
        ])
    }

    #[test]
    fn renders_a_pdf_with_score_lines() {
        let scores = ScoreMap::from_iter([(Category::Analytical, 4.0)]);
        let pdf = render_certificate("Ada", &scores);

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(contains(&pdf, b"(Analytical: 4.00 / 5)"));
        assert!(contains(&pdf, b"(Certificate of Assessment)"));
        assert!(contains(&pdf, b"(Ada)"));
        assert!(contains(&pdf, b"/Helvetica-Bold"));
    }

    #[test]
    fn page_carries_media_box_and_fonts() {
        let pdf = render_certificate("Ada", &sample_scores());
        assert!(contains(&pdf, b"/Type /Page"));
        assert!(contains(&pdf, b"/MediaBox [0 0 612 792]"));
        assert!(contains(&pdf, b"/F1 5 0 R"));
        assert!(contains(&pdf, b"/F2 6 0 R"));
        assert!(contains(&pdf, b"/Contents 4 0 R"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_certificate("Ada Lovelace", &sample_scores());
        let second = render_certificate("Ada Lovelace", &sample_scores());
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_range_scores_are_printed_as_is() {
        let pdf = render_certificate("Ada", &sample_scores());
        assert!(contains(&pdf, b"(Creative-Technical: 12.00 / 5)"));
        assert!(contains(&pdf, b"(Social: 3.33 / 5)"));
    }

    #[test]
    fn layout_positions() {
        let lines = layout(&CertificateStyle::default(), "Ada", &sample_scores());
        assert_eq!(lines.len(), 7);

        let title = &lines[0];
        assert_eq!(title.font, Font::Bold);
        assert_eq!(title.size, 24.0);
        assert!((title.y - (PAGE_HEIGHT - 108.0)).abs() < 1e-3);

        assert_eq!(lines[1].text, "Awarded to");
        assert_eq!(lines[2].text, "Ada");
        assert_eq!(lines[2].size, 20.0);
        assert_eq!(lines[3].text, "Tested with Aptitude");

        // centred lines are symmetric about the page centre
        for line in &lines[..4] {
            let width = text_width(&line.text, line.font, line.size);
            assert!((line.x + width / 2.0 - PAGE_WIDTH / 2.0).abs() < 1e-3);
        }

        let scores = &lines[4..];
        assert_eq!(scores[0].text, "Analytical: 4.00 / 5");
        assert_eq!(scores[2].text, "Creative-Technical: 12.00 / 5");
        assert!((scores[0].y - (PAGE_HEIGHT - 3.4 * 72.0)).abs() < 1e-3);
        for pair in scores.windows(2) {
            assert_eq!(pair[0].x, 72.0);
            assert!((pair[0].y - pair[1].y - 21.6).abs() < 1e-3);
        }
    }

    #[test]
    fn custom_wording() {
        let style = CertificateStyle {
            title: "Certificate of Completion".into(),
            attribution: "Issued by the workshop".into(),
        };
        let pdf = render_certificate_with(&style, "Grace", &ScoreMap::new());
        assert!(contains(&pdf, b"(Certificate of Completion)"));
        assert!(contains(&pdf, b"(Issued by the workshop)"));
    }

    #[test]
    fn file_name_convention() {
        assert_eq!(
            certificate_file_name("Ada Lovelace"),
            "IQ_Certificate_Ada_Lovelace.pdf"
        );
        assert_eq!(certificate_file_name("Tester"), "IQ_Certificate_Tester.pdf");
        assert_eq!(certificate_file_name("a/b"), "IQ_Certificate_a_b.pdf");
    }

    #[test]
    fn win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Zoë"), vec![b'Z', b'o', 0xeb]);
        assert_eq!(encode_win_ansi("Łukasz"), b"?ukasz".to_vec());
    }

    #[test]
    fn helvetica_widths() {
        assert!((text_width("Ada", Font::Regular, 10.0) - 17.79).abs() < 1e-3);
        assert!(text_width("W", Font::Bold, 12.0) > text_width("i", Font::Bold, 12.0));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certs").join(certificate_file_name("Ada"));
        write_certificate(&path, &CertificateStyle::default(), "Ada", &sample_scores()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
