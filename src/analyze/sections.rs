//! Section segmentation from per-page plain text.
//!
//! Each page is split into lines; a heading-shaped line shorter than 100
//! characters starts a new section. Sections never span pages, and a
//! section is only emitted once its body exceeds the minimum length.

use regex::Regex;

use crate::model::{Document, Section, MIN_SECTION_BODY_LEN};

/// Heading lines at or beyond this length do not start a section.
const MAX_HEADER_LINE_LEN: usize = 100;

/// Title given to text preceding the first detected heading on a page.
const LEADING_SECTION_TITLE: &str = "Introduction";

/// Splits page text into titled sections.
pub struct SectionSegmenter {
    header_patterns: Vec<Regex>,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    /// Create a segmenter with its heading patterns compiled.
    pub fn new() -> Self {
        Self {
            header_patterns: vec![
                // ALL CAPS line
                Regex::new(r"^[A-Z][A-Z\s]+$").unwrap(),
                // Numbered section
                Regex::new(r"^\d+\.?\s+[A-Z].*").unwrap(),
                // Title-case phrase
                Regex::new(r"^[A-Z][a-z]+(\s+[A-Z][a-z]+)*\s*$").unwrap(),
                // Explicit chapter/section/part
                Regex::new(r"^(Chapter|Section|Part)\s+\d+").unwrap(),
            ],
        }
    }

    /// Segment every page of a document into sections.
    pub fn segment(&self, doc: &Document) -> Vec<Section> {
        let mut sections = Vec::new();
        for page in &doc.pages {
            self.segment_page(&doc.name, page.number, &page.text, &mut sections);
        }
        log::debug!("{}: segmented into {} sections", doc.name, sections.len());
        sections
    }

    /// Segment one page's plain text, appending emitted sections.
    fn segment_page(&self, document: &str, page: u32, text: &str, out: &mut Vec<Section>) {
        let mut title = LEADING_SECTION_TITLE.to_string();
        let mut body = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.is_section_header(line) {
                emit(document, page, &title, &body, out);
                title = line.to_string();
                body.clear();
            } else {
                body.push_str(line);
                body.push(' ');
            }
        }

        emit(document, page, &title, &body, out);
    }

    /// A line starts a new section when it matches a heading shape and is
    /// short enough to be a header rather than prose.
    fn is_section_header(&self, line: &str) -> bool {
        line.chars().count() < MAX_HEADER_LINE_LEN
            && self.header_patterns.iter().any(|p| p.is_match(line))
    }
}

/// Emit the accumulated section if its body clears the minimum length.
fn emit(document: &str, page: u32, title: &str, body: &str, out: &mut Vec<Section>) {
    let body = body.trim();
    if body.chars().count() > MIN_SECTION_BODY_LEN {
        out.push(Section {
            document: document.to_string(),
            page,
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
