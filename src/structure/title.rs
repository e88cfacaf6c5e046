//! Title resolution from metadata or page layout.
//!
//! The resolver tries an ordered list of named strategies and takes the
//! first that produces a result. The order is a contract: metadata wins
//! over layout analysis, layout wins over plain-text scanning, and the
//! cleaned filename is the final fallback.

use regex::Regex;

use crate::model::{Document, Page, Span};

/// Spans shorter than this are never title candidates.
const MIN_TITLE_LEN: usize = 10;
/// Spans longer than this are never title candidates.
const MAX_TITLE_LEN: usize = 150;
/// Minimum font size for a layout title candidate.
const MIN_TITLE_FONT: f32 = 14.0;
/// A candidate span must start within the top fraction of the page.
const TOP_OF_PAGE_FRACTION: f32 = 0.4;
/// Number of leading pages scanned for layout candidates.
const TITLE_PAGE_SCAN: usize = 3;

/// Substrings that disqualify a span from being a title.
const BOILERPLATE: &[&str] = &[
    "page ", "figure ", "table ", "section ", "chapter ", "http", "www.", ".com", ".pdf",
    "appendix",
];

/// Words that mark a line or quoted phrase as title-like.
const TITLE_KEYWORDS: &[&str] = &["challenge", "hackathon", "introduction"];

/// Resolves a document's title from metadata or layout signals.
pub struct TitleResolver {
    quoted: Regex,
    quoted_title: Regex,
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleResolver {
    /// Create a resolver with its patterns compiled.
    pub fn new() -> Self {
        Self {
            // Straight or curly double quotes around a phrase.
            quoted: Regex::new(r#"["\u{201C}]([^"\u{201C}\u{201D}]+)["\u{201D}]"#).unwrap(),
            // A quoted phrase immediately followed by a capitalized word,
            // e.g. a named-event title written verbatim in the page text.
            quoted_title: Regex::new(
                r#"["\u{201C}]([^"\u{201C}\u{201D}]{4,100})["\u{201D}]\s+([A-Z][A-Za-z]+)"#,
            )
            .unwrap(),
        }
    }

    /// Resolve the document title. Pure with respect to the document:
    /// calling twice yields the identical string.
    pub fn resolve(&self, doc: &Document) -> String {
        type Strategy = fn(&TitleResolver, &Document) -> Option<String>;
        let strategies: &[(&str, Strategy)] = &[
            ("metadata", Self::from_metadata),
            ("verbatim-quoted", Self::from_verbatim_quote),
            ("layout", Self::from_layout),
            ("first-lines", Self::from_first_lines),
            ("longest-quote", Self::from_longest_quote),
        ];

        for (name, strategy) in strategies {
            if let Some(title) = strategy(self, doc) {
                log::debug!("title for {} resolved by {} strategy", doc.name, name);
                return title;
            }
        }

        doc.display_name()
    }

    /// Strategy 1: a non-blank metadata title wins outright.
    fn from_metadata(&self, doc: &Document) -> Option<String> {
        doc.metadata
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
    }

    /// Strategy 2: a verbatim quoted title in the page text.
    ///
    /// A quoted phrase followed by a capitalized title keyword is taken as
    /// the document's self-declared title and beats heuristic candidate
    /// scoring.
    fn from_verbatim_quote(&self, doc: &Document) -> Option<String> {
        for page in doc.pages.iter().take(TITLE_PAGE_SCAN) {
            for caps in self.quoted_title.captures_iter(&page.text) {
                let trailing = caps.get(2).map_or("", |m| m.as_str());
                if TITLE_KEYWORDS.contains(&trailing.to_lowercase().as_str()) {
                    let phrase = caps.get(1).map_or("", |m| m.as_str()).trim();
                    return Some(format!("\"{}\" {}", phrase, trailing));
                }
            }
        }
        None
    }

    /// Strategy 3: the best layout candidate from the first pages.
    fn from_layout(&self, doc: &Document) -> Option<String> {
        let mut candidates: Vec<(String, f32, f32, usize)> = Vec::new();

        for (index, page) in doc.pages.iter().take(TITLE_PAGE_SCAN).enumerate() {
            for span in page.spans() {
                if is_title_candidate(span, page) {
                    candidates.push((
                        span.text.trim().to_string(),
                        span.font_size,
                        span.top(),
                        index,
                    ));
                }
            }
        }

        // Largest font first, then highest on the page, then earliest page.
        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
                .then(a.3.cmp(&b.3))
        });

        for (text, _, _, page_index) in &candidates {
            if !looks_like_title(text) {
                continue;
            }
            if text.contains('"') || text.contains('\u{201C}') || text.contains('\u{201D}') {
                if let Some(full) = self.recover_quoted_title(&doc.pages[*page_index]) {
                    return Some(full);
                }
            }
            return Some(strip_quotes(text));
        }

        None
    }

    /// Recover the full quoted phrase a partial candidate belongs to,
    /// preferring keyword-bearing matches and the longest of those.
    fn recover_quoted_title(&self, page: &Page) -> Option<String> {
        self.quoted
            .captures_iter(&page.text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
            .filter(|m| m.chars().count() > MIN_TITLE_LEN && contains_title_keyword(m))
            .max_by_key(|m| m.chars().count())
    }

    /// Strategy 4: keyword-bearing lines near the top of page one.
    fn from_first_lines(&self, doc: &Document) -> Option<String> {
        let page = doc.pages.first()?;
        for line in page.text.lines().take(10) {
            let line = line.trim();
            let char_len = line.chars().count();
            if char_len > 15 && char_len < 100 && contains_title_keyword(line) {
                return Some(line.to_string());
            }
        }
        None
    }

    /// Strategy 5: the longest keyword-bearing quoted phrase on page one.
    fn from_longest_quote(&self, doc: &Document) -> Option<String> {
        let page = doc.pages.first()?;
        self.quoted
            .captures_iter(&page.text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
            .filter(|m| m.chars().count() > MIN_TITLE_LEN && contains_title_keyword(m))
            .max_by_key(|m| m.chars().count())
    }
}

/// Layout criteria: substantial text, large font, near the top of the
/// page, and free of boilerplate substrings.
fn is_title_candidate(span: &Span, page: &Page) -> bool {
    let text = span.text.trim();
    let char_len = text.chars().count();
    if char_len <= MIN_TITLE_LEN || char_len >= MAX_TITLE_LEN {
        return false;
    }
    if span.font_size <= MIN_TITLE_FONT {
        return false;
    }
    if span.top() >= page.height * TOP_OF_PAGE_FRACTION {
        return false;
    }
    let lower = text.to_lowercase();
    !BOILERPLATE.iter().any(|pat| lower.contains(pat))
}

/// A candidate qualifies if it carries a quote, starts with an uppercase
/// letter, or contains a title keyword.
fn looks_like_title(text: &str) -> bool {
    text.contains('"')
        || text.contains('\u{201C}')
        || text.contains('\u{201D}')
        || text.chars().next().is_some_and(|c| c.is_uppercase())
        || contains_title_keyword(text)
}

fn contains_title_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    TITLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

fn strip_quotes(text: &str) -> String {
    text.replace(['"', '\u{201C}', '\u{201D}'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Metadata};

    fn doc_with_span(text: &str, font_size: f32, y: f32) -> Document {
        let mut doc = Document::new("sample_doc.pdf");
        let mut page = Page::letter(1);
        let mut span = Span::new(text, font_size);
        span.bbox = (72.0, y, 400.0, y + font_size);
        page.lines.push(Line::from_spans(vec![span]));
        page.text = text.to_string();
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_metadata_title_wins() {
        let mut doc = doc_with_span("Some Giant Banner Text", 30.0, 50.0);
        doc.metadata = Metadata {
            title: Some("  Declared Title  ".to_string()),
            ..Default::default()
        };
        assert_eq!(TitleResolver::new().resolve(&doc), "Declared Title");
    }

    #[test]
    fn test_blank_metadata_title_is_ignored() {
        let mut doc = doc_with_span("A Perfectly Good Layout Title", 24.0, 50.0);
        doc.metadata.title = Some("   ".to_string());
        assert_eq!(
            TitleResolver::new().resolve(&doc),
            "A Perfectly Good Layout Title"
        );
    }

    #[test]
    fn test_layout_candidate_selected_by_font_size() {
        let mut doc = Document::new("doc.pdf");
        let mut page = Page::letter(1);
        let mut small = Span::new("A Subtitle Of Some Kind", 16.0);
        small.bbox = (72.0, 120.0, 400.0, 136.0);
        let mut big = Span::new("The Actual Document Title", 28.0);
        big.bbox = (72.0, 60.0, 400.0, 88.0);
        page.lines.push(Line::from_spans(vec![small]));
        page.lines.push(Line::from_spans(vec![big]));
        page.text = "The Actual Document Title\nA Subtitle Of Some Kind".to_string();
        doc.add_page(page);

        assert_eq!(
            TitleResolver::new().resolve(&doc),
            "The Actual Document Title"
        );
    }

    #[test]
    fn test_boilerplate_spans_excluded() {
        let doc = doc_with_span("Figure 3: results over time", 24.0, 50.0);
        // Falls through to the filename fallback.
        assert_eq!(TitleResolver::new().resolve(&doc), "sample doc");
    }

    #[test]
    fn test_spans_below_top_region_excluded() {
        // Letter page is 792pt tall; 0.4 * 792 = 316.8.
        let doc = doc_with_span("A Title Too Far Down The Page", 24.0, 400.0);
        assert_eq!(TitleResolver::new().resolve(&doc), "sample doc");
    }

    #[test]
    fn test_verbatim_quoted_title_beats_layout() {
        let mut doc = doc_with_span("Welcome To The Event Brochure", 30.0, 40.0);
        doc.pages[0].text =
            "Join the \u{201C}Shaping Tomorrow\u{201D} Challenge this year".to_string();
        assert_eq!(
            TitleResolver::new().resolve(&doc),
            "\"Shaping Tomorrow\" Challenge"
        );
    }

    #[test]
    fn test_first_lines_fallback() {
        let mut doc = Document::new("notes.pdf");
        let mut page = Page::letter(1);
        page.text = "some header\nIntroduction to Signal Processing\nbody text".to_string();
        doc.add_page(page);
        assert_eq!(
            TitleResolver::new().resolve(&doc),
            "Introduction to Signal Processing"
        );
    }

    #[test]
    fn test_filename_fallback() {
        let mut doc = Document::new("deep_learning-survey.pdf");
        doc.add_page(Page::letter(1));
        assert_eq!(TitleResolver::new().resolve(&doc), "deep learning survey");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let doc = doc_with_span("Reproducible Builds Handbook", 22.0, 40.0);
        let resolver = TitleResolver::new();
        assert_eq!(resolver.resolve(&doc), resolver.resolve(&doc));
    }
}
