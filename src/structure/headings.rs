//! Heading detection from a declared table of contents or page layout.
//!
//! TOC mode is preferred: author-declared entries are trusted after URL and
//! plausibility filtering. Without a TOC, the classifier derives font-size
//! thresholds from the document's size distribution and classifies lines in
//! a second pass, with numbering depth overriding the font-based level.

use regex::Regex;

use crate::model::{Document, HeadingEntry, HeadingLevel};

/// Lines longer than this are never headings.
const MAX_HEADING_LEN: usize = 150;
/// Pass-2 lines outside (3, 200) characters are skipped outright.
const MIN_LINE_LEN: usize = 3;
const MAX_LINE_LEN: usize = 200;

/// Keywords that force a heading to the top level.
const TOP_LEVEL_KEYWORDS: &[&str] = &[
    "introduction",
    "overview",
    "conclusion",
    "summary",
    "references",
    "acknowledgements",
    "table of contents",
    "revision history",
];

/// Compiled patterns shared by the TOC and layout modes.
struct HeadingPatterns {
    url: Regex,
    tld: Regex,
    exclude: Vec<Regex>,
    positive: Vec<Regex>,
    structural: Vec<Regex>,
    numbered_top: Regex,
    numbered_sub: Regex,
    numbered_subsub: Regex,
}

impl HeadingPatterns {
    fn new() -> Self {
        Self {
            url: Regex::new(r"https?://").unwrap(),
            tld: Regex::new(r"[a-zA-Z0-9.-]+\.(com|org|net|edu|gov|mil|int)").unwrap(),
            exclude: vec![
                Regex::new(r"^\d+$").unwrap(),
                Regex::new(r"^page \d+").unwrap(),
                Regex::new(r"^\d+\.\d+$").unwrap(),
                Regex::new(r"^figure \d+").unwrap(),
                Regex::new(r"^table \d+").unwrap(),
                Regex::new(r"^\w+@\w+\.\w+").unwrap(),
                Regex::new(r"^https?://").unwrap(),
                Regex::new(r"^www\.").unwrap(),
                Regex::new(r"\.com").unwrap(),
                Regex::new(r"\.git$").unwrap(),
                Regex::new(r"github\.com").unwrap(),
                Regex::new(r"://.*\.git").unwrap(),
            ],
            positive: vec![
                Regex::new(r"^\d+\.?\s+\w+").unwrap(),
                Regex::new(r"(?i)^chapter \d+").unwrap(),
                Regex::new(r"(?i)^section \d+").unwrap(),
                Regex::new(r"(?i)^round \d+[a-z]?:?").unwrap(),
                Regex::new(r"^[A-Z][a-z]+(\s+[A-Z][a-z]+)*:?$").unwrap(),
                Regex::new(r"^[A-Z]{2,}").unwrap(),
                Regex::new(r"(?i)challenge|hackathon|appendix").unwrap(),
            ],
            structural: vec![
                Regex::new(r"^\d+\.?\s+").unwrap(),
                Regex::new(r"^(chapter|section|part|appendix)\s+\d+").unwrap(),
                Regex::new(r"^(introduction|overview|conclusion|summary|references|acknowledgements)")
                    .unwrap(),
                Regex::new(r"^(table of contents|revision history)").unwrap(),
                Regex::new(r":\s*$").unwrap(),
            ],
            numbered_top: Regex::new(r"^\d+\.\s+[A-Z]").unwrap(),
            numbered_sub: Regex::new(r"^\d+\.\d+\s+").unwrap(),
            numbered_subsub: Regex::new(r"^\d+\.\d+\.\d+\s+").unwrap(),
        }
    }
}

/// Font-size thresholds for H1/H2/H3, derived from the distribution of
/// sizes observed in the document.
#[derive(Debug, Clone, Copy)]
struct SizeThresholds {
    h1: f32,
    h2: f32,
    h3: f32,
}

/// Classifies the heading outline of a document.
pub struct HeadingClassifier {
    patterns: HeadingPatterns,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingClassifier {
    /// Create a classifier with its patterns compiled.
    pub fn new() -> Self {
        Self {
            patterns: HeadingPatterns::new(),
        }
    }

    /// Produce the heading outline for a document.
    pub fn classify(&self, doc: &Document) -> Vec<HeadingEntry> {
        if doc.has_toc() {
            self.from_toc(doc)
        } else {
            self.from_layout(doc)
        }
    }

    /// TOC mode: emit one entry per declared item, filtered.
    fn from_toc(&self, doc: &Document) -> Vec<HeadingEntry> {
        doc.toc
            .iter()
            .filter_map(|entry| {
                let title = entry.title.trim();
                if self.is_url_like(title) || !self.is_likely_heading(title) {
                    return None;
                }
                Some(HeadingEntry::new(
                    HeadingLevel::from_depth(entry.level.min(3)),
                    title,
                    entry.page,
                ))
            })
            .collect()
    }

    /// Layout mode: derive size thresholds in one pass over all spans,
    /// then classify lines in a second pass.
    fn from_layout(&self, doc: &Document) -> Vec<HeadingEntry> {
        let sizes: Vec<f32> = doc
            .pages
            .iter()
            .flat_map(|p| p.spans())
            .map(|s| s.font_size)
            .filter(|&s| s > 0.0)
            .collect();

        let Some(thresholds) = derive_thresholds(&sizes) else {
            return Vec::new();
        };
        log::debug!(
            "{}: heading thresholds h1={} h2={} h3={}",
            doc.name,
            thresholds.h1,
            thresholds.h2,
            thresholds.h3
        );

        let mut headings = Vec::new();
        for page in &doc.pages {
            for line in &page.lines {
                let text = line.text();
                if self.is_url_like(&text) {
                    continue;
                }
                let char_len = text.chars().count();
                if char_len <= MIN_LINE_LEN || char_len >= MAX_LINE_LEN {
                    continue;
                }
                if !self.is_likely_heading(&text) {
                    continue;
                }

                let max_size = line.max_font_size();
                let bold = line.is_bold();
                let candidate =
                    max_size >= thresholds.h3 || bold || self.has_structural_pattern(&text);
                if candidate {
                    let level = self.determine_level(&text, max_size, thresholds);
                    headings.push(HeadingEntry::new(level, text, page.number));
                }
            }
        }
        headings
    }

    /// Level assignment: font size picks the base level, numbering depth
    /// and top-level keywords override it.
    fn determine_level(&self, text: &str, font_size: f32, t: SizeThresholds) -> HeadingLevel {
        let base: u32 = if font_size >= t.h1 {
            1
        } else if font_size >= t.h2 {
            2
        } else {
            3
        };

        let lower = text.trim().to_lowercase();
        let depth = if TOP_LEVEL_KEYWORDS.iter().any(|kw| lower.contains(kw))
            || self.patterns.numbered_top.is_match(text)
        {
            base.min(1)
        } else if self.patterns.numbered_sub.is_match(text) {
            2
        } else if self.patterns.numbered_subsub.is_match(text) {
            3
        } else {
            base
        };

        HeadingLevel::from_depth(depth.min(3))
    }

    /// Structural patterns that qualify a line as a heading candidate even
    /// without a large font or bold styling.
    fn has_structural_pattern(&self, text: &str) -> bool {
        let lower = text.trim().to_lowercase();
        self.patterns.structural.iter().any(|p| p.is_match(&lower))
    }

    fn is_url_like(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.patterns.url.is_match(&lower)
            || lower.contains("github.com")
            || lower.ends_with(".git")
    }

    /// Plausibility filter shared by both modes: rejects page numbers,
    /// captions, addresses, over-long lines, and full sentences; accepts
    /// recognizable heading shapes.
    fn is_likely_heading(&self, text: &str) -> bool {
        let text = text.trim();
        let lower = text.to_lowercase();

        if self.patterns.exclude.iter().any(|p| p.is_match(&lower)) {
            return false;
        }
        if self.patterns.url.is_match(&lower)
            || lower.contains("www.")
            || lower.contains(".com")
            || lower.contains(".git")
            || lower.contains("github.com")
            || self.patterns.tld.is_match(&lower)
        {
            return false;
        }

        if text.chars().count() > MAX_HEADING_LEN {
            return false;
        }
        // More than one period and period-terminated: likely a sentence.
        if text.ends_with('.') && text.matches('.').count() > 1 {
            return false;
        }

        if self.patterns.positive.iter().any(|p| p.is_match(text)) {
            return true;
        }

        let word_count = text.split_whitespace().count();
        if text.ends_with(':') && word_count <= 8 {
            return true;
        }

        word_count <= 12 && !text.ends_with(',') && !text.ends_with('.')
    }
}

/// Derive H1/H2/H3 thresholds from the observed font sizes. Returns `None`
/// when the document has no sized text at all.
fn derive_thresholds(sizes: &[f32]) -> Option<SizeThresholds> {
    if sizes.is_empty() {
        return None;
    }

    let mut distinct = sizes.to_vec();
    distinct.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    distinct.dedup();

    Some(match distinct.len() {
        n if n >= 3 => SizeThresholds {
            h1: distinct[0],
            h2: distinct[1],
            h3: distinct[2],
        },
        2 => SizeThresholds {
            h1: distinct[0],
            h2: distinct[1],
            h3: distinct[1] - 1.0,
        },
        _ => {
            let avg = sizes.iter().sum::<f32>() / sizes.len() as f32;
            SizeThresholds {
                h1: avg + 4.0,
                h2: avg + 2.0,
                h3: avg,
            }
        }
    })
}
