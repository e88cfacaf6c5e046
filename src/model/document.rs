//! Document-level types produced by a document model provider.

use serde::{Deserialize, Serialize};

/// A run of text sharing one font and style, with position metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Whether the span's style flags mark it as bold
    pub bold: bool,

    /// Bounding box as (x0, y0, x1, y1) in page coordinates
    pub bbox: (f32, f32, f32, f32),

    /// Page number the span appears on (1-indexed)
    pub page: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            bbox: (0.0, 0.0, 0.0, 0.0),
            page: 1,
        }
    }

    /// Top edge of the span's bounding box.
    pub fn top(&self) -> f32 {
        self.bbox.1
    }
}

/// A line of text composed of one or more spans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Combined text of all spans, space-joined and trimmed.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for span in &self.spans {
            let trimmed = span.text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(trimmed);
        }
        result
    }

    /// Largest font size across the line's spans.
    pub fn max_font_size(&self) -> f32 {
        self.spans.iter().fold(0.0, |max, s| max.max(s.font_size))
    }

    /// True if any span in the line is bold.
    pub fn is_bold(&self) -> bool {
        self.spans.iter().any(|s| s.bold)
    }
}

/// A single page in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Plain text content of the page
    pub text: String,

    /// Text lines with span-level layout information
    pub lines: Vec<Line>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            text: String::new(),
            lines: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size.
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Iterate over all spans on the page.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }

    /// Check if the page has no text content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.lines.is_empty()
    }
}

/// An author-declared table-of-contents entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    /// Nesting level (1 = top)
    pub level: u32,

    /// Entry title
    pub title: String,

    /// Target page number (1-indexed)
    pub page: u32,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    #[serde(default)]
    pub title: Option<String>,

    /// Document author
    #[serde(default)]
    pub author: Option<String>,

    /// Total number of pages
    #[serde(default)]
    pub page_count: u32,
}

/// A document as produced by a document model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document name (source file name)
    pub name: String,

    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages in reading order
    pub pages: Vec<Page>,

    /// Author-declared table of contents, if any
    #[serde(default)]
    pub toc: Vec<TocEntry>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: Metadata::default(),
            pages: Vec::new(),
            toc: Vec::new(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document declares a table of contents.
    pub fn has_toc(&self) -> bool {
        !self.toc.is_empty()
    }

    /// Document name with the file extension stripped and
    /// separators replaced by spaces.
    pub fn display_name(&self) -> String {
        let stem = match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => self.name.as_str(),
        };
        stem.replace(['_', '-'], " ")
    }
}
