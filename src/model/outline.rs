//! Outline types: heading levels and the per-document structure output.

use serde::{Deserialize, Serialize};

/// Heading level, capped at three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
}

impl HeadingLevel {
    /// Build a level from a numeric depth, capping at 3.
    pub fn from_depth(depth: u32) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth of the level (1-3).
    pub fn depth(&self) -> u32 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A detected heading, in document order of detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level (H1-H3)
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page the heading appears on (1-indexed)
    pub page: u32,
}

impl HeadingEntry {
    /// Create a new heading entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The structure-extraction result for one document: a title plus
/// the ordered heading outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Resolved document title
    pub title: String,

    /// Headings in document order
    pub outline: Vec<HeadingEntry>,
}
