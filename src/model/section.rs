//! Section types produced by segmentation, ranking, and refinement.

use serde::{Deserialize, Serialize};

/// Minimum accumulated body length for a section to be emitted.
pub const MIN_SECTION_BODY_LEN: usize = 100;

/// A titled, contiguous block of page text.
///
/// Sections are page-scoped: a heading never spans pages. A section is
/// only emitted when its body exceeds [`MIN_SECTION_BODY_LEN`] characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Source document name
    pub document: String,

    /// Page the section starts on (1-indexed)
    pub page: u32,

    /// Section title (heading line, or "Introduction" for leading text)
    pub title: String,

    /// Accumulated body text
    pub body: String,
}

/// A section with its relevance score and, once retained, its rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSection {
    /// The underlying section
    #[serde(flatten)]
    pub section: Section,

    /// Relevance score in [0, 1]
    pub score: f32,

    /// 1-based dense rank among the retained top-K
    pub rank: u32,
}

/// A refined excerpt from a top-ranked section.
///
/// `relevance_score` is a per-section countdown integer, not the [0, 1]
/// relevance score; it is only comparable within the producing batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinedExcerpt {
    /// Source document name
    pub document: String,

    /// Page the excerpt came from (1-indexed)
    pub page: u32,

    /// Condensed, persona-relevant text
    pub refined_text: String,

    /// Countdown score within the producing section
    pub relevance_score: i32,
}
