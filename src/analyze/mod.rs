//! Persona-driven analysis: section segmentation, ranking, and refinement.

mod rank;
mod refine;
mod sections;

pub use rank::rank_sections;
pub use refine::SubsectionRefiner;
pub use sections::SectionSegmenter;

/// Tunable limits for the analysis pipeline.
///
/// The defaults match the documented output contract: 20 ranked sections,
/// 10 of them refined, 5 key points each, 15 retained excerpts, and
/// 500-character section text in the output.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Number of ranked sections to retain
    pub top_sections: usize,
    /// Number of top-ranked sections fed to the refiner
    pub refine_sections: usize,
    /// Key points extracted per refined section
    pub key_points_per_section: usize,
    /// Number of refined excerpts to retain
    pub top_subsections: usize,
    /// Character budget for section text in the output
    pub section_text_len: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            top_sections: 20,
            refine_sections: 10,
            key_points_per_section: 5,
            top_subsections: 15,
            section_text_len: 500,
        }
    }
}

impl AnalyzeOptions {
    /// Create options with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ranked sections to retain.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Set the number of refined excerpts to retain.
    pub fn with_top_subsections(mut self, n: usize) -> Self {
        self.top_subsections = n;
        self
    }

    /// Set the output character budget for section text.
    pub fn with_section_text_len(mut self, n: usize) -> Self {
        self.section_text_len = n;
        self
    }
}
