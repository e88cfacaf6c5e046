//! Output contracts: JSON shapes for structure extraction and persona
//! analysis.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{RefinedExcerpt, ScoredSection};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any output value to JSON.
pub fn to_json<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

/// Run metadata attached to an analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Names of the documents that were analyzed
    pub input_documents: Vec<String>,
    /// Persona the analysis was run for
    pub persona: String,
    /// Job-to-be-done the analysis was run for
    pub job_to_be_done: String,
    /// ISO-8601 timestamp of the run
    pub processing_timestamp: String,
}

/// One ranked section in the analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Source document name
    pub document: String,
    /// Page the section starts on (1-indexed)
    pub page_number: u32,
    /// Section title
    pub section_title: String,
    /// Dense 1-based rank
    pub importance_rank: u32,
    /// Section text, truncated to the output budget
    pub text: String,
}

impl ExtractedSection {
    /// Build an output entry from a ranked section, truncating the body.
    pub fn from_ranked(scored: &ScoredSection, text_len: usize) -> Self {
        Self {
            document: scored.section.document.clone(),
            page_number: scored.section.page,
            section_title: scored.section.title.clone(),
            importance_rank: scored.rank,
            text: scored.section.body.chars().take(text_len).collect(),
        }
    }
}

/// One refined excerpt in the analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionEntry {
    /// Source document name
    pub document: String,
    /// Page the excerpt came from (1-indexed)
    pub page_number: u32,
    /// Condensed, persona-relevant text
    pub refined_text: String,
    /// Countdown relevance score
    pub relevance_score: i32,
}

impl From<&RefinedExcerpt> for SubsectionEntry {
    fn from(excerpt: &RefinedExcerpt) -> Self {
        Self {
            document: excerpt.document.clone(),
            page_number: excerpt.page,
            refined_text: excerpt.refined_text.clone(),
            relevance_score: excerpt.relevance_score,
        }
    }
}

/// The persona-analysis output for one document batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Run metadata
    pub metadata: RunMetadata,
    /// Ranked sections across the batch
    pub extracted_sections: Vec<ExtractedSection>,
    /// Refined excerpts across the batch
    pub subsection_analysis: Vec<SubsectionEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    #[test]
    fn test_extracted_section_truncates_text() {
        let scored = ScoredSection {
            section: Section {
                document: "a.pdf".to_string(),
                page: 3,
                title: "Methods".to_string(),
                body: "x".repeat(800),
            },
            score: 0.7,
            rank: 2,
        };
        let entry = ExtractedSection::from_ranked(&scored, 500);
        assert_eq!(entry.text.len(), 500);
        assert_eq!(entry.importance_rank, 2);
        assert_eq!(entry.page_number, 3);
    }

    #[test]
    fn test_truncation_is_char_safe() {
        let scored = ScoredSection {
            section: Section {
                document: "a.pdf".to_string(),
                page: 1,
                title: "T".to_string(),
                body: "é".repeat(600),
            },
            score: 0.1,
            rank: 1,
        };
        let entry = ExtractedSection::from_ranked(&scored, 500);
        assert_eq!(entry.text.chars().count(), 500);
    }

    #[test]
    fn test_report_json_shape() {
        let report = AnalysisReport {
            metadata: RunMetadata {
                input_documents: vec!["a.pdf".to_string()],
                persona: "Researcher".to_string(),
                job_to_be_done: "review".to_string(),
                processing_timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            },
            extracted_sections: vec![],
            subsection_analysis: vec![],
        };
        let json = to_json(&report, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"input_documents\""));
        assert!(json.contains("\"job_to_be_done\""));
        assert!(json.contains("\"extracted_sections\""));
        assert!(json.contains("\"subsection_analysis\""));

        let compact = to_json(&report, JsonFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
    }
}
