//! # doclens
//!
//! Heuristic document structure classification and persona-driven
//! relevance ranking.
//!
//! doclens does two things with a document model (pages of plain text
//! plus span-level layout information):
//!
//! - **Structure extraction**: resolve a title and classify an H1-H3
//!   heading outline from layout signals or a declared table of contents.
//! - **Persona analysis**: given a reader persona and a job-to-be-done,
//!   segment pages into sections, rank them by relevance across a small
//!   document batch, and condense the top sections into refined excerpts.
//!
//! The engine is deliberately non-statistical: fixed heuristic thresholds
//! and keyword tables, no learned models. Identical input always yields
//! identical output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doclens::{AnalysisPipeline, StructurePipeline};
//! use doclens::provider::collect_document_files;
//! use std::path::Path;
//!
//! fn main() -> doclens::Result<()> {
//!     let files = collect_document_files(Path::new("input"), "json")?;
//!
//!     // Title + outline per document
//!     let structures = StructurePipeline::new().run(&files);
//!     for (name, structure) in &structures {
//!         println!("{}: {} headings", name, structure.outline.len());
//!     }
//!
//!     // Ranked sections for a persona
//!     let report = AnalysisPipeline::new().run(
//!         &files,
//!         "Researcher",
//!         "understand machine learning trends",
//!     )?;
//!     println!("{} sections ranked", report.extracted_sections.len());
//!     Ok(())
//! }
//! ```

pub mod analyze;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod provider;
pub mod score;
pub mod structure;
pub mod text;

// Re-export commonly used types
pub use analyze::{AnalyzeOptions, SectionSegmenter, SubsectionRefiner};
pub use error::{Error, Result};
pub use model::{
    Document, DocumentStructure, HeadingEntry, HeadingLevel, Line, Metadata, Page, RefinedExcerpt,
    ScoredSection, Section, Span, TocEntry,
};
pub use output::{AnalysisReport, ExtractedSection, JsonFormat, RunMetadata, SubsectionEntry};
pub use pipeline::{analyze_documents, AnalysisPipeline, StructurePipeline};
pub use provider::{DocumentProvider, JsonProvider};
pub use score::RelevanceScorer;
pub use structure::{extract_structure, HeadingClassifier, TitleResolver};
