//! Data model for documents, outlines, and scored sections.

mod document;
mod outline;
mod section;

pub use document::{Document, Line, Metadata, Page, Span, TocEntry};
pub use outline::{DocumentStructure, HeadingEntry, HeadingLevel};
pub use section::{RefinedExcerpt, ScoredSection, Section, MIN_SECTION_BODY_LEN};
