//! Document structure classification: title resolution and heading detection.

mod headings;
mod title;

pub use headings::HeadingClassifier;
pub use title::TitleResolver;

use crate::model::{Document, DocumentStructure};

/// Extract the full structure (title + outline) of a document.
pub fn extract_structure(doc: &Document) -> DocumentStructure {
    let title = TitleResolver::new().resolve(doc);
    let outline = HeadingClassifier::new().classify(doc);
    DocumentStructure { title, outline }
}
