//! Document model providers.
//!
//! The classification core consumes [`Document`] values and never touches
//! source file formats itself. A provider turns one on-disk file into a
//! document model: pages with plain text, span-level layout lines, optional
//! metadata title, and an optional table of contents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Document, Line, Metadata, Page, Span, TocEntry};

/// Style-flag bit marking a bold span in upstream page-model dumps.
const BOLD_FLAG_BIT: u32 = 1 << 4;

/// Abstract interface for loading document models.
pub trait DocumentProvider {
    /// Load the document model from a file.
    fn load(&self, path: &Path) -> Result<Document>;

    /// File extension (without dot) this provider handles.
    fn supported_extension(&self) -> &str;
}

/// Provider for serde document-model files: one JSON file per document.
///
/// Span records may carry either a `bold` boolean or a raw `flags` integer
/// (bit 4 = bold), matching the upstream page-model dump format.
#[derive(Debug, Default)]
pub struct JsonProvider;

impl JsonProvider {
    /// Create a JSON document-model provider.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentProvider for JsonProvider {
    fn load(&self, path: &Path) -> Result<Document> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let data = fs::read_to_string(path)?;
        let record: DocumentRecord =
            serde_json::from_str(&data).map_err(|e| Error::DocumentModel {
                name: name.clone(),
                message: e.to_string(),
            })?;

        Ok(record.into_document(name))
    }

    fn supported_extension(&self) -> &str {
        "json"
    }
}

/// Collect document-model files from a directory, sorted by name so runs
/// are reproducible.
pub fn collect_document_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidInputDir(dir.display().to_string()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(Error::InvalidInputDir(format!(
            "{} contains no .{} document files",
            dir.display(),
            extension
        )));
    }

    Ok(files)
}

// ---------------------------------------------------------------------------
// Serde records for the on-disk document model
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    metadata: MetadataRecord,
    #[serde(default)]
    pages: Vec<PageRecord>,
    #[serde(default)]
    toc: Vec<TocRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageRecord {
    #[serde(default)]
    number: Option<u32>,
    #[serde(default = "default_page_width")]
    width: f32,
    #[serde(default = "default_page_height")]
    height: f32,
    #[serde(default)]
    text: String,
    #[serde(default)]
    lines: Vec<LineRecord>,
}

fn default_page_width() -> f32 {
    612.0
}

fn default_page_height() -> f32 {
    792.0
}

#[derive(Debug, Deserialize)]
struct LineRecord {
    #[serde(default)]
    spans: Vec<SpanRecord>,
}

#[derive(Debug, Deserialize)]
struct SpanRecord {
    text: String,
    #[serde(alias = "font_size")]
    size: f32,
    #[serde(default)]
    flags: Option<u32>,
    #[serde(default)]
    bold: Option<bool>,
    #[serde(default)]
    bbox: Option<[f32; 4]>,
}

#[derive(Debug, Deserialize)]
struct TocRecord {
    level: u32,
    title: String,
    page: u32,
}

impl DocumentRecord {
    fn into_document(self, fallback_name: String) -> Document {
        let name = self.name.unwrap_or(fallback_name);
        let mut doc = Document::new(name);
        doc.metadata = Metadata {
            title: self.metadata.title,
            author: self.metadata.author,
            page_count: self.pages.len() as u32,
        };
        doc.toc = self
            .toc
            .into_iter()
            .map(|t| TocEntry {
                level: t.level,
                title: t.title,
                page: t.page,
            })
            .collect();

        for (i, record) in self.pages.into_iter().enumerate() {
            let number = record.number.unwrap_or(i as u32 + 1);
            let mut page = Page::new(number, record.width, record.height);
            page.text = record.text;
            page.lines = record
                .lines
                .into_iter()
                .map(|line| {
                    Line::from_spans(
                        line.spans
                            .into_iter()
                            .map(|span| span.into_span(number))
                            .collect(),
                    )
                })
                .collect();
            doc.add_page(page);
        }

        doc
    }
}

impl SpanRecord {
    fn into_span(self, page: u32) -> Span {
        let bold = self
            .bold
            .unwrap_or_else(|| self.flags.is_some_and(|f| f & BOLD_FLAG_BIT != 0));
        let bbox = self.bbox.unwrap_or([0.0; 4]);
        Span {
            text: self.text,
            font_size: self.size,
            bold,
            bbox: (bbox[0], bbox[1], bbox[2], bbox[3]),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_doc(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_minimal_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_doc(
            dir.path(),
            "mini.json",
            r#"{"pages": [{"text": "hello world"}]}"#,
        );

        let doc = JsonProvider::new().load(&path).unwrap();
        assert_eq!(doc.name, "mini.json");
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[0].text, "hello world");
        assert!(!doc.has_toc());
    }

    #[test]
    fn test_load_flags_map_to_bold() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_doc(
            dir.path(),
            "bold.json",
            r#"{"pages": [{"lines": [{"spans": [
                {"text": "Heading", "size": 16.0, "flags": 20},
                {"text": "body", "size": 10.0, "flags": 0},
                {"text": "explicit", "size": 10.0, "bold": true}
            ]}]}]}"#,
        );

        let doc = JsonProvider::new().load(&path).unwrap();
        let spans: Vec<&Span> = doc.pages[0].spans().collect();
        assert!(spans[0].bold);
        assert!(!spans[1].bold);
        assert!(spans[2].bold);
    }

    #[test]
    fn test_load_invalid_json_reports_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_doc(dir.path(), "broken.json", "{not json");

        let err = JsonProvider::new().load(&path).unwrap_err();
        match err {
            Error::DocumentModel { name, .. } => assert_eq!(name, "broken.json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collect_via_provider_extension() {
        let dir = tempfile::tempdir().unwrap();
        write_temp_doc(dir.path(), "doc.json", r#"{"pages": []}"#);
        write_temp_doc(dir.path(), "doc.yaml", "pages: []");

        let provider = JsonProvider::new();
        let files = collect_document_files(dir.path(), provider.supported_extension()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("doc.json"));
    }

    #[test]
    fn test_collect_document_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_temp_doc(dir.path(), "b.json", "{}");
        write_temp_doc(dir.path(), "a.json", "{}");
        write_temp_doc(dir.path(), "notes.txt", "skip me");

        let files = collect_document_files(dir.path(), "json").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_collect_rejects_missing_or_empty_dir() {
        let missing = Path::new("/definitely/not/here");
        assert!(matches!(
            collect_document_files(missing, "json"),
            Err(Error::InvalidInputDir(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            collect_document_files(dir.path(), "json"),
            Err(Error::InvalidInputDir(_))
        ));
    }
}
