//! Batch pipelines for structure extraction and persona analysis.
//!
//! Processing is strictly sequential: one document is fully loaded and
//! classified before the next begins. Per-document failures are skipped in
//! structure mode and excluded in analysis mode; an analysis batch only
//! fails when every document fails. There are no retries — every operation
//! is local and deterministic, so a failure would recur identically.

use std::path::PathBuf;
use std::time::Instant;

use crate::analyze::{rank_sections, AnalyzeOptions, SectionSegmenter, SubsectionRefiner};
use crate::error::{Error, Result};
use crate::model::{Document, DocumentStructure};
use crate::output::{AnalysisReport, ExtractedSection, RunMetadata, SubsectionEntry};
use crate::provider::{DocumentProvider, JsonProvider};
use crate::score::RelevanceScorer;
use crate::structure::{HeadingClassifier, TitleResolver};

/// Expected analysis batch size; out-of-range batches are logged, not
/// rejected.
const EXPECTED_BATCH: std::ops::RangeInclusive<usize> = 3..=10;

/// Structure-extraction pipeline: title + outline per document.
pub struct StructurePipeline {
    provider: Box<dyn DocumentProvider>,
    resolver: TitleResolver,
    classifier: HeadingClassifier,
}

impl Default for StructurePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl StructurePipeline {
    /// Create a pipeline backed by the JSON document-model provider.
    pub fn new() -> Self {
        Self::with_provider(Box::new(JsonProvider::new()))
    }

    /// Create a pipeline with a custom provider.
    pub fn with_provider(provider: Box<dyn DocumentProvider>) -> Self {
        Self {
            provider,
            resolver: TitleResolver::new(),
            classifier: HeadingClassifier::new(),
        }
    }

    /// Extract the structure of one already-loaded document.
    pub fn extract(&self, doc: &Document) -> DocumentStructure {
        DocumentStructure {
            title: self.resolver.resolve(doc),
            outline: self.classifier.classify(doc),
        }
    }

    /// Process a batch of document files.
    ///
    /// Failed documents are logged and skipped; partial success is the
    /// normal outcome. Returns (document name, structure) pairs in input
    /// order.
    pub fn run(&self, paths: &[PathBuf]) -> Vec<(String, DocumentStructure)> {
        let started = Instant::now();
        let mut results = Vec::new();

        for path in paths {
            let doc = match self.provider.load(path) {
                Ok(doc) => doc,
                Err(e) => {
                    log::error!("failed to process {}: {}", path.display(), e);
                    continue;
                }
            };
            log::info!("processing {}", doc.name);
            let structure = self.extract(&doc);
            results.push((doc.name, structure));
        }

        log::info!(
            "structure extraction finished: {}/{} documents in {:.2}s",
            results.len(),
            paths.len(),
            started.elapsed().as_secs_f64()
        );
        results
    }
}

/// Persona-analysis pipeline: ranked sections and refined excerpts
/// across a document batch.
pub struct AnalysisPipeline {
    provider: Box<dyn DocumentProvider>,
    options: AnalyzeOptions,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisPipeline {
    /// Create a pipeline backed by the JSON document-model provider.
    pub fn new() -> Self {
        Self::with_provider(Box::new(JsonProvider::new()))
    }

    /// Create a pipeline with a custom provider.
    pub fn with_provider(provider: Box<dyn DocumentProvider>) -> Self {
        Self {
            provider,
            options: AnalyzeOptions::default(),
        }
    }

    /// Override the analysis limits.
    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    /// Process a batch of document files for the given persona and job.
    ///
    /// Documents that fail to load are excluded; the batch fails only if
    /// every document fails or the persona/job input is blank.
    pub fn run(&self, paths: &[PathBuf], persona: &str, job: &str) -> Result<AnalysisReport> {
        validate_inputs(persona, job)?;

        if !EXPECTED_BATCH.contains(&paths.len()) {
            log::warn!(
                "expected {}-{} documents, found {}",
                EXPECTED_BATCH.start(),
                EXPECTED_BATCH.end(),
                paths.len()
            );
        }

        let started = Instant::now();
        let mut documents = Vec::new();
        for path in paths {
            match self.provider.load(path) {
                Ok(doc) => {
                    log::info!("extracting content from {}", doc.name);
                    documents.push(doc);
                }
                Err(e) => {
                    log::error!("failed to extract content from {}: {}", path.display(), e);
                }
            }
        }

        let report = analyze_documents(&documents, persona, job, &self.options)?;
        log::info!(
            "persona analysis finished: {} documents in {:.2}s",
            documents.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(report)
    }
}

/// Analyze already-loaded documents against a persona/job pair.
pub fn analyze_documents(
    documents: &[Document],
    persona: &str,
    job: &str,
    options: &AnalyzeOptions,
) -> Result<AnalysisReport> {
    validate_inputs(persona, job)?;
    if documents.is_empty() {
        return Err(Error::EmptyBatch);
    }

    let scorer = RelevanceScorer::new(persona, job);
    let segmenter = SectionSegmenter::new();

    let mut sections = Vec::new();
    for doc in documents {
        sections.extend(segmenter.segment(doc));
    }

    let ranked = rank_sections(sections, &scorer, options.top_sections);
    let refiner = SubsectionRefiner::new(&scorer);
    let excerpts = refiner.refine(
        &ranked,
        options.refine_sections,
        options.key_points_per_section,
        options.top_subsections,
    );

    Ok(AnalysisReport {
        metadata: RunMetadata {
            input_documents: documents.iter().map(|d| d.name.clone()).collect(),
            persona: persona.to_string(),
            job_to_be_done: job.to_string(),
            processing_timestamp: chrono::Local::now().to_rfc3339(),
        },
        extracted_sections: ranked
            .iter()
            .map(|s| ExtractedSection::from_ranked(s, options.section_text_len))
            .collect(),
        subsection_analysis: excerpts.iter().map(SubsectionEntry::from).collect(),
    })
}

/// Persona and job must be non-blank before any document is touched.
fn validate_inputs(persona: &str, job: &str) -> Result<()> {
    if persona.trim().is_empty() {
        return Err(Error::MissingInput("persona".to_string()));
    }
    if job.trim().is_empty() {
        return Err(Error::MissingInput("job-to-be-done".to_string()));
    }
    Ok(())
}
