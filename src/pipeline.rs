use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::aggregate::PageAggregator;
use crate::core::config::PipelineConfig;
use crate::core::error::OutlineError;
use crate::core::model::DocumentOutline;
use crate::export::{Exporter, JsonExporter};
use crate::layout::{extract_regions, DetectorResult, LayoutDetector, ScriptDetector};
use crate::ocr::{Recognizer, ScriptRecognizer, TextRegionRecognizer};
use crate::outline::OutlineClassifier;

/// Long-lived detector and recognizer handles plus the outline stages that use them.
#[derive(Debug)]
pub struct OutlinePipeline<D, R> {
    detector: D,
    recognizer: TextRegionRecognizer<R>,
    classifier: OutlineClassifier,
    exporter: JsonExporter,
}

#[derive(Debug)]
pub struct ExportedOutline {
    pub source: PathBuf,
    pub output: PathBuf,
    pub entries: usize,
}

#[derive(Debug)]
pub struct FailedDocument {
    pub source: PathBuf,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<ExportedOutline>,
    pub failed: Vec<FailedDocument>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<D: LayoutDetector, R: Recognizer> OutlinePipeline<D, R> {
    /// Fails when the outline band fractions are out of order.
    pub fn new(config: PipelineConfig, detector: D, recognizer: R) -> Result<Self> {
        let recognizer =
            TextRegionRecognizer::new(recognizer).with_mismatch(config.outline.mismatch);
        Ok(Self {
            detector,
            recognizer,
            classifier: OutlineClassifier::new(config.outline)?,
            exporter: JsonExporter::new(config.output_dir),
        })
    }

    /// Recognizes every page result, grouping fragments by source document.
    pub fn aggregate(&self, results: &[DetectorResult]) -> Result<PageAggregator> {
        let mut aggregator = PageAggregator::new();
        for result in results {
            let regions = extract_regions(result);
            let fragments = self
                .recognizer
                .recognize_page(&result.image, &regions, result.page_index)
                .with_context(|| {
                    format!(
                        "recognition failed on page {} of {}",
                        result.page_index,
                        result.input_path.display()
                    )
                })?;
            debug!(
                document = %result.input_path.display(),
                page = result.page_index,
                fragments = fragments.len(),
                "aggregated page"
            );
            aggregator.extend(&result.input_path, fragments);
        }
        Ok(aggregator)
    }

    pub fn outline_document(&self, document: &Path) -> Result<Option<DocumentOutline>> {
        let mut results = self
            .detector
            .detect(document)
            .with_context(|| format!("layout detection failed for {}", document.display()))?;
        for result in &mut results {
            let named = !result.input_path.as_os_str().is_empty();
            if named && !same_document(&result.input_path, document) {
                return Err(OutlineError::ForeignDetectorResult {
                    expected: document.to_path_buf(),
                    actual: result.input_path.clone(),
                    page: result.page_index,
                }
                .into());
            }
            result.input_path = document.to_path_buf();
        }

        let aggregator = self.aggregate(&results)?;
        let fragments = aggregator.fragments(document).unwrap_or_default();
        let outline = self.classifier.classify(fragments);
        if let Some(outline) = &outline {
            info!(
                document = %document.display(),
                title = %outline.title,
                entries = outline.outline.len(),
                "classified outline"
            );
        }
        Ok(outline)
    }

    /// Outlines and exports each document; a failing document does not stop the batch.
    pub fn run(&self, documents: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        for document in documents {
            match self.process_one(document) {
                Ok(exported) => report.succeeded.push(exported),
                Err(error) => {
                    warn!(document = %document.display(), "skipping document: {error:#}");
                    report.failed.push(FailedDocument {
                        source: document.clone(),
                        error,
                    });
                }
            }
        }
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "batch finished"
        );
        report
    }

    fn process_one(&self, document: &Path) -> Result<ExportedOutline> {
        let outline = self.outline_document(document)?;
        let output = self.exporter.export(document, outline.as_ref())?;
        Ok(ExportedOutline {
            source: document.to_path_buf(),
            output,
            entries: outline.map_or(0, |outline| outline.outline.len()),
        })
    }
}

impl OutlinePipeline<ScriptDetector, ScriptRecognizer> {
    /// Builds script-backed collaborators from the detector and recognizer settings.
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        let detector =
            ScriptDetector::new(config.output_dir.join("layout"), config.detector.clone());
        let recognizer = ScriptRecognizer::new(config.output_dir.join("ocr"), &config.recognizer);
        Self::new(config, detector, recognizer)
    }
}

/// Same file when equal without `.` components, or when both canonicalize alike.
fn same_document(a: &Path, b: &Path) -> bool {
    let lexical = |path: &Path| {
        path.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect::<PathBuf>()
    };
    if lexical(a) == lexical(b) {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
