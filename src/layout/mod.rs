pub mod bridge;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::error::OutlineError;
use crate::core::geometry::Region;

pub use bridge::ScriptDetector;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectedBox {
    pub coordinate: [f64; 4],
    #[serde(default, alias = "class")]
    pub label: String,
    #[serde(default)]
    pub score: f32,
}

/// Layout detection output for a single page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorResult {
    /// Source document the page belongs to.
    #[serde(default)]
    pub input_path: PathBuf,
    pub page_index: usize,
    /// Rendered page image handed on to the recognizer.
    pub image: PathBuf,
    pub boxes: Vec<DetectedBox>,
}

impl DetectorResult {
    pub fn from_json(json: &str) -> Result<Self, OutlineError> {
        serde_json::from_str(json).map_err(malformed)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, OutlineError> {
        serde_json::from_value(value).map_err(malformed)
    }
}

fn malformed(err: serde_json::Error) -> OutlineError {
    OutlineError::MalformedDetectorResult {
        reason: err.to_string(),
    }
}

pub trait LayoutDetector {
    /// Runs layout detection over every page of `document`, in page order.
    fn detect(&self, document: &Path) -> Result<Vec<DetectorResult>>;
}

/// Projects detected boxes to regions, keeping order and count.
pub fn extract_regions(result: &DetectorResult) -> Vec<Region> {
    result
        .boxes
        .iter()
        .map(|detected| Region::from_coordinate(detected.coordinate))
        .collect()
}

/// Reads a detector result previously saved as JSON.
pub fn load_detector_result(path: &Path) -> Result<DetectorResult> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read detector result {}", path.display()))?;
    let result = DetectorResult::from_json(&contents)
        .with_context(|| format!("invalid detector result in {}", path.display()))?;
    Ok(result)
}
