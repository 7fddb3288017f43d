//! Tunable values for the outline pipeline.
//!
//! Every heuristic constant lives here so it can be adjusted without touching
//! the classification code.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::error::OutlineError;

/// What to do when the recognizer returns fewer strings than regions requested.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Pair strings with heights up to the shorter length and log a warning.
    #[default]
    Truncate,
    /// Reject the page with `OutlineError::RecognitionLengthMismatch`.
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutlineConfig {
    /// Page searched for the title candidate.
    pub title_page: usize,
    /// Title used when `title_page` has no fragments.
    pub untitled: String,
    /// Fraction of the height range above the minimum where H1 starts.
    pub h1_fraction: f64,
    /// Fraction of the height range above the minimum where H2 starts.
    pub h2_fraction: f64,
    pub mismatch: MismatchPolicy,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            title_page: 0,
            untitled: "Untitled".to_string(),
            h1_fraction: 0.5,
            h2_fraction: 0.25,
            mismatch: MismatchPolicy::Truncate,
        }
    }
}

impl OutlineConfig {
    pub fn with_fractions(mut self, h1_fraction: f64, h2_fraction: f64) -> Self {
        self.h1_fraction = h1_fraction;
        self.h2_fraction = h2_fraction;
        self
    }

    pub fn with_mismatch(mut self, mismatch: MismatchPolicy) -> Self {
        self.mismatch = mismatch;
        self
    }

    /// Checks that the H2 band sits strictly below the H1 band.
    pub fn validate(&self) -> Result<(), OutlineError> {
        let (h1_fraction, h2_fraction) = (self.h1_fraction, self.h2_fraction);
        let ordered = h1_fraction.is_finite()
            && h2_fraction.is_finite()
            && h2_fraction >= 0.0
            && h2_fraction < h1_fraction;
        if ordered {
            Ok(())
        } else {
            Err(OutlineError::InvalidBandFractions {
                h1_fraction,
                h2_fraction,
            })
        }
    }
}

/// Per-class score thresholds handed to the layout detector.
///
/// A threshold of 1.0 effectively disables the class; only headings and
/// titles are let through by default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ClassThresholds(BTreeMap<String, f32>);

const DISABLED: f32 = 1.0;

const DEFAULT_THRESHOLDS: [(&str, f32); 23] = [
    ("paragraph_title", 0.5),
    ("image", DISABLED),
    ("text", DISABLED),
    ("number", DISABLED),
    ("abstract", DISABLED),
    ("content", DISABLED),
    ("figure_title", DISABLED),
    ("formula", DISABLED),
    ("table", DISABLED),
    ("table_title", 0.5),
    ("reference", DISABLED),
    ("doc_title", 0.25),
    ("footnote", DISABLED),
    ("header", DISABLED),
    ("algorithm", DISABLED),
    ("footer", DISABLED),
    ("seal", DISABLED),
    ("chart_title", DISABLED),
    ("chart", DISABLED),
    ("formula_number", DISABLED),
    ("header_image", DISABLED),
    ("footer_image", DISABLED),
    ("aside_text", DISABLED),
];

impl Default for ClassThresholds {
    fn default() -> Self {
        Self(
            DEFAULT_THRESHOLDS
                .iter()
                .map(|(class, threshold)| (class.to_string(), *threshold))
                .collect(),
        )
    }
}

impl ClassThresholds {
    pub fn get(&self, class: &str) -> f32 {
        self.0.get(class).copied().unwrap_or(DISABLED)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    pub model_name: String,
    pub device: String,
    pub class_thresholds: ClassThresholds,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_name: "PP-DocLayout-L".to_string(),
            device: "cpu".to_string(),
            class_thresholds: ClassThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecognizerConfig {
    pub languages: Vec<String>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "ch_sim".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub outline: OutlineConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

impl PipelineConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            outline: OutlineConfig::default(),
            detector: DetectorConfig::default(),
            recognizer: RecognizerConfig::default(),
        }
    }

    pub fn with_outline(mut self, outline: OutlineConfig) -> Self {
        self.outline = outline;
        self
    }
}
