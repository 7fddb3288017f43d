use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutlineError {
    /// Detector output lacks `boxes` or carries a box without a four-number `coordinate`.
    #[error("malformed detector result: {reason}")]
    MalformedDetectorResult { reason: String },

    /// The recognizer answered with fewer strings than regions on a page.
    #[error("recognizer returned {actual} strings for {expected} regions on page {page}")]
    RecognitionLengthMismatch {
        page: usize,
        expected: usize,
        actual: usize,
    },

    /// A detector result belongs to a different document than the one requested.
    #[error("detector returned page {page} of {actual} while processing {expected}")]
    ForeignDetectorResult {
        expected: PathBuf,
        actual: PathBuf,
        page: usize,
    },

    /// Band fractions must satisfy `0 <= h2_fraction < h1_fraction`.
    #[error("invalid band fractions: h1 {h1_fraction}, h2 {h2_fraction}")]
    InvalidBandFractions { h1_fraction: f64, h2_fraction: f64 },
}
