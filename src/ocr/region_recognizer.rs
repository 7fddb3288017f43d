use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::config::MismatchPolicy;
use crate::core::error::OutlineError;
use crate::core::geometry::Region;
use crate::core::model::TextFragment;
use crate::ocr::Recognizer;

/// Turns the regions of one page into text fragments tagged with their height.
#[derive(Debug, Clone)]
pub struct TextRegionRecognizer<R> {
    recognizer: R,
    mismatch: MismatchPolicy,
}

impl<R: Recognizer> TextRegionRecognizer<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            mismatch: MismatchPolicy::default(),
        }
    }

    pub fn with_mismatch(mut self, mismatch: MismatchPolicy) -> Self {
        self.mismatch = mismatch;
        self
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn recognize_page(
        &self,
        image: &Path,
        regions: &[Region],
        page: usize,
    ) -> Result<Vec<TextFragment>> {
        // The recognizer must never see an empty batch.
        if regions.is_empty() {
            debug!(page, "no regions on page, skipping recognition");
            return Ok(Vec::new());
        }

        let (horizontal_list, heights): (Vec<[i32; 4]>, Vec<u32>) = regions
            .iter()
            .map(|region| (region.horizontal_extent(), region.height()))
            .unzip();

        let texts = self.recognizer.recognize(image, &horizontal_list)?;
        if texts.is_empty() {
            debug!(page, "recognizer returned no text");
            return Ok(Vec::new());
        }

        if texts.len() < heights.len() {
            match self.mismatch {
                MismatchPolicy::Fail => {
                    return Err(OutlineError::RecognitionLengthMismatch {
                        page,
                        expected: heights.len(),
                        actual: texts.len(),
                    }
                    .into());
                }
                MismatchPolicy::Truncate => warn!(
                    page,
                    expected = heights.len(),
                    actual = texts.len(),
                    "recognizer returned fewer strings than regions, dropping the rest"
                ),
            }
        }

        let fragments: Vec<TextFragment> = texts
            .into_iter()
            .zip(heights)
            .map(|(text, height)| TextFragment::new(text, f64::from(height), page))
            .collect();
        debug!(page, regions = regions.len(), fragments = fragments.len(), "recognized page");
        Ok(fragments)
    }
}
