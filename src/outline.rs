//! Title selection and heading-level banding.
//!
//! Heights are only comparable within one document, so the H1/H2/H3 bands
//! are recomputed from each document's own minimum and maximum height.

use tracing::debug;

use crate::core::config::OutlineConfig;
use crate::core::error::OutlineError;
use crate::core::model::{DocumentOutline, HeadingLevel, OutlineEntry, TextFragment};

/// Height cut-offs for one document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBands {
    pub h1_threshold: f64,
    pub h2_threshold: f64,
}

impl HeightBands {
    /// Returns `None` when there are no heights to band.
    pub fn from_heights(heights: &[f64], config: &OutlineConfig) -> Option<Self> {
        let (first, rest) = heights.split_first()?;
        let (min_h, max_h) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        // Equal heights would collapse every band onto one value.
        let range = if max_h > min_h { max_h - min_h } else { 1.0 };
        Some(Self {
            h1_threshold: min_h + range * config.h1_fraction,
            h2_threshold: min_h + range * config.h2_fraction,
        })
    }

    pub fn level(&self, height: f64) -> HeadingLevel {
        if height >= self.h1_threshold {
            HeadingLevel::H1
        } else if height >= self.h2_threshold {
            HeadingLevel::H2
        } else {
            HeadingLevel::H3
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutlineClassifier {
    config: OutlineConfig,
}

impl OutlineClassifier {
    pub fn new(config: OutlineConfig) -> Result<Self, OutlineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Builds the outline for one document's fragments.
    ///
    /// Returns `None` for a document without any fragments. The input is
    /// never modified, so repeated calls give identical results.
    pub fn classify(&self, fragments: &[TextFragment]) -> Option<DocumentOutline> {
        if fragments.is_empty() {
            return None;
        }

        let title_idx = self.select_title(fragments);
        let title = match title_idx {
            Some(idx) => fragments[idx].text.clone(),
            None => {
                debug!(page = self.config.title_page, "no title candidate, using fallback");
                self.config.untitled.clone()
            }
        };

        let remaining: Vec<&TextFragment> = fragments
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != title_idx)
            .map(|(_, fragment)| fragment)
            .collect();

        let heights: Vec<f64> = remaining.iter().map(|fragment| fragment.height).collect();
        let Some(bands) = HeightBands::from_heights(&heights, &self.config) else {
            return Some(DocumentOutline {
                title,
                outline: Vec::new(),
            });
        };

        let outline = remaining
            .into_iter()
            .map(|fragment| OutlineEntry {
                level: bands.level(fragment.height),
                text: fragment.text.clone(),
                page: fragment.page,
            })
            .collect();

        Some(DocumentOutline { title, outline })
    }

    /// Index of the tallest fragment on the title page; the first one wins ties.
    fn select_title(&self, fragments: &[TextFragment]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, fragment) in fragments.iter().enumerate() {
            if fragment.page != self.config.title_page {
                continue;
            }
            match best {
                Some((_, height)) if fragment.height <= height => {}
                _ => best = Some((idx, fragment.height)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}
