use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::model::TextFragment;

/// Collects per-page fragments into one ordered sequence per document.
///
/// Documents are yielded in the order they were first seen; fragments keep
/// page order and recognition order within a page.
#[derive(Debug, Default)]
pub struct PageAggregator {
    index: HashMap<PathBuf, usize>,
    documents: Vec<(PathBuf, Vec<TextFragment>)>,
}

impl PageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `document` even if no fragments follow, so it still gets an outline.
    pub fn register(&mut self, document: &Path) -> &mut Vec<TextFragment> {
        let slot = match self.index.get(document) {
            Some(&slot) => slot,
            None => {
                self.documents.push((document.to_path_buf(), Vec::new()));
                self.index
                    .insert(document.to_path_buf(), self.documents.len() - 1);
                self.documents.len() - 1
            }
        };
        &mut self.documents[slot].1
    }

    pub fn extend(&mut self, document: &Path, fragments: Vec<TextFragment>) {
        self.register(document).extend(fragments);
    }

    pub fn fragments(&self, document: &Path) -> Option<&[TextFragment]> {
        self.index
            .get(document)
            .map(|&slot| self.documents[slot].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_documents(self) -> Vec<(PathBuf, Vec<TextFragment>)> {
        self.documents
    }
}
