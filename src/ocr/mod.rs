pub mod bridge;
pub mod region_recognizer;

use anyhow::Result;
use std::path::Path;

pub use bridge::ScriptRecognizer;
pub use region_recognizer::TextRegionRecognizer;

/// Text recognition over caller-supplied regions of a page image.
pub trait Recognizer {
    /// Returns one string per region of `horizontal_list`, in call order.
    ///
    /// Each region is `[x_min, x_max, y_min, y_max]`.
    fn recognize(&self, image: &Path, horizontal_list: &[[i32; 4]]) -> Result<Vec<String>>;
}
