pub mod aggregate;
pub mod core;
pub mod export;
pub mod layout;
pub mod ocr;
pub mod outline;
pub mod pipeline;

pub use core::config::{MismatchPolicy, OutlineConfig, PipelineConfig};
pub use core::error::OutlineError;
pub use core::model::{DocumentOutline, HeadingLevel, OutlineEntry, TextFragment};
pub use pipeline::{BatchReport, OutlinePipeline};
