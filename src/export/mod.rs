pub mod json_export;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::model::DocumentOutline;

pub use json_export::JsonExporter;

pub trait Exporter {
    /// Persists the outline of `source` and returns the path written.
    fn export(&self, source: &Path, outline: Option<&DocumentOutline>) -> Result<PathBuf>;
}

/// Shapes a classified outline into the persisted record.
///
/// A document without fragments serializes as an empty object.
pub struct OutlineSerializer;

impl OutlineSerializer {
    pub fn to_value(outline: Option<&DocumentOutline>) -> Result<serde_json::Value> {
        let value = match outline {
            Some(outline) => serde_json::to_value(outline)?,
            None => serde_json::Value::Object(serde_json::Map::new()),
        };
        Ok(value)
    }

    /// Pretty JSON with four-space indentation; non-ASCII text is written as-is.
    pub fn to_string_pretty(outline: Option<&DocumentOutline>) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        // Field order follows the struct: title, then outline.
        match outline {
            Some(outline) => outline.serialize(&mut serializer)?,
            None => serde_json::Map::new().serialize(&mut serializer)?,
        }
        Ok(String::from_utf8(buf)?)
    }
}
