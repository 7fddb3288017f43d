use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::DocumentOutline;
use crate::export::{Exporter, OutlineSerializer};

/// Writes one `<stem>_outline.json` per source document.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.out_dir.join(format!("{stem}_outline.json"))
    }
}

impl Exporter for JsonExporter {
    fn export(&self, source: &Path, outline: Option<&DocumentOutline>) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let path = self.output_path(source);
        let data = OutlineSerializer::to_string_pretty(outline)?;
        fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_output_dir(prefix: &str) -> PathBuf {
        let mut out = std::env::temp_dir();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let pid = std::process::id();
        out.push(format!("{prefix}-{pid}-{now}"));
        out
    }

    #[test]
    fn names_file_after_document_stem() {
        let exporter = JsonExporter::new(PathBuf::from("output"));
        assert_eq!(
            exporter.output_path(Path::new("input/annual report.pdf")),
            PathBuf::from("output/annual report_outline.json")
        );
    }

    #[test]
    fn writes_empty_record_for_empty_document() -> Result<()> {
        let out = temp_output_dir("docoutline-export");
        let exporter = JsonExporter::new(out.clone());

        let path = exporter.export(Path::new("input/blank.pdf"), None)?;

        assert_eq!(path, out.join("blank_outline.json"));
        assert_eq!(fs::read_to_string(&path)?, "{}");

        let _ = fs::remove_dir_all(&out);
        Ok(())
    }
}
