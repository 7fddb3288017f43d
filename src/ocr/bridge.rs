use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::config::RecognizerConfig;
use crate::ocr::Recognizer;

/// Recognizer backed by an external Python OCR script run in detail-free mode.
#[derive(Debug, Clone)]
pub struct ScriptRecognizer {
    work_dir: PathBuf,
    script_path: PathBuf,
    languages: Vec<String>,
}

impl ScriptRecognizer {
    pub fn new(work_dir: PathBuf, config: &RecognizerConfig) -> Self {
        Self {
            work_dir,
            script_path: PathBuf::from("ocr/bridge/ocr_bridge.py"),
            languages: config.languages.clone(),
        }
    }

    pub fn with_script(mut self, script_path: PathBuf) -> Self {
        self.script_path = script_path;
        self
    }
}

impl Recognizer for ScriptRecognizer {
    fn recognize(&self, image: &Path, horizontal_list: &[[i32; 4]]) -> Result<Vec<String>> {
        fs::create_dir_all(&self.work_dir)?;
        let regions = serde_json::to_string(horizontal_list)?;
        let output = Command::new("python3")
            .arg(&self.script_path)
            .arg("--image")
            .arg(image)
            .arg("--lang")
            .arg(self.languages.join(","))
            .arg("--regions")
            .arg(regions)
            .output()
            .with_context(|| "failed to invoke python OCR bridge")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("OCR bridge failed: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let texts: Vec<String> =
            serde_json::from_str(&stdout).with_context(|| "failed to parse OCR JSON response")?;
        Ok(texts)
    }
}
