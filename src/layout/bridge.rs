use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::core::config::DetectorConfig;
use crate::layout::{DetectorResult, LayoutDetector};

/// Layout detector backed by an external Python script.
///
/// The script receives the document path, model settings and per-class
/// thresholds on the command line and prints a JSON array with one
/// detector result per page.
#[derive(Debug, Clone)]
pub struct ScriptDetector {
    work_dir: PathBuf,
    script_path: PathBuf,
    config: DetectorConfig,
}

impl ScriptDetector {
    pub fn new(work_dir: PathBuf, config: DetectorConfig) -> Self {
        Self {
            work_dir,
            script_path: PathBuf::from("layout/bridge/layout_bridge.py"),
            config,
        }
    }

    pub fn with_script(mut self, script_path: PathBuf) -> Self {
        self.script_path = script_path;
        self
    }

    fn thresholds_arg(&self) -> Result<String> {
        let thresholds = serde_json::to_string(&self.config.class_thresholds)?;
        Ok(thresholds)
    }
}

impl LayoutDetector for ScriptDetector {
    fn detect(&self, document: &Path) -> Result<Vec<DetectorResult>> {
        fs::create_dir_all(&self.work_dir)?;
        let output = Command::new("python3")
            .arg(&self.script_path)
            .arg("--input")
            .arg(document)
            .arg("--model")
            .arg(&self.config.model_name)
            .arg("--device")
            .arg(&self.config.device)
            .arg("--thresholds")
            .arg(self.thresholds_arg()?)
            .arg("--image-dir")
            .arg(&self.work_dir)
            .output()
            .with_context(|| "failed to invoke python layout bridge")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("layout bridge failed: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let pages: Vec<serde_json::Value> = serde_json::from_str(&stdout)
            .with_context(|| "failed to parse layout bridge JSON response")?;

        let mut results = Vec::with_capacity(pages.len());
        for page in pages {
            let mut result = DetectorResult::from_value(page)?;
            if result.input_path.as_os_str().is_empty() {
                result.input_path = document.to_path_buf();
            }
            results.push(result);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::OutlineError;
    use pretty_assertions::assert_eq;
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

    fn python_available() -> bool {
        Command::new("python3")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    const PAGES_SCRIPT: &str = r#"
import argparse, json
parser = argparse.ArgumentParser()
for flag in ("--input", "--model", "--device", "--thresholds", "--image-dir"):
    parser.add_argument(flag)
args = parser.parse_args()
thresholds = json.loads(args.thresholds)
box = {"label": "doc_title", "score": thresholds["doc_title"], "coordinate": [0, 4, 120, 28]}
print(json.dumps([
    {"page_index": 0, "image": args.image_dir + "/p0.png", "boxes": [box]},
    {"input_path": "elsewhere/other.pdf", "page_index": 1, "image": args.image_dir + "/p1.png", "boxes": []},
]))
"#;

    const MISSING_BOXES_SCRIPT: &str = r#"
import json
print(json.dumps([{"page_index": 0, "image": "p0.png"}]))
"#;

    fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(name);
        fs::write(&path, body)?;
        Ok(path)
    }

    #[test]
    fn parses_pages_and_fills_missing_input_path() -> Result<()> {
        if !python_available() {
            eprintln!("Skipping test: python3 not found");
            return Ok(());
        }
        let dir = temp_output_dir("docoutline-layout-bridge");
        let script = write_script(&dir, "pages.py", PAGES_SCRIPT)?;
        let work = dir.join("work");

        let detector = ScriptDetector::new(work.clone(), DetectorConfig::default()).with_script(script);
        let pages = detector.detect(Path::new("input/a.pdf"))?;

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].input_path, PathBuf::from("input/a.pdf"));
        assert_eq!(pages[0].image, PathBuf::from(format!("{}/p0.png", work.display())));
        assert_eq!(pages[0].boxes[0].coordinate, [0.0, 4.0, 120.0, 28.0]);
        assert_eq!(pages[0].boxes[0].score, 0.25);
        // A path the script reports itself is kept for the pipeline to check.
        assert_eq!(pages[1].input_path, PathBuf::from("elsewhere/other.pdf"));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn page_without_boxes_is_malformed() -> Result<()> {
        if !python_available() {
            eprintln!("Skipping test: python3 not found");
            return Ok(());
        }
        let dir = temp_output_dir("docoutline-layout-bridge-bad");
        let script = write_script(&dir, "missing_boxes.py", MISSING_BOXES_SCRIPT)?;

        let detector =
            ScriptDetector::new(dir.join("work"), DetectorConfig::default()).with_script(script);
        let err = detector.detect(Path::new("input/a.pdf")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OutlineError>(),
            Some(OutlineError::MalformedDetectorResult { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn failing_script_reports_stderr() -> Result<()> {
        if !python_available() {
            eprintln!("Skipping test: python3 not found");
            return Ok(());
        }
        let dir = temp_output_dir("docoutline-layout-bridge-fail");
        let script = write_script(
            &dir,
            "fail.py",
            "import sys\nsys.stderr.write('model not found')\nsys.exit(3)\n",
        )?;

        let detector =
            ScriptDetector::new(dir.join("work"), DetectorConfig::default()).with_script(script);
        let err = detector.detect(Path::new("input/a.pdf")).unwrap_err();
        assert!(err.to_string().contains("model not found"));

        let _ = fs::remove_dir_all(&dir);
        Ok(())
    }

    #[test]
    fn thresholds_are_passed_as_json_object() {
        let detector = ScriptDetector::new(PathBuf::from("work"), DetectorConfig::default());
        let arg = detector.thresholds_arg().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&arg).unwrap();
        assert_eq!(parsed["doc_title"], serde_json::json!(0.25));
        assert_eq!(parsed.as_object().map(|m| m.len()), Some(23));
    }
}
