//! JSON configuration for the `extract_lights` tool.
//!
//! Every field is optional. A minimal file looks like
//!
//! ```json
//! {
//!   "input": "maps/studio.hdr",
//!   "params": { "maxDepth": 6, "maxLights": 4, "strategy": "select" },
//!   "output": { "report": "out/report.json", "debugImage": "out/debug.png" }
//! }
//! ```
//!
//! Command-line flags override the values read here.

use crate::error::{ExtractError, Result};
use crate::extractor::ExtractionParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExtractToolConfig {
    pub input: Option<PathBuf>,
    pub params: ExtractionParams,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    /// Full extraction report (JSON).
    pub report: Option<PathBuf>,
    /// Debug overlay (PNG).
    pub debug_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ExtractToolConfig> {
    let data = fs::read_to_string(path).map_err(|e| ExtractError::Config {
        path: path.to_path_buf(),
        message: format!("failed to read: {e}"),
    })?;
    parse_config(&data).map_err(|message| ExtractError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_config(data: &str) -> std::result::Result<ExtractToolConfig, String> {
    serde_json::from_str(data).map_err(|e| format!("failed to parse: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeStrategy;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = parse_config(
            r#"{ "params": { "maxLights": 3, "strategy": "select" },
                 "output": { "debugImage": "dbg.png" } }"#,
        )
        .expect("config");
        assert!(cfg.input.is_none());
        assert_eq!(cfg.params.max_lights, 3);
        assert_eq!(cfg.params.strategy, MergeStrategy::Select);
        assert_eq!(cfg.params.max_depth, 8);
        assert_eq!(cfg.output.debug_image, Some(PathBuf::from("dbg.png")));
        assert!(cfg.output.report.is_none());
    }

    #[test]
    fn malformed_config_is_rejected() {
        assert!(parse_config(r#"{ "params": { "maxDepth": "deep" } }"#).is_err());
        let missing = load_config(Path::new("/nonexistent/extract.json"));
        assert!(matches!(missing, Err(ExtractError::Config { .. })));
    }
}
