//! Configuration management for bipolar

use crate::error::{BipolarError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default converter program name
pub const DEFAULT_CONVERTER: &str = "bipolar-convert";

/// Commented template written by `config init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# bipolar configuration

[export]
# Directory holding FlowSync exports. Leave unset to use the
# FlowSync export directory of the current user.
# dir = "/path/to/PolarFlowSync/export"

[converter]
# Program implementing the session parser. It is invoked as
#   <program> [args..] parse <session>
#   <program> [args..] <gpx|hrm|tcx> <session> <output>
# and must exit 0 on success.
program = "bipolar-convert"
args = []
"#;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export directory settings
    pub export: ExportConfig,
    /// Session converter settings
    pub converter: ConverterConfig,
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| e.with_context(format!("Failed to parse {}", path.display())))?;
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values that parse but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.converter.program.trim().is_empty() {
            return Err(BipolarError::Config(
                "converter.program must not be empty".to_string(),
            ));
        }
        if let Some(dir) = &self.export.dir {
            if dir.as_os_str().is_empty() {
                return Err(BipolarError::Config(
                    "export.dir must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Export directory configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory to scan; `None` means the FlowSync default
    pub dir: Option<PathBuf>,
}

/// External converter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Program to run
    pub program: String,
    /// Arguments placed before the subcommand
    pub args: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_CONVERTER.to_string(),
            args: Vec::new(),
        }
    }
}
