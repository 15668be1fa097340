//! Generation settings shared by the CLI commands.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppSpecError;

/// Serialization format for rendered manifests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-document YAML stream.
    #[default]
    Yaml,
    /// A single JSON `List` object.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(AppSpecError::config(format!(
                "unknown output format \"{other}\" (expected yaml or json)"
            ))),
        }
    }
}

/// Settings for one `generate` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Manifest serialization format.
    pub format: OutputFormat,
    /// Destination file; `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Skip structural checks on the loaded application before population.
    pub skip_validation: bool,
}
