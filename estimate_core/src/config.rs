//! # User Configuration
//!
//! Settings that outlive a single run: how results are presented, the metal
//! preselected on the metal pages, the name printed on reports and the
//! default history file.
//!
//! Stored as TOML, `estimate.toml` in the working directory unless another
//! path is given:
//!
//! ```toml
//! prepared_by = "R. Mehta"
//! default_metal = "steel"
//! history_file = "site.est"
//!
//! [presentation]
//! currency_symbol = "₹"
//! quantity_decimals = 3
//! locale_grouping = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::file_io::PROJECT_EXTENSION;
use crate::materials::MetalType;
use crate::presenter::PresentationConfig;

/// Config file looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "estimate.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateConfig {
    pub presentation: PresentationConfig,
    pub default_metal: MetalType,
    /// Name printed on reports and stored on new projects
    pub prepared_by: String,
    /// Project file listed by `history` when none is named
    pub history_file: PathBuf,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        EstimateConfig {
            presentation: PresentationConfig::default(),
            default_metal: MetalType::default(),
            prepared_by: String::new(),
            history_file: PathBuf::from(format!("estimate-history.{}", PROJECT_EXTENSION)),
        }
    }
}

impl EstimateConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> CalcResult<Self> {
        toml::from_str(text).map_err(|e| CalcError::config_error("<inline>", e.to_string()))
    }

    /// Load the config at `path`.
    ///
    /// A missing file gives the defaults silently. An unreadable or
    /// malformed file is logged and also gives the defaults, so a broken
    /// config never stops a calculation.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return EstimateConfig::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                return EstimateConfig::default();
            }
        };

        match toml::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config invalid, using defaults");
                EstimateConfig::default()
            }
        }
    }

    /// Write the config as pretty TOML.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let path_str = path.display().to_string();
        let text = toml::to_string_pretty(self).map_err(|e| CalcError::config_error(&path_str, e.to_string()))?;
        fs::write(path, text).map_err(|e| CalcError::config_error(&path_str, e.to_string()))
    }
}
