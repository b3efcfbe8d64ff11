//! Runtime configuration.
//!
//! Every field has a default so a partial JSON file (or none at all) is valid. Layout geometry is
//! not configurable.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{PosterError, PosterResult};

/// Top-level configuration for a poster batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Directory holding the daily `{YYYY-MM-DD}.json` event files.
    pub data_dir: PathBuf,
    /// Root of the `{date}/{sport}/{league}` output tree.
    pub out_root: PathBuf,
    /// Font files.
    pub fonts: FontConfig,
    /// Remote image download settings.
    pub fetch: FetchConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Render events concurrently instead of one at a time.
    pub parallel: bool,
    /// Worker thread count when `parallel` is set. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Font file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Face for the header title and header sub-lines.
    pub title: PathBuf,
    /// Face for the broadcast source pages.
    pub body: PathBuf,
}

/// Remote image download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Largest accepted response body, in bytes.
    pub max_bytes: usize,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (e.g. `info`, `matchposter=debug`). `RUST_LOG` overrides it.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            out_root: PathBuf::from("."),
            fonts: FontConfig::default(),
            fetch: FetchConfig::default(),
            logging: LoggingConfig::default(),
            parallel: false,
            threads: None,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            title: PathBuf::from("Gagalin.otf"),
            body: PathBuf::from("OpenSans-Bold.otf"),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: concat!("matchposter/", env!("CARGO_PKG_VERSION")).to_string(),
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PosterConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PosterResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| PosterError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PosterError::io(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> PosterResult<()> {
        if self.fetch.timeout_ms == 0 {
            return Err(PosterError::validation("fetch.timeout_ms must be > 0"));
        }
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(PosterError::validation("threads must be >= 1 when set"));
        }
        if self.fetch.max_bytes == 0 {
            return Err(PosterError::validation("fetch.max_bytes must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
