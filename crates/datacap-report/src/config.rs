//! Report configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use datacap_analytics::AnalyticsConfig;

use crate::color::{ColorSource, FixedPalette, RandomColorSource};
use crate::error::{ReportError, ReportResult};

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Root directory for generated reports
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Page size used when the client list was fetched; more clients than
    /// this triggers the inaccuracy warning
    #[serde(default = "default_clients_query_limit")]
    pub clients_query_limit: u64,

    /// Base URL of the Filecoin Pulse explorer
    #[serde(default = "default_pulse_base_url")]
    pub pulse_base_url: String,

    /// Seed for random chart colours (fixed palette when absent)
    #[serde(default)]
    pub color_seed: Option<u64>,

    /// Tracking settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_clients_query_limit() -> u64 {
    20
}

fn default_pulse_base_url() -> String {
    "https://filecoinpulse.pages.dev".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            clients_query_limit: default_clients_query_limit(),
            pulse_base_url: default_pulse_base_url(),
            color_seed: None,
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> ReportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        toml::from_str(&content).map_err(|e| ReportError::config(path, e.to_string()))
    }

    /// Sets the uploads directory.
    #[must_use]
    pub fn with_uploads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.uploads_dir = dir.into();
        self
    }

    /// Sets the client query limit.
    #[must_use]
    pub fn with_clients_query_limit(mut self, limit: u64) -> Self {
        self.clients_query_limit = limit;
        self
    }

    /// Sets the colour seed.
    #[must_use]
    pub fn with_color_seed(mut self, seed: Option<u64>) -> Self {
        self.color_seed = seed;
        self
    }

    /// Colour source for charts.
    #[must_use]
    pub fn color_source(&self) -> Box<dyn ColorSource> {
        match self.color_seed {
            Some(seed) => Box::new(RandomColorSource::seeded(seed)),
            None => Box::new(FixedPalette::default()),
        }
    }
}
