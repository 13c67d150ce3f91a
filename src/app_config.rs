use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and merging command line overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Google Cloud project identifier
    #[serde(default)]
    pub project_id: String,

    /// Translation service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Run settings
    #[serde(default)]
    pub run: RunConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    // @field: Service location, "global" unless a regional model is used
    #[serde(default = "default_location")]
    pub location: String,

    // @field: REST API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Optional model id, e.g. "general/nmt"
    #[serde(default)]
    pub model: Option<String>,

    // @field: MIME type sent with every request
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    // @field: Language used for display names when listing languages
    #[serde(default)]
    pub display_language: Option<String>,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            endpoint: default_endpoint(),
            model: None,
            mime_type: default_mime_type(),
            display_language: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Settings for one fan-out run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunConfig {
    /// Directory receiving one file per target language
    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,

    /// Language codes never scheduled (exact match)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Maximum number of languages translated at once
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum characters sent in one translate request
    #[serde(default = "default_max_chars_per_chunk")]
    pub max_chars_per_chunk: usize,

    /// Retry count for failed chunk requests
    #[serde(default)]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds), doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Whether progress lines include language display names
    #[serde(default = "default_true")]
    pub include_language_names: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            outdir: default_outdir(),
            exclude: Vec::new(),
            workers: default_workers(),
            max_chars_per_chunk: default_max_chars_per_chunk(),
            retry_count: 0,
            retry_backoff_ms: default_retry_backoff_ms(),
            include_language_names: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub project_id: Option<String>,
    pub location: Option<String>,
    pub model: Option<String>,
    pub mime_type: Option<String>,
    pub display_language: Option<String>,
    pub outdir: Option<PathBuf>,
    pub exclude: Option<String>,
    pub workers: Option<i64>,
    pub max_chars_per_chunk: Option<usize>,
    pub retry_count: Option<u32>,
    pub hide_language_names: bool,
    pub log_level: Option<LogLevel>,
}

fn default_location() -> String {
    "global".to_string()
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com/v3".to_string()
}

fn default_mime_type() -> String {
    "text/plain".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_outdir() -> PathBuf {
    PathBuf::from("translations_out")
}

fn default_workers() -> usize {
    8
}

fn default_max_chars_per_chunk() -> usize {
    crate::translation::chunking::DEFAULT_MAX_CHARS
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

/// Split a comma separated list of language codes, dropping blanks
pub fn parse_exclude_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Clamp a requested worker count to at least one
pub fn coerce_workers(requested: i64) -> usize {
    usize::try_from(requested.max(1)).unwrap_or(1)
}

impl Config {
    /// Load a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply command line values on top of this configuration
    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(project_id) = overrides.project_id {
            self.project_id = project_id;
        }
        if let Some(location) = overrides.location {
            self.service.location = location;
        }
        if overrides.model.is_some() {
            self.service.model = overrides.model;
        }
        if let Some(mime_type) = overrides.mime_type {
            self.service.mime_type = mime_type;
        }
        if overrides.display_language.is_some() {
            self.service.display_language = overrides.display_language;
        }
        if let Some(outdir) = overrides.outdir {
            self.run.outdir = outdir;
        }
        if let Some(exclude) = overrides.exclude {
            self.run.exclude = parse_exclude_list(&exclude);
        }
        if let Some(workers) = overrides.workers {
            self.run.workers = coerce_workers(workers);
        }
        if let Some(max_chars) = overrides.max_chars_per_chunk {
            self.run.max_chars_per_chunk = max_chars;
        }
        if let Some(retry_count) = overrides.retry_count {
            self.run.retry_count = retry_count;
        }
        if overrides.hide_language_names {
            self.run.include_language_names = false;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }

        // A config file may carry a zero worker count as well
        self.run.workers = self.run.workers.max(1);
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.project_id.trim().is_empty() {
            return Err(AppError::Config("A Google Cloud project id is required".to_string()));
        }
        if self.service.location.trim().is_empty() {
            return Err(AppError::Config("Service location must not be empty".to_string()));
        }
        if self.service.mime_type.trim().is_empty() {
            return Err(AppError::Config("MIME type must not be empty".to_string()));
        }
        if self.run.max_chars_per_chunk == 0 {
            return Err(AppError::Config("Maximum characters per chunk must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            project_id: String::new(),
            service: ServiceConfig::default(),
            run: RunConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
