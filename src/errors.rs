//! Error types for the review fetcher
//!
//! Each component has its own error enum so that failure causes stay
//! classifiable. `AppError` wraps them all for the CLI layer.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single (country, application) fetch did not produce reviews
///
/// These never escape the fetcher; they are carried inside
/// `FetchOutcome::Failed` so the run summary can report them.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request did not complete within the response timeout
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Connection or other transport-level failure
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with something other than 200
    #[error("Server responded with HTTP {status}")]
    Status { status: u16 },

    /// Feed URL could not be built
    #[error("Invalid feed URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Response body is not valid JSON
    #[error("Response body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// JSON is valid but `feed.entry` has an unexpected shape
    #[error("Unexpected feed shape: {reason}")]
    UnexpectedShape { reason: String },
}

/// Review parsing errors
///
/// Parsing is all-or-nothing: the first bad record fails the whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Expected nested field or its `label` member is missing
    #[error("Review #{index}: missing field '{field}'")]
    MissingField { index: usize, field: String },

    /// Field present but cannot be coerced to the target type
    #[error("Review #{index}: invalid value '{value}' for field '{field}'")]
    InvalidValue {
        index: usize,
        field: String,
        value: String,
    },
}

/// Spreadsheet and summary file errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// Workbook construction or save failed
    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error while writing output
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created
    #[error("Output directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    /// Effective configuration could not be rendered
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {value}. {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Could not determine the user configuration directory
    #[error("Could not determine user config directory")]
    NoConfigDir,
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Parse(_) => "parse",
            AppError::Export(_) => "export",
            AppError::Config(_) => "config",
        }
    }
}

impl FetchError {
    /// Classify a reqwest error, separating timeouts from other transport failures
    pub fn from_transport(error: reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                seconds: timeout_secs,
            }
        } else {
            FetchError::Transport(error)
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Parse result type alias
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Export result type alias
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
