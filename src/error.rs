use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SfxError>;

#[derive(Debug, Error)]
pub enum SfxError {
    /// A synthesis parameter violated its contract (non-positive frequency,
    /// ADSR fractions above 1, ...). Never clamped silently.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read catalog {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("WAV encoding failed: {0}")]
    Encode(#[from] hound::Error),

    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    #[cfg(feature = "download")]
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "download")]
    #[error("{url} answered with status {status}")]
    DownloadStatus { url: String, status: u16 },

    #[cfg(feature = "download")]
    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SfxError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SfxError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SfxError::invalid(name, format!("must be > 0, got {value}")))
    }
}
