//! Error types for rooz.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the labelling library.
///
/// The `run` entry point wraps these in `anyhow` with extra context.
#[derive(Debug, Error)]
pub enum LabelError {
  /// The identifier is not a zone known to the tz database.
  #[error("invalid time zone: {zone:?}")]
  InvalidTimeZone { zone: String },

  #[error(
    "unknown output format: {format:?} \
     (expected text, html or json)"
  )]
  UnknownFormat { format: String },

  #[error("failed to read config file {}", path.display())]
  ConfigRead {
    path:   PathBuf,
    #[source]
    source: std::io::Error
  },

  #[error("failed to parse config file {}", path.display())]
  ConfigParse {
    path:   PathBuf,
    #[source]
    source: toml::de::Error
  },

  #[error("failed to serialize observation")]
  Serialize(#[from] serde_json::Error)
}

pub type Result<T, E = LabelError> =
  std::result::Result<T, E>;
