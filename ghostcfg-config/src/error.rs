//! Typed error variants for the ghostcfg-config crate.
//!
//! The document model itself never fails: malformed lines are preserved
//! verbatim. Errors only originate at the filesystem boundary, and are
//! surfaced with the path that caused them so callers can report it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading, writing, or backing up a config file.
///
/// # Example
///
/// ```rust,no_run
/// use ghostcfg_config::ConfigError;
///
/// fn report(e: &ConfigError) {
///     match e {
///         ConfigError::NoPath => eprintln!("nowhere to save the config"),
///         ConfigError::Validation(msg) => eprintln!("{msg}"),
///         ConfigError::Io { path, source } => {
///             eprintln!("I/O error on {}: {source}", path.display())
///         }
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A write was requested but neither an explicit path nor a path bound to
    /// the document was available.
    #[error("no path specified for config write")]
    NoPath,

    /// A value failed the best-effort check against its option metadata.
    ///
    /// The inner string describes which option is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// An I/O error occurred reading, writing, or copying a config file.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The file or directory the failing operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
