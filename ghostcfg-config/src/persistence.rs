//! Config file I/O: path discovery, reading, atomic writes and session backups.
//!
//! Covers:
//! - Ghostty config path resolution (`config_path`, `config_dir`)
//! - `read_config` (missing files yield an empty document bound to the path)
//! - `write_config` (creates parent dirs, atomic temp-file + rename)
//! - `backup_config` (one `.bak` copy per editing session)

use crate::document::{BackupState, ConfigDocument};
use crate::error::{ConfigError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory holding the Ghostty config file for the current platform.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir
                .join("Library")
                .join("Application Support")
                .join("com.mitchellh.ghostty")
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "macos"))]
    {
        // Honour XDG_CONFIG_HOME, fall back to ~/.config
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            PathBuf::from(xdg).join("ghostty")
        } else if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join("ghostty")
        } else {
            PathBuf::from(".")
        }
    }
}

/// Path of the Ghostty config file for the current platform.
pub fn config_path() -> PathBuf {
    config_dir().join("config")
}

/// Sibling path used for the session backup (`config` -> `config.bak`).
pub fn backup_path_for(path: &Path) -> PathBuf {
    path.with_extension("bak")
}

/// Read and parse a config file.
///
/// A missing file is not an error: the result is an empty document bound to
/// `path`, so the first save creates it.
pub fn read_config(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => {
            let doc = ConfigDocument::parse(&text).with_path(path);
            log::info!(
                "Loaded config from {:?} ({} lines, {} keys)",
                path,
                doc.len(),
                doc.keys().len()
            );
            Ok(doc)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("Config file not found at {:?}, starting empty", path);
            Ok(ConfigDocument::new().with_path(path))
        }
        Err(e) => Err(ConfigError::io(path, e)),
    }
}

/// Write a document to `path`, or to the document's own path if `None`.
///
/// Parent directories are created as needed. Returns the path written.
pub fn write_config(doc: &ConfigDocument, path: Option<&Path>) -> Result<PathBuf> {
    let target = path
        .or_else(|| doc.path())
        .ok_or(ConfigError::NoPath)?
        .to_path_buf();

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }

    // Atomic save: write to temp file then rename to prevent corruption on crash
    let temp_path = temp_path_for(&target);
    fs::write(&temp_path, doc.to_text()).map_err(|e| ConfigError::io(&temp_path, e))?;
    if let Err(e) = fs::rename(&temp_path, &target) {
        let _ = fs::remove_file(&temp_path);
        return Err(ConfigError::io(&target, e));
    }

    log::info!("Saved config to {:?}", target);
    Ok(target)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "config".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Copy the document's on-disk file to its `.bak` sibling, once per session.
///
/// Returns `Ok(None)` without touching the filesystem when the document has
/// no path, the file does not exist yet, or a backup was already taken.
pub fn backup_config(doc: &mut ConfigDocument) -> Result<Option<PathBuf>> {
    if doc.backup_state() == BackupState::Done {
        return Ok(None);
    }
    let Some(path) = doc.path().map(Path::to_path_buf) else {
        return Ok(None);
    };
    if !path.is_file() {
        log::debug!("No config at {:?} yet, skipping backup", path);
        return Ok(None);
    }

    let backup_path = backup_path_for(&path);
    fs::copy(&path, &backup_path).map_err(|e| ConfigError::io(&backup_path, e))?;
    doc.mark_backed_up();

    log::info!("Backed up {:?} to {:?}", path, backup_path);
    Ok(Some(backup_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_replaces_extension() {
        assert_eq!(
            backup_path_for(Path::new("/x/ghostty/config")),
            PathBuf::from("/x/ghostty/config.bak")
        );
        assert_eq!(
            backup_path_for(Path::new("/x/config.ghostty")),
            PathBuf::from("/x/config.bak")
        );
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path_for(Path::new("/x/ghostty/config")),
            PathBuf::from("/x/ghostty/config.tmp")
        );
    }

    #[test]
    fn test_config_path_ends_with_config() {
        let path = config_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config"));
    }
}
