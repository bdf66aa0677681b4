//! Configuration system for the ghostcfg Ghostty config editor.
//!
//! This crate provides the structure-preserving config model and the data
//! contracts around it:
//!
//! - [`ConfigDocument`]: parse, query, edit and re-serialize a Ghostty config
//!   while keeping comments, blank lines and ordering intact
//! - Config file discovery, atomic writes and once-per-session backups
//! - Option metadata (types, categories, platforms, reload behaviour)
//! - `+show-config --docs` and theme file parsers

pub mod docs;
pub mod document;
pub mod error;
pub mod persistence;
pub mod schema;
pub mod themes;

// Re-export main types for convenience
pub use docs::{DocValue, OptionDoc, parse_show_config_docs};
pub use document::{BackupState, ConfigDocument, Entry, parse_config};
pub use error::{ConfigError, Result};
pub use persistence::{backup_config, backup_path_for, config_path, read_config, write_config};
pub use schema::{CATEGORIES, OptionMeta, OptionType, Platform, SCHEMA};
pub use themes::{THEME_COLOR_KEYS, ThemePalette, apply_theme, parse_theme_list};
