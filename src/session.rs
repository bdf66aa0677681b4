//! Editing-session controller.
//!
//! One [`EditSession`] owns the [`ConfigDocument`] for the lifetime of an
//! edit. Callers stage edits, then commit them in one [`EditSession::save`],
//! which takes the session backup, applies the edits, writes the file, and
//! asks the terminal to reload.

use crate::ghostty::Reloader;
use anyhow::{Context, Result};
use ghostcfg_config::{
    ConfigDocument, OptionDoc, apply_theme, backup_config, read_config, schema, write_config,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A pending change to one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Set a single value, updating the existing line if there is one.
    Set(String),
    /// Replace every line for a repeatable key.
    SetAll(Vec<String>),
    /// Drop every line for the key.
    Remove,
}

/// What a commit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No edits were staged; nothing was written.
    NothingToSave,
    Saved(SaveReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub path: PathBuf,
    /// Set on the first save of the session, when the file existed.
    pub backup: Option<PathBuf>,
    /// Keys whose values differ from before the save.
    pub changed: BTreeSet<String>,
    /// Whether a running terminal was signalled.
    pub reloaded: bool,
    /// Changed keys that a reload does not apply.
    pub needs_restart: Vec<String>,
}

#[derive(Debug)]
pub struct EditSession {
    doc: ConfigDocument,
    /// The document as last loaded or saved.
    snapshot: ConfigDocument,
    staged: BTreeMap<String, Edit>,
}

impl EditSession {
    /// Open the config at `path`; a missing file starts an empty session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = read_config(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Ok(Self::from_document(doc))
    }

    pub fn from_document(doc: ConfigDocument) -> Self {
        Self {
            snapshot: doc.clone(),
            doc,
            staged: BTreeMap::new(),
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    pub fn path(&self) -> Option<&Path> {
        self.doc.path()
    }

    /// Values to present per key: the file's value when it has one,
    /// otherwise the provider's current value.
    pub fn effective_values(&self, docs: &BTreeMap<String, OptionDoc>) -> BTreeMap<String, String> {
        let mut values: BTreeMap<String, String> = docs
            .iter()
            .map(|(key, doc)| (key.clone(), doc.value.display()))
            .collect();
        for key in self.doc.keys() {
            let value = if schema::is_repeatable(key) {
                self.doc.get_all(key).join(", ")
            } else {
                self.doc.get(key).unwrap_or_default().to_string()
            };
            values.insert(key.to_string(), value);
        }
        values
    }

    /// Stage a single value. An empty value stages a removal.
    pub fn stage(&mut self, key: &str, value: &str) {
        let edit = if value.is_empty() {
            Edit::Remove
        } else {
            Edit::Set(value.to_string())
        };
        self.stage_edit(key, edit);
    }

    /// Stage the full value list for a repeatable key.
    pub fn stage_all<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let edit = if values.is_empty() {
            Edit::Remove
        } else {
            Edit::SetAll(values)
        };
        self.stage_edit(key, edit);
    }

    pub fn stage_edit(&mut self, key: &str, edit: Edit) {
        log::debug!("Staged {key}: {edit:?}");
        self.staged.insert(key.to_string(), edit);
    }

    /// Drop a staged edit without applying it.
    pub fn unstage(&mut self, key: &str) -> Option<Edit> {
        self.staged.remove(key)
    }

    pub fn staged(&self) -> &BTreeMap<String, Edit> {
        &self.staged
    }

    pub fn has_unsaved(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Keys whose in-memory values differ from the last load or save.
    pub fn modified_keys(&self) -> BTreeSet<String> {
        self.doc.modified_keys(&self.snapshot)
    }

    /// Apply every staged edit, write the file, and request a reload.
    ///
    /// On a write failure the staged edits are kept so the save can be retried.
    pub fn save(&mut self, reloader: &dyn Reloader) -> Result<SaveOutcome> {
        if self.staged.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }

        let backup = backup_config(&mut self.doc).context("Failed to back up config")?;

        for (key, edit) in &self.staged {
            match edit {
                Edit::Set(value) => self.doc.set(key, value.as_str()),
                Edit::SetAll(values) => self.doc.set_repeatable(key, values.iter().cloned()),
                Edit::Remove => {
                    self.doc.remove(key);
                }
            }
        }

        let report = self.commit(backup, reloader)?;
        self.staged.clear();
        Ok(SaveOutcome::Saved(report))
    }

    /// Switch to `theme`, removing color overrides, and save immediately.
    ///
    /// Staged edits are left staged.
    pub fn apply_theme(&mut self, theme: &str, reloader: &dyn Reloader) -> Result<SaveReport> {
        let backup = backup_config(&mut self.doc).context("Failed to back up config")?;
        apply_theme(&mut self.doc, theme);
        self.commit(backup, reloader)
    }

    fn commit(&mut self, backup: Option<PathBuf>, reloader: &dyn Reloader) -> Result<SaveReport> {
        let path = write_config(&self.doc, None).context("Failed to save config")?;
        let changed = self.doc.modified_keys(&self.snapshot);
        let reloaded = reloader.reload();
        let needs_restart = changed
            .iter()
            .filter(|key| schema::lookup(key).is_some_and(|m| !m.hot_reload))
            .cloned()
            .collect();

        self.snapshot = self.doc.clone();
        log::info!(
            "Saved {} changed key(s) to {:?} (reloaded: {})",
            changed.len(),
            path,
            reloaded
        );

        Ok(SaveReport {
            path,
            backup,
            changed,
            reloaded,
            needs_restart,
        })
    }
}
