//! Process-wide catalog of monospace font families.
//!
//! Enumerating system fonts is slow and the installed set does not change
//! while an editing session runs, so the list is built once on first use and
//! then shared. [`FontCatalog::reset`] drops the cached list for tests.

use fontdb::Database;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Families offered even when the font database does not report them.
pub const COMMON_FAMILIES: &[&str] = &[
    "SF Mono",
    "Menlo",
    "Monaco",
    "Courier New",
    "JetBrains Mono",
    "Fira Code",
    "Source Code Pro",
    "Hack",
    "Inconsolata",
];

type Loader = fn() -> Vec<String>;

/// Lazily populated, shareable list of font family names.
pub struct FontCatalog {
    families: Mutex<Option<Arc<Vec<String>>>>,
    loader: Loader,
}

static GLOBAL: OnceLock<FontCatalog> = OnceLock::new();

impl FontCatalog {
    /// Create a catalog that fills itself from `loader` on first access.
    pub fn with_loader(loader: Loader) -> Self {
        Self {
            families: Mutex::new(None),
            loader,
        }
    }

    /// The process-wide catalog backed by the system font database.
    pub fn global() -> &'static FontCatalog {
        GLOBAL.get_or_init(|| FontCatalog::with_loader(system_monospace_families))
    }

    /// Sorted family names, loading them on first call.
    pub fn families(&self) -> Arc<Vec<String>> {
        let mut guard = self.families.lock();
        if let Some(families) = guard.as_ref() {
            return Arc::clone(families);
        }
        let families = Arc::new(merge_families((self.loader)()));
        log::info!("Font catalog loaded {} families", families.len());
        *guard = Some(Arc::clone(&families));
        families
    }

    pub fn is_loaded(&self) -> bool {
        self.families.lock().is_some()
    }

    /// Forget the cached list so the next access reloads it.
    pub fn reset(&self) {
        *self.families.lock() = None;
    }
}

/// Add the common fallbacks, dedupe, and sort case-insensitively.
fn merge_families(found: Vec<String>) -> Vec<String> {
    let mut by_key: BTreeMap<String, String> = BTreeMap::new();
    for name in found
        .into_iter()
        .chain(COMMON_FAMILIES.iter().map(|s| s.to_string()))
    {
        let name = name.trim().to_string();
        if !name.is_empty() {
            by_key.entry(name.to_lowercase()).or_insert(name);
        }
    }
    by_key.into_values().collect()
}

/// Query the system font database for monospaced families.
fn system_monospace_families() -> Vec<String> {
    let mut font_db = Database::new();
    font_db.load_system_fonts();
    log::debug!("Loaded {} system font faces", font_db.len());

    font_db
        .faces()
        .filter(|face| face.monospaced)
        .filter_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .collect()
}
