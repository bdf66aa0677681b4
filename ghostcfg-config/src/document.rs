//! Structure-preserving model of a Ghostty config file.
//!
//! A Ghostty config is line oriented: `key = value` options, `#` comments and
//! blank lines. [`ConfigDocument`] keeps every physical line as an [`Entry`]
//! so that serializing a parsed document reproduces untouched content, while
//! still offering keyed lookup and mutation for the lines a user edits.
//!
//! Keys may repeat. Scalar lookups resolve to the last occurrence, repeatable
//! lookups return every occurrence in file order.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// One physical line of a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A `key = value` line. `value` has already had one layer of matching
    /// quotes removed.
    Option { key: String, value: String },
    /// A `#` comment, or any line that could not be classified. Emitted verbatim.
    Comment { raw: String },
    /// A whitespace-only line. Emitted verbatim.
    Blank { raw: String },
}

impl Entry {
    /// Create an option entry.
    pub fn option(key: impl Into<String>, value: impl Into<String>) -> Self {
        Entry::Option {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The option key, if this entry is an option.
    pub fn key(&self) -> Option<&str> {
        match self {
            Entry::Option { key, .. } => Some(key),
            Entry::Comment { .. } | Entry::Blank { .. } => None,
        }
    }

    /// The option value, if this entry is an option.
    pub fn value(&self) -> Option<&str> {
        match self {
            Entry::Option { value, .. } => Some(value),
            Entry::Comment { .. } | Entry::Blank { .. } => None,
        }
    }

    fn is_option_for(&self, wanted: &str) -> bool {
        matches!(self, Entry::Option { key, .. } if key == wanted)
    }

    /// Parse a single physical line. Never fails.
    fn parse_line(line: &str) -> Self {
        let stripped = line.trim();

        if stripped.is_empty() {
            return Entry::Blank {
                raw: line.to_string(),
            };
        }
        if stripped.starts_with('#') {
            return Entry::Comment {
                raw: line.to_string(),
            };
        }

        match stripped.split_once('=') {
            Some((key, value)) => Entry::Option {
                key: key.trim().to_string(),
                value: unquote(value.trim()).to_string(),
            },
            // Unknown content is archived so it survives a save untouched.
            None => Entry::Comment {
                raw: line.to_string(),
            },
        }
    }

    /// Render this entry as a single line without a terminator.
    fn render(&self) -> String {
        match self {
            Entry::Comment { raw } | Entry::Blank { raw } => raw.clone(),
            Entry::Option { key, value } => {
                if value.is_empty() || value.trim() != value {
                    format!("{key} = \"{value}\"")
                } else {
                    format!("{key} = {value}")
                }
            }
        }
    }
}

/// Strip exactly one pair of matching outer quotes, if present.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            // A lone quote character both starts and ends the value.
            return if value.len() >= 2 {
                &value[1..value.len() - 1]
            } else {
                ""
            };
        }
    }
    value
}

/// Whether the document's on-disk file has been copied aside this session.
///
/// The transition is one way: once `Done`, a document never goes back to
/// `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackupState {
    #[default]
    Pending,
    Done,
}

/// A parsed Ghostty config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    entries: Vec<Entry>,
    path: Option<PathBuf>,
    backup: BackupState,
}

impl ConfigDocument {
    /// Create an empty document with no associated path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config text. Every line becomes exactly one entry; parsing
    /// cannot fail.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`. Output always uses `\n`.
    pub fn parse(text: &str) -> Self {
        let entries = split_lines(text).map(Entry::parse_line).collect();
        Self {
            entries,
            path: None,
            backup: BackupState::Pending,
        }
    }

    /// Bind this document to a filesystem path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backup_state(&self) -> BackupState {
        self.backup
    }

    pub(crate) fn mark_backed_up(&mut self) {
        self.backup = BackupState::Done;
    }

    /// Value of the last option entry for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.is_option_for(key))
            .and_then(Entry::value)
    }

    /// Every value for `key`, in file order, duplicates included.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.is_option_for(key))
            .filter_map(Entry::value)
            .collect()
    }

    /// Distinct option keys in order of first appearance.
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .filter_map(Entry::key)
            .filter(|k| seen.insert(*k))
            .collect()
    }

    /// Set an option value.
    ///
    /// Updates the first existing entry for `key` in place; other entries for
    /// the same key are left alone. Appends a new entry if the key is absent.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for entry in &mut self.entries {
            if let Entry::Option { key: k, value: v } = entry
                && *k == key
            {
                *v = value;
                return;
            }
        }
        self.entries.push(Entry::option(key, value));
    }

    /// Remove every option entry for `key`. Returns how many were removed.
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_option_for(key));
        before - self.entries.len()
    }

    /// Replace the whole family of entries for a repeatable key.
    ///
    /// The new entries are appended at the end of the document in the order
    /// given, not at the position of the old ones.
    pub fn set_repeatable<I, S>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove(key);
        self.entries
            .extend(values.into_iter().map(|v| Entry::option(key, v)));
    }

    /// Keys whose full value list differs between `self` and `original`.
    ///
    /// Comparison is order and count sensitive, so added, removed, changed and
    /// reordered repeatable values are all reported.
    pub fn modified_keys(&self, original: &ConfigDocument) -> BTreeSet<String> {
        let all_keys: BTreeSet<&str> = self
            .entries
            .iter()
            .chain(original.entries.iter())
            .filter_map(Entry::key)
            .collect();

        all_keys
            .into_iter()
            .filter(|key| self.get_all(key) != original.get_all(key))
            .map(str::to_string)
            .collect()
    }

    /// Serialize back to config text.
    ///
    /// Every entry is written as one line terminated by `\n`, so trailing
    /// blank lines survive repeated load/save cycles.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(&entry.render());
            text.push('\n');
        }
        text
    }
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Split on `\n`, `\r\n` and lone `\r`. A final terminator does not start
/// an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let line = &rest[..idx];
                let width = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + width..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Parse config text into a [`ConfigDocument`].
pub fn parse_config(text: &str) -> ConfigDocument {
    ConfigDocument::parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let doc = parse_config("");
        assert!(doc.is_empty());
        assert_eq!(doc.to_text(), "");
    }

    #[test]
    fn test_parse_simple_option() {
        let doc = parse_config("font-size = 14");
        assert_eq!(doc.entries(), &[Entry::option("font-size", "14")]);
    }

    #[test]
    fn test_parse_classifies_lines() {
        let doc = parse_config("# comment\nfont-size = 14\n   \n  # indented\ntheme = Dracula\n");
        let kinds: Vec<&str> = doc
            .entries()
            .iter()
            .map(|e| match e {
                Entry::Option { .. } => "option",
                Entry::Comment { .. } => "comment",
                Entry::Blank { .. } => "blank",
            })
            .collect();
        assert_eq!(kinds, ["comment", "option", "blank", "comment", "option"]);
        assert_eq!(
            doc.entries()[2],
            Entry::Blank {
                raw: "   ".to_string()
            }
        );
        assert_eq!(
            doc.entries()[3],
            Entry::Comment {
                raw: "  # indented".to_string()
            }
        );
    }

    #[test]
    fn test_line_without_equals_is_kept_verbatim() {
        let doc = parse_config("not an option\n");
        assert_eq!(
            doc.entries(),
            &[Entry::Comment {
                raw: "not an option".to_string()
            }]
        );
        assert_eq!(doc.to_text(), "not an option\n");
    }

    #[test]
    fn test_split_on_first_equals() {
        let doc = parse_config("palette = 0=#1d1f21\nkeybind = ctrl+a=select_all");
        assert_eq!(doc.get("palette"), Some("0=#1d1f21"));
        assert_eq!(doc.get("keybind"), Some("ctrl+a=select_all"));
    }

    #[test]
    fn test_quoted_values_are_unwrapped() {
        let doc = parse_config(
            "a = \"  padded  \"\nb = 'single'\nc = \"mismatched'\nd = \"\"\ne = \"",
        );
        assert_eq!(doc.get("a"), Some("  padded  "));
        assert_eq!(doc.get("b"), Some("single"));
        assert_eq!(doc.get("c"), Some("\"mismatched'"));
        assert_eq!(doc.get("d"), Some(""));
        assert_eq!(doc.get("e"), Some(""));
    }

    #[test]
    fn test_unquote_strips_only_one_layer() {
        assert_eq!(unquote("\"'x'\""), "'x'");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_get_last_occurrence_wins() {
        let doc = parse_config("a = 1\na = 2");
        assert_eq!(doc.get("a"), Some("2"));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_get_all_preserves_order() {
        let doc = parse_config("palette = 0=#000\npalette = 1=#111\nfont-size = 14");
        assert_eq!(doc.get_all("palette"), ["0=#000", "1=#111"]);
        assert_eq!(doc.get_all("font-size"), ["14"]);
        assert!(doc.get_all("missing").is_empty());
    }

    #[test]
    fn test_set_existing_and_new() {
        let mut doc = parse_config("font-size = 14");
        doc.set("font-size", "16");
        doc.set("theme", "Dracula");
        assert_eq!(doc.get("font-size"), Some("16"));
        assert_eq!(doc.get("theme"), Some("Dracula"));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_set_updates_first_duplicate_only() {
        let mut doc = parse_config("a = 1\na = 2");
        doc.set("a", "x");
        assert_eq!(doc.get_all("a"), ["x", "2"]);
        // The last occurrence still wins for scalar lookups.
        assert_eq!(doc.get("a"), Some("2"));
    }

    #[test]
    fn test_remove_clears_all_duplicates() {
        let mut doc = parse_config("a=1\nb=2\na=2\na=3");
        assert_eq!(doc.remove("a"), 3);
        assert!(doc.get_all("a").is_empty());
        assert_eq!(doc.get("b"), Some("2"));
        assert_eq!(doc.remove("a"), 0);
    }

    #[test]
    fn test_set_repeatable_appends_at_end() {
        let mut doc = parse_config("a=1\nb=2\na=3");
        doc.set_repeatable("a", ["x", "y"]);
        assert_eq!(doc.get_all("a"), ["x", "y"]);
        assert_eq!(
            doc.entries(),
            &[
                Entry::option("b", "2"),
                Entry::option("a", "x"),
                Entry::option("a", "y"),
            ]
        );
    }

    #[test]
    fn test_set_repeatable_empty_removes() {
        let mut doc = parse_config("font-family = A\nfont-family = B");
        doc.set_repeatable("font-family", Vec::<String>::new());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_modified_keys_value_change() {
        let original = parse_config("font-size = 14\ntheme = Dracula");
        let mut modified = original.clone();
        modified.set("theme", "Catppuccin Mocha");
        assert_eq!(
            modified.modified_keys(&original),
            BTreeSet::from(["theme".to_string()])
        );
    }

    #[test]
    fn test_modified_keys_additions_removals_and_reorder() {
        let original = parse_config("a = 1\np = x\np = y\nr = gone");
        let mut modified = original.clone();
        modified.set("new", "v");
        modified.remove("r");
        modified.set_repeatable("p", ["y", "x"]);
        assert_eq!(
            modified.modified_keys(&original),
            BTreeSet::from(["new".to_string(), "p".to_string(), "r".to_string()])
        );
        assert!(original.modified_keys(&original.clone()).is_empty());
    }

    #[test]
    fn test_serialize_quotes_whitespace_and_empty() {
        let mut doc = ConfigDocument::new();
        doc.set("k", " spaced ");
        doc.set("k2", "");
        doc.set("k3", "plain");
        assert_eq!(doc.to_text(), "k = \" spaced \"\nk2 = \"\"\nk3 = plain\n");
    }

    #[test]
    fn test_unneeded_quotes_are_dropped() {
        let doc = parse_config("theme = \"Dracula\"\n");
        assert_eq!(doc.to_text(), "theme = Dracula\n");
    }

    #[test]
    fn test_roundtrip_preserves_structure() {
        let text = "# My Ghostty config\nfont-size = 14\n\n# Theme\ntheme = Catppuccin Mocha\nbackground-opacity = 0.95\n";
        assert_eq!(parse_config(text).to_text(), text);

        let text = "# hi\n\nfont-size = 1\n";
        assert_eq!(parse_config(text).to_text(), text);
    }

    #[test]
    fn test_trailing_newline_added() {
        assert_eq!(parse_config("a = 1").to_text(), "a = 1\n");
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let inputs = [
            "",
            "\n",
            "a=1\n\n\n",
            "x = ' y '\r\n# c\r\nz",
            "  key   =   \"\"  \nbare words\n",
            "a = \"\nb = '",
        ];
        for input in inputs {
            let once = parse_config(input).to_text();
            let twice = parse_config(&once).to_text();
            assert_eq!(once, twice, "input: {input:?}");
        }
    }

    #[test]
    fn test_trailing_blank_lines_survive_resave() {
        let text = "a = 1\n\n\n";
        let once = parse_config(text).to_text();
        assert_eq!(once, text);
        assert_eq!(parse_config(&once).to_text(), text);
        assert_eq!(parse_config("a=1\n\n\n").len(), 3);
        assert_eq!(parse_config("\n\n").to_text(), "\n\n");
    }

    #[test]
    fn test_line_terminators() {
        let doc = parse_config("a=1\rb=2\r\nc=3\n");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.get("a"), Some("1"));
        assert_eq!(doc.get("b"), Some("2"));
        assert_eq!(doc.get("c"), Some("3"));
        assert_eq!(doc.to_text(), "a = 1\nb = 2\nc = 3\n");

        let doc = parse_config("# c\r\r\nk = v\r");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.to_text(), "# c\n\nk = v\n");
    }

    #[test]
    fn test_keys_first_appearance_order() {
        let doc = parse_config("b = 1\na = 1\nb = 2\n# c = 3");
        assert_eq!(doc.keys(), ["b", "a"]);
    }

    #[test]
    fn test_backup_state_defaults_pending() {
        let mut doc = parse_config("a = 1");
        assert_eq!(doc.backup_state(), BackupState::Pending);
        doc.mark_backed_up();
        assert_eq!(doc.backup_state(), BackupState::Done);
    }
}
