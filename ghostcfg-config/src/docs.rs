//! Parser for `ghostty +show-config --docs` output.
//!
//! Each option is preceded by a block of `# `-prefixed documentation lines.
//! Repeatable options appear once per value; their values are collected.

use serde::Serialize;
use std::collections::BTreeMap;

/// Current value(s) reported for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DocValue {
    Single(String),
    Multiple(Vec<String>),
}

impl DocValue {
    fn push(&mut self, value: String) {
        match self {
            DocValue::Single(first) => {
                *self = DocValue::Multiple(vec![std::mem::take(first), value]);
            }
            DocValue::Multiple(values) => values.push(value),
        }
    }

    /// Values as a slice-like list.
    pub fn values(&self) -> Vec<&str> {
        match self {
            DocValue::Single(v) => vec![v.as_str()],
            DocValue::Multiple(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    /// Single-line rendering; multiple values are joined with `", "`.
    pub fn display(&self) -> String {
        self.values().join(", ")
    }
}

/// Default value and documentation for one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDoc {
    pub value: DocValue,
    pub doc: String,
}

/// Parse the docs listing into a map keyed by option name.
pub fn parse_show_config_docs(text: &str) -> BTreeMap<String, OptionDoc> {
    let mut options: BTreeMap<String, OptionDoc> = BTreeMap::new();
    let mut doc_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(doc) = line.strip_prefix("# ") {
            doc_lines.push(doc);
        } else if line == "#" {
            doc_lines.push("");
        } else if !line.starts_with('#')
            && let Some((key, value)) = line.split_once('=')
        {
            let key = key.trim();
            let value = value.trim().to_string();
            let doc = doc_lines.join("\n").trim().to_string();
            doc_lines.clear();

            match options.get_mut(key) {
                Some(existing) => existing.value.push(value),
                None => {
                    options.insert(
                        key.to_string(),
                        OptionDoc {
                            value: DocValue::Single(value),
                            doc,
                        },
                    );
                }
            }
        } else {
            doc_lines.clear();
        }
    }

    log::debug!("Parsed documentation for {} options", options.len());
    options
}
