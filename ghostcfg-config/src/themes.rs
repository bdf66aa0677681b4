//! Ghostty theme discovery, theme palette files, and theme application.

use crate::document::ConfigDocument;
use std::path::{Path, PathBuf};

/// Color keys a theme controls. Explicit values for these in the config
/// would override the theme, so applying a theme removes them.
pub const THEME_COLOR_KEYS: &[&str] = &[
    "background",
    "foreground",
    "bold-color",
    "cursor-color",
    "cursor-text",
    "selection-foreground",
    "selection-background",
    "split-divider-color",
    "unfocused-split-fill",
    "window-titlebar-background",
    "window-titlebar-foreground",
];

/// Theme search directories in priority order (user themes first).
pub fn theme_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![crate::persistence::config_dir().join("themes")];
    #[cfg(target_os = "macos")]
    {
        dirs.push(PathBuf::from(
            "/Applications/Ghostty.app/Contents/Resources/ghostty/themes",
        ));
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs.push(PathBuf::from("/usr/share/ghostty/themes"));
        dirs.push(PathBuf::from("/usr/local/share/ghostty/themes"));
    }
    dirs
}

/// First file named `name` in `dirs`.
pub fn find_theme_file_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    // Theme names are plain file names; refuse anything that walks directories.
    if name.is_empty() || Path::new(name).components().count() != 1 || name == ".." {
        return None;
    }
    dirs.iter().map(|d| d.join(name)).find(|p| p.is_file())
}

/// Locate the theme file for `name` in the standard theme directories.
pub fn find_theme_file(name: &str) -> Option<PathBuf> {
    find_theme_file_in(name, &theme_dirs())
}

/// Colors defined by a theme file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub cursor_color: String,
    pub selection_background: String,
    /// ANSI colors 0-15; empty when the theme leaves a slot unset.
    pub ansi: [String; 16],
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            background: "#000000".to_string(),
            foreground: "#ffffff".to_string(),
            cursor_color: String::new(),
            selection_background: String::new(),
            ansi: Default::default(),
        }
    }
}

impl ThemePalette {
    /// Parse a theme file. Unknown keys and malformed palette lines are ignored.
    pub fn parse(text: &str) -> Self {
        let mut palette = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "background" => palette.background = value.to_string(),
                "foreground" => palette.foreground = value.to_string(),
                "cursor-color" => palette.cursor_color = value.to_string(),
                "selection-background" => palette.selection_background = value.to_string(),
                "palette" => {
                    // Format: "index=color", e.g. "0=#1d1f21"
                    if let Some((idx, color)) = value.split_once('=')
                        && let Ok(idx) = idx.trim().parse::<usize>()
                        && let Some(slot) = palette.ansi.get_mut(idx)
                    {
                        *slot = color.trim().to_string();
                    }
                }
                _ => {}
            }
        }
        palette
    }

    /// Load and parse the named theme, or `None` if it cannot be found or read.
    pub fn load(name: &str) -> Option<Self> {
        let path = find_theme_file(name)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(Self::parse(&text)),
            Err(e) => {
                log::warn!("Failed to read theme file {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Parse `ghostty +list-themes --plain` output into bare theme names.
///
/// Lines look like `Theme Name (resources)` or `Theme Name (user)`.
pub fn parse_theme_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let name = line.trim();
            ["(resources)", "(user)"]
                .iter()
                .find_map(|suffix| name.strip_suffix(suffix))
                .unwrap_or(name)
                .trim()
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Select `name` as the theme and drop explicit colors that would mask it.
pub fn apply_theme(doc: &mut ConfigDocument, name: &str) {
    doc.set("theme", name);
    let removed: usize = THEME_COLOR_KEYS
        .iter()
        .chain(std::iter::once(&"palette"))
        .map(|key| doc.remove(key))
        .sum();
    log::info!("Applied theme {name:?}, removed {removed} color overrides");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_config;

    #[test]
    fn test_parse_theme_palette() {
        let palette = ThemePalette::parse(
            "# Dracula\nbackground = #282a36\nforeground = #f8f8f2\ncursor-color = #f8f8f2\n\
             palette = 0=#21222c\npalette = 15=#ffffff\npalette = 16=#000000\npalette = x=#111\n\
             selection-background = #44475a\nnonsense line\n",
        );
        assert_eq!(palette.background, "#282a36");
        assert_eq!(palette.foreground, "#f8f8f2");
        assert_eq!(palette.cursor_color, "#f8f8f2");
        assert_eq!(palette.selection_background, "#44475a");
        assert_eq!(palette.ansi[0], "#21222c");
        assert_eq!(palette.ansi[15], "#ffffff");
        assert!(palette.ansi[1..15].iter().all(String::is_empty));
    }

    #[test]
    fn test_palette_defaults() {
        let palette = ThemePalette::parse("");
        assert_eq!(palette.background, "#000000");
        assert_eq!(palette.foreground, "#ffffff");
    }

    #[test]
    fn test_parse_theme_list_strips_source_marker() {
        let themes = parse_theme_list("Dracula (resources)\n\nMy Theme (user)\n  Nord  \n");
        assert_eq!(themes, ["Dracula", "My Theme", "Nord"]);
    }

    #[test]
    fn test_apply_theme_removes_color_overrides() {
        let mut doc = parse_config(
            "# colors\ntheme = Nord\nbackground = #000\npalette = 0=#111\nfont-size = 14\npalette = 1=#222\n",
        );
        apply_theme(&mut doc, "Catppuccin Mocha");
        assert_eq!(doc.to_text(), "# colors\ntheme = Catppuccin Mocha\nfont-size = 14\n");
    }

    #[test]
    fn test_find_theme_file_rejects_paths() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("Nord"), "background = #2e3440\n").unwrap();
        let dirs = vec![temp.path().join("missing"), temp.path().to_path_buf()];

        assert_eq!(
            find_theme_file_in("Nord", &dirs),
            Some(temp.path().join("Nord"))
        );
        assert_eq!(find_theme_file_in("Absent", &dirs), None);
        assert_eq!(find_theme_file_in("../Nord", &dirs), None);
        assert_eq!(find_theme_file_in("", &dirs), None);
    }
}
