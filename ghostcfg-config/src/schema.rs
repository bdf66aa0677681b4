//! Option metadata for the Ghostty settings that ghostcfg knows how to edit.
//!
//! The table drives category grouping, platform filtering, and the
//! best-effort [`validate`] check run before an edit is staged. The
//! [`ConfigDocument`](crate::ConfigDocument) itself never consults it.

use crate::error::{ConfigError, Result};
use serde::Serialize;

use self::OptionType as T;

// ============================================================================
// Metadata types
// ============================================================================

/// Declared value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Boolean,
    Enum,
    Integer,
    Float,
    Color,
    Path,
    Duration,
}

impl OptionType {
    /// Lowercase name used in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Boolean => "boolean",
            OptionType::Enum => "enum",
            OptionType::Integer => "integer",
            OptionType::Float => "float",
            OptionType::Color => "color",
            OptionType::Path => "path",
            OptionType::Duration => "duration",
        }
    }
}

/// Platform an option applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Any,
    MacOs,
    Linux,
}

impl Platform {
    /// The platform ghostcfg is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Whether an option declared for `self` is shown on `target`.
    pub fn applies_to(&self, target: Platform) -> bool {
        *self == Platform::Any || target == Platform::Any || *self == target
    }
}

/// Metadata describing a single option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionMeta {
    pub key: &'static str,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub default: Option<&'static str>,
    /// Allowed values; non-empty for [`OptionType::Enum`].
    pub values: &'static [&'static str],
    pub category: &'static str,
    pub platform: Platform,
    /// Takes effect on a running terminal after a reload signal.
    pub hot_reload: bool,
    /// Multiple lines with this key accumulate instead of overriding.
    pub repeatable: bool,
}

impl OptionMeta {
    const fn new(
        key: &'static str,
        option_type: OptionType,
        default: Option<&'static str>,
        category: &'static str,
    ) -> Self {
        Self {
            key,
            option_type,
            default,
            values: &[],
            category,
            platform: Platform::Any,
            hot_reload: false,
            repeatable: false,
        }
    }

    const fn values(mut self, values: &'static [&'static str]) -> Self {
        self.values = values;
        self
    }

    const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    const fn hot(mut self) -> Self {
        self.hot_reload = true;
        self
    }

    const fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }
}

// ============================================================================
// Option table
// ============================================================================

/// Category labels in display order.
pub const CATEGORIES: &[&str] = &[
    "Font",
    "Colors",
    "Cursor",
    "Window",
    "Mouse",
    "Clipboard",
    "Shell",
    "Advanced",
];

const BOOL: &[&str] = &["true", "false"];

/// Every option ghostcfg presents, grouped by category.
pub const SCHEMA: &[OptionMeta] = &[
    // ── Font ────────────────────────────────────────────────────────────────
    OptionMeta::new("font-family", T::String, None, "Font").repeatable(),
    OptionMeta::new("font-family-bold", T::String, None, "Font").repeatable(),
    OptionMeta::new("font-family-italic", T::String, None, "Font").repeatable(),
    OptionMeta::new("font-family-bold-italic", T::String, None, "Font").repeatable(),
    OptionMeta::new("font-size", T::Float, Some("13"), "Font"),
    OptionMeta::new("font-feature", T::String, None, "Font").repeatable(),
    OptionMeta::new("font-thicken", T::Boolean, Some("false"), "Font").platform(Platform::MacOs),
    OptionMeta::new("adjust-cell-width", T::String, None, "Font"),
    OptionMeta::new("adjust-cell-height", T::String, None, "Font"),
    // ── Colors ──────────────────────────────────────────────────────────────
    OptionMeta::new("theme", T::String, None, "Colors").hot(),
    OptionMeta::new("background", T::Color, Some("#282c34"), "Colors").hot(),
    OptionMeta::new("foreground", T::Color, Some("#ffffff"), "Colors").hot(),
    OptionMeta::new("bold-color", T::Color, None, "Colors").hot(),
    OptionMeta::new("selection-foreground", T::Color, None, "Colors").hot(),
    OptionMeta::new("selection-background", T::Color, None, "Colors").hot(),
    OptionMeta::new("palette", T::String, None, "Colors")
        .hot()
        .repeatable(),
    OptionMeta::new("minimum-contrast", T::Float, Some("1"), "Colors").hot(),
    OptionMeta::new("background-opacity", T::Float, Some("1"), "Colors").hot(),
    OptionMeta::new("unfocused-split-opacity", T::Float, Some("0.7"), "Colors").hot(),
    OptionMeta::new("unfocused-split-fill", T::Color, None, "Colors").hot(),
    OptionMeta::new("split-divider-color", T::Color, None, "Colors").hot(),
    // ── Cursor ──────────────────────────────────────────────────────────────
    OptionMeta::new("cursor-style", T::Enum, Some("block"), "Cursor")
        .values(&["block", "bar", "underline", "block_hollow"])
        .hot(),
    OptionMeta::new("cursor-style-blink", T::Enum, None, "Cursor")
        .values(BOOL)
        .hot(),
    OptionMeta::new("cursor-color", T::Color, None, "Cursor").hot(),
    OptionMeta::new("cursor-text", T::Color, None, "Cursor").hot(),
    OptionMeta::new("cursor-opacity", T::Float, Some("1"), "Cursor").hot(),
    OptionMeta::new("cursor-click-to-move", T::Boolean, Some("true"), "Cursor").hot(),
    // ── Window ──────────────────────────────────────────────────────────────
    OptionMeta::new("window-padding-x", T::Integer, Some("2"), "Window").hot(),
    OptionMeta::new("window-padding-y", T::Integer, Some("2"), "Window").hot(),
    OptionMeta::new("window-padding-balance", T::Boolean, Some("false"), "Window").hot(),
    OptionMeta::new("window-decoration", T::Enum, Some("auto"), "Window")
        .values(&["auto", "client", "server", "none"]),
    OptionMeta::new("window-theme", T::Enum, Some("auto"), "Window")
        .values(&["auto", "system", "light", "dark", "ghostty"])
        .hot(),
    OptionMeta::new("window-width", T::Integer, Some("0"), "Window"),
    OptionMeta::new("window-height", T::Integer, Some("0"), "Window"),
    OptionMeta::new("window-save-state", T::Enum, Some("default"), "Window")
        .values(&["default", "never", "always"]),
    OptionMeta::new("window-titlebar-background", T::Color, None, "Window").hot(),
    OptionMeta::new("window-titlebar-foreground", T::Color, None, "Window").hot(),
    OptionMeta::new("resize-overlay", T::Enum, Some("after-first"), "Window")
        .values(&["always", "never", "after-first"])
        .hot(),
    OptionMeta::new("resize-overlay-duration", T::Duration, Some("750ms"), "Window").hot(),
    // ── Mouse ───────────────────────────────────────────────────────────────
    OptionMeta::new("mouse-hide-while-typing", T::Boolean, Some("false"), "Mouse").hot(),
    OptionMeta::new("mouse-scroll-multiplier", T::Float, Some("1"), "Mouse").hot(),
    OptionMeta::new("focus-follows-mouse", T::Boolean, Some("false"), "Mouse").hot(),
    OptionMeta::new("link-url", T::Boolean, Some("true"), "Mouse"),
    // ── Clipboard ───────────────────────────────────────────────────────────
    OptionMeta::new("clipboard-read", T::Enum, Some("ask"), "Clipboard")
        .values(&["ask", "allow", "deny"])
        .hot(),
    OptionMeta::new("clipboard-write", T::Enum, Some("allow"), "Clipboard")
        .values(&["ask", "allow", "deny"])
        .hot(),
    OptionMeta::new("copy-on-select", T::Enum, Some("true"), "Clipboard")
        .values(&["true", "false", "clipboard"])
        .hot(),
    OptionMeta::new(
        "clipboard-trim-trailing-spaces",
        T::Boolean,
        Some("true"),
        "Clipboard",
    )
    .hot(),
    OptionMeta::new(
        "clipboard-paste-protection",
        T::Boolean,
        Some("true"),
        "Clipboard",
    )
    .hot(),
    // ── Shell ───────────────────────────────────────────────────────────────
    OptionMeta::new("command", T::String, None, "Shell"),
    OptionMeta::new("working-directory", T::Path, None, "Shell"),
    OptionMeta::new("shell-integration", T::Enum, Some("detect"), "Shell")
        .values(&["none", "detect", "bash", "elvish", "fish", "zsh"]),
    OptionMeta::new("shell-integration-features", T::String, None, "Shell"),
    OptionMeta::new("scrollback-limit", T::Integer, Some("10000000"), "Shell"),
    OptionMeta::new("confirm-close-surface", T::Enum, Some("true"), "Shell")
        .values(&["true", "false", "always"])
        .hot(),
    OptionMeta::new(
        "quit-after-last-window-closed",
        T::Boolean,
        Some("false"),
        "Shell",
    ),
    // ── Advanced ────────────────────────────────────────────────────────────
    OptionMeta::new("keybind", T::String, None, "Advanced")
        .hot()
        .repeatable(),
    OptionMeta::new("config-file", T::Path, None, "Advanced").repeatable(),
    OptionMeta::new("custom-shader", T::Path, None, "Advanced").repeatable(),
    OptionMeta::new("term", T::String, Some("xterm-ghostty"), "Advanced"),
    OptionMeta::new("image-storage-limit", T::Integer, Some("320000000"), "Advanced"),
    OptionMeta::new("macos-titlebar-style", T::Enum, Some("transparent"), "Advanced")
        .values(&["native", "transparent", "tabs", "hidden"])
        .platform(Platform::MacOs),
    OptionMeta::new("macos-option-as-alt", T::Enum, None, "Advanced")
        .values(&["true", "false", "left", "right"])
        .platform(Platform::MacOs)
        .hot(),
    OptionMeta::new("auto-update", T::Enum, Some("check"), "Advanced")
        .values(&["off", "check", "download"])
        .platform(Platform::MacOs),
    OptionMeta::new("gtk-titlebar", T::Boolean, Some("true"), "Advanced")
        .platform(Platform::Linux),
    OptionMeta::new("gtk-single-instance", T::Enum, Some("desktop"), "Advanced")
        .values(&["desktop", "true", "false"])
        .platform(Platform::Linux),
    OptionMeta::new("gtk-tabs-location", T::Enum, Some("top"), "Advanced")
        .values(&["top", "bottom", "hidden"])
        .platform(Platform::Linux),
];

// ============================================================================
// Lookups
// ============================================================================

/// Metadata for `key`, if ghostcfg knows the option.
pub fn lookup(key: &str) -> Option<&'static OptionMeta> {
    SCHEMA.iter().find(|m| m.key == key)
}

/// Options in `category` that apply to `platform`, in table order.
pub fn options_for_category(category: &str, platform: Platform) -> Vec<&'static OptionMeta> {
    SCHEMA
        .iter()
        .filter(|m| m.category == category && m.platform.applies_to(platform))
        .collect()
}

pub fn is_hot_reloadable(key: &str) -> bool {
    lookup(key).is_some_and(|m| m.hot_reload)
}

pub fn is_repeatable(key: &str) -> bool {
    lookup(key).is_some_and(|m| m.repeatable)
}

// ============================================================================
// Validation
// ============================================================================

/// Best-effort check of `value` against `meta`.
///
/// An empty value always passes: callers treat it as "remove the key".
pub fn validate(meta: &OptionMeta, value: &str) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let ok = match meta.option_type {
        OptionType::String | OptionType::Path => true,
        OptionType::Boolean => BOOL.contains(&value),
        OptionType::Enum => meta.values.contains(&value),
        OptionType::Integer => value.parse::<i64>().is_ok(),
        OptionType::Float => value.parse::<f64>().is_ok_and(f64::is_finite),
        OptionType::Color => is_color(value),
        OptionType::Duration => is_duration(value),
    };

    if ok {
        return Ok(());
    }

    let expected = match meta.option_type {
        OptionType::Enum => format!("one of: {}", meta.values.join(", ")),
        OptionType::Boolean => "true or false".to_string(),
        OptionType::Color => "a hex color (#rgb or #rrggbb) or a color name".to_string(),
        OptionType::Duration => "a duration such as 750ms or 1h30m".to_string(),
        other => format!("a valid {}", other.as_str()),
    };
    Err(ConfigError::Validation(format!(
        "'{}' is not valid for {}: expected {}",
        value, meta.key, expected
    )))
}

/// `#rgb`, `#rrggbb`, bare `rrggbb`, or an X11-style color name.
fn is_color(value: &str) -> bool {
    let hex = value.strip_prefix('#').unwrap_or(value);
    let is_hex = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    let is_name = !value.starts_with('#')
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ')
        && value.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    is_hex || is_name
}

/// One or more `<digits><unit>` groups, e.g. `1h30m` or `750ms`.
fn is_duration(value: &str) -> bool {
    const UNITS: &[&str] = &["y", "d", "h", "m", "s", "ms", "us", "µs", "ns"];

    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return false;
        }
        rest = &rest[digits..];
        let unit_len = rest.len() - rest.trim_start_matches(|c: char| c.is_alphabetic()).len();
        if !UNITS.contains(&&rest[..unit_len]) {
            return false;
        }
        rest = rest[unit_len..].trim_start();
    }
    !value.is_empty()
}
