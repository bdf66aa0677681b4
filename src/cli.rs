//! Command-line interface for ghostcfg.
//!
//! Every subcommand opens one [`EditSession`] on the resolved config file,
//! performs a single action, and writes human-readable output.

use crate::debug::DebugLevel;
use crate::fonts::FontCatalog;
use crate::ghostty::{self, NoReload, Reloader, SignalReloader};
use crate::session::{EditSession, SaveOutcome, SaveReport};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ghostcfg_config::schema::{self, OptionMeta, Platform};
use ghostcfg_config::{CATEGORIES, ThemePalette, backup_path_for, config_path, read_config};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// ghostcfg - edit the Ghostty config without losing comments or layout
#[derive(Parser, Debug)]
#[command(name = "ghostcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to edit (default: the platform's Ghostty config path)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides GHOSTCFG_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<DebugLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the config file path
    Path,

    /// Print the value of an option
    Get {
        key: String,
        /// Print every value of a repeatable option, one per line
        #[arg(long)]
        all: bool,
    },

    /// Set an option; several values replace all lines of a repeatable option
    Set {
        key: String,
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
        /// Skip the type check against known option metadata
        #[arg(long)]
        force: bool,
        /// Don't signal running Ghostty instances to reload
        #[arg(long)]
        no_reload: bool,
    },

    /// Remove every line for an option
    Unset {
        key: String,
        #[arg(long)]
        no_reload: bool,
    },

    /// List known options with their current values
    List {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,
        /// Fill unset options from `ghostty +show-config` instead of built-in defaults
        #[arg(long)]
        live: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show option categories
    Categories,

    /// Show keys that differ from the session backup
    Diff,

    /// List available themes, marking the configured one
    Themes {
        /// Print the palette of a theme instead of the list
        #[arg(long, value_name = "NAME")]
        show: Option<String>,
    },

    /// Switch theme, removing explicit color overrides
    Theme {
        name: String,
        #[arg(long)]
        no_reload: bool,
    },

    /// List installed monospace font families
    Fonts,
}

/// Parse process arguments.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Run a parsed command. Returns the process exit code.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<i32> {
    let path = cli.config.unwrap_or_else(config_path);
    log::info!("Config path: {:?}", path);

    match cli.command {
        Commands::Path => {
            writeln!(out, "{}", path.display())?;
            Ok(0)
        }
        Commands::Get { key, all } => {
            let session = EditSession::load(&path)?;
            let doc = session.document();
            if all {
                let values = doc.get_all(&key);
                for value in &values {
                    writeln!(out, "{value}")?;
                }
                Ok(if values.is_empty() { 1 } else { 0 })
            } else {
                match doc.get(&key) {
                    Some(value) => {
                        writeln!(out, "{value}")?;
                        Ok(0)
                    }
                    None => Ok(1),
                }
            }
        }
        Commands::Set {
            key,
            values,
            force,
            no_reload,
        } => {
            if !force && let Some(meta) = schema::lookup(&key) {
                for value in &values {
                    schema::validate(meta, value)?;
                }
            }
            if values.len() > 1 && !force && !schema::is_repeatable(&key) {
                bail!("{key} is not repeatable; pass a single value (or --force)");
            }

            let mut session = EditSession::load(&path)?;
            match values.as_slice() {
                [single] if !schema::is_repeatable(&key) => session.stage(&key, single),
                _ => session.stage_all(&key, values.iter().filter(|v| !v.is_empty())),
            }
            let outcome = session.save(reloader(no_reload))?;
            print_outcome(out, &outcome)?;
            Ok(0)
        }
        Commands::Unset { key, no_reload } => {
            let mut session = EditSession::load(&path)?;
            if session.document().get_all(&key).is_empty() {
                writeln!(out, "{key} is not set")?;
                return Ok(0);
            }
            session.stage(&key, "");
            let outcome = session.save(reloader(no_reload))?;
            print_outcome(out, &outcome)?;
            Ok(0)
        }
        Commands::List {
            category,
            live,
            json,
        } => {
            let session = EditSession::load(&path)?;
            let docs = if live {
                ghostty::config_with_docs()
            } else {
                Default::default()
            };
            let effective = session.effective_values(&docs);
            let categories: Vec<&str> = match category.as_deref() {
                Some(c) => {
                    let Some(found) = CATEGORIES.iter().find(|k| k.eq_ignore_ascii_case(c)) else {
                        bail!("unknown category {c:?}; expected one of {}", CATEGORIES.join(", "));
                    };
                    vec![*found]
                }
                None => CATEGORIES.to_vec(),
            };

            let listed = list_options(&session, &effective, &categories);
            if json {
                serde_json::to_writer_pretty(&mut *out, &listed)?;
                writeln!(out)?;
            } else {
                write_listing(out, &listed)?;
            }
            Ok(0)
        }
        Commands::Categories => {
            for category in CATEGORIES {
                writeln!(out, "{category}")?;
            }
            Ok(0)
        }
        Commands::Diff => {
            let session = EditSession::load(&path)?;
            let backup_path = backup_path_for(&path);
            if !backup_path.is_file() {
                writeln!(out, "No backup at {}", backup_path.display())?;
                return Ok(0);
            }
            let backup = read_config(&backup_path)
                .with_context(|| format!("Failed to read backup {:?}", backup_path))?;
            let doc = session.document();
            let changed = doc.modified_keys(&backup);
            for key in &changed {
                writeln!(
                    out,
                    "{key}: {} -> {}",
                    format_values(&backup.get_all(key)),
                    format_values(&doc.get_all(key))
                )?;
            }
            Ok(if changed.is_empty() { 0 } else { 1 })
        }
        Commands::Themes { show: Some(name) } => {
            let Some(palette) = ThemePalette::load(&name) else {
                bail!("theme {name:?} not found");
            };
            writeln!(out, "background = {}", palette.background)?;
            writeln!(out, "foreground = {}", palette.foreground)?;
            if !palette.cursor_color.is_empty() {
                writeln!(out, "cursor-color = {}", palette.cursor_color)?;
            }
            if !palette.selection_background.is_empty() {
                writeln!(out, "selection-background = {}", palette.selection_background)?;
            }
            for (idx, color) in palette.ansi.iter().enumerate() {
                if !color.is_empty() {
                    writeln!(out, "palette = {idx}={color}")?;
                }
            }
            Ok(0)
        }
        Commands::Themes { show: None } => {
            let session = EditSession::load(&path)?;
            let current = session.document().get("theme");
            let themes = ghostty::list_themes();
            if themes.is_empty() {
                writeln!(out, "No themes found (is ghostty on PATH?)")?;
                return Ok(1);
            }
            for theme in &themes {
                let marker = if Some(theme.as_str()) == current { "*" } else { " " };
                writeln!(out, "{marker} {theme}")?;
            }
            Ok(0)
        }
        Commands::Theme { name, no_reload } => {
            let mut session = EditSession::load(&path)?;
            let report = session.apply_theme(&name, reloader(no_reload))?;
            print_report(out, &report)?;
            Ok(0)
        }
        Commands::Fonts => {
            for family in FontCatalog::global().families().iter() {
                writeln!(out, "{family}")?;
            }
            Ok(0)
        }
    }
}

fn reloader(no_reload: bool) -> &'static dyn Reloader {
    if no_reload { &NoReload } else { &SignalReloader }
}

#[derive(Debug, Serialize)]
struct ListedOption {
    #[serde(flatten)]
    meta: &'static OptionMeta,
    value: Option<String>,
    /// Whether the value comes from the config file.
    in_file: bool,
}

fn list_options(
    session: &EditSession,
    effective: &std::collections::BTreeMap<String, String>,
    categories: &[&str],
) -> Vec<ListedOption> {
    let platform = Platform::current();
    categories
        .iter()
        .flat_map(|category| schema::options_for_category(category, platform))
        .map(|meta| ListedOption {
            meta,
            value: effective
                .get(meta.key)
                .cloned()
                .or_else(|| meta.default.map(str::to_string)),
            in_file: !session.document().get_all(meta.key).is_empty(),
        })
        .collect()
}

fn write_listing(out: &mut dyn Write, listed: &[ListedOption]) -> Result<()> {
    let mut current_category = "";
    for option in listed {
        if option.meta.category != current_category {
            if !current_category.is_empty() {
                writeln!(out)?;
            }
            current_category = option.meta.category;
            writeln!(out, "[{current_category}]")?;
        }
        let marker = if option.in_file { "*" } else { " " };
        let value = option.value.as_deref().unwrap_or("");
        writeln!(
            out,
            "{marker} {} = {value}  ({})",
            option.meta.key,
            option.meta.option_type.as_str()
        )?;
    }
    Ok(())
}

fn format_values(values: &[&str]) -> String {
    match values {
        [] => "(unset)".to_string(),
        [single] => single.to_string(),
        many => format!("[{}]", many.join(", ")),
    }
}

fn print_outcome(out: &mut dyn Write, outcome: &SaveOutcome) -> Result<()> {
    match outcome {
        SaveOutcome::NothingToSave => {
            writeln!(out, "No changes to save.")?;
            Ok(())
        }
        SaveOutcome::Saved(report) => print_report(out, report),
    }
}

fn print_report(out: &mut dyn Write, report: &SaveReport) -> Result<()> {
    if let Some(backup) = &report.backup {
        writeln!(out, "Backed up to {}", backup.display())?;
    }
    if report.changed.is_empty() {
        writeln!(out, "Saved {} (no value changes)", report.path.display())?;
    } else {
        let keys: Vec<&str> = report.changed.iter().map(String::as_str).collect();
        writeln!(out, "Saved {}: {}", report.path.display(), keys.join(", "))?;
    }
    if report.reloaded {
        writeln!(out, "Ghostty reloaded.")?;
    }
    if !report.needs_restart.is_empty() {
        writeln!(
            out,
            "Restart Ghostty to apply: {}",
            report.needs_restart.join(", ")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run_args(args: &[&str]) -> (i32, String) {
        let cli = Cli::try_parse_from(std::iter::once("ghostcfg").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let code = run(cli, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_get_and_set_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "# mine\ncursor-style = underline\n").unwrap();
        let config = path.to_str().unwrap();

        let (code, out) = run_args(&["--config", config, "get", "cursor-style"]);
        assert_eq!((code, out.as_str()), (0, "underline\n"));

        let (code, out) = run_args(&["--config", config, "set", "cursor-style", "bar", "--no-reload"]);
        assert_eq!(code, 0);
        assert!(out.contains("Backed up to"));
        assert!(out.contains("cursor-style"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# mine\ncursor-style = bar\n"
        );

        let (code, out) = run_args(&["--config", config, "diff"]);
        assert_eq!(code, 1);
        assert_eq!(out, "cursor-style: underline -> bar\n");
    }

    #[test]
    fn test_get_missing_key_exits_nonzero() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config");
        let (code, out) = run_args(&["--config", config.to_str().unwrap(), "get", "theme"]);
        assert_eq!(code, 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_set_rejects_invalid_enum() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config");
        let cli = Cli::try_parse_from([
            "ghostcfg",
            "--config",
            config.to_str().unwrap(),
            "set",
            "cursor-style",
            "triangle",
        ])
        .unwrap();
        let err = run(cli, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("cursor-style"));
        assert!(!config.exists());
    }

    #[test]
    fn test_set_multiple_values_on_repeatable_key() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "font-family = Old\nfont-size = 12\n").unwrap();
        let config = path.to_str().unwrap();

        run_args(&[
            "--config",
            config,
            "set",
            "font-family",
            "JetBrains Mono",
            "Symbols Nerd Font",
            "--no-reload",
        ]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "font-size = 12\nfont-family = JetBrains Mono\nfont-family = Symbols Nerd Font\n"
        );
    }

    #[test]
    fn test_unset_and_list_json() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "cursor-style = bar\ncursor-color = #ff0000\n").unwrap();
        let config = path.to_str().unwrap();

        let (code, _) = run_args(&["--config", config, "unset", "cursor-color", "--no-reload"]);
        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "cursor-style = bar\n");

        let (_, out) = run_args(&["--config", config, "list", "--category", "cursor", "--json"]);
        let listed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let style = listed
            .as_array()
            .unwrap()
            .iter()
            .find(|o| o["key"] == "cursor-style")
            .unwrap();
        assert_eq!(style["value"], "bar");
        assert_eq!(style["in_file"], true);
        assert_eq!(style["type"], "enum");
        let opacity = listed
            .as_array()
            .unwrap()
            .iter()
            .find(|o| o["key"] == "cursor-opacity")
            .unwrap();
        assert_eq!(opacity["value"], "1");
        assert_eq!(opacity["in_file"], false);
    }

    #[test]
    fn test_theme_removes_overrides() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "theme = Nord\nbackground = #000000\nfont-size = 14\n").unwrap();
        let config = path.to_str().unwrap();

        let (code, _) = run_args(&["--config", config, "theme", "Dracula", "--no-reload"]);
        assert_eq!(code, 0);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "theme = Dracula\nfont-size = 14\n"
        );
    }

    #[test]
    fn test_format_values() {
        assert_eq!(format_values(&[]), "(unset)");
        assert_eq!(format_values(&["a"]), "a");
        assert_eq!(format_values(&["a", "b"]), "[a, b]");
    }
}
