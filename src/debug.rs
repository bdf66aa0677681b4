//! File-backed logging for ghostcfg.
//!
//! Controlled by the `GHOSTCFG_LOG` environment variable, or `--log-level`
//! which takes precedence:
//! - 0 / off (default): no logging
//! - 1 / error: errors only
//! - 2 / info: loads, saves, backups, reloads
//! - 3 / debug: provider and parser detail
//! - 4 / trace: everything
//!
//! Output goes to `ghostcfg_debug.log` in the system temp directory so it
//! never interleaves with command output on stdout/stderr.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, clap::ValueEnum)]
pub enum DebugLevel {
    #[default]
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    /// Parse a numeric (`0`-`4`) or named level.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "off" => Some(DebugLevel::Off),
            "1" | "error" => Some(DebugLevel::Error),
            "2" | "info" => Some(DebugLevel::Info),
            "3" | "debug" => Some(DebugLevel::Debug),
            "4" | "trace" => Some(DebugLevel::Trace),
            _ => None,
        }
    }

    fn from_env() -> Self {
        std::env::var("GHOSTCFG_LOG")
            .ok()
            .and_then(|v| Self::parse(&v))
            .unwrap_or_default()
    }

    fn filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            // Warnings ride along with info, matching how they are used.
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("ghostcfg_debug.log")
}

struct DebugLogger {
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn open(level: DebugLevel) -> Self {
        if level == DebugLevel::Off {
            return DebugLogger { file: None };
        }

        // Silently run without a file if it can't be opened; logging must
        // never break a config edit.
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(log_path())
            .ok();

        let mut logger = DebugLogger { file };
        logger.write_raw(&format!(
            "\n{}\nghostcfg debug session started at {} (level={:?})\n{}\n",
            "=".repeat(80),
            get_timestamp(),
            level,
            "=".repeat(80)
        ));
        logger
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

struct LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(logger) = LOGGER.get() {
            logger.lock().write_raw(&format!(
                "[{}] [{:<5}] [{}] {}\n",
                get_timestamp(),
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

static BRIDGE: LogBridge = LogBridge;

/// Route the `log` facade to the debug log file.
///
/// `override_level` (from `--log-level`) wins over `GHOSTCFG_LOG`. Calling
/// this more than once keeps the first configuration.
pub fn init_log_bridge(override_level: Option<DebugLevel>) {
    let level = override_level.unwrap_or_else(DebugLevel::from_env);
    if LOGGER.set(Mutex::new(DebugLogger::open(level))).is_err() {
        return;
    }
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(level.filter());
    }
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}
