//! Interface to the `ghostty` CLI and the running Ghostty processes.
//!
//! Every call here is best effort: a missing binary, a timeout or unexpected
//! output degrades to an empty result rather than an error, since the editor
//! stays usable without them.

use ghostcfg_config::{OptionDoc, parse_show_config_docs, parse_theme_list};
use std::collections::BTreeMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// How long a `ghostty` or `pgrep` invocation may run before it is killed.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Run a command and capture stdout, giving up after `timeout`.
pub(crate) fn run_capture(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::debug!("Failed to spawn {program}: {e}");
            return None;
        }
    };

    // Drain stdout on a separate thread so a chatty child can't fill the pipe
    // and block while we wait on it.
    let mut stdout = child.stdout.take()?;
    let reader = std::thread::spawn(move || {
        let mut out = String::new();
        let _ = stdout.read_to_string(&mut out);
        out
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) if Instant::now() >= deadline => {
                log::warn!("{program} {args:?} timed out after {timeout:?}, killing");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Ok(None) => std::thread::sleep(Duration::from_millis(20)),
            Err(e) => {
                log::warn!("Failed waiting on {program}: {e}");
                return None;
            }
        }
    }

    reader.join().ok()
}

/// Theme names known to Ghostty, in the order it lists them.
pub fn list_themes() -> Vec<String> {
    run_capture("ghostty", &["+list-themes", "--plain"], COMMAND_TIMEOUT)
        .map(|out| parse_theme_list(&out))
        .unwrap_or_default()
}

/// Current values and documentation for every option Ghostty knows.
pub fn config_with_docs() -> BTreeMap<String, OptionDoc> {
    run_capture("ghostty", &["+show-config", "--docs"], COMMAND_TIMEOUT)
        .map(|out| parse_show_config_docs(&out))
        .unwrap_or_default()
}

/// Extract pids from `pgrep` output.
///
/// With `-a`, Linux pgrep prints `pid cmdline` while macOS prints the bare
/// pid, so only the first field of each line is used.
pub(crate) fn parse_pids(text: &str) -> Vec<i32> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|pid| pid.parse().ok())
        .collect()
}

/// `pgrep` argument lists to try, in order.
///
/// ghostcfg usually runs inside Ghostty, so `-a` is needed on macOS where
/// pgrep otherwise skips ancestor processes. The unanchored pattern matches
/// any process name containing "ghostty", and SIGUSR2 terminates processes
/// that do not handle it, so that fallback is limited to macOS, where the
/// app bundle's process name may not match `-x`.
fn pgrep_queries() -> &'static [&'static [&'static str]] {
    if cfg!(target_os = "macos") {
        &[&["-a", "-x", "ghostty"], &["-a", "ghostty"]]
    } else {
        &[&["-a", "-x", "ghostty"]]
    }
}

/// Pids of running Ghostty processes.
pub fn ghostty_pids() -> Vec<i32> {
    for args in pgrep_queries() {
        if let Some(out) = run_capture("pgrep", args, Duration::from_secs(5)) {
            let pids = parse_pids(&out);
            if !pids.is_empty() {
                return pids;
            }
        }
    }
    Vec::new()
}

/// Asks the running terminal to pick up a saved config.
pub trait Reloader {
    /// Returns whether at least one process was signalled.
    fn reload(&self) -> bool;
}

/// Sends `SIGUSR2` to every running Ghostty process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalReloader;

impl Reloader for SignalReloader {
    fn reload(&self) -> bool {
        let pids = ghostty_pids();
        if pids.is_empty() {
            log::info!("No running Ghostty found, skipping reload");
            return false;
        }
        for pid in &pids {
            if !send_reload_signal(*pid) {
                log::warn!("Failed to signal Ghostty pid {pid}");
            }
        }
        log::info!("Sent reload signal to {} Ghostty process(es)", pids.len());
        true
    }
}

/// Does nothing; used for `--no-reload`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReload;

impl Reloader for NoReload {
    fn reload(&self) -> bool {
        false
    }
}

#[cfg(unix)]
fn send_reload_signal(pid: i32) -> bool {
    // SAFETY: kill(2) takes plain integers; a stale pid simply fails with ESRCH.
    unsafe { libc::kill(pid as libc::pid_t, libc::SIGUSR2) == 0 }
}

#[cfg(not(unix))]
fn send_reload_signal(_pid: i32) -> bool {
    false
}
