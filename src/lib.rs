// Library exports for testing and potential library use
//
// The configuration model itself lives in the `ghostcfg-config` crate; this
// crate adds the editing session, the Ghostty process glue, and the CLI.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod fonts;
pub mod ghostty;
pub mod session;

pub use ghostcfg_config as config;
pub use session::{Edit, EditSession, SaveOutcome, SaveReport};
