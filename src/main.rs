use anyhow::Result;
use ghostcfg::cli;
use std::io::Write;

fn main() -> Result<()> {
    // Parse CLI arguments first so --log-level can configure logging
    let args = cli::parse();
    ghostcfg::debug::init_log_bridge(args.log_level);

    log::info!("Starting ghostcfg {}", ghostcfg::VERSION);

    let mut stdout = std::io::stdout().lock();
    let result = cli::run(args, &mut stdout);
    let _ = stdout.flush();
    drop(stdout);

    match result {
        Ok(0) => Ok(()),
        Ok(code) => {
            // Non-zero exit: use process::exit so the shell sees the correct
            // exit code.
            std::process::exit(code);
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("ghostcfg: error: {e:#}");
            std::process::exit(1);
        }
    }
}
