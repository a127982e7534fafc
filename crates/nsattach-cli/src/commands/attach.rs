//! `nsat attach` — Open a diagnostic channel to a running process.

use std::path::Path;

use clap::Args;
use nsattach_common::config::AttachConfig;
use nsattach_common::error::Result;
use nsattach_core::session::AttachSession;

/// Arguments for the `attach` command.
#[derive(Args, Debug)]
pub struct AttachArgs {
    /// PID of the target process, as seen from this namespace.
    pub pid: i32,

    /// Temp directory name inside the target's mount namespace.
    #[arg(long)]
    pub tmp_dir: Option<String>,

    /// Total wall-clock budget for the attempt, in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Delay before the first socket re-check, in milliseconds.
    #[arg(long)]
    pub initial_delay_ms: Option<u64>,
}

/// Executes the `attach` command, printing the rendezvous socket path
/// on success.
///
/// # Errors
///
/// Propagates any session failure: identity resolution, trigger arming,
/// signal delivery, or timeout.
pub fn execute(args: AttachArgs, config_file: Option<&Path>) -> Result<()> {
    let mut config = match config_file {
        Some(path) => AttachConfig::load(path)?,
        None => AttachConfig::default(),
    };
    if let Some(tmp_dir) = args.tmp_dir {
        config.tmp_dir = tmp_dir;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.total_timeout_ms = timeout_ms;
    }
    if let Some(initial_delay_ms) = args.initial_delay_ms {
        config.initial_delay_ms = initial_delay_ms;
    }

    let session = AttachSession::new(args.pid, config)?;
    let socket = session.open()?;
    #[allow(clippy::print_stdout)]
    {
        println!("{}", socket.display());
    }
    Ok(())
}
