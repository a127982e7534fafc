//! CLI command definitions and dispatch.

pub mod attach;
pub mod resolve;

use clap::{Parser, Subcommand};
use nsattach_common::error::AttachError;

/// Exit code for success.
pub const EXIT_OK: i32 = 0;
/// Exit code for unclassified failures.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the target process does not exist.
pub const EXIT_NO_SUCH_PROCESS: i32 = 2;
/// Exit code when the target never opened its rendezvous socket.
pub const EXIT_TIMEOUT: i32 = 3;
/// Exit code when the target's namespace identity cannot be resolved.
pub const EXIT_IDENTITY: i32 = 4;

/// nsattach — namespace-aware attach handshake client.
#[derive(Parser, Debug)]
#[command(name = nsattach_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON configuration file with session defaults.
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a diagnostic channel to a running process.
    Attach(attach::AttachArgs),
    /// Print the namespace (inner) PID of a process.
    Resolve(resolve::ResolveArgs),
}

/// Dispatches the parsed CLI command and maps errors to exit codes.
#[must_use]
pub fn execute(cli: Cli) -> i32 {
    let result = match cli.command {
        Command::Attach(args) => attach::execute(args, cli.config.as_deref()),
        Command::Resolve(args) => resolve::execute(args),
    };
    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            tracing::error!("{e}");
            #[allow(clippy::print_stderr)]
            {
                eprintln!("error: {e}");
            }
            exit_code_for(&e)
        }
    }
}

/// Maps each failure class to its distinct exit code.
const fn exit_code_for(error: &AttachError) -> i32 {
    match error {
        AttachError::NoSuchProcess { .. } => EXIT_NO_SUCH_PROCESS,
        AttachError::AttachTimeout { .. } => EXIT_TIMEOUT,
        AttachError::IdentityResolution { .. } => EXIT_IDENTITY,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_failure_class() {
        assert_eq!(
            exit_code_for(&AttachError::NoSuchProcess { pid: 1 }),
            EXIT_NO_SUCH_PROCESS
        );
        assert_eq!(
            exit_code_for(&AttachError::AttachTimeout {
                pid: 1,
                waited: Duration::from_secs(10),
            }),
            EXIT_TIMEOUT
        );
        assert_eq!(
            exit_code_for(&AttachError::IdentityResolution {
                pid: 1,
                message: String::new(),
            }),
            EXIT_IDENTITY
        );
        assert_eq!(
            exit_code_for(&AttachError::Trigger {
                path: "/proc/1/cwd/.attach_pid1".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
            EXIT_FAILURE
        );
    }
}
