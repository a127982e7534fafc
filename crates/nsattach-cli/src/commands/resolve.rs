//! `nsat resolve` — Print the namespace (inner) PID of a process.
//!
//! Diagnostic helper for checking what a containerized process believes
//! its own PID to be, without starting an attach attempt.

use clap::Args;
use nsattach_common::error::Result;
use nsattach_core::identity;

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// PID of the target process, as seen from this namespace.
    pub pid: i32,
}

/// Executes the `resolve` command.
///
/// # Errors
///
/// Returns an error if the target's status record is unreadable or its
/// namespace field is corrupt.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let identity = identity::resolve(args.pid)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{}", identity.inner);
    }
    Ok(())
}
