//! Namespace identity resolution via `/proc/<pid>/status`.
//!
//! A containerized process does not know its outer PID, and the caller
//! does not directly know the target's inner PID. The kernel's `NSpid:`
//! status field lists the PID in every namespace the process belongs to,
//! outermost first; the last entry is the PID the target sees for itself.

use std::path::Path;

use nsattach_common::constants::PROC_ROOT;
use nsattach_common::error::{AttachError, Result};

/// A target process as seen from both sides of a PID namespace boundary.
///
/// `inner` equals `outer` when the target runs in the caller's own PID
/// namespace. The inner PID is resolved once per session and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessIdentity {
    /// PID of the target in the caller's PID namespace.
    pub outer: i32,
    /// PID the target sees for itself, in its innermost namespace.
    pub inner: i32,
}

/// Resolves the namespace identity of `outer_pid` against the live procfs.
///
/// # Errors
///
/// Returns [`AttachError::IdentityResolution`] if `outer_pid` is not a
/// positive integer, the status file is unreadable, or the `NSpid` field
/// is present but corrupt.
pub fn resolve(outer_pid: i32) -> Result<ProcessIdentity> {
    resolve_under(Path::new(PROC_ROOT), outer_pid)
}

/// Resolves the namespace identity of `outer_pid` against an arbitrary
/// procfs root, which tests point at a fixture directory.
///
/// # Errors
///
/// Same contract as [`resolve`].
pub fn resolve_under(proc_root: &Path, outer_pid: i32) -> Result<ProcessIdentity> {
    if outer_pid <= 0 {
        return Err(AttachError::IdentityResolution {
            pid: outer_pid,
            message: "pid must be a positive integer".into(),
        });
    }

    let status_path = proc_root.join(outer_pid.to_string()).join("status");
    let status = std::fs::read_to_string(&status_path).map_err(|e| {
        AttachError::IdentityResolution {
            pid: outer_pid,
            message: format!("cannot read {}: {e}", status_path.display()),
        }
    })?;

    let inner = inner_pid_from_status(&status, outer_pid)?;
    tracing::debug!(outer = outer_pid, inner, "resolved namespace identity");
    Ok(ProcessIdentity {
        outer: outer_pid,
        inner,
    })
}

/// Extracts the innermost-namespace PID from a status document.
///
/// Namespaces may be stacked arbitrarily deep; `NSpid:` lists one PID per
/// level, outermost first, so the last token is always the deepest. A
/// missing `NSpid` line means the kernel predates namespace-PID reporting
/// (pre-4.1) and the outer PID is returned unchanged; a present but
/// unparsable token is an error.
fn inner_pid_from_status(status: &str, outer_pid: i32) -> Result<i32> {
    for line in status.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim() != "NSpid" {
            continue;
        }
        let Some(last) = value.split_whitespace().last() else {
            return Err(AttachError::IdentityResolution {
                pid: outer_pid,
                message: "NSpid field is empty".into(),
            });
        };
        return last.parse::<i32>().map_err(|_| AttachError::IdentityResolution {
            pid: outer_pid,
            message: format!("corrupt NSpid entry: {last:?}"),
        });
    }
    // Kernel too old to report NSpid: no namespace view to bridge.
    Ok(outer_pid)
}
