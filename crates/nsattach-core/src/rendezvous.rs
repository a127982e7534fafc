//! Rendezvous path computation.
//!
//! Two filesystem artifacts drive the handshake, and each must be visible
//! to a different side of the namespace boundary:
//!
//! - names the *target* reads are built with the **inner** PID, the only
//!   identifier the target knows about itself;
//! - paths the *caller* touches are rooted through `/proc/<outer>/root`
//!   and `/proc/<outer>/cwd`, the one bridge into the target's mount
//!   namespace that is valid from outside.

use std::path::PathBuf;

use nsattach_common::constants::{PROC_ROOT, SOCKET_FILE_PREFIX, TRIGGER_FILE_PREFIX};

use crate::identity::ProcessIdentity;

/// Caller-side paths to the handshake artifacts, pre-routed through the
/// target's procfs entry so they resolve inside the target's filesystem
/// view regardless of the caller's own mount namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendezvousPaths {
    /// Where the target's listener will publish its socket.
    pub socket_path: PathBuf,
    /// Where the trigger file must be created.
    pub trigger_path: PathBuf,
}

impl RendezvousPaths {
    /// Computes the rendezvous paths for a target, with the listener's
    /// socket expected under `tmp_dir` inside the target's mount namespace.
    #[must_use]
    pub fn build(identity: ProcessIdentity, tmp_dir: &str) -> Self {
        Self::build_under(PROC_ROOT, identity, tmp_dir)
    }

    /// Same computation against an arbitrary procfs root, which tests
    /// point at a fixture directory.
    #[must_use]
    pub fn build_under(proc_root: &str, identity: ProcessIdentity, tmp_dir: &str) -> Self {
        let ProcessIdentity { outer, inner } = identity;
        // The listener names its socket with its own (inner) PID; its cwd
        // scan likewise looks for a trigger named with the inner PID.
        let socket_path = PathBuf::from(format!(
            "{proc_root}/{outer}/root{tmp_dir}/{SOCKET_FILE_PREFIX}{inner}"
        ));
        let trigger_path = PathBuf::from(format!(
            "{proc_root}/{outer}/cwd/{TRIGGER_FILE_PREFIX}{inner}"
        ));
        Self {
            socket_path,
            trigger_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_for_containerized_target() {
        let paths = RendezvousPaths::build(ProcessIdentity { outer: 100, inner: 1 }, "/tmp");
        assert_eq!(
            paths.socket_path,
            PathBuf::from("/proc/100/root/tmp/.XXXX_pid1")
        );
        assert_eq!(paths.trigger_path, PathBuf::from("/proc/100/cwd/.attach_pid1"));
    }

    #[test]
    fn paths_without_namespace_isolation() {
        let paths = RendezvousPaths::build(
            ProcessIdentity {
                outer: 5821,
                inner: 5821,
            },
            "/tmp",
        );
        assert_eq!(
            paths.socket_path,
            PathBuf::from("/proc/5821/root/tmp/.XXXX_pid5821")
        );
        assert_eq!(
            paths.trigger_path,
            PathBuf::from("/proc/5821/cwd/.attach_pid5821")
        );
    }

    #[test]
    fn relocated_tmp_dir_is_honored() {
        let paths = RendezvousPaths::build(ProcessIdentity { outer: 7, inner: 2 }, "/var/tmp");
        assert_eq!(
            paths.socket_path,
            PathBuf::from("/proc/7/root/var/tmp/.XXXX_pid2")
        );
    }
}
