//! Attach session facade.
//!
//! One session is one attach attempt: resolve the target's namespace
//! identity, compute the rendezvous paths, wake the target, wait for its
//! socket. Sessions share no mutable state; two tools attaching to the
//! same target at once coexist through the idempotent trigger semantics
//! in [`crate::trigger`].

use std::path::{Path, PathBuf};

use nsattach_common::config::AttachConfig;
use nsattach_common::constants::PROC_ROOT;
use nsattach_common::error::Result;

use crate::identity::{self, ProcessIdentity};
use crate::poller;
use crate::rendezvous::RendezvousPaths;
use crate::signal::{ProcessSignalSender, SignalSender};
use crate::trigger;

/// A single attach attempt against one target process.
///
/// The namespace identity is resolved once at construction and is
/// immutable for the lifetime of the session.
#[derive(Debug)]
pub struct AttachSession {
    identity: ProcessIdentity,
    paths: RendezvousPaths,
    config: AttachConfig,
}

/// Removes the trigger file at the end of an attempt.
///
/// Installed only when this session physically created the file; a
/// trigger armed by a concurrent session belongs to that session. Runs on
/// every exit path, success and failure alike.
struct TriggerGuard<'a> {
    path: &'a Path,
    armed_here: bool,
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        if self.armed_here {
            if let Err(e) = std::fs::remove_file(self.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "trigger cleanup failed");
                }
            }
        }
    }
}

impl AttachSession {
    /// Creates a session for `outer_pid` against the live procfs.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the target's
    /// namespace identity cannot be resolved.
    pub fn new(outer_pid: i32, config: AttachConfig) -> Result<Self> {
        Self::new_under(PROC_ROOT, outer_pid, config)
    }

    /// Creates a session against an arbitrary procfs root, which tests
    /// point at a fixture directory.
    ///
    /// # Errors
    ///
    /// Same contract as [`AttachSession::new`].
    pub fn new_under(proc_root: &str, outer_pid: i32, config: AttachConfig) -> Result<Self> {
        config.validate()?;
        let identity = identity::resolve_under(Path::new(proc_root), outer_pid)?;
        let paths = RendezvousPaths::build_under(proc_root, identity, &config.tmp_dir);
        Ok(Self {
            identity,
            paths,
            config,
        })
    }

    /// The resolved identity of the target.
    #[must_use]
    pub const fn identity(&self) -> ProcessIdentity {
        self.identity
    }

    /// The rendezvous paths computed for this session.
    #[must_use]
    pub const fn paths(&self) -> &RendezvousPaths {
        &self.paths
    }

    /// Runs the handshake with real OS signal delivery.
    ///
    /// # Errors
    ///
    /// See [`AttachSession::open_with`].
    pub fn open(&self) -> Result<PathBuf> {
        self.open_with(&ProcessSignalSender)
    }

    /// Runs the handshake, returning the path of the rendezvous socket.
    ///
    /// If the socket already exists (a listener left active by an earlier
    /// attach), no trigger is armed and no signal is sent. Otherwise the
    /// target is triggered once and polled until the socket appears or
    /// the total timeout elapses. Any trigger file this session created
    /// is removed before returning, on success and failure alike.
    ///
    /// # Errors
    ///
    /// Propagates [`nsattach_common::error::AttachError`] from trigger
    /// arming, signal delivery, or the poll timeout. No partial channel
    /// is ever returned.
    pub fn open_with(&self, signal: &dyn SignalSender) -> Result<PathBuf> {
        tracing::info!(
            outer = self.identity.outer,
            inner = self.identity.inner,
            socket = %self.paths.socket_path.display(),
            "attach attempt started"
        );

        // Fast path: a previous session's listener is still up.
        if self.paths.socket_path.exists() {
            tracing::debug!("listener already active, skipping trigger");
            return Ok(self.paths.socket_path.clone());
        }

        let armed_here = trigger::fire(self.identity, &self.paths, signal)?;
        let _guard = TriggerGuard {
            path: &self.paths.trigger_path,
            armed_here,
        };

        poller::wait_for_socket(&self.paths.socket_path, self.identity.outer, &self.config)?;
        tracing::info!(socket = %self.paths.socket_path.display(), "attach succeeded");
        Ok(self.paths.socket_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use nsattach_common::error::AttachError;

    use super::*;

    /// Lays out `<root>/<pid>/{status,root/tmp/,cwd/}` like a live procfs
    /// entry for a containerized target.
    fn fake_procfs(outer: i32, nspid_line: &str) -> tempfile::TempDir {
        let proc_root = tempfile::tempdir().expect("tempdir");
        let pid_dir = proc_root.path().join(outer.to_string());
        std::fs::create_dir_all(pid_dir.join("root").join("tmp")).expect("mkdir root/tmp");
        std::fs::create_dir_all(pid_dir.join("cwd")).expect("mkdir cwd");
        std::fs::write(pid_dir.join("status"), format!("Name:\tapp\n{nspid_line}"))
            .expect("write status");
        proc_root
    }

    fn fast_config() -> AttachConfig {
        let mut config = AttachConfig::default();
        config.total_timeout_ms = 300;
        config.initial_delay_ms = 10;
        config.coarse_delay_ms = 40;
        config
    }

    struct RecordingSender {
        sent: Mutex<Vec<i32>>,
    }

    impl RecordingSender {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl SignalSender for RecordingSender {
        fn send_quit(&self, outer_pid: i32) -> Result<()> {
            self.sent.lock().expect("lock").push(outer_pid);
            Ok(())
        }
    }

    /// Fake target listener: on signal, creates the socket file after a
    /// short startup delay.
    struct RespondingSender {
        socket_path: PathBuf,
        startup: Duration,
    }

    impl SignalSender for RespondingSender {
        fn send_quit(&self, _outer_pid: i32) -> Result<()> {
            let socket = self.socket_path.clone();
            let startup = self.startup;
            drop(std::thread::spawn(move || {
                std::thread::sleep(startup);
                let _ = std::fs::write(&socket, b"");
            }));
            Ok(())
        }
    }

    #[test]
    fn session_resolves_identity_once_at_construction() {
        let proc_root = fake_procfs(100, "NSpid:\t100\t1\n");
        let session = AttachSession::new_under(
            &proc_root.path().to_string_lossy(),
            100,
            fast_config(),
        )
        .expect("session");
        assert_eq!(session.identity(), ProcessIdentity { outer: 100, inner: 1 });
        assert!(
            session
                .paths()
                .socket_path
                .ends_with("100/root/tmp/.XXXX_pid1")
        );
    }

    #[test]
    fn open_succeeds_against_responsive_target() {
        let proc_root = fake_procfs(100, "NSpid:\t100\t1\n");
        let root = proc_root.path().to_string_lossy().into_owned();
        let session = AttachSession::new_under(&root, 100, fast_config()).expect("session");
        let sender = RespondingSender {
            socket_path: session.paths().socket_path.clone(),
            startup: Duration::from_millis(50),
        };

        let socket = session.open_with(&sender).expect("attach");
        assert_eq!(socket, session.paths().socket_path);
        // Trigger created by this session must be gone.
        assert!(!session.paths().trigger_path.exists());
    }

    #[test]
    fn preexisting_socket_skips_the_trigger() {
        let proc_root = fake_procfs(100, "NSpid:\t100\t1\n");
        let root = proc_root.path().to_string_lossy().into_owned();
        let session = AttachSession::new_under(&root, 100, fast_config()).expect("session");
        std::fs::write(&session.paths().socket_path, b"").expect("create socket");

        let sender = RecordingSender::new();
        let socket = session.open_with(&sender).expect("attach");
        assert_eq!(socket, session.paths().socket_path);
        assert!(sender.sent.lock().expect("lock").is_empty());
    }

    #[test]
    fn timeout_cleans_up_the_trigger() {
        let proc_root = fake_procfs(100, "NSpid:\t100\t1\n");
        let root = proc_root.path().to_string_lossy().into_owned();
        let session = AttachSession::new_under(&root, 100, fast_config()).expect("session");

        let sender = RecordingSender::new();
        let err = session.open_with(&sender).expect_err("must time out");
        assert!(matches!(err, AttachError::AttachTimeout { pid: 100, .. }));
        assert!(!session.paths().trigger_path.exists());
    }

    #[test]
    fn foreign_trigger_survives_this_session() {
        let proc_root = fake_procfs(100, "NSpid:\t100\t1\n");
        let root = proc_root.path().to_string_lossy().into_owned();
        let session = AttachSession::new_under(&root, 100, fast_config()).expect("session");
        // Armed by "another tool" before this session starts.
        std::fs::write(&session.paths().trigger_path, b"").expect("pre-arm");

        let sender = RecordingSender::new();
        assert!(session.open_with(&sender).is_err());
        assert!(session.paths().trigger_path.exists());
    }

    #[test]
    fn missing_nspid_attaches_with_outer_identity() {
        let proc_root = fake_procfs(5821, "Pid:\t5821\n");
        let root = proc_root.path().to_string_lossy().into_owned();
        let session = AttachSession::new_under(&root, 5821, fast_config()).expect("session");
        assert_eq!(
            session.identity(),
            ProcessIdentity {
                outer: 5821,
                inner: 5821
            }
        );
        assert!(
            session
                .paths()
                .socket_path
                .ends_with("5821/root/tmp/.XXXX_pid5821")
        );
    }
}
