//! Wake-up signal delivery to the target process.
//!
//! Signal delivery is the one native side effect in the handshake, so it
//! sits behind a trait; tests substitute a recorder instead of issuing
//! real OS signals.

use nsattach_common::error::Result;

/// Delivers the attach wake-up signal to a target process.
///
/// The PID is always the **outer** PID: `kill(2)` operates on identifiers
/// in the caller's own PID namespace regardless of how the target sees
/// itself.
pub trait SignalSender {
    /// Sends SIGQUIT (or an equivalent wake-up) to `outer_pid`.
    ///
    /// # Errors
    ///
    /// Returns [`nsattach_common::error::AttachError::NoSuchProcess`] if
    /// the target has exited, or another error if delivery fails.
    fn send_quit(&self, outer_pid: i32) -> Result<()>;
}

/// Production sender backed by `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSignalSender;

#[cfg(target_os = "linux")]
impl SignalSender for ProcessSignalSender {
    fn send_quit(&self, outer_pid: i32) -> Result<()> {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        use nsattach_common::error::AttachError;

        kill(Pid::from_raw(outer_pid), Signal::SIGQUIT).map_err(|errno| match errno {
            Errno::ESRCH => AttachError::NoSuchProcess { pid: outer_pid },
            other => AttachError::Io {
                path: format!("kill({outer_pid})").into(),
                source: std::io::Error::from_raw_os_error(other as i32),
            },
        })?;
        tracing::debug!(pid = outer_pid, "sent SIGQUIT");
        Ok(())
    }
}

#[cfg(not(target_os = "linux"))]
impl SignalSender for ProcessSignalSender {
    fn send_quit(&self, _outer_pid: i32) -> Result<()> {
        Err(nsattach_common::error::AttachError::Unsupported {
            message: "namespace-aware attach requires Linux".into(),
        })
    }
}
