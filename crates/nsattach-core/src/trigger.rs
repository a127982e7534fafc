//! Trigger-file creation and target wake-up.
//!
//! Order matters: the trigger file must exist *before* the signal lands,
//! because the target's signal handler scans its working directory for
//! the file to distinguish an attach request from an ordinary SIGQUIT.

use std::fs::OpenOptions;
use std::io::ErrorKind;

use nsattach_common::error::{AttachError, Result};

use crate::identity::ProcessIdentity;
use crate::rendezvous::RendezvousPaths;
use crate::signal::SignalSender;

/// Creates the trigger file if it does not already exist.
///
/// Returns `true` if this call physically created the file. A file left
/// by a concurrent or earlier attach attempt means the trigger is already
/// armed, which is success, not failure; no locking is used across
/// sessions.
///
/// # Errors
///
/// Returns [`AttachError::Trigger`] if creation fails for any reason
/// other than the file already existing.
pub fn arm(paths: &RendezvousPaths) -> Result<bool> {
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&paths.trigger_path)
    {
        Ok(_) => {
            tracing::debug!(path = %paths.trigger_path.display(), "trigger armed");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %paths.trigger_path.display(), "trigger already armed");
            Ok(false)
        }
        Err(e) => Err(AttachError::Trigger {
            path: paths.trigger_path.clone(),
            source: e,
        }),
    }
}

/// Arms the trigger and wakes the target.
///
/// Returns `true` if this call created the trigger file (the caller is
/// then responsible for removing it when the attempt ends). If the signal
/// cannot be delivered, a trigger file this call created is removed
/// before the error propagates.
///
/// # Errors
///
/// Returns [`AttachError::Trigger`] on trigger-file I/O failure and
/// [`AttachError::NoSuchProcess`] if the target exited before the signal
/// could be delivered.
pub fn fire(
    identity: ProcessIdentity,
    paths: &RendezvousPaths,
    signal: &dyn SignalSender,
) -> Result<bool> {
    let created = arm(paths)?;
    if let Err(e) = signal.send_quit(identity.outer) {
        if created {
            let _ = std::fs::remove_file(&paths.trigger_path);
        }
        return Err(e);
    }
    Ok(created)
}
