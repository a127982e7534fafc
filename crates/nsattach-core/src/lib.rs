//! Namespace-aware attach handshake protocol.
//!
//! Establishes a private diagnostic channel to a long-running target
//! process, even when that target is isolated inside a container with its
//! own PID and mount namespaces. The caller and the target may disagree on
//! both the target's PID and its filesystem root; procfs is the only
//! out-of-band channel used to bridge the two views.
//!
//! The handshake, end to end:
//!
//! 1. [`identity::resolve`] reads `/proc/<pid>/status` to learn the PID the
//!    target sees for itself (its innermost-namespace PID).
//! 2. [`rendezvous::RendezvousPaths`] computes where the target's listener
//!    will publish its socket and where the trigger file must be placed,
//!    both reached through `/proc/<pid>/root` and `/proc/<pid>/cwd` so they
//!    resolve inside the *target's* mount namespace.
//! 3. [`trigger`] arms the trigger file and wakes the target with SIGQUIT.
//! 4. [`poller`] waits for the socket to appear, backing off between
//!    checks, bounded by a total timeout.
//!
//! [`session::AttachSession`] composes the steps and guarantees the trigger
//! file is cleaned up on every exit path.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod identity;
pub mod poller;
pub mod rendezvous;
pub mod session;
pub mod signal;
pub mod trigger;
