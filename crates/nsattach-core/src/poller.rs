//! Bounded wait for the rendezvous socket.
//!
//! The target needs an unknown amount of time between receiving the
//! wake-up signal and publishing its socket. Early checks are frequent so
//! a responsive target attaches fast; the delay then grows geometrically,
//! and once more than half the total budget is gone the remaining budget
//! is spent at a coarse fixed interval. Every sleep is clamped to the
//! remaining budget, so the loop overruns the deadline by at most one
//! interval.

use std::path::Path;
use std::time::{Duration, Instant};

use nsattach_common::config::AttachConfig;
use nsattach_common::error::{AttachError, Result};

/// Blocks until `socket_path` exists or the configured timeout elapses.
///
/// The calling thread sleeps between checks; this is the only suspension
/// point in an attach attempt. The initial check runs before any sleep,
/// so a socket that already exists returns immediately.
///
/// # Errors
///
/// Returns [`AttachError::AttachTimeout`] if the socket has not appeared
/// within `config.total_timeout()`.
pub fn wait_for_socket(socket_path: &Path, pid: i32, config: &AttachConfig) -> Result<()> {
    let total = config.total_timeout();
    let start = Instant::now();
    let mut delay = config.initial_delay().max(Duration::from_millis(1));
    let mut rounds = 0u32;

    loop {
        if socket_path.exists() {
            tracing::debug!(
                path = %socket_path.display(),
                rounds,
                elapsed = ?start.elapsed(),
                "rendezvous socket appeared"
            );
            return Ok(());
        }
        let elapsed = start.elapsed();
        if elapsed >= total {
            tracing::debug!(pid, rounds, waited = ?elapsed, "attach timed out");
            return Err(AttachError::AttachTimeout {
                pid,
                waited: elapsed,
            });
        }
        if elapsed > total / 2 {
            delay = delay.max(config.coarse_delay());
        }
        std::thread::sleep(delay.min(total - elapsed));
        delay = next_delay(delay, config);
        rounds += 1;
    }
}

/// Grows the delay by the configured factor, capped so late-phase polling
/// settles at the coarse interval instead of growing without bound. Never
/// shrinks.
fn next_delay(delay: Duration, config: &AttachConfig) -> Duration {
    delay
        .mul_f64(config.delay_growth_factor)
        .min(config.coarse_delay().max(delay))
}
