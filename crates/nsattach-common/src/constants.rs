//! System-wide constants and default paths.

/// Root of the procfs mount used to reach into target processes.
pub const PROC_ROOT: &str = "/proc";

/// File name prefix of the rendezvous socket the target's listener creates.
///
/// The full name is this prefix followed by the PID the target sees for
/// itself (its innermost-namespace PID).
pub const SOCKET_FILE_PREFIX: &str = ".XXXX_pid";

/// File name prefix of the trigger file placed in the target's working
/// directory to request an attach.
pub const TRIGGER_FILE_PREFIX: &str = ".attach_pid";

/// Default temp directory name inside the target's mount namespace where
/// the listener publishes its socket.
pub const DEFAULT_TMP_DIR: &str = "/tmp";

/// Default total wall-clock budget for one attach attempt, in milliseconds.
pub const DEFAULT_TOTAL_TIMEOUT_MS: u64 = 10_000;

/// Default delay before the first re-check of the rendezvous socket, in
/// milliseconds.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 20;

/// Default growth factor applied to the poll delay between checks.
pub const DEFAULT_DELAY_GROWTH_FACTOR: f64 = 1.5;

/// Default coarse poll interval used once more than half the total timeout
/// has elapsed, in milliseconds.
pub const DEFAULT_COARSE_DELAY_MS: u64 = 500;

/// Binary name for the CLI.
pub const BIN_NAME: &str = "nsat";
