//! Configuration model for attach sessions.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{AttachError, Result};

/// Tuning knobs for a single attach session.
///
/// All durations are stored as integer milliseconds so the on-disk JSON
/// form stays flat and editable by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachConfig {
    /// Temp directory name inside the target's mount namespace where the
    /// listener publishes its rendezvous socket.
    pub tmp_dir: String,
    /// Total wall-clock budget for one attach attempt.
    pub total_timeout_ms: u64,
    /// Delay before the first re-check of the socket.
    pub initial_delay_ms: u64,
    /// Multiplier applied to the poll delay after each miss.
    pub delay_growth_factor: f64,
    /// Poll interval used once more than half the total budget has elapsed.
    pub coarse_delay_ms: u64,
}

impl Default for AttachConfig {
    fn default() -> Self {
        Self {
            tmp_dir: constants::DEFAULT_TMP_DIR.to_owned(),
            total_timeout_ms: constants::DEFAULT_TOTAL_TIMEOUT_MS,
            initial_delay_ms: constants::DEFAULT_INITIAL_DELAY_MS,
            delay_growth_factor: constants::DEFAULT_DELAY_GROWTH_FACTOR,
            coarse_delay_ms: constants::DEFAULT_COARSE_DELAY_MS,
        }
    }
}

impl AttachConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::Config`] if the file cannot be read or does
    /// not parse as a configuration document.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| AttachError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| AttachError::Config {
            message: format!("cannot parse {}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the timing parameters describe a usable schedule.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::Config`] for a zero timeout or a growth
    /// factor below 1, either of which would stall or busy-spin the poller.
    pub fn validate(&self) -> Result<()> {
        if self.total_timeout_ms == 0 {
            return Err(AttachError::Config {
                message: "total_timeout_ms must be positive".into(),
            });
        }
        if self.delay_growth_factor < 1.0 {
            return Err(AttachError::Config {
                message: format!(
                    "delay_growth_factor must be >= 1.0, got {}",
                    self.delay_growth_factor
                ),
            });
        }
        Ok(())
    }

    /// Total wall-clock budget as a [`Duration`].
    #[must_use]
    pub const fn total_timeout(&self) -> Duration {
        Duration::from_millis(self.total_timeout_ms)
    }

    /// Initial poll delay as a [`Duration`].
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Coarse late-phase poll interval as a [`Duration`].
    #[must_use]
    pub const fn coarse_delay(&self) -> Duration {
        Duration::from_millis(self.coarse_delay_ms)
    }
}
