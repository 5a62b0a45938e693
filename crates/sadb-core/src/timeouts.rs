//! Time bounds applied to adb commands

use sadb_config::GlobalConfig;
use std::time::Duration;

/// Bounds a handle applies to the commands it issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Every ordinary command; `None` waits forever
    pub command: Option<Duration>,
    /// `wait-for-device` after `root`/`unroot` restarts adbd
    pub restart: Duration,
    /// Explicit `wait-for-device`; `None` waits forever
    pub wait_for_device: Option<Duration>,
}

impl Timeouts {
    pub fn from_config(config: &GlobalConfig) -> Self {
        Self {
            command: config.command_timeout(),
            restart: config.restart_timeout(),
            wait_for_device: config.wait_for_device_timeout(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::from_config(&GlobalConfig::default())
    }
}
