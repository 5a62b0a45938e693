//! CLI command implementations

mod device;
mod manage;
mod server;

use anyhow::{bail, Result};
use sadb_config::GlobalConfig;
use sadb_core::{AdbDevice, AdbServer};

pub use device::*;
pub use manage::*;
pub use server::*;

/// Pick the device a command talks to.
///
/// An explicit serial (or network host) wins; otherwise exactly one device
/// must be attached.
pub async fn resolve_device(config: &GlobalConfig, serial: Option<&str>) -> Result<AdbDevice> {
    if let Some(id) = serial {
        return Ok(AdbDevice::open(id, config).await?);
    }

    let mut devices = AdbServer::new(config).devices().await?;
    match devices.len() {
        0 => bail!("No devices attached"),
        1 => {
            let device = devices.remove(0);
            tracing::debug!("Using the only attached device: {}", device);
            Ok(device)
        }
        _ => bail!(
            "More than one device attached, use -s to pick one of: {}",
            devices
                .iter()
                .map(|d| d.id())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Print command output, skipping empty output
pub fn print_output(output: &str) {
    if !output.is_empty() {
        println!("{}", output);
    }
}
