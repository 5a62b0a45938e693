//! Commands addressed to one device

use super::print_output;
use anyhow::{Context, Result};
use sadb_core::AdbDevice;
use std::time::Duration;

/// Run a remote command line made of the given tokens.
///
/// The tokens are re-quoted into one argument so the local shell hands the
/// whole line to adb untouched and the device shell does the splitting.
pub async fn shell(device: &AdbDevice, cmd: &[String]) -> Result<()> {
    let line = shell_words::join(cmd);
    let output = device.shell(&shell_words::quote(&line)).await?;
    print_output(&output);
    Ok(())
}

/// Print `true` or `false`
pub async fn available(device: &AdbDevice) -> Result<()> {
    println!("{}", device.is_available().await);
    Ok(())
}

pub async fn is_root(device: &AdbDevice) -> Result<()> {
    println!("{}", device.is_root().await);
    Ok(())
}

pub async fn root(device: &AdbDevice, enable: bool) -> Result<()> {
    if enable {
        device.root(None).await?;
        println!("{} is running adbd as root", device);
    } else {
        device.unroot(None).await?;
        println!("{} is running adbd without root", device);
    }
    Ok(())
}

pub async fn remount(device: &AdbDevice) -> Result<()> {
    device.remount().await?;
    println!("Remounted partitions on {} read-write", device);
    Ok(())
}

pub async fn pid(device: &AdbDevice, package: &str) -> Result<()> {
    let pid = device
        .get_app_pid(package)
        .await
        .with_context(|| format!("{} is not running on {}", package, device))?;
    println!("{}", pid);
    Ok(())
}

pub async fn screencap(device: &AdbDevice, remote: Option<&str>, local: Option<&str>) -> Result<()> {
    let saved = device.screencap(remote, local).await?;
    println!("Saved screenshot to {}", saved);
    Ok(())
}

pub async fn logcat(device: &AdbDevice, clear: bool, buffers: &[String]) -> Result<()> {
    let buffers: Vec<&str> = buffers.iter().map(String::as_str).collect();
    if clear {
        device.clear_logcat(&buffers).await?;
    } else {
        print_output(&device.dump_logcat(&buffers).await?);
    }
    Ok(())
}

/// Wait for the device; `secs` overrides the configured bound
pub async fn wait_for_device(device: &AdbDevice, secs: Option<u64>) -> Result<()> {
    device
        .wait_for_device(secs.map(Duration::from_secs))
        .await?;
    println!("{} is online", device);
    Ok(())
}
