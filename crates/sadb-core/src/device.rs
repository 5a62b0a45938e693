//! Commands addressed to one device

use crate::subcommands as cmd;
use crate::{device_address, is_network_host, CoreError, Result, Timeouts};
use sadb_config::GlobalConfig;
use sadb_process::{invoke, run, AdbError, AdbTarget};
use std::fmt;
use std::time::Duration;

/// Phrase `adb root` prints, with exit code 0, when adbd refuses to restart as root
const ROOT_FAILURE: &str = "cannot";

/// Phrase `adb remount` prints, with exit code 0, when the partitions stay read-only
const REMOUNT_FAILURE: &str = "remount failed";

/// Where `screencap` stores the capture on the device unless told otherwise
pub const DEFAULT_SCREENCAP_REMOTE: &str = "/sdcard/screencap.png";

/// A device reachable through adb, identified by serial number or `host:port`
#[derive(Debug, Clone)]
pub struct AdbDevice {
    target: AdbTarget,
    timeouts: Timeouts,
}

impl AdbDevice {
    /// Address `id` through the `adb` found on `PATH`
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, &GlobalConfig::default())
    }

    /// Address `id` with the binary and timeouts from `config`
    pub fn with_config(id: impl Into<String>, config: &GlobalConfig) -> Self {
        Self {
            target: AdbTarget::with_selector(config.adb_path(), id),
            timeouts: Timeouts::from_config(config),
        }
    }

    pub(crate) fn from_parts(target: AdbTarget, timeouts: Timeouts) -> Self {
        Self { target, timeouts }
    }

    /// Override the configured timeouts
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Open a device handle, connecting first when `id` is a network host.
    ///
    /// `localhost` and IPv4 addresses are connected to on the default TCP
    /// port; anything else is taken as a serial number as-is.
    pub async fn open(id: &str, config: &GlobalConfig) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(CoreError::EmptyDeviceId);
        }
        if is_network_host(id) {
            return Self::connect(id, None, config).await;
        }
        Ok(Self::with_config(id, config))
    }

    /// Run `adb connect host:port` and return a handle for the connected device
    pub async fn connect(host: &str, port: Option<u16>, config: &GlobalConfig) -> Result<Self> {
        let address = device_address(host, port);
        let server = AdbTarget::new(config.adb_path());
        let timeouts = Timeouts::from_config(config);

        let output = invoke(&server, &[cmd::CONNECT, address.as_str()], timeouts.command).await?;
        tracing::debug!("connect {}: {}", address, output);

        Ok(Self::from_parts(
            AdbTarget::with_selector(config.adb_path(), address),
            timeouts,
        ))
    }

    /// Device serial number or `host:port` this handle addresses
    pub fn id(&self) -> &str {
        self.target.selector().unwrap_or_default()
    }

    pub fn target(&self) -> &AdbTarget {
        &self.target
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    async fn output(&self, args: &[&str]) -> Result<String> {
        Ok(invoke(&self.target, args, self.timeouts.command).await?)
    }

    async fn shell_output(&self, args: &[&str]) -> Result<String> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(cmd::SHELL);
        full.extend_from_slice(args);
        self.output(&full).await
    }

    /// Turn exit-code-0 output that still reports failure into an error
    fn check_logical_failure(&self, args: &[&str], output: String, phrase: &str) -> Result<String> {
        if output.to_lowercase().contains(phrase) {
            tracing::warn!("{} reported failure: {}", args.join(" "), output);
            return Err(AdbError::CommandFailed {
                selector: Some(self.id().to_string()),
                command: self.target.command_line(args),
                status: Some(0),
                output,
            }
            .into());
        }
        Ok(output)
    }

    /// Connection state: `device`, `offline`, `bootloader`, ...
    pub async fn get_state(&self) -> Result<String> {
        self.output(&[cmd::GET_STATE]).await
    }

    pub async fn get_serialno(&self) -> Result<String> {
        self.output(&[cmd::GET_SERIALNO]).await
    }

    pub async fn get_devpath(&self) -> Result<String> {
        self.output(&[cmd::GET_DEVPATH]).await
    }

    /// Whether the device answers `get-serialno`
    pub async fn is_available(&self) -> bool {
        match invoke(&self.target, &[cmd::GET_SERIALNO], self.timeouts.command).await {
            Ok(_) => true,
            Err(AdbError::CommandFailed { .. }) | Err(AdbError::TimeoutExpired { .. }) => false,
        }
    }

    /// PID of a running app
    pub async fn get_app_pid(&self, package: &str) -> Result<u32> {
        let args = [cmd::SHELL, cmd::PIDOF, package];
        let output = self.output(&args).await?;
        output
            .trim()
            .parse()
            .map_err(|_| CoreError::UnexpectedOutput {
                command: self.target.command_line(&args),
                output,
            })
    }

    /// Remount system partitions read-write
    pub async fn remount(&self) -> Result<()> {
        let args = [cmd::REMOUNT];
        let output = self.output(&args).await?;
        self.check_logical_failure(&args, output, REMOUNT_FAILURE)?;
        Ok(())
    }

    pub async fn reboot(&self) -> Result<()> {
        self.output(&[cmd::REBOOT]).await?;
        Ok(())
    }

    /// Restart adbd as root and wait for the device to come back.
    ///
    /// `timeout` bounds the wait; `None` uses the configured restart timeout.
    pub async fn root(&self, timeout: Option<Duration>) -> Result<()> {
        let args = [cmd::ROOT];
        let output = self.output(&args).await?;
        self.check_logical_failure(&args, output, ROOT_FAILURE)?;
        self.wait_for_device(Some(timeout.unwrap_or(self.timeouts.restart)))
            .await
    }

    /// Restart adbd without root and wait for the device to come back
    pub async fn unroot(&self, timeout: Option<Duration>) -> Result<()> {
        self.output(&[cmd::UNROOT]).await?;
        self.wait_for_device(Some(timeout.unwrap_or(self.timeouts.restart)))
            .await
    }

    /// Whether `su` works on the device
    pub async fn is_root(&self) -> bool {
        match run(
            &self.target,
            &[cmd::SHELL, "su", "0", "id", "-u"],
            self.timeouts.command,
        )
        .await
        {
            Ok(result) => result.success(),
            Err(AdbError::CommandFailed { .. }) | Err(AdbError::TimeoutExpired { .. }) => false,
        }
    }

    /// Push an APK to the device and install it
    pub async fn install(&self, apk: &str) -> Result<String> {
        self.output(&[cmd::INSTALL, apk]).await
    }

    pub async fn uninstall(&self, package: &str) -> Result<String> {
        self.output(&[cmd::UNINSTALL, package]).await
    }

    /// Run a remote shell command line and return its output
    pub async fn shell(&self, command: &str) -> Result<String> {
        self.shell_output(&[command]).await
    }

    /// Remove a file on the device
    pub async fn rm(&self, remote: &str) -> Result<()> {
        self.shell_output(&[cmd::RM, remote]).await?;
        Ok(())
    }

    pub async fn tap(&self, x: u32, y: u32) -> Result<()> {
        let (x, y) = (x.to_string(), y.to_string());
        self.shell_output(&[cmd::INPUT, cmd::TAP, &x, &y]).await?;
        Ok(())
    }

    pub async fn swipe(&self, x1: u32, y1: u32, x2: u32, y2: u32) -> Result<()> {
        let coords = [x1, y1, x2, y2].map(|c| c.to_string());
        let mut args = vec![cmd::INPUT, cmd::SWIPE];
        args.extend(coords.iter().map(String::as_str));
        self.shell_output(&args).await?;
        Ok(())
    }

    /// Capture the screen, copy it to `local` and delete it from the device.
    ///
    /// Returns the local path. Defaults: [`DEFAULT_SCREENCAP_REMOTE`] on the
    /// device and `screencap<YYYYmmdd-HHMMSS>.png` locally.
    pub async fn screencap(&self, remote: Option<&str>, local: Option<&str>) -> Result<String> {
        let remote = remote.unwrap_or(DEFAULT_SCREENCAP_REMOTE);
        let local = match local {
            Some(path) => path.to_string(),
            None => default_screencap_name(),
        };

        self.shell_output(&[cmd::SCREENCAP, remote]).await?;
        self.pull(remote, Some(&local)).await?;
        self.rm(remote).await?;
        Ok(local)
    }

    /// Send a broadcast intent (`am broadcast -a <intent>`)
    pub async fn broadcast(&self, intent: &str) -> Result<String> {
        self.shell_output(&[cmd::AM, cmd::BROADCAST, "-a", intent])
            .await
    }

    pub async fn pm_grant(&self, package: &str, permission: &str) -> Result<()> {
        self.shell_output(&[cmd::PM, cmd::GRANT, package, permission])
            .await?;
        Ok(())
    }

    pub async fn setprop(&self, prop: &str, value: &str) -> Result<()> {
        self.shell_output(&[cmd::SETPROP, prop, value]).await?;
        Ok(())
    }

    /// Read an Android system property
    pub async fn getprop(&self, prop: &str) -> Result<String> {
        self.shell_output(&[cmd::GETPROP, prop]).await
    }

    /// Turn dm-verity on or off
    pub async fn enable_verity(&self, enabled: bool) -> Result<String> {
        let sub = if enabled {
            cmd::ENABLE_VERITY
        } else {
            cmd::DISABLE_VERITY
        };
        self.output(&[sub]).await
    }

    /// Copy a local file or directory to the device
    pub async fn push(&self, source: &str, dest: &str) -> Result<String> {
        self.output(&[cmd::PUSH, source, dest]).await
    }

    /// Copy a file or directory from the device, into `.` by default
    pub async fn pull(&self, source: &str, dest: Option<&str>) -> Result<String> {
        self.output(&[cmd::PULL, source, dest.unwrap_or(".")]).await
    }

    /// Forward a local socket to the device, e.g. `tcp:8080` -> `tcp:8080`
    pub async fn forward(&self, local: &str, remote: &str) -> Result<()> {
        self.output(&[cmd::FORWARD, local, remote]).await?;
        Ok(())
    }

    /// Block until the device is online.
    ///
    /// `None` uses the configured wait timeout, which itself may be unbounded.
    pub async fn wait_for_device(&self, timeout: Option<Duration>) -> Result<()> {
        let timeout = timeout.or(self.timeouts.wait_for_device);
        invoke(&self.target, &[cmd::WAIT_FOR_DEVICE], timeout).await?;
        Ok(())
    }

    /// Dump the log, optionally restricted to some buffers (`main`, `radio`, ...)
    pub async fn dump_logcat(&self, buffers: &[&str]) -> Result<String> {
        self.output(&logcat_args(buffers, "-d")).await
    }

    /// Clear the log, optionally only some buffers
    pub async fn clear_logcat(&self, buffers: &[&str]) -> Result<()> {
        self.output(&logcat_args(buffers, "-c")).await?;
        Ok(())
    }
}

impl PartialEq for AdbDevice {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for AdbDevice {}

impl fmt::Display for AdbDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

fn logcat_args<'a>(buffers: &[&'a str], action: &'a str) -> Vec<&'a str> {
    let mut args = vec![cmd::LOGCAT];
    for &buffer in buffers {
        args.push("-b");
        args.push(buffer);
    }
    args.push(action);
    args
}

fn default_screencap_name() -> String {
    format!("screencap{}.png", chrono::Local::now().format("%Y%m%d-%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_id() {
        let dev1 = AdbDevice::new("1234");
        let dev2 = AdbDevice::new("1234").with_timeouts(Timeouts {
            command: Some(Duration::from_secs(1)),
            ..Timeouts::default()
        });
        let dev3 = AdbDevice::new("42");
        assert_eq!(dev1, dev2);
        assert_ne!(dev1, dev3);
    }

    #[test]
    fn test_display_is_id() {
        let device = AdbDevice::new("emulator-5554");
        assert_eq!(device.to_string(), "emulator-5554");
        assert_eq!(device.id(), "emulator-5554");
        assert_eq!(device.target().path(), "adb");
    }

    #[test]
    fn test_with_config_uses_path_and_timeouts() {
        let mut config = GlobalConfig::default();
        config.adb.path = "/opt/platform-tools/adb".to_string();
        config.timeouts.command_secs = Some(7);

        let device = AdbDevice::with_config("R58M123", &config);
        assert_eq!(device.target().path(), "/opt/platform-tools/adb");
        assert_eq!(device.timeouts().command, Some(Duration::from_secs(7)));
        assert_eq!(device.timeouts().restart, Duration::from_secs(5));
    }

    #[test]
    fn test_logcat_args() {
        assert_eq!(logcat_args(&[], "-d"), vec!["logcat", "-d"]);
        assert_eq!(
            logcat_args(&["main", "radio"], "-c"),
            vec!["logcat", "-b", "main", "-b", "radio", "-c"]
        );
    }

    #[test]
    fn test_default_screencap_name() {
        let name = default_screencap_name();
        assert!(name.starts_with("screencap"));
        assert!(name.ends_with(".png"));
        // screencap + YYYYmmdd-HHMMSS + .png
        assert_eq!(name.len(), "screencap".len() + 15 + ".png".len());
    }
}
