//! Commands for the adb server itself

use crate::subcommands as cmd;
use crate::{device_address, AdbDevice, Result, Timeouts};
use sadb_config::GlobalConfig;
use sadb_process::{invoke, parse_device_list, parse_device_list_long, AdbTarget, DeviceEntry};

/// The local adb server: lists, connects and disconnects devices
#[derive(Debug, Clone)]
pub struct AdbServer {
    target: AdbTarget,
    timeouts: Timeouts,
    port: Option<u16>,
}

impl AdbServer {
    pub fn new(config: &GlobalConfig) -> Self {
        Self {
            target: AdbTarget::new(config.adb_path()),
            timeouts: Timeouts::from_config(config),
            port: config.adb.server_port,
        }
    }

    /// Override the configured timeouts
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn target(&self) -> &AdbTarget {
        &self.target
    }

    async fn output(&self, args: &[&str]) -> Result<String> {
        Ok(invoke(&self.target, args, self.timeouts.command).await?)
    }

    /// Make sure a server is running.
    ///
    /// `port` overrides the configured server port; with neither, adb picks
    /// its default.
    pub async fn start(&self, port: Option<u16>) -> Result<()> {
        let port = port.or(self.port).map(|p| p.to_string());
        let mut args = Vec::new();
        if let Some(ref port) = port {
            args.push(cmd::SERVER_PORT_FLAG);
            args.push(port.as_str());
        }
        args.push(cmd::START_SERVER);
        self.output(&args).await?;
        Ok(())
    }

    /// Kill the server if it is running
    pub async fn kill(&self) -> Result<()> {
        self.output(&[cmd::KILL_SERVER]).await?;
        Ok(())
    }

    /// Attached devices, as handles sharing this server's binary and timeouts
    pub async fn devices(&self) -> Result<Vec<AdbDevice>> {
        let output = self.output(&[cmd::DEVICES]).await?;
        Ok(parse_device_list(&output)
            .into_iter()
            .map(|id| {
                AdbDevice::from_parts(
                    AdbTarget::with_selector(self.target.path(), id),
                    self.timeouts,
                )
            })
            .collect())
    }

    /// Attached devices with their connection state
    pub async fn device_list(&self) -> Result<Vec<DeviceEntry>> {
        let output = self.output(&[cmd::DEVICES]).await?;
        Ok(parse_device_list_long(&output))
    }

    /// Connect to a device over TCP/IP; the port defaults to 5555
    pub async fn connect(&self, host: &str, port: Option<u16>) -> Result<AdbDevice> {
        let address = device_address(host, port);
        let output = self.output(&[cmd::CONNECT, address.as_str()]).await?;
        tracing::debug!("connect {}: {}", address, output);

        Ok(AdbDevice::from_parts(
            AdbTarget::with_selector(self.target.path(), address),
            self.timeouts,
        ))
    }

    /// Disconnect from a TCP/IP device; the port defaults to 5555
    pub async fn disconnect(&self, host: &str, port: Option<u16>) -> Result<String> {
        let address = device_address(host, port);
        self.output(&[cmd::DISCONNECT, address.as_str()]).await
    }

    /// Restart the server listening on USB
    pub async fn usb(&self) -> Result<String> {
        self.output(&[cmd::USB]).await
    }

    /// Restart the server listening on TCP `port`
    pub async fn tcpip(&self, port: u16) -> Result<String> {
        let port = port.to_string();
        self.output(&[cmd::TCPIP, port.as_str()]).await
    }

    pub async fn version(&self) -> Result<String> {
        self.output(&[cmd::VERSION]).await
    }
}
