//! TCP/IP device addresses

use std::net::Ipv4Addr;

/// Port adb uses for devices reached over TCP/IP
pub const DEFAULT_TCP_PORT: u16 = 5555;

/// Check for a dotted-quad IPv4 address such as `192.168.1.20`
pub fn is_valid_ip(address: &str) -> bool {
    address.parse::<Ipv4Addr>().is_ok()
}

/// Whether `id` names a host to `adb connect` to rather than a USB serial
pub fn is_network_host(id: &str) -> bool {
    id == "localhost" || is_valid_ip(id)
}

/// `host:port` as adb expects it for connect/disconnect
pub fn device_address(host: &str, port: Option<u16>) -> String {
    format!("{}:{}", host, port.unwrap_or(DEFAULT_TCP_PORT))
}
