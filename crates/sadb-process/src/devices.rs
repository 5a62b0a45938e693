//! Parsing of `adb devices` output

use serde::{Deserialize, Serialize};

/// Connection state reported next to each device id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Device,
    Offline,
    Unauthorized,
    Bootloader,
    Recovery,
    Sideload,
    Authorizing,
    Connecting,
    #[serde(rename = "no permissions")]
    NoPermissions,
    Unknown,
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Offline => write!(f, "offline"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Bootloader => write!(f, "bootloader"),
            Self::Recovery => write!(f, "recovery"),
            Self::Sideload => write!(f, "sideload"),
            Self::Authorizing => write!(f, "authorizing"),
            Self::Connecting => write!(f, "connecting"),
            Self::NoPermissions => write!(f, "no permissions"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<&str> for DeviceState {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "device" => Self::Device,
            "offline" => Self::Offline,
            "unauthorized" => Self::Unauthorized,
            "bootloader" => Self::Bootloader,
            "recovery" => Self::Recovery,
            "sideload" => Self::Sideload,
            "authorizing" => Self::Authorizing,
            "connecting" => Self::Connecting,
            "no" => Self::NoPermissions,
            _ => Self::Unknown,
        }
    }
}

/// One line of `adb devices` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    pub id: String,
    /// `None` when the line carried only an identifier
    pub state: Option<DeviceState>,
}

/// Extract device identifiers from `adb devices` output.
///
/// The first line is the tool's header and is always dropped. Every other
/// line contributes its first whitespace-delimited token; blank lines
/// contribute nothing. Never fails, whatever the input.
pub fn parse_device_list(output: &str) -> Vec<String> {
    device_lines(output)
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Like [`parse_device_list`], keeping the state column when present
pub fn parse_device_list_long(output: &str) -> Vec<DeviceEntry> {
    device_lines(output)
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let id = tokens.next()?;
            Some(DeviceEntry {
                id: id.to_string(),
                state: tokens.next().map(DeviceState::from),
            })
        })
        .collect()
}

fn device_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_devices() {
        let output = "List of devices attached\nAAA\tdevice\nBBB\tdevice\n";
        assert_eq!(parse_device_list(output), vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_parse_header_only() {
        assert!(parse_device_list("List of devices attached\n").is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_device_list("").is_empty());
        assert!(parse_device_list_long("").is_empty());
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let output = "List of devices attached\n\nAAA\tdevice\n   \n\t\nBBB\toffline\n\n";
        assert_eq!(parse_device_list(output), vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_parse_header_is_dropped_unconditionally() {
        // No header present: the first device line is still treated as one
        let output = "AAA\tdevice\nBBB\tdevice";
        assert_eq!(parse_device_list(output), vec!["BBB"]);
    }

    #[test]
    fn test_parse_crlf_output() {
        let output = "List of devices attached\r\nemulator-5554\tdevice\r\n";
        assert_eq!(parse_device_list(output), vec!["emulator-5554"]);
    }

    #[test]
    fn test_parse_accepts_any_token() {
        let output = "List of devices attached\n192.168.1.20:5555 device\n???\n";
        assert_eq!(parse_device_list(output), vec!["192.168.1.20:5555", "???"]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let output = "List of devices attached\nZZZ\tdevice\nAAA\tdevice\nMMM\tdevice\n";
        let first = parse_device_list(output);
        let second = parse_device_list(output);
        assert_eq!(first, second);
        assert_eq!(first, vec!["ZZZ", "AAA", "MMM"]);
    }

    #[test]
    fn test_parse_long_keeps_state() {
        let output = "List of devices attached\n\
                      emulator-5554\tdevice\n\
                      R58M123\tunauthorized\n\
                      0123456789ABCDEF\tno permissions; see [http://developer.android.com/tools/device.html]\n\
                      lonely\n";
        let entries = parse_device_list_long(output);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].state, Some(DeviceState::Device));
        assert_eq!(entries[1].state, Some(DeviceState::Unauthorized));
        assert_eq!(entries[2].id, "0123456789ABCDEF");
        assert_eq!(entries[2].state, Some(DeviceState::NoPermissions));
        assert_eq!(entries[3].id, "lonely");
        assert_eq!(entries[3].state, None);
    }

    #[test]
    fn test_device_state_from_str() {
        assert_eq!(DeviceState::from("DEVICE"), DeviceState::Device);
        assert_eq!(DeviceState::from("offline"), DeviceState::Offline);
        assert_eq!(DeviceState::from("host"), DeviceState::Unknown);
        assert_eq!(DeviceState::NoPermissions.to_string(), "no permissions");
    }

    #[test]
    fn test_json_state_matches_display() {
        let states = [
            DeviceState::Device,
            DeviceState::Offline,
            DeviceState::Unauthorized,
            DeviceState::Bootloader,
            DeviceState::Recovery,
            DeviceState::Sideload,
            DeviceState::Authorizing,
            DeviceState::Connecting,
            DeviceState::NoPermissions,
            DeviceState::Unknown,
        ];
        for state in states {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }
}
