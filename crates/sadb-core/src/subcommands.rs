//! adb sub-commands and the remote tools driven through `adb shell`

pub const DEVICES: &str = "devices";
pub const GET_STATE: &str = "get-state";
pub const GET_SERIALNO: &str = "get-serialno";
pub const GET_DEVPATH: &str = "get-devpath";
pub const REMOUNT: &str = "remount";
pub const REBOOT: &str = "reboot";
pub const ROOT: &str = "root";
pub const UNROOT: &str = "unroot";
pub const INSTALL: &str = "install";
pub const UNINSTALL: &str = "uninstall";
pub const SHELL: &str = "shell";
pub const PUSH: &str = "push";
pub const PULL: &str = "pull";
pub const FORWARD: &str = "forward";
pub const CONNECT: &str = "connect";
pub const DISCONNECT: &str = "disconnect";
pub const WAIT_FOR_DEVICE: &str = "wait-for-device";
pub const START_SERVER: &str = "start-server";
pub const KILL_SERVER: &str = "kill-server";
pub const USB: &str = "usb";
pub const TCPIP: &str = "tcpip";
pub const ENABLE_VERITY: &str = "enable-verity";
pub const DISABLE_VERITY: &str = "disable-verity";
pub const LOGCAT: &str = "logcat";
pub const VERSION: &str = "version";

/// Server port flag, placed before the sub-command
pub const SERVER_PORT_FLAG: &str = "-P";

// Run on the device through `adb shell`
pub const RM: &str = "rm";
pub const INPUT: &str = "input";
pub const TAP: &str = "tap";
pub const SWIPE: &str = "swipe";
pub const SCREENCAP: &str = "screencap";
pub const PM: &str = "pm";
pub const GRANT: &str = "grant";
pub const AM: &str = "am";
pub const BROADCAST: &str = "broadcast";
pub const SETPROP: &str = "setprop";
pub const GETPROP: &str = "getprop";
pub const PIDOF: &str = "pidof";
