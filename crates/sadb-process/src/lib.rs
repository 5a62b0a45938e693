//! Process invocation layer for sadb
//!
//! Every adb operation funnels through this crate: an [`AdbTarget`] says
//! which binary to run and which device to address, [`invoke`] runs one
//! command line and classifies the outcome into an [`AdbError`], and
//! [`parse_device_list`] turns `adb devices` output into identifiers.

mod devices;
mod error;
mod invoke;
mod types;

pub use devices::*;
pub use error::*;
pub use invoke::*;
pub use types::*;
