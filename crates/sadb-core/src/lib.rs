//! Core logic for sadb
//!
//! This crate provides:
//! - [`AdbDevice`]: commands addressed to one device (`adb -s <id> ...`)
//! - [`AdbServer`]: commands for the adb server itself (start, kill,
//!   listing and connecting devices)
//! - Helpers for TCP/IP device addresses

mod device;
mod error;
mod net;
mod server;
pub mod subcommands;
mod timeouts;

pub use device::*;
pub use error::*;
pub use net::*;
pub use server::*;
pub use timeouts::*;

pub use sadb_process::{AdbError, AdbTarget, DeviceEntry, DeviceState};
