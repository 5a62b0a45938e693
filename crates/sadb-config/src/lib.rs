//! Configuration parsing for sadb
//!
//! This crate handles parsing of the global configuration
//! (`~/.config/sadb/config.toml`): which `adb` binary to run and
//! how long commands may take.

mod error;
mod global;

pub use error::*;
pub use global::*;
