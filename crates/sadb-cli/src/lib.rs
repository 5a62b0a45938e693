//! sadb CLI library: command implementations behind the `sadb` binary

pub mod commands;
