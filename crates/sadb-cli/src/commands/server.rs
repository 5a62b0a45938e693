//! Commands for the adb server

use super::print_output;
use anyhow::Result;
use sadb_core::AdbServer;

/// List attached devices as a table, or as JSON with `json`
pub async fn devices(server: &AdbServer, json: bool) -> Result<()> {
    let entries = server.device_list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No devices attached.");
        return Ok(());
    }

    const ID_WIDTH: usize = 24;

    println!("{:<ID_WIDTH$} STATE", "ID");
    println!("{}", "-".repeat(ID_WIDTH + 14));
    for entry in entries {
        let state = entry
            .state
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<ID_WIDTH$} {}", entry.id, state);
    }

    Ok(())
}

pub async fn connect(server: &AdbServer, host: &str, port: Option<u16>) -> Result<()> {
    let device = server.connect(host, port).await?;
    println!("Connected to {}", device);
    Ok(())
}

pub async fn disconnect(server: &AdbServer, host: &str, port: Option<u16>) -> Result<()> {
    print_output(&server.disconnect(host, port).await?);
    Ok(())
}

pub async fn start_server(server: &AdbServer, port: Option<u16>) -> Result<()> {
    server.start(port).await?;
    Ok(())
}
