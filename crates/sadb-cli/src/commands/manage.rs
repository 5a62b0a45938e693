//! Configuration commands

use anyhow::Result;
use sadb_config::GlobalConfig;

/// Show the config file location and the effective configuration
pub fn config(effective: &GlobalConfig, path_only: bool) -> Result<()> {
    let config_path = GlobalConfig::config_path()?;

    if path_only {
        println!("{}", config_path.display());
        return Ok(());
    }

    if config_path.exists() {
        println!("# Config file: {}\n", config_path.display());
    } else {
        println!("# Config file: {} (not created yet)\n", config_path.display());
    }
    println!("{}", toml::to_string_pretty(effective)?);

    Ok(())
}
