//! Config command handlers

use anyhow::{bail, Result};
use tome_core::Config;

use crate::output::Output;

/// Show the current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load()?;

    if output.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "config_file": Config::config_file_path(),
                "data_dir": config.data_dir,
                "store_path": config.store_path(),
            })
        );
    } else {
        println!("Config file: {}", Config::config_file_path().display());
        println!("data_dir:    {}", config.data_dir.display());
        println!("store:       {}", config.store_path().display());
    }
    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load()?;

    match key.as_str() {
        "data_dir" => config.data_dir = value.clone().into(),
        other => bail!("Unknown configuration key: {} (expected data_dir)", other),
    }

    config.save()?;
    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
