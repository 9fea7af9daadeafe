//! Configuration commands.

use super::{config_file, load_config};
use anyhow::{Context, Result};
use colored::Colorize;
use folio_config::Config;
use std::path::Path;

pub fn show(override_path: Option<&Path>) -> Result<()> {
    let path = config_file(override_path)?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));

    if path.exists() {
        let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
        println!("{}", contents);
    } else {
        println!(
            "{} No config file at {}, showing defaults.\n",
            "Note:".yellow(),
            path.display()
        );
        println!("{}", Config::default_config_string());
    }

    Ok(())
}

pub fn init(override_path: Option<&Path>) -> Result<()> {
    let path = config_file(override_path)?;

    if path.exists() {
        println!(
            "{} Config already exists: {}",
            "Note:".yellow().bold(),
            path.display()
        );
        return Ok(());
    }

    Config::create_default_file(&path).context("Failed to create config file")?;
    println!("{} Created config: {}", "✓".green(), path.display());

    Ok(())
}

pub fn path(override_path: Option<&Path>) -> Result<()> {
    println!("{}", config_file(override_path)?.display());
    Ok(())
}

pub fn set(key: &str, value: &str, override_path: Option<&Path>) -> Result<()> {
    let path = config_file(override_path)?;
    let mut config = load_config(override_path)?;

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["import", "chunk_size"] => {
            config.import.chunk_size = value.parse().context("Invalid chunk_size value")?;
        }
        ["import", "max_concurrent_chunks"] => {
            config.import.max_concurrent_chunks = value
                .parse()
                .context("Invalid max_concurrent_chunks value")?;
        }
        ["import", "max_single_file_size"] => {
            config.import.max_single_file_size = value
                .parse()
                .context("Invalid max_single_file_size value")?;
        }
        ["import", "max_total_size"] => {
            config.import.max_total_size =
                value.parse().context("Invalid max_total_size value")?;
        }
        ["import", "binary_check_sample_size"] => {
            config.import.binary_check_sample_size = value
                .parse()
                .context("Invalid binary_check_sample_size value")?;
        }
        ["import", "debounce_delay_ms"] => {
            config.import.debounce_delay_ms =
                value.parse().context("Invalid debounce_delay_ms value")?;
        }
        ["import", "priority_files"] => {
            config.import.priority_files = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        ["filter", "include_hidden"] => {
            config.filter.include_hidden = value.parse().context("Invalid boolean value")?;
        }
        ["ui", "color"] => {
            config.ui.color = value.parse().context("Invalid boolean value")?;
        }
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    }

    config.import.validate()?;
    config.save_to(&path).context("Failed to save config")?;

    println!("{} Set {} = {}", "✓".green(), key.cyan(), value);

    Ok(())
}
