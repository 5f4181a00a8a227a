//! Clean command implementation.

use anyhow::{Context, Result};
use pageforge_core::{clean, Config};
use std::path::Path;

/// Remove generated pages and data artifacts.
pub fn clean_output(config_path: &Path) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let pages_dir = config.pages_dir();
    clean(&pages_dir).with_context(|| format!("Failed to remove {:?}", pages_dir))?;

    let data_dir = config.data_dir();
    clean(&data_dir).with_context(|| format!("Failed to remove {:?}", data_dir))?;

    println!("✓ Removed {:?} and {:?}", pages_dir, data_dir);
    Ok(())
}
