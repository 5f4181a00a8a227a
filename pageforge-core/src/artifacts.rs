//! Persistence of the JSON data artifacts.
//!
//! Three files land under the data root after every build and are the only
//! contract between the generator and the running site shell.

use pageforge_types::{PackagesData, PagesList, SiteMeta};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub const PAGES_LIST_FILE: &str = "pages-list.json";
pub const PACKAGES_DATA_FILE: &str = "packages-data.json";
pub const SITE_META_FILE: &str = "site-meta.json";

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize artifact: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write all three artifacts, replacing previous contents wholesale.
pub fn persist(
    pages_list: &PagesList,
    packages_data: &PackagesData,
    site_meta: &SiteMeta,
    data_root: &Path,
) -> Result<(), ArtifactError> {
    std::fs::create_dir_all(data_root)?;

    write_artifact(&data_root.join(PAGES_LIST_FILE), pages_list)?;
    write_artifact(&data_root.join(PACKAGES_DATA_FILE), packages_data)?;
    write_artifact(&data_root.join(SITE_META_FILE), site_meta)?;

    Ok(())
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    tracing::info!("Wrote {:?}", path);
    Ok(())
}
