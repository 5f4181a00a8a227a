//! Configuration parsing and management.

use pageforge_types::SiteLink;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the pageforge.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,

    /// Free-standing documentation roots generated next to the packages.
    #[serde(default)]
    pub docs: Vec<DocsRootConfig>,

    /// Scan nested example folders inside package sources.
    #[serde(default)]
    pub show_sub_examples: bool,

    /// When the changelog page appears in the sitemap.
    #[serde(default)]
    pub changelog: ChangelogPolicy,

    /// Duplicate sub-example paths abort the run instead of overwriting.
    #[serde(default = "default_true")]
    pub strict: bool,

    /// Allow a package pattern to match nothing.
    #[serde(default)]
    pub allow_empty_patterns: bool,

    /// Directory of scaffold pages copied into the output root before
    /// generation. `None` uses the built-in scaffold.
    #[serde(default)]
    pub scaffold: Option<PathBuf>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,

    #[serde(default)]
    pub packages_description: Option<String>,

    #[serde(default)]
    pub packages_img_src: Option<String>,

    #[serde(default)]
    pub readme_img_src: Option<String>,

    #[serde(default)]
    pub links: Vec<SiteLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Glob patterns locating package directories.
    pub packages: Vec<String>,

    /// Output root for generated pages.
    #[serde(default = "default_pages")]
    pub pages: PathBuf,

    /// Directory holding the wrapper components generated pages import.
    pub wrappers: PathBuf,

    /// Output root for the JSON data artifacts.
    #[serde(default = "default_data")]
    pub data: PathBuf,

    /// Repository-root readme rendered as the `readme` page.
    #[serde(default)]
    pub readme: Option<PathBuf>,
}

fn default_pages() -> PathBuf {
    PathBuf::from("pages")
}

fn default_data() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsRootConfig {
    pub path: PathBuf,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Whether a package's changelog page joins the sitemap when no changelog
/// file exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangelogPolicy {
    /// Always list the changelog page, even without a changelog file.
    #[default]
    Always,

    /// List the changelog page only when a changelog file exists.
    WhenPresent,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Output pages root, resolved relative to the config file
    pub fn pages_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.pages)
    }

    /// Wrapper components root, resolved relative to the config file
    pub fn wrappers_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.wrappers)
    }

    /// JSON artifact root, resolved relative to the config file
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.data)
    }

    /// Repository-root readme, resolved relative to the config file
    pub fn readme_path(&self) -> Option<PathBuf> {
        self.paths.readme.as_ref().map(|p| self.resolve_path(p))
    }

    /// Scaffold directory override (None means use the built-in scaffold)
    pub fn scaffold_dir(&self) -> Option<PathBuf> {
        self.scaffold.as_ref().map(|p| self.resolve_path(p))
    }

    /// Package glob patterns, resolved relative to the config file
    pub fn package_patterns(&self) -> Vec<String> {
        self.paths
            .packages
            .iter()
            .map(|pattern| {
                let p = Path::new(pattern);
                if p.is_absolute() {
                    pattern.clone()
                } else {
                    self.resolve_path(p).to_string_lossy().into_owned()
                }
            })
            .collect()
    }

    /// Documentation root path, resolved relative to the config file
    pub fn docs_root_path(&self, root: &DocsRootConfig) -> PathBuf {
        self.resolve_path(&root.path)
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }
}
