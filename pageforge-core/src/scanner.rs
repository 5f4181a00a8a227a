//! Package and documentation discovery.
//!
//! Walks package and docs directories on disk and returns normalized,
//! immutable descriptors. Everything downstream (assembler, emitter) works
//! from these descriptors and never re-reads the source tree structure.

use pageforge_types::RepositoryRef;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid package pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("No packages matched pattern '{0}'")]
    NoMatches(String),

    #[error("Failed to parse manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Walk package sources for nested example folders.
    pub show_sub_examples: bool,

    /// Tolerate a package pattern that matches nothing.
    pub allow_empty_patterns: bool,
}

/// Everything known about one source package after a scan.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    /// Stable slug: the package directory name.
    pub id: String,

    /// Display name from the manifest.
    pub name: String,

    pub version: String,
    pub description: Option<String>,
    pub maintainers: Vec<String>,
    pub repository: Option<RepositoryRef>,

    pub readme_path: Option<PathBuf>,
    pub changelog_path: Option<PathBuf>,

    pub docs: Vec<DocEntry>,
    pub examples: Vec<ExampleDescriptor>,
    pub sub_examples: Vec<SubExampleDescriptor>,
}

/// One entry in a documentation tree.
///
/// The readme-as-index convention is encoded in the shape: a folder with a
/// case-insensitive `readme.md` becomes an [`DocEntry::IndexedFolder`] whose
/// `children` exclude the consumed readme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocEntry {
    Leaf {
        id: String,
        path: PathBuf,
    },
    IndexedFolder {
        id: String,
        index: PathBuf,
        children: Vec<DocEntry>,
    },
    PlainFolder {
        id: String,
        children: Vec<DocEntry>,
    },
}

impl DocEntry {
    pub fn id(&self) -> &str {
        match self {
            DocEntry::Leaf { id, .. }
            | DocEntry::IndexedFolder { id, .. }
            | DocEntry::PlainFolder { id, .. } => id,
        }
    }
}

/// A top-level example component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDescriptor {
    /// Filename stem, unique within the package's examples folder.
    pub id: String,
    pub path: PathBuf,
}

/// An example nested under an arbitrary-depth folder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubExampleDescriptor {
    /// Slash-separated path of the folder owning the nested examples
    /// directory, relative to the package root (e.g. `src/card`).
    pub id: String,

    /// Entry module of the nested examples directory.
    pub path: PathBuf,
}

/// Expand every package pattern and scan each matched package directory.
///
/// A directory counts as a package only when it carries a `package.json`
/// manifest. A pattern matching zero packages is fatal unless
/// `allow_empty_patterns` is set.
pub fn scan_packages(
    patterns: &[String],
    options: &ScanOptions,
) -> Result<Vec<PackageDescriptor>, ScanError> {
    let mut packages = Vec::new();

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| ScanError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut package_dirs: Vec<PathBuf> = paths
            .filter_map(Result::ok)
            .filter(|path| path.is_dir() && path.join("package.json").is_file())
            .collect();
        package_dirs.sort();

        if package_dirs.is_empty() && !options.allow_empty_patterns {
            return Err(ScanError::NoMatches(pattern.clone()));
        }

        for dir in package_dirs {
            let dir = dir.canonicalize()?;
            packages.push(scan_package(&dir, options)?);
        }
    }

    Ok(packages)
}

fn scan_package(dir: &Path, options: &ScanOptions) -> Result<PackageDescriptor, ScanError> {
    let manifest_path = dir.join("package.json");
    let manifest_text = std::fs::read_to_string(&manifest_path)?;
    let manifest: Manifest =
        serde_json::from_str(&manifest_text).map_err(|source| ScanError::Manifest {
            path: manifest_path,
            source,
        })?;

    let id = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| manifest.name.clone());

    let readme_path = find_file_ci(dir, "readme.md")?;
    let changelog_path = find_file_ci(dir, "changelog.md")?;
    if readme_path.is_none() {
        tracing::warn!("Package {} has no readme", id);
    }

    let docs = scan_docs(&dir.join("docs"))?.unwrap_or_default();
    let examples = scan_examples(&dir.join("examples"))?;
    let sub_examples = if options.show_sub_examples {
        scan_sub_examples(dir)?
    } else {
        Vec::new()
    };

    tracing::debug!(
        package = %id,
        docs = docs.len(),
        examples = examples.len(),
        sub_examples = sub_examples.len(),
        "Scanned package"
    );

    Ok(PackageDescriptor {
        id,
        name: manifest.name,
        version: manifest.version,
        description: manifest.description,
        maintainers: manifest.maintainers.into_iter().map(Into::into).collect(),
        repository: manifest.repository.map(Into::into),
        readme_path,
        changelog_path,
        docs,
        examples,
        sub_examples,
    })
}

/// Scan a documentation root into its nested [`DocEntry`] shape.
///
/// Returns `None` when the root does not exist; a missing docs tree is not
/// an error. Entries are sorted by filename for determinism.
pub fn scan_docs(root: &Path) -> Result<Option<Vec<DocEntry>>, ScanError> {
    if !root.is_dir() {
        return Ok(None);
    }
    Ok(Some(scan_docs_dir(root)?))
}

fn scan_docs_dir(dir: &Path) -> Result<Vec<DocEntry>, ScanError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| !is_hidden(path))
        .collect();
    paths.sort();

    let mut entries = Vec::new();
    for path in paths {
        if path.is_dir() {
            let id = file_name_string(&path);
            let mut children = scan_docs_dir(&path)?;

            // A case-insensitive readme becomes the folder index and leaves
            // the regular child list.
            let readme_pos = children.iter().position(|child| match child {
                DocEntry::Leaf { path, .. } => {
                    path.file_name()
                        .map(|name| name.to_string_lossy().to_lowercase())
                        .as_deref()
                        == Some("readme.md")
                }
                _ => false,
            });

            match readme_pos {
                Some(pos) => {
                    let DocEntry::Leaf { path: index, .. } = children.remove(pos) else {
                        unreachable!("readme position always points at a leaf");
                    };
                    entries.push(DocEntry::IndexedFolder {
                        id,
                        index,
                        children,
                    });
                }
                None => entries.push(DocEntry::PlainFolder { id, children }),
            }
        } else if path.extension().is_some_and(|ext| ext == "md") {
            entries.push(DocEntry::Leaf {
                id: file_stem_string(&path),
                path,
            });
        }
    }

    Ok(entries)
}

fn scan_examples(dir: &Path) -> Result<Vec<ExampleDescriptor>, ScanError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && !is_hidden(path))
        .collect();
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| ExampleDescriptor {
            id: file_stem_string(&path),
            path,
        })
        .collect())
}

/// Find nested `examples` directories anywhere under the package root,
/// excluding the package's own top-level `docs` and `examples` trees.
fn scan_sub_examples(package_dir: &Path) -> Result<Vec<SubExampleDescriptor>, ScanError> {
    let mut found = Vec::new();

    let walker = WalkDir::new(package_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') || name == "node_modules" {
                return false;
            }
            // The top-level docs and examples trees are scanned separately.
            !(entry.depth() == 1 && (name == "docs" || name == "examples"))
        });

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_dir() || entry.file_name() != "examples" || entry.depth() < 2 {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(package_dir)
            .unwrap_or(entry.path());

        // Only the final component may be an examples directory; anything
        // nested inside one belongs to that example's own sources.
        let components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if components[..components.len() - 1]
            .iter()
            .any(|c| c == "examples")
        {
            continue;
        }

        let Some(entry_module) = example_entry_module(entry.path())? else {
            tracing::debug!("Skipping empty examples folder {:?}", entry.path());
            continue;
        };

        found.push(SubExampleDescriptor {
            id: components[..components.len() - 1].join("/"),
            path: entry_module,
        });
    }

    found.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(found)
}

/// Entry module of an examples folder: `index.*` when present, otherwise the
/// first file in sorted order.
fn example_entry_module(dir: &Path) -> Result<Option<PathBuf>, ScanError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && !is_hidden(path))
        .collect();
    files.sort();

    let index = files.iter().find(|path| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy() == "index")
            .unwrap_or(false)
    });

    Ok(index.cloned().or_else(|| files.into_iter().next()))
}

fn find_file_ci(dir: &Path, lowercase_name: &str) -> Result<Option<PathBuf>, ScanError> {
    let mut matches: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_lowercase() == lowercase_name)
                    .unwrap_or(false)
        })
        .collect();
    matches.sort();
    Ok(matches.into_iter().next())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem_string(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct Manifest {
    name: String,
    version: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    maintainers: Vec<MaintainerField>,

    #[serde(default)]
    repository: Option<RepositoryField>,
}

/// Manifest maintainers appear both as plain strings and as objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaintainerField {
    Name(String),
    Entry { name: String },
}

impl From<MaintainerField> for String {
    fn from(field: MaintainerField) -> Self {
        match field {
            MaintainerField::Name(name) | MaintainerField::Entry { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepositoryField {
    Url(String),
    Entry {
        url: String,
        #[serde(default)]
        directory: Option<String>,
    },
}

impl From<RepositoryField> for RepositoryRef {
    fn from(field: RepositoryField) -> Self {
        match field {
            RepositoryField::Url(url) => RepositoryRef {
                url,
                directory: None,
            },
            RepositoryField::Entry { url, directory } => RepositoryRef { url, directory },
        }
    }
}
