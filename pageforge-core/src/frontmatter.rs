//! Front-matter metadata extraction from content files.
//!
//! The generator treats front matter as an opaque key/value mapping; nothing
//! in the pipeline interprets individual keys.

use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Opaque metadata mapping extracted from a content file.
pub type Metadata = BTreeMap<String, serde_yaml::Value>;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Front matter is not a mapping")]
    NotAMapping,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*(\n|$)").unwrap())
}

/// Extract front-matter metadata from content.
///
/// Returns an empty mapping when the content has no front-matter block or the
/// block is empty; well-formed-but-empty input is never an error.
///
/// # Example
///
/// ```
/// use pageforge_core::frontmatter::extract_metadata;
///
/// let content = "---\ntitle: Intro\n---\n# Hello\n";
/// let meta = extract_metadata(content).unwrap();
/// assert_eq!(meta["title"].as_str(), Some("Intro"));
///
/// assert!(extract_metadata("# No front matter").unwrap().is_empty());
/// ```
pub fn extract_metadata(content: &str) -> Result<Metadata, FrontmatterError> {
    let re = frontmatter_regex();

    let Some(captures) = re.captures(content) else {
        return Ok(Metadata::new());
    };

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    match value {
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(mapping) => {
            let mut meta = Metadata::new();
            for (key, value) in mapping {
                if let serde_yaml::Value::String(key) = key {
                    meta.insert(key, value);
                }
            }
            Ok(meta)
        }
        _ => Err(FrontmatterError::NotAMapping),
    }
}

/// Read a content file and extract its front-matter metadata.
///
/// Callers are responsible for checking the path exists first; a missing file
/// is an error here, not an empty mapping.
pub fn read_metadata(path: &Path) -> Result<Metadata, FrontmatterError> {
    let content = std::fs::read_to_string(path).map_err(|source| FrontmatterError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    extract_metadata(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic_metadata() {
        let content = "---\ntitle: My Doc\norder: 3\n---\n\n# Body\n";
        let meta = extract_metadata(content).unwrap();

        assert_eq!(meta["title"].as_str(), Some("My Doc"));
        assert_eq!(meta["order"].as_u64(), Some(3));
    }

    #[test]
    fn test_no_frontmatter_returns_empty() {
        let meta = extract_metadata("# Just a heading\n\nBody text.").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_empty_block_returns_empty() {
        let meta = extract_metadata("---\n\n---\nBody").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_empty_input_returns_empty() {
        assert!(extract_metadata("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        assert!(extract_metadata(content).is_err());
    }

    #[test]
    fn test_scalar_frontmatter_is_error() {
        let content = "---\njust a string\n---\nBody";
        assert!(matches!(
            extract_metadata(content),
            Err(FrontmatterError::NotAMapping)
        ));
    }

    #[test]
    fn test_read_metadata_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_metadata(&dir.path().join("missing.md"));
        assert!(matches!(result, Err(FrontmatterError::Read { .. })));
    }

    #[test]
    fn test_read_metadata_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "---\ntitle: From Disk\n---\nBody").unwrap();

        let meta = read_metadata(&path).unwrap();
        assert_eq!(meta["title"].as_str(), Some("From Disk"));
    }
}
