//! Path resolution for generated pages.
//!
//! Pure functions only: relative import references between generated files
//! and their targets, and canonical route paths. Results always use forward
//! slashes regardless of the host platform.

use std::path::{Component, Path};

/// Extensions stripped from import references. Other extensions (notably
/// `.md`) stay in place so bundler loaders can match on them.
const MODULE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Compute an import reference from the directory containing `from` to `to`.
///
/// The result is `/`-separated with module extensions stripped, and always
/// carries a relative marker: same-directory targets get a leading `./` so
/// they cannot be confused with module-root references.
///
/// # Examples
///
/// ```
/// use pageforge_core::paths::relative_import_path;
/// use std::path::Path;
///
/// let from = Path::new("/site/pages/packages/pkg/index.js");
/// assert_eq!(
///     relative_import_path(from, Path::new("/site/wrappers/package-home.js")),
///     "../../../wrappers/package-home"
/// );
/// assert_eq!(
///     relative_import_path(from, Path::new("/site/pages/packages/pkg/README.md")),
///     "./README.md"
/// );
/// ```
pub fn relative_import_path(from: &Path, to: &Path) -> String {
    let from_dir = from.parent().unwrap_or_else(|| Path::new(""));

    let from_components: Vec<Component> = from_dir.components().collect();
    let to_components: Vec<Component> = to.components().collect();

    let common = from_components
        .iter()
        .zip(to_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..from_components.len() {
        segments.push("..".to_string());
    }
    for component in &to_components[common..] {
        segments.push(component.as_os_str().to_string_lossy().into_owned());
    }

    let joined = strip_module_extension(&segments.join("/"));

    if joined.starts_with("../") {
        joined
    } else {
        format!("./{joined}")
    }
}

/// Build a route path from id segments: `/`-joined, empty segments collapsed,
/// exactly one leading slash.
///
/// # Examples
///
/// ```
/// use pageforge_core::paths::to_route_path;
///
/// assert_eq!(to_route_path(&["packages", "pkg", "docs"]), "/packages/pkg/docs");
/// assert_eq!(to_route_path(&["", "a//b", ""]), "/a/b");
/// assert_eq!(to_route_path(&[]), "/");
/// ```
pub fn to_route_path(segments: &[&str]) -> String {
    let parts: Vec<&str> = segments
        .iter()
        .flat_map(|segment| segment.split('/'))
        .filter(|part| !part.is_empty())
        .collect();

    format!("/{}", parts.join("/"))
}

/// Canonical route for a generated page file: separators normalized, the
/// module extension stripped, and a trailing `index` folded into its
/// directory route.
///
/// # Examples
///
/// ```
/// use pageforge_core::paths::route_path;
///
/// assert_eq!(route_path("packages/pkg/changelog.js"), "/packages/pkg/changelog");
/// assert_eq!(route_path("packages/pkg/index.js"), "/packages/pkg");
/// assert_eq!(route_path("index.js"), "/");
/// ```
pub fn route_path(page_file: &str) -> String {
    let normalized = page_file.replace('\\', "/");
    let stripped = strip_module_extension(&normalized);

    let without_index = stripped
        .strip_suffix("/index")
        .map(str::to_string)
        .unwrap_or_else(|| {
            if stripped == "index" {
                String::new()
            } else {
                stripped
            }
        });

    to_route_path(&[&without_index])
}

fn strip_module_extension(path: &str) -> String {
    for ext in MODULE_EXTENSIONS {
        if let Some(stem) = path.strip_suffix(&format!(".{ext}")) {
            return stem.to_string();
        }
    }
    path.to_string()
}
