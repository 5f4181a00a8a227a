//! Shared types for pageforge
//!
//! This crate provides the sitemap and persisted-artifact types shared by the
//! generator core and the CLI. Everything here serializes with the camelCase
//! field names the running site expects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One element of the sitemap: either a concrete page or a folder of pages.
///
/// A node carries either `children` (folder) or `page_path` (leaf); the tree
/// builder removes `children` the moment a leaf payload is attached, so a
/// serialized node never shows a useless partial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
    pub id: String,

    /// Route path, always rooted at `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_path: Option<String>,

    /// Secondary route rendering the same content without site chrome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolated_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PageNode>>,
}

impl PageNode {
    /// A leaf page with a route path and no children.
    pub fn leaf(id: impl Into<String>, page_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            page_path: Some(page_path.into()),
            isolated_path: None,
            children: None,
        }
    }

    /// An empty folder node.
    pub fn folder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            page_path: None,
            isolated_path: None,
            children: Some(Vec::new()),
        }
    }

    pub fn with_page_path(mut self, page_path: impl Into<String>) -> Self {
        self.page_path = Some(page_path.into());
        self
    }

    pub fn with_isolated_path(mut self, isolated_path: impl Into<String>) -> Self {
        self.isolated_path = Some(isolated_path.into());
        self
    }

    pub fn with_children(mut self, children: Vec<PageNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Repository reference from a package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    pub url: String,

    /// Subdirectory within the repository, for monorepo packages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

/// Sitemap entry for a single package: its fixed pages plus the nested
/// doc/example/sub-example page trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePages {
    pub package_id: String,
    pub home_path: String,

    /// `None` when the changelog page is excluded by the changelog policy.
    /// Serialized as an explicit `null` so consumers can distinguish
    /// "excluded" from "missing key".
    pub changelog_path: Option<String>,

    pub doc_path: String,
    pub example_path: String,
    pub docs: Vec<PageNode>,
    pub examples: Vec<PageNode>,
    pub sub_examples: Vec<PageNode>,
}

/// The `pages-list.json` artifact.
///
/// Documentation roots serialize as top-level keys next to `packages`, so a
/// config with a "Guides" root produces `{ "packages": [...], "guides": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PagesList {
    pub packages: Vec<PackagePages>,

    #[serde(flatten)]
    pub docs: BTreeMap<String, Vec<PageNode>>,

    #[serde(rename = "readMe", default, skip_serializing_if = "Option::is_none")]
    pub read_me: Option<Vec<PageNode>>,
}

/// Per-package metadata entry in `packages-data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMeta {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub version: String,
    pub maintainers: Vec<String>,
    pub repository: Option<RepositoryRef>,
}

/// The `packages-data.json` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackagesData {
    pub meta_data: Vec<PackageMeta>,
}

/// A labeled external link shown by the site shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteLink {
    pub label: String,
    pub url: String,
}

/// Presentation metadata for the packages section of the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackagesMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
}

/// Presentation metadata for the root readme page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReadMeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
}

/// Presentation metadata for one documentation root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocsRootMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The `site-meta.json` artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMeta {
    pub site_name: String,
    pub packages: PackagesMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<SiteLink>>,

    #[serde(rename = "readMe", default, skip_serializing_if = "Option::is_none")]
    pub read_me: Option<ReadMeMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<BTreeMap<String, DocsRootMeta>>,
}
