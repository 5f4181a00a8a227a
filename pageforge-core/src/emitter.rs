//! Page source emission.
//!
//! The emitter turns page descriptions into generated source files: it
//! computes import references and routes, serializes the data payload, picks
//! the right template, and hands the finished source to a [`PageSink`].
//! Keeping the sink behind a trait keeps page assembly free of direct file
//! I/O.

use crate::frontmatter::{self, FrontmatterError, Metadata};
use crate::paths::{relative_import_path, route_path};
use crate::templates;
use pageforge_types::{PageNode, RepositoryRef};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error("Failed to serialize page data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where generated pages come from and where wrapper components live.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Output root for generated page files.
    pub pages_path: PathBuf,

    /// Directory holding the wrapper components pages import.
    pub wrappers_path: PathBuf,
}

/// Receives finished page sources, addressed relative to the pages root.
pub trait PageSink {
    fn write_page(&mut self, page_file: &str, source: &str) -> Result<(), EmitError>;
}

/// Sink that writes pages straight to disk, creating directories as needed.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PageSink for FsSink {
    fn write_page(&mut self, page_file: &str, source: &str) -> Result<(), EmitError> {
        let path = self.root.join(page_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, source)?;
        Ok(())
    }
}

/// Data payload embedded into a generated page and handed to its wrapper.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    /// Route of the page itself; filled in by the emitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_path: Option<String>,

    /// Folder owning a nested example, relative to the package root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainers: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PageNode>>,
}

/// Emits the page-source variants the site is built from.
pub struct PageEmitter<'a, S: PageSink> {
    config: &'a GeneratorConfig,
    sink: &'a mut S,
}

impl<'a, S: PageSink> PageEmitter<'a, S> {
    pub fn new(config: &'a GeneratorConfig, sink: &'a mut S) -> Self {
        Self { config, sink }
    }

    /// Package home page, wrapping the package readme when one exists.
    pub fn emit_home_page(
        &mut self,
        page_file: &str,
        readme: Option<&Path>,
        data: PageData,
    ) -> Result<Metadata, EmitError> {
        self.emit_content_page(page_file, readme, "package-home", data)
    }

    /// Changelog page. Emitted even without a changelog file so the route
    /// always resolves; presence in the sitemap is decided elsewhere.
    pub fn emit_changelog_page(
        &mut self,
        page_file: &str,
        changelog: Option<&Path>,
        data: PageData,
    ) -> Result<(), EmitError> {
        self.emit_content_page(page_file, changelog, "package-changelog", data)?;
        Ok(())
    }

    pub fn emit_package_doc_page(
        &mut self,
        page_file: &str,
        markdown: &Path,
        data: PageData,
    ) -> Result<Metadata, EmitError> {
        self.emit_content_page(page_file, Some(markdown), "package-docs", data)
    }

    pub fn emit_project_doc_page(
        &mut self,
        page_file: &str,
        markdown: &Path,
        data: PageData,
    ) -> Result<Metadata, EmitError> {
        self.emit_content_page(page_file, Some(markdown), "project-docs", data)
    }

    /// Listing page for a package's documents.
    pub fn emit_docs_home_page(&mut self, page_file: &str, data: PageData) -> Result<(), EmitError> {
        self.emit_listing_page(page_file, "item-list", "docs", data)
    }

    /// Listing page for a package's examples.
    pub fn emit_examples_home_page(
        &mut self,
        page_file: &str,
        data: PageData,
    ) -> Result<(), EmitError> {
        self.emit_listing_page(page_file, "item-list", "examples", data)
    }

    /// Landing page of a free-standing documentation root.
    pub fn emit_documents_main_page(
        &mut self,
        page_file: &str,
        data: PageData,
    ) -> Result<(), EmitError> {
        self.emit_listing_page(page_file, "documents-index", "docs", data)
    }

    /// Example page pair: the routed page plus the isolated full-screen
    /// rendition of the same module.
    pub fn emit_example_page(
        &mut self,
        page_file: &str,
        isolated_file: &str,
        example: &Path,
        mut data: PageData,
    ) -> Result<(), EmitError> {
        let route = route_path(page_file);
        data.page_path = Some(route.clone());
        data.isolated_path = Some(route_path(isolated_file));

        let page_abs = self.config.pages_path.join(page_file);
        let content_import = relative_import_path(&page_abs, example);
        let wrapper_import = self.wrapper_import(&page_abs, "package-example");

        let payload = serde_json::to_string(&data)?;
        self.sink.write_page(
            page_file,
            &templates::example_page(&content_import, &wrapper_import, &payload, &route),
        )?;

        let isolated_abs = self.config.pages_path.join(isolated_file);
        let isolated_import = relative_import_path(&isolated_abs, example);
        self.sink.write_page(
            isolated_file,
            &templates::isolated_page(&isolated_import, &payload),
        )?;

        Ok(())
    }

    /// Shared path for pages that may wrap a content file. Returns the
    /// content's front matter, or an empty mapping when there is no content.
    fn emit_content_page(
        &mut self,
        page_file: &str,
        content: Option<&Path>,
        wrapper: &str,
        mut data: PageData,
    ) -> Result<Metadata, EmitError> {
        let route = route_path(page_file);
        data.page_path = Some(route.clone());

        let page_abs = self.config.pages_path.join(page_file);
        let wrapper_import = self.wrapper_import(&page_abs, wrapper);

        // A dangling content path degrades to a standalone page; the
        // front-matter collaborator is only invoked for files that exist.
        let content = match content {
            Some(path) if path.is_file() => Some(path),
            Some(path) => {
                tracing::warn!(
                    "Content file {:?} does not exist; emitting a standalone page",
                    path
                );
                None
            }
            None => None,
        };

        match content {
            Some(content) => {
                let meta = frontmatter::read_metadata(content)?;
                if let Some(title) = meta.get("title").and_then(|v| v.as_str()) {
                    data.page_title = Some(title.to_string());
                }

                let content_import = relative_import_path(&page_abs, content);
                let payload = serde_json::to_string(&data)?;
                self.sink.write_page(
                    page_file,
                    &templates::wrapped_page(&content_import, &wrapper_import, &payload, &route),
                )?;
                Ok(meta)
            }
            None => {
                let payload = serde_json::to_string(&data)?;
                self.sink.write_page(
                    page_file,
                    &templates::standalone_page(&wrapper_import, &payload, &route),
                )?;
                Ok(Metadata::new())
            }
        }
    }

    fn emit_listing_page(
        &mut self,
        page_file: &str,
        wrapper: &str,
        page_type: &str,
        mut data: PageData,
    ) -> Result<(), EmitError> {
        let route = route_path(page_file);
        data.page_path = Some(route.clone());
        data.page_type = Some(page_type.to_string());

        let page_abs = self.config.pages_path.join(page_file);
        let wrapper_import = self.wrapper_import(&page_abs, wrapper);

        let payload = serde_json::to_string(&data)?;
        self.sink.write_page(
            page_file,
            &templates::standalone_page(&wrapper_import, &payload, &route),
        )
    }

    fn wrapper_import(&self, page_abs: &Path, wrapper: &str) -> String {
        let wrapper_file = self.config.wrappers_path.join(format!("{wrapper}.js"));
        relative_import_path(page_abs, &wrapper_file)
    }
}
