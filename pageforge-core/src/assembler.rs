//! Page assembly: walks scanned descriptors, drives the emitter, and builds
//! the sitemap and data artifacts.
//!
//! The assembler owns the page layout conventions (where each page file
//! lands under the pages root) and the sitemap shapes; the emitter owns the
//! generated source. All output goes through the caller's [`PageSink`].

use crate::config::{ChangelogPolicy, Config};
use crate::emitter::{EmitError, GeneratorConfig, PageData, PageEmitter, PageSink};
use crate::naming::title_case;
use crate::paths::to_route_path;
use crate::scanner::{DocEntry, PackageDescriptor};
use crate::tree::{build_tree, FlatPage, TreeError};
use pageforge_types::{
    DocsRootMeta, PackageMeta, PackagePages, PackagesData, PackagesMeta, PageNode, PagesList,
    ReadMeMeta, SiteMeta,
};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A scanned free-standing documentation root, ready for assembly.
#[derive(Debug, Clone)]
pub struct ScannedDocsRoot {
    /// Sitemap key and path segment, already normalized via
    /// [`crate::naming::filenamify`].
    pub key: String,
    pub description: Option<String>,
    pub entries: Vec<DocEntry>,
}

/// Everything a build produces besides the page files themselves.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub pages_list: PagesList,
    pub packages_data: PackagesData,
    pub site_meta: SiteMeta,
}

enum DocKind {
    Package,
    Project,
}

pub struct Assembler<'a> {
    config: &'a Config,
    generator: GeneratorConfig,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a Config) -> Self {
        let generator = GeneratorConfig {
            pages_path: config.pages_dir(),
            wrappers_path: config.wrappers_dir(),
        };
        Self { config, generator }
    }

    /// Emit every page for the scanned packages and documentation roots and
    /// return the assembled artifacts.
    pub fn assemble<S: PageSink>(
        &self,
        sink: &mut S,
        packages: &[PackageDescriptor],
        docs_roots: &[ScannedDocsRoot],
    ) -> Result<BuildOutput, AssembleError> {
        let mut emitter = PageEmitter::new(&self.generator, sink);

        let mut pages_list = PagesList::default();
        let mut packages_data = PackagesData::default();

        for package in packages {
            let (pages, meta) = self.assemble_package(&mut emitter, package)?;
            tracing::debug!(package = %pages.package_id, "Assembled package pages");
            pages_list.packages.push(pages);
            packages_data.meta_data.push(meta);
        }

        for root in docs_roots {
            let nodes = self.assemble_docs_root(&mut emitter, root)?;
            tracing::debug!(root = %root.key, pages = nodes.len(), "Assembled docs root");
            pages_list.docs.insert(root.key.clone(), nodes);
        }

        let doc_keys: Vec<String> = pages_list.docs.keys().cloned().collect();
        pages_list.read_me = self.emit_root_readme(&mut emitter, &doc_keys)?;

        let site_meta = self.site_meta(docs_roots, pages_list.read_me.is_some());

        Ok(BuildOutput {
            pages_list,
            packages_data,
            site_meta,
        })
    }

    fn assemble_package<S: PageSink>(
        &self,
        emitter: &mut PageEmitter<'_, S>,
        package: &PackageDescriptor,
    ) -> Result<(PackagePages, PackageMeta), AssembleError> {
        let home_dir = format!("packages/{}", package.id);
        let base = PageData {
            id: Some(package.id.clone()),
            package_name: Some(package.name.clone()),
            ..Default::default()
        };

        let home_data = PageData {
            page_title: Some(title_case(&package.id)),
            description: package.description.clone(),
            version: Some(package.version.clone()),
            maintainers: Some(package.maintainers.clone()),
            repository: package.repository.clone(),
            ..base.clone()
        };
        emitter.emit_home_page(
            &format!("{home_dir}/index.js"),
            package.readme_path.as_deref(),
            home_data,
        )?;

        let changelog_data = PageData {
            page_title: Some("Changelog".to_string()),
            ..base.clone()
        };
        emitter.emit_changelog_page(
            &format!("{home_dir}/changelog.js"),
            package.changelog_path.as_deref(),
            changelog_data,
        )?;

        let doc_dir = format!("{home_dir}/docs");
        let docs_home = PageData {
            page_title: Some("Documents".to_string()),
            ..base.clone()
        };
        emitter.emit_docs_home_page(&format!("{doc_dir}/index.js"), docs_home)?;

        let example_dir = format!("{home_dir}/examples");
        let examples_home = PageData {
            page_title: Some("Examples".to_string()),
            ..base.clone()
        };
        emitter.emit_examples_home_page(&format!("{example_dir}/index.js"), examples_home)?;

        let docs = self.emit_doc_tree(emitter, &package.docs, &doc_dir, &base, &DocKind::Package)?;

        let mut examples = Vec::new();
        for example in &package.examples {
            let page_file = format!("{example_dir}/{}.js", example.id);
            let isolated_file = format!("{example_dir}/isolated/{}.js", example.id);

            let data = PageData {
                page_title: Some(title_case(&example.id)),
                ..base.clone()
            };
            emitter.emit_example_page(&page_file, &isolated_file, &example.path, data)?;

            examples.push(
                PageNode::leaf(&example.id, to_route_path(&[&example_dir, &example.id]))
                    .with_isolated_path(to_route_path(&[
                        &example_dir,
                        "isolated",
                        &example.id,
                    ])),
            );
        }

        let mut flat_sub_examples = Vec::new();
        for sub in &package.sub_examples {
            let sub_dir = format!("{home_dir}/subExamples/{}", sub.id);
            let page_file = format!("{sub_dir}/examples.js");
            let isolated_file = format!("{sub_dir}/isolated/examples.js");

            let data = PageData {
                page_title: Some("Examples".to_string()),
                folder_path: Some(sub.id.clone()),
                ..base.clone()
            };
            emitter.emit_example_page(&page_file, &isolated_file, &sub.path, data)?;

            flat_sub_examples.push(FlatPage {
                id: format!("{}/examples", sub.id),
                page_path: to_route_path(&[&sub_dir, "examples"]),
                isolated_path: Some(to_route_path(&[&sub_dir, "isolated", "examples"])),
            });
        }
        let sub_examples = build_tree(&flat_sub_examples, self.config.strict)?;

        let changelog_listed = match self.config.changelog {
            ChangelogPolicy::Always => true,
            ChangelogPolicy::WhenPresent => package.changelog_path.is_some(),
        };

        let pages = PackagePages {
            package_id: package.id.clone(),
            home_path: to_route_path(&[&home_dir]),
            changelog_path: changelog_listed
                .then(|| to_route_path(&[&home_dir, "changelog"])),
            doc_path: to_route_path(&[&doc_dir]),
            example_path: to_route_path(&[&example_dir]),
            docs,
            examples,
            sub_examples,
        };

        let meta = PackageMeta {
            id: package.id.clone(),
            package_name: Some(package.name.clone()),
            description: package.description.clone(),
            version: package.version.clone(),
            maintainers: package.maintainers.clone(),
            repository: package.repository.clone(),
        };

        Ok((pages, meta))
    }

    fn assemble_docs_root<S: PageSink>(
        &self,
        emitter: &mut PageEmitter<'_, S>,
        root: &ScannedDocsRoot,
    ) -> Result<Vec<PageNode>, AssembleError> {
        let main_data = PageData {
            key: Some(root.key.clone()),
            page_title: Some(root.key.clone()),
            ..Default::default()
        };
        emitter.emit_documents_main_page(&format!("{}/index.js", root.key), main_data)?;

        let base = PageData {
            key: Some(root.key.clone()),
            ..Default::default()
        };
        self.emit_doc_tree(emitter, &root.entries, &root.key, &base, &DocKind::Project)
    }

    /// Recursively emit pages for a documentation tree and return its
    /// sitemap nodes. Shared between package docs and free-standing roots;
    /// only the wrapper differs.
    fn emit_doc_tree<S: PageSink>(
        &self,
        emitter: &mut PageEmitter<'_, S>,
        entries: &[DocEntry],
        dir: &str,
        base: &PageData,
        kind: &DocKind,
    ) -> Result<Vec<PageNode>, AssembleError> {
        let mut nodes = Vec::new();

        for entry in entries {
            match entry {
                DocEntry::Leaf { id, path } => {
                    let data = PageData {
                        page_title: Some(title_case(id)),
                        ..base.clone()
                    };
                    let page_file = format!("{dir}/{id}.js");
                    match kind {
                        DocKind::Package => {
                            emitter.emit_package_doc_page(&page_file, path, data)?
                        }
                        DocKind::Project => {
                            emitter.emit_project_doc_page(&page_file, path, data)?
                        }
                    };
                    nodes.push(PageNode::leaf(id, to_route_path(&[dir, id])));
                }
                DocEntry::IndexedFolder {
                    id,
                    index,
                    children,
                } => {
                    let folder_dir = format!("{dir}/{id}");
                    self.emit_folder_home(emitter, &folder_dir, id, children, base)?;

                    // The folder readme keeps its on-disk stem as a path
                    // segment so existing deep links stay stable.
                    let index_id = index
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "readme".to_string());

                    let data = PageData {
                        page_title: Some(title_case(id)),
                        ..base.clone()
                    };
                    let page_file = format!("{folder_dir}/{index_id}/index.js");
                    match kind {
                        DocKind::Package => {
                            emitter.emit_package_doc_page(&page_file, index, data)?
                        }
                        DocKind::Project => {
                            emitter.emit_project_doc_page(&page_file, index, data)?
                        }
                    };

                    let child_nodes =
                        self.emit_doc_tree(emitter, children, &folder_dir, base, kind)?;
                    nodes.push(
                        PageNode::leaf(id, to_route_path(&[&folder_dir, &index_id]))
                            .with_children(child_nodes),
                    );
                }
                DocEntry::PlainFolder { id, children } => {
                    let folder_dir = format!("{dir}/{id}");
                    self.emit_folder_home(emitter, &folder_dir, id, children, base)?;

                    let child_nodes =
                        self.emit_doc_tree(emitter, children, &folder_dir, base, kind)?;
                    nodes.push(
                        PageNode::folder(id)
                            .with_children(child_nodes)
                            .with_page_path(to_route_path(&[&folder_dir])),
                    );
                }
            }
        }

        Ok(nodes)
    }

    fn emit_folder_home<S: PageSink>(
        &self,
        emitter: &mut PageEmitter<'_, S>,
        folder_dir: &str,
        folder_id: &str,
        children: &[DocEntry],
        base: &PageData,
    ) -> Result<(), AssembleError> {
        // Child listing uses folder-relative paths; the wrapper resolves them
        // against its own route.
        let listing: Vec<PageNode> = children
            .iter()
            .map(|child| PageNode::leaf(child.id(), format!("{folder_id}/{}", child.id())))
            .collect();

        let data = PageData {
            id: Some(folder_id.to_string()),
            page_title: Some("Documents".to_string()),
            children: Some(listing),
            ..base.clone()
        };
        emitter.emit_docs_home_page(&format!("{folder_dir}/index.js"), data)?;
        Ok(())
    }

    fn emit_root_readme<S: PageSink>(
        &self,
        emitter: &mut PageEmitter<'_, S>,
        doc_keys: &[String],
    ) -> Result<Option<Vec<PageNode>>, AssembleError> {
        let Some(readme) = self.config.readme_path() else {
            return Ok(None);
        };
        if !readme.is_file() {
            tracing::warn!("Configured readme {:?} does not exist", readme);
            return Ok(None);
        }

        let data = PageData {
            key: Some("readme".to_string()),
            page_title: Some("readme".to_string()),
            ..Default::default()
        };
        emitter.emit_project_doc_page("readme.js", &readme, data)?;

        let mut nav = vec![PageNode::leaf("packages", "/packages")];
        nav.extend(
            doc_keys
                .iter()
                .map(|key| PageNode::leaf(key.clone(), format!("/{key}"))),
        );
        Ok(Some(nav))
    }

    fn site_meta(&self, docs_roots: &[ScannedDocsRoot], has_readme: bool) -> SiteMeta {
        let site = &self.config.site;

        let docs: BTreeMap<String, DocsRootMeta> = docs_roots
            .iter()
            .map(|root| {
                (
                    root.key.clone(),
                    DocsRootMeta {
                        description: root.description.clone(),
                    },
                )
            })
            .collect();

        SiteMeta {
            site_name: site.name.clone(),
            packages: PackagesMeta {
                description: site.packages_description.clone(),
                img_src: site.packages_img_src.clone(),
            },
            links: (!site.links.is_empty()).then(|| site.links.clone()),
            read_me: has_readme.then(|| ReadMeMeta {
                img_src: site.readme_img_src.clone(),
            }),
            docs: (!docs.is_empty()).then_some(docs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::FsSink;
    use crate::scanner::{scan_docs, scan_packages, ScanOptions};
    use std::fs;
    use std::path::Path;

    const CONFIG: &str = r#"
site:
  name: Fixture Docs
  packages_description: Components
paths:
  packages:
    - packages/*
  wrappers: wrappers
  readme: README.md
show_sub_examples: true
"#;

    fn write_fixture(root: &Path) {
        let pkg = root.join("packages/badge");
        fs::create_dir_all(pkg.join("docs")).unwrap();
        fs::create_dir_all(pkg.join("examples")).unwrap();
        fs::create_dir_all(pkg.join("src/card/examples")).unwrap();
        fs::write(
            pkg.join("package.json"),
            r#"{"name": "@fixture/badge", "version": "2.0.0", "description": "Badges"}"#,
        )
        .unwrap();
        fs::write(pkg.join("README.md"), "---\ntitle: Badge\n---\n# Badge").unwrap();
        fs::write(pkg.join("CHANGELOG.md"), "# 2.0.0").unwrap();
        fs::write(pkg.join("docs/usage.md"), "# Usage").unwrap();
        fs::write(pkg.join("examples/basic.js"), "export default 1;").unwrap();
        fs::write(pkg.join("src/card/examples/index.js"), "export default 2;").unwrap();

        fs::write(root.join("README.md"), "# Root readme").unwrap();
    }

    fn load_config(root: &Path, yaml: &str) -> Config {
        let config_path = root.join("pageforge.yml");
        fs::write(&config_path, yaml).unwrap();
        Config::from_file(&config_path).unwrap()
    }

    fn build(root: &Path, yaml: &str) -> BuildOutput {
        let config = load_config(root, yaml);
        let packages = scan_packages(
            &config.package_patterns(),
            &ScanOptions {
                show_sub_examples: config.show_sub_examples,
                allow_empty_patterns: config.allow_empty_patterns,
            },
        )
        .unwrap();

        let mut sink = FsSink::new(config.pages_dir());
        Assembler::new(&config)
            .assemble(&mut sink, &packages, &[])
            .unwrap()
    }

    #[test]
    fn test_package_sitemap_paths() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());

        let output = build(temp.path(), CONFIG);
        let pkg = &output.pages_list.packages[0];

        assert_eq!(pkg.package_id, "badge");
        assert_eq!(pkg.home_path, "/packages/badge");
        assert_eq!(pkg.changelog_path.as_deref(), Some("/packages/badge/changelog"));
        assert_eq!(pkg.doc_path, "/packages/badge/docs");
        assert_eq!(pkg.example_path, "/packages/badge/examples");

        assert_eq!(pkg.docs.len(), 1);
        assert_eq!(pkg.docs[0].page_path.as_deref(), Some("/packages/badge/docs/usage"));

        assert_eq!(pkg.examples.len(), 1);
        assert_eq!(
            pkg.examples[0].isolated_path.as_deref(),
            Some("/packages/badge/examples/isolated/basic")
        );
    }

    #[test]
    fn test_sub_examples_form_a_tree() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());

        let output = build(temp.path(), CONFIG);
        let pkg = &output.pages_list.packages[0];

        assert_eq!(pkg.sub_examples.len(), 1);
        let src = &pkg.sub_examples[0];
        assert_eq!(src.id, "src");

        let card = &src.children.as_ref().unwrap()[0];
        assert_eq!(card.id, "card");
        let leaf = &card.children.as_ref().unwrap()[0];
        assert_eq!(leaf.id, "examples");
        assert_eq!(
            leaf.page_path.as_deref(),
            Some("/packages/badge/subExamples/src/card/examples")
        );
        assert_eq!(
            leaf.isolated_path.as_deref(),
            Some("/packages/badge/subExamples/src/card/isolated/examples")
        );
    }

    #[test]
    fn test_changelog_policy_when_present() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        fs::remove_file(temp.path().join("packages/badge/CHANGELOG.md")).unwrap();

        let output = build(temp.path(), &format!("{CONFIG}changelog: when-present\n"));
        assert!(output.pages_list.packages[0].changelog_path.is_none());

        // The page itself is still generated so the route resolves.
        assert!(temp
            .path()
            .join("pages/packages/badge/changelog.js")
            .is_file());
    }

    #[test]
    fn test_page_files_written() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());
        build(temp.path(), CONFIG);

        let pages = temp.path().join("pages");
        for file in [
            "packages/badge/index.js",
            "packages/badge/changelog.js",
            "packages/badge/docs/index.js",
            "packages/badge/docs/usage.js",
            "packages/badge/examples/index.js",
            "packages/badge/examples/basic.js",
            "packages/badge/examples/isolated/basic.js",
            "packages/badge/subExamples/src/card/examples.js",
            "packages/badge/subExamples/src/card/isolated/examples.js",
            "readme.js",
        ] {
            assert!(pages.join(file).is_file(), "missing {file}");
        }
    }

    #[test]
    fn test_docs_root_assembly() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());

        let docs = temp.path().join("project-docs");
        fs::create_dir_all(docs.join("guides")).unwrap();
        fs::write(docs.join("intro.md"), "# Intro").unwrap();
        fs::write(docs.join("guides/README.md"), "# Guides").unwrap();
        fs::write(docs.join("guides/setup.md"), "# Setup").unwrap();

        let config = load_config(temp.path(), CONFIG);
        let packages = scan_packages(
            &config.package_patterns(),
            &ScanOptions::default(),
        )
        .unwrap();
        let roots = vec![ScannedDocsRoot {
            key: "guides".to_string(),
            description: Some("Project guides".to_string()),
            entries: scan_docs(&docs).unwrap().unwrap(),
        }];

        let mut sink = FsSink::new(config.pages_dir());
        let output = Assembler::new(&config)
            .assemble(&mut sink, &packages, &roots)
            .unwrap();

        let nodes = &output.pages_list.docs["guides"];
        assert_eq!(nodes.len(), 2);

        // Folder with a readme routes to its readme page and keeps children.
        let folder = &nodes[0];
        assert_eq!(folder.id, "guides");
        assert_eq!(folder.page_path.as_deref(), Some("/guides/guides/README"));
        assert_eq!(folder.children.as_ref().unwrap()[0].id, "setup");

        let leaf = &nodes[1];
        assert_eq!(leaf.page_path.as_deref(), Some("/guides/intro"));

        // Nav for the root readme includes the docs root.
        let nav = output.pages_list.read_me.as_ref().unwrap();
        assert_eq!(nav[0].page_path.as_deref(), Some("/packages"));
        assert_eq!(nav[1].page_path.as_deref(), Some("/guides"));

        let meta_docs = output.site_meta.docs.as_ref().unwrap();
        assert_eq!(
            meta_docs["guides"].description.as_deref(),
            Some("Project guides")
        );

        assert!(config.pages_dir().join("guides/index.js").is_file());
        assert!(config
            .pages_dir()
            .join("guides/guides/README/index.js")
            .is_file());
    }

    #[test]
    fn test_site_meta_from_config() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());

        let output = build(temp.path(), CONFIG);
        let meta = &output.site_meta;

        assert_eq!(meta.site_name, "Fixture Docs");
        assert_eq!(meta.packages.description.as_deref(), Some("Components"));
        assert!(meta.links.is_none());
        assert!(meta.read_me.is_some());
    }

    #[test]
    fn test_packages_data_entries() {
        let temp = tempfile::tempdir().unwrap();
        write_fixture(temp.path());

        let output = build(temp.path(), CONFIG);
        let meta = &output.packages_data.meta_data[0];

        assert_eq!(meta.id, "badge");
        assert_eq!(meta.package_name.as_deref(), Some("@fixture/badge"));
        assert_eq!(meta.version, "2.0.0");
    }
}
