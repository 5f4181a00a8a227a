//! Build command implementation.

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use pageforge_core::naming::filenamify;
use pageforge_core::{
    clean, persist, scan_docs, scan_packages, Assembler, Config, FsSink, ScanOptions,
    ScannedDocsRoot,
};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

// Embed the base pages at compile time so they're available after cargo install
static DEFAULT_SCAFFOLD: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/default-pages");

/// Run a full page-generation pass: clean, scaffold, scan, emit, persist.
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    tracing::info!("Generating pages for {}", config.site.name);

    let pages_dir = config.pages_dir();
    clean(&pages_dir).context("Failed to clean pages output")?;

    copy_scaffold(&config, &pages_dir)?;

    let options = ScanOptions {
        show_sub_examples: config.show_sub_examples,
        allow_empty_patterns: config.allow_empty_patterns,
    };
    let packages =
        scan_packages(&config.package_patterns(), &options).context("Failed to scan packages")?;
    tracing::info!("Scanned {} packages", packages.len());

    let mut docs_roots = Vec::new();
    for root in &config.docs {
        let path = config.docs_root_path(root);
        match scan_docs(&path)
            .with_context(|| format!("Failed to scan docs root {:?}", path))?
        {
            Some(entries) => docs_roots.push(ScannedDocsRoot {
                key: filenamify(&root.name),
                description: root.description.clone(),
                entries,
            }),
            None => tracing::warn!("Docs root {:?} does not exist; skipping", path),
        }
    }

    let mut sink = FsSink::new(&pages_dir);
    let output = Assembler::new(&config)
        .assemble(&mut sink, &packages, &docs_roots)
        .context("Failed to assemble pages")?;

    persist(
        &output.pages_list,
        &output.packages_data,
        &output.site_meta,
        &config.data_dir(),
    )
    .context("Failed to write data artifacts")?;

    tracing::info!(
        "✓ Generated pages for {} packages and {} docs roots",
        output.pages_list.packages.len(),
        docs_roots.len()
    );
    tracing::info!("✓ Output written to {:?}", pages_dir);

    Ok(())
}

/// Seed the pages root with the base pages every site starts from. A local
/// scaffold directory from the config wins over the embedded one.
fn copy_scaffold(config: &Config, pages_dir: &Path) -> Result<()> {
    fs::create_dir_all(pages_dir).context("Failed to create pages directory")?;

    if let Some(scaffold) = config.scaffold_dir() {
        if scaffold.exists() {
            copy_dir(&scaffold, pages_dir)?;
            tracing::info!("Copied scaffold pages from {:?}", scaffold);
            return Ok(());
        }
        tracing::warn!("Configured scaffold path {:?} does not exist", scaffold);
    }

    extract_embedded_scaffold(pages_dir)?;
    tracing::info!("Copied built-in scaffold pages");
    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
    }
    Ok(())
}

fn extract_embedded_scaffold(dest: &Path) -> Result<()> {
    for entry in DEFAULT_SCAFFOLD.entries() {
        extract_entry(entry, dest)?;
    }
    Ok(())
}

fn extract_entry(entry: &include_dir::DirEntry, dest: &Path) -> Result<()> {
    match entry {
        include_dir::DirEntry::Dir(dir) => {
            for sub_entry in dir.entries() {
                extract_entry(sub_entry, dest)?;
            }
        }
        include_dir::DirEntry::File(file) => {
            let target = dest.join(file.path());
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, file.contents())
                .with_context(|| format!("Failed to write scaffold file to {:?}", target))?;
        }
    }
    Ok(())
}
