//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../pageforge.yml.example");

const WRAPPER_NAMES: &[&str] = &[
    "package-home",
    "package-changelog",
    "package-docs",
    "package-example",
    "item-list",
    "documents-index",
    "project-docs",
];

/// Initialize a new pageforge project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_wrappers(root)?;
    scaffold_sample_package(root)?;

    println!("✓ pageforge initialized in {:?}", root);
    println!("  - Edit pageforge.yml to point at your packages");
    println!("  - Customize the page wrappers in wrappers/");
    println!("  - Run `pageforge build` to generate pages/ and data/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("pageforge.yml");
    if config_path.exists() {
        println!("pageforge.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

/// Starter wrapper components. Generated pages import these by name, so a
/// fresh project needs a file per wrapper even before any styling exists.
fn scaffold_wrappers(root: &Path) -> Result<()> {
    let wrappers = root.join("wrappers");
    fs::create_dir_all(&wrappers)
        .with_context(|| format!("Failed to create {:?}", wrappers))?;

    for name in WRAPPER_NAMES {
        let wrapper_path = wrappers.join(format!("{name}.js"));
        if wrapper_path.exists() {
            continue;
        }
        fs::write(&wrapper_path, starter_wrapper(name))
            .with_context(|| format!("Failed to write {:?}", wrapper_path))?;
    }

    println!("Created {:?}", wrappers);
    Ok(())
}

fn starter_wrapper(name: &str) -> String {
    format!(
        "import React from 'react';

// Starter {name} wrapper. Replace with your own layout.
export default ({{ data, children }}) => (
  <div>
    <h1>{{data.pageTitle || data.id}}</h1>
    {{children}}
  </div>
);
"
    )
}

fn scaffold_sample_package(root: &Path) -> Result<()> {
    let package = root.join("packages/sample");
    if package.exists() {
        return Ok(());
    }

    fs::create_dir_all(package.join("docs"))?;
    fs::create_dir_all(package.join("examples"))?;

    fs::write(
        package.join("package.json"),
        r#"{
  "name": "sample",
  "version": "0.1.0",
  "description": "A sample package to get you started"
}
"#,
    )?;
    fs::write(
        package.join("README.md"),
        "---\ntitle: Sample\n---\n\n# Sample\n\nReplace this package with your own.\n",
    )?;
    fs::write(package.join("docs/usage.md"), "# Usage\n\nHow to use sample.\n")?;
    fs::write(
        package.join("examples/basic.js"),
        "import React from 'react';\n\nexport default () => <div>Basic example</div>;\n",
    )?;

    println!("Created {:?}", package);
    Ok(())
}
