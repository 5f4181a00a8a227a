use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CONFIG: &str = r#"
site:
  name: Fixture Docs
  packages_description: Components
paths:
  packages:
    - packages/*
  wrappers: wrappers
  readme: README.md
docs:
  - path: project-docs
    name: Guides
    description: Project guides
show_sub_examples: true
"#;

fn write_fixture(root: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(root.join("pageforge.yml"), CONFIG)?;
    fs::write(root.join("README.md"), "# Root readme")?;

    let pkg = root.join("packages/badge");
    fs::create_dir_all(pkg.join("docs"))?;
    fs::create_dir_all(pkg.join("examples"))?;
    fs::create_dir_all(pkg.join("src/card/examples"))?;
    fs::write(
        pkg.join("package.json"),
        r#"{"name": "@fixture/badge", "version": "2.0.0", "description": "Badges"}"#,
    )?;
    fs::write(pkg.join("README.md"), "---\ntitle: Badge\n---\n# Badge")?;
    fs::write(pkg.join("CHANGELOG.md"), "# 2.0.0")?;
    fs::write(pkg.join("docs/usage.md"), "# Usage")?;
    fs::write(pkg.join("examples/basic.js"), "export default 1;")?;
    fs::write(pkg.join("src/card/examples/index.js"), "export default 2;")?;

    let docs = root.join("project-docs");
    fs::create_dir_all(&docs)?;
    fs::write(docs.join("intro.md"), "# Intro")?;

    Ok(())
}

#[test]
fn build_generates_pages_and_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_fixture(dir.path())?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    for page in [
        "pages/index.js",
        "pages/readme.js",
        "pages/packages/badge/index.js",
        "pages/packages/badge/changelog.js",
        "pages/packages/badge/docs/usage.js",
        "pages/packages/badge/examples/basic.js",
        "pages/packages/badge/examples/isolated/basic.js",
        "pages/packages/badge/subExamples/src/card/examples.js",
        "pages/guides/index.js",
        "pages/guides/intro.js",
    ] {
        assert!(dir.path().join(page).is_file(), "missing {page}");
    }

    let pages_list: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("data/pages-list.json"))?)?;
    assert_eq!(pages_list["packages"][0]["packageId"], "badge");
    assert_eq!(pages_list["packages"][0]["homePath"], "/packages/badge");
    assert_eq!(pages_list["guides"][0]["pagePath"], "/guides/intro");
    assert_eq!(pages_list["readMe"][0]["pagePath"], "/packages");

    let packages_data: Value = serde_json::from_str(&fs::read_to_string(
        dir.path().join("data/packages-data.json"),
    )?)?;
    assert_eq!(packages_data["metaData"][0]["version"], "2.0.0");

    let site_meta: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("data/site-meta.json"))?)?;
    assert_eq!(site_meta["siteName"], "Fixture Docs");
    assert_eq!(site_meta["docs"]["guides"]["description"], "Project guides");

    Ok(())
}

#[test]
fn rebuild_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_fixture(dir.path())?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();
    let first_list = fs::read(dir.path().join("data/pages-list.json"))?;
    let first_page = fs::read(dir.path().join("pages/packages/badge/index.js"))?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    assert_eq!(fs::read(dir.path().join("data/pages-list.json"))?, first_list);
    assert_eq!(
        fs::read(dir.path().join("pages/packages/badge/index.js"))?,
        first_page
    );
    Ok(())
}

#[test]
fn build_replaces_stale_pages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_fixture(dir.path())?;

    let stale = dir.path().join("pages/packages/removed/index.js");
    fs::create_dir_all(stale.parent().unwrap())?;
    fs::write(&stale, "stale")?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();

    assert!(!stale.exists());
    Ok(())
}

#[test]
fn build_fails_without_config() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));

    Ok(())
}

#[test]
fn build_fails_when_pattern_matches_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("pageforge.yml"),
        "site:\n  name: Empty\npaths:\n  packages:\n    - packages/*\n  wrappers: wrappers\n",
    )?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No packages matched"));

    Ok(())
}

#[test]
fn clean_removes_generated_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write_fixture(dir.path())?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();
    assert!(dir.path().join("pages").exists());
    assert!(dir.path().join("data").exists());

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("clean")
        .assert()
        .success();

    assert!(!dir.path().join("pages").exists());
    assert!(!dir.path().join("data").exists());
    Ok(())
}

#[test]
fn init_scaffolds_a_project() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pageforge initialized"));

    assert!(dir.path().join("pageforge.yml").is_file());
    assert!(dir.path().join("wrappers/package-home.js").is_file());
    assert!(dir.path().join("packages/sample/package.json").is_file());

    // An initialized project builds end to end.
    Command::cargo_bin("pageforge")?
        .current_dir(dir.path())
        .arg("build")
        .assert()
        .success();
    assert!(dir
        .path()
        .join("pages/packages/sample/index.js")
        .is_file());

    Ok(())
}
