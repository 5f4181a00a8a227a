//! # pageforge-core
//!
//! Core library for the pageforge documentation-site generator.
//!
//! The pipeline is a single batch run: the cleaner clears prior output, the
//! scanner reads package and docs directories, the assembler drives page
//! emission for every discovered unit, and the data writer persists the
//! resulting sitemap and metadata artifacts.

pub mod artifacts;
pub mod assembler;
pub mod cleaner;
pub mod config;
pub mod emitter;
pub mod frontmatter;
pub mod naming;
pub mod paths;
pub mod scanner;
pub mod templates;
pub mod tree;

pub use artifacts::persist;
pub use assembler::{Assembler, BuildOutput, ScannedDocsRoot};
pub use cleaner::clean;
pub use config::{ChangelogPolicy, Config};
pub use emitter::{FsSink, GeneratorConfig, PageEmitter, PageSink};
pub use frontmatter::{extract_metadata, Metadata};
pub use scanner::{
    scan_docs, scan_packages, DocEntry, ExampleDescriptor, PackageDescriptor, ScanOptions,
    SubExampleDescriptor,
};
pub use tree::{build_tree, FlatPage};
