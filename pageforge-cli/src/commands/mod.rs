//! CLI command implementations.

mod build;
mod clean;
mod init;

pub use build::build_site;
pub use clean::clean_output;
pub use init::init_project;
