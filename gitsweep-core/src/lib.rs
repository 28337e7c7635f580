//! gitsweep core library — domain types, configuration registry, errors.
//!
//! - [`types`] — newtypes and the project descriptor
//! - [`error`] — [`ConfigError`]
//! - [`config`] — YAML registry load / validation

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{LocalName, ProjectDescriptor, RepoName};
