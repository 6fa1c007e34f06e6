//! Configuration module
//!
//! This module handles loading branchprep configuration from TOML files.

pub mod loader;
pub mod schema;

pub use schema::{BranchConfig, Config, SigningConfig};
