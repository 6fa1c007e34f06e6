// Command handlers module
// This module contains all CLI command implementations

pub mod prepare;
pub mod validate;
