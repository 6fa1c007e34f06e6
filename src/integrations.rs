// External integrations module
// This module contains integrations with external tools

pub mod git;
pub mod outputs;

// GitHub integration
pub mod gh;
