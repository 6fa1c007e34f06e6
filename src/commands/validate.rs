//! Validate command - Check branch names against the safety rules

use anyhow::Result;

use crate::color;
use crate::domain::branch_name;

/// Validate each name, stopping at the first rejected one
///
/// Accepted names are echoed to stdout.
///
/// # Errors
/// Returns the validation error of the first rejected name
pub fn cmd_validate(names: &[String], color_mode: color::ColorMode) -> Result<()> {
    for name in names {
        branch_name::validate(name)?;
        println!("{name}");
    }

    let message = match names.len() {
        1 => "Branch name is valid".to_string(),
        n => format!("All {n} branch names are valid"),
    };
    eprintln!("{}", color::success(color_mode, message));

    Ok(())
}
