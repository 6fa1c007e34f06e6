// Domain module
// Pure types and rules with no I/O

pub mod branch_name;
pub mod event;
pub mod naming;
