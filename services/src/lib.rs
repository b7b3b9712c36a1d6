//! Small shared helpers used across the workspace.

pub mod uuid;
