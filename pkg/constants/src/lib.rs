//! Centralized constants for the grr project.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod mimir;
pub mod paths;
pub mod resource;
