//! Configuration module for the PDI editor
//!
//! This module handles user preferences, the backend account settings,
//! and JSON persistence to platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
