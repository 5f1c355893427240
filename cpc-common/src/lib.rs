//! # CPC Common Library
//!
//! Shared code for the charity project catalog tools including:
//! - Canonical project record types
//! - Configuration loading and data folder resolution
//! - Error types
//! - Date helpers

pub mod config;
pub mod error;
pub mod project;
pub mod time;

pub use error::{Error, Result};
pub use project::{Lenient, Material, Need, Organiser, Pattern, Project};
