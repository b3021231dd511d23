//! Core config, errors, and the doctor system prompt for voxdoc.

pub mod config;
pub mod error;
pub mod prompt;

pub use error::{Result, VoxdocError};
