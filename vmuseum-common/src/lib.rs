//! # Virtual Museum Common Library
//!
//! Shared code for the virtual museum services:
//! - Error and result types
//! - Bootstrap configuration (TOML, environment, compiled defaults)
//! - Data file resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
