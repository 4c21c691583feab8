// src/error.rs
//! Error types for installing page enhancements.

use docnav_traits::DomError;
use thiserror::Error;

/// The main error enum for enhancer configuration and installation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnhanceError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
    #[error("Page has already been enhanced")]
    AlreadyEnhanced,
}

impl From<serde_json::Error> for EnhanceError {
    fn from(e: serde_json::Error) -> Self {
        EnhanceError::Config(e.to_string())
    }
}
