//! Error handling for the MentorLink Rust client

use std::fmt;
use thiserror::Error;

/// Unified error type for the MentorLink Rust client
#[derive(Error, Debug)]
pub enum Error {
    /// Person directory and identity reconciliation errors
    #[error("Directory error: {0}")]
    Directory(#[from] mentorlink_rust_directory::DirectoryError),

    /// Session lifecycle errors
    #[error("Scheduling error: {0}")]
    Scheduling(#[from] mentorlink_rust_scheduling::SchedulingError),

    /// Preset schedule errors
    #[error("Preset error: {0}")]
    Preset(#[from] mentorlink_rust_presets::PresetError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
