//! MentorLink Rust Client Library
//!
//! A Rust client library for the MentorLink peer-mentoring platform,
//! providing access to the person directory, session scheduling, and preset
//! schedule services.

pub mod config;
pub mod error;

use reqwest::Client;

use crate::config::ClientOptions;
use crate::error::Error;

pub use mentorlink_rust_directory as directory;
pub use mentorlink_rust_presets as presets;
pub use mentorlink_rust_scheduling as scheduling;

use mentorlink_rust_directory::DirectoryClient;
use mentorlink_rust_presets::{PresetScheduleClient, PresetScheduleManager};
use mentorlink_rust_scheduling::{ActionCoordinator, SchedulingClient};

/// The main entry point for the MentorLink Rust client
pub struct MentorLink {
    /// The base URL for the MentorLink backend
    pub url: String,
    /// The API key for the MentorLink backend
    pub key: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl MentorLink {
    /// Create a new MentorLink client
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of your MentorLink backend
    /// * `api_key` - The API key for your MentorLink backend
    ///
    /// # Example
    ///
    /// ```
    /// use mentorlink_rust::MentorLink;
    ///
    /// let mentorlink = MentorLink::new("https://api.mentorlink.example.com", "your-api-key");
    /// ```
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self::new_with_options(base_url, api_key, ClientOptions::default())
    }

    /// Create a new MentorLink client with custom options
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of your MentorLink backend
    /// * `api_key` - The API key for your MentorLink backend
    /// * `options` - Custom client options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use mentorlink_rust::{MentorLink, config::ClientOptions};
    ///
    /// let options = ClientOptions::default()
    ///     .with_request_timeout(Some(Duration::from_secs(10)));
    /// let mentorlink = MentorLink::new_with_options(
    ///     "https://api.mentorlink.example.com",
    ///     "your-api-key",
    ///     options
    /// );
    /// ```
    pub fn new_with_options(base_url: &str, api_key: &str, options: ClientOptions) -> Self {
        let http_client = match options.request_timeout {
            Some(timeout) => Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            None => Client::new(),
        };

        Self {
            url: base_url.trim_end_matches('/').to_string(),
            key: api_key.to_string(),
            http_client,
            options,
        }
    }

    /// Create a client from the `MENTORLINK_URL` and `MENTORLINK_KEY`
    /// environment variables, validating the URL
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mentorlink_rust::MentorLink;
    ///
    /// let mentorlink = MentorLink::from_env().expect("MENTORLINK_URL and MENTORLINK_KEY must be set");
    /// ```
    pub fn from_env() -> Result<Self, Error> {
        let config = config::ClientConfig::from_env()?;
        Ok(Self::new(config.url.as_str(), &config.key))
    }

    /// Create a directory client for profile listing and identity
    /// reconciliation
    ///
    /// # Example
    ///
    /// ```
    /// use mentorlink_rust::MentorLink;
    ///
    /// let mentorlink = MentorLink::new("https://api.mentorlink.example.com", "your-api-key");
    /// let directory = mentorlink.directory();
    /// ```
    pub fn directory(&self) -> DirectoryClient {
        DirectoryClient::new(&self.url, &self.key, self.http_client.clone())
    }

    /// Create an action coordinator for session lifecycle operations
    ///
    /// Each coordinator owns its session store exclusively; create one per
    /// view and discard it when the view goes away.
    ///
    /// # Example
    ///
    /// ```
    /// use mentorlink_rust::MentorLink;
    ///
    /// let mentorlink = MentorLink::new("https://api.mentorlink.example.com", "your-api-key");
    /// let coordinator = mentorlink.scheduling();
    /// ```
    pub fn scheduling(&self) -> ActionCoordinator {
        ActionCoordinator::new(SchedulingClient::new(
            &self.url,
            &self.key,
            self.http_client.clone(),
        ))
    }

    /// Create a preset schedule manager scoped to one mentor
    ///
    /// # Arguments
    ///
    /// * `mentor_id` - The mentor whose templates the manager owns
    ///
    /// # Example
    ///
    /// ```
    /// use mentorlink_rust::MentorLink;
    ///
    /// let mentorlink = MentorLink::new("https://api.mentorlink.example.com", "your-api-key");
    /// let presets = mentorlink.presets("mentor-1");
    /// ```
    pub fn presets(&self, mentor_id: &str) -> PresetScheduleManager {
        PresetScheduleManager::new(
            PresetScheduleClient::new(&self.url, &self.key, self.http_client.clone()),
            mentor_id,
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::MentorLink;
}
