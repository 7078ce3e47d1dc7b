//! Configuration for the MentorLink client

use std::time::Duration;
use url::Url;

use crate::error::Error;

/// Configuration options for the MentorLink client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to every remote call
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }
}

/// Validated connection settings, usually loaded from the environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: Url,
    pub key: String,
}

impl ClientConfig {
    /// Create a new configuration, validating the URL
    pub fn new(url_str: &str, key: String) -> Result<Self, Error> {
        let url = Url::parse(url_str)?;
        if key.is_empty() {
            return Err(Error::Config("api key cannot be empty".to_string()));
        }
        Ok(Self { url, key })
    }

    /// Attempt to create configuration from environment variables
    pub fn from_env() -> Result<Self, Error> {
        let url_str = std::env::var("MENTORLINK_URL").map_err(|_| {
            Error::Config("MENTORLINK_URL environment variable not found".to_string())
        })?;
        let key = std::env::var("MENTORLINK_KEY").map_err(|_| {
            Error::Config("MENTORLINK_KEY environment variable not found".to_string())
        })?;
        Self::new(&url_str, key)
    }
}
