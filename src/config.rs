//! Configuration options for the swipedeck client

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Environment variable holding the backend base URL
pub const URL_ENV: &str = "SWIPEDECK_URL";

/// Environment variable holding the anonymous API key
pub const ANON_KEY_ENV: &str = "SWIPEDECK_ANON_KEY";

/// Configuration options for the swipedeck client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Collection holding user profiles
    pub users_collection: String,

    /// Record field that carries the user identity
    pub id_field: String,

    /// Minimum accepted password length for login and registration
    pub min_password_length: usize,

    /// The request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            users_collection: "users".to_string(),
            id_field: "uid".to_string(),
            min_password_length: 6,
            request_timeout: None,
            client_info: format!("swipedeck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientOptions {
    /// Set the users collection
    pub fn with_users_collection(mut self, value: &str) -> Self {
        self.users_collection = value.to_string();
        self
    }

    /// Set the identity field name
    pub fn with_id_field(mut self, value: &str) -> Self {
        self.id_field = value.to_string();
        self
    }

    /// Set the minimum password length
    pub fn with_min_password_length(mut self, value: usize) -> Self {
        self.min_password_length = value;
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}

/// Where the backend lives and how to identify to it
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Url,
    pub anon_key: String,
}

impl BackendConfig {
    /// Creates a new configuration, validating the URL and key.
    pub fn new(url_str: &str, anon_key: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        if anon_key.is_empty() {
            return Err(Error::config("anon key cannot be empty"));
        }
        Ok(Self {
            url,
            anon_key: anon_key.to_string(),
        })
    }

    /// Reads `SWIPEDECK_URL` and `SWIPEDECK_ANON_KEY` from the environment.
    pub fn from_env() -> Result<Self> {
        let url_str = std::env::var(URL_ENV)
            .map_err(|_| Error::config(format!("{} environment variable not found", URL_ENV)))?;
        let anon_key = std::env::var(ANON_KEY_ENV).map_err(|_| {
            Error::config(format!("{} environment variable not found", ANON_KEY_ENV))
        })?;
        Self::new(&url_str, &anon_key)
    }

    /// Base URL without a trailing slash, ready for path concatenation
    pub fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}
