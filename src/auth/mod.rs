//! Authentication against the identity provider

mod session;
mod types;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::Fetch;

pub use session::*;
pub use types::*;

/// The identity provider as seen by the rest of the crate
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// User id of the active session, `None` when signed out or expired
    fn current_session_user_id(&self) -> Option<String>;

    /// Bearer token for data requests made on behalf of the session
    fn access_token(&self) -> Option<String> {
        None
    }

    /// Sign in with email and password
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session>;

    /// Register a new account; the session is absent while confirmation is pending
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>>;

    /// End the active session
    async fn sign_out(&self) -> Result<()>;
}

/// Client-side rejections of credentials become `Error::Auth`
fn rejected(err: Error) -> Error {
    match err {
        Error::Transport { status, message } if (400..500).contains(&status) => {
            Error::Auth(message)
        }
        other => other,
    }
}

/// Identity provider speaking the GoTrue REST protocol
pub struct RestIdentityProvider {
    /// The base URL for the backend
    url: String,

    /// The anonymous API key
    key: String,

    /// HTTP client used for requests
    client: Client,

    /// The current session
    session: Arc<RwLock<Option<Session>>>,

    /// Client options
    options: ClientOptions,
}

impl RestIdentityProvider {
    /// Create a new identity provider client
    pub fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client,
            session: Arc::new(RwLock::new(None)),
            options,
        }
    }

    fn get_auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    /// Get the current session
    pub fn get_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Set the session
    pub fn set_session(&self, session: Option<Session>) {
        let mut current = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = session;
    }

    async fn post_credentials(&self, path: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let url = self.get_auth_url(path);

        Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .json(&Credentials { email, password })?
            .execute::<AuthResponse>()
            .await
            .map_err(rejected)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    fn current_session_user_id(&self) -> Option<String> {
        self.get_session()
            .filter(|session| !session.is_expired())
            .map(|session| session.user_id)
    }

    fn access_token(&self) -> Option<String> {
        self.get_session()
            .filter(|session| !session.is_expired())
            .map(|session| session.access_token)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let response = match self
            .post_credentials("/token?grant_type=password", email, password)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("Sign in rejected for {}: {}", email, err);
                return Err(err);
            }
        };

        let session = response
            .into_session()
            .ok_or_else(|| Error::auth("token response carried no session"))?;

        info!("Signed in as {}", session.user_id);
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let response = self.post_credentials("/signup", email, password).await?;

        let session = response.into_session();
        match &session {
            Some(session) => {
                info!("Registered and signed in as {}", session.user_id);
                self.set_session(Some(session.clone()));
            }
            None => info!("Registered {}; awaiting confirmation", email),
        }
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let token = match self.get_session() {
            Some(session) => session.access_token,
            None => return Err(Error::NotAuthenticated),
        };

        // The local session goes regardless of what the backend says.
        self.set_session(None);
        info!("Signed out");

        let url = self.get_auth_url("/logout");
        Fetch::post(&self.client, &url)
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .bearer_auth(&token)
            .execute_checked()
            .await?;

        Ok(())
    }
}
