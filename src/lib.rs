//! swipedeck
//!
//! Client core for a swipe-style dating app: the candidate deck pipeline,
//! login form validation and submission, and the session gate in front of
//! both. Authentication and storage are external collaborators reached
//! through the [`auth::IdentityProvider`] and [`store::DocumentStore`]
//! traits; REST implementations of both ship with the crate.

pub mod auth;
pub mod binding;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod login;
pub mod matching;
pub mod models;
pub mod pipeline;
pub mod profile;
pub mod store;
pub mod validation;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::RestIdentityProvider;
use crate::config::{BackendConfig, ClientOptions};
use crate::context::SessionContext;
use crate::error::Result;
use crate::login::LoginFlow;
use crate::pipeline::CandidatePipeline;
use crate::store::RestDocumentStore;
use crate::validation::FormValidator;

/// The main entry point, wired to a REST backend
pub struct SwipeDeck {
    /// Where the backend lives
    pub config: BackendConfig,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    identity: Arc<RestIdentityProvider>,
    store: Arc<RestDocumentStore>,
}

impl SwipeDeck {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use swipedeck::{config::BackendConfig, SwipeDeck};
    ///
    /// let config = BackendConfig::new("https://your-project.example.com", "your-anon-key").unwrap();
    /// let deck = SwipeDeck::new(config).unwrap();
    /// ```
    pub fn new(config: BackendConfig) -> Result<Self> {
        Self::new_with_options(config, ClientOptions::default())
    }

    /// Create a new client with custom options
    pub fn new_with_options(config: BackendConfig, options: ClientOptions) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let base_url = config.base_url();
        let identity = Arc::new(RestIdentityProvider::new(
            &base_url,
            &config.anon_key,
            http_client.clone(),
            options.clone(),
        ));
        let store = Arc::new(
            RestDocumentStore::new(
                &base_url,
                &config.anon_key,
                http_client.clone(),
                options.clone(),
            )
            .with_identity(identity.clone()),
        );

        Ok(Self {
            config,
            http_client,
            options,
            identity,
            store,
        })
    }

    /// Create a client from `SWIPEDECK_URL` and `SWIPEDECK_ANON_KEY`
    pub fn from_env() -> Result<Self> {
        Self::new(BackendConfig::from_env()?)
    }

    /// The identity provider, for sign in, sign up and sign out
    pub fn identity(&self) -> &RestIdentityProvider {
        &self.identity
    }

    /// The document store
    pub fn store(&self) -> &RestDocumentStore {
        &self.store
    }

    /// Collaborators to pass into the pipeline, gate and profile editor
    pub fn context(&self) -> SessionContext {
        SessionContext::new(self.identity.clone(), self.store.clone(), self.options.clone())
    }

    /// A fresh, idle candidate pipeline
    pub fn pipeline(&self) -> CandidatePipeline {
        CandidatePipeline::new(&self.options)
    }

    /// A login flow using the configured password policy
    pub fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(FormValidator::new(self.options.min_password_length))
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{IdentityProvider, Session};
    pub use crate::binding::Binding;
    pub use crate::config::{BackendConfig, ClientOptions};
    pub use crate::context::SessionContext;
    pub use crate::error::{Error, Result};
    pub use crate::gate::{GateDecision, SessionGate};
    pub use crate::login::LoginFlow;
    pub use crate::models::{CardViewModel, User};
    pub use crate::pipeline::{CandidatePipeline, PipelineState};
    pub use crate::profile::ProfileEditor;
    pub use crate::store::{DocumentQuery, DocumentStore, Record};
    pub use crate::SwipeDeck;
}
