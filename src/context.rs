//! Collaborators handed to every session-bound operation

use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::config::ClientOptions;
use crate::store::DocumentStore;

/// Identity provider, document store and options for one client.
///
/// Cheap to clone; pass it to the pipeline, gate and editors instead of
/// reaching for globals.
#[derive(Clone)]
pub struct SessionContext {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub options: ClientOptions,
}

impl SessionContext {
    /// Bundle the collaborators for one client
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn DocumentStore>,
        options: ClientOptions,
    ) -> Self {
        Self {
            identity,
            store,
            options,
        }
    }

    /// User id of the active session, re-read on every call
    pub fn current_user_id(&self) -> Option<String> {
        self.identity.current_session_user_id()
    }
}
