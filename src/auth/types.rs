//! Wire types for the identity provider

use serde::{Deserialize, Serialize};

use crate::auth::Session;

/// Email/password pair sent to the token and signup endpoints
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// The account attached to an auth response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// The user ID
    pub id: String,

    /// The user's email address
    pub email: Option<String>,
}

/// Authentication response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    /// The session carried by this response, if tokens were issued.
    ///
    /// Signups that still await email confirmation carry none.
    pub fn into_session(self) -> Option<Session> {
        let access_token = self.access_token?;
        let user = self.user?;
        let mut session = Session::new(
            access_token,
            self.refresh_token.unwrap_or_default(),
            user.id,
            self.expires_in.unwrap_or(3600),
        );
        if let Some(token_type) = self.token_type {
            session.token_type = token_type;
        }
        if self.expires_at.is_some() {
            session.expires_at = self.expires_at;
        }
        Some(session)
    }
}
