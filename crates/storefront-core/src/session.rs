use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Mock authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        name: String,
        email: String,
    },
}

/// Identity handed out by every successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionIdentity {
    pub name: String,
    pub email: String,
}

impl Default for SessionIdentity {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }
}

/// Validated sign-in form contents. The password is checked and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
}

impl Credentials {
    /// Both fields must be non-empty after trimming.
    pub fn new(email: impl Into<String>, password: &str) -> Result<Self, StoreError> {
        let email = email.into();
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(StoreError::EmptyCredentials);
        }
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Holds the current session. Login always succeeds with the canned identity.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    identity: SessionIdentity,
    current: Session,
}

impl SessionManager {
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            identity,
            current: Session::Anonymous,
        }
    }

    /// Sign in. The credential contents are not checked against anything.
    pub fn login(&mut self, _credentials: &Credentials) -> &Session {
        self.current = Session::Authenticated {
            name: self.identity.name.clone(),
            email: self.identity.email.clone(),
        };
        &self.current
    }

    pub fn logout(&mut self) {
        self.current = Session::Anonymous;
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current, Session::Authenticated { .. })
    }
}
